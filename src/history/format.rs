//! Field encodings used by the dApp's history download.
//!
//! The front-end stores `Date` objects, which `JSON.stringify` writes as ISO
//! 8601 strings with millisecond precision, and execution times formatted with
//! three decimals. Readers also accept plain numbers so documents that carry
//! epoch milliseconds or raw floats still load.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Iso(String),
    Millis(i64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MillisRepr {
    Text(String),
    Number(f64),
}

/// `DateTime<Utc>` as `2024-05-01T10:00:00.000Z`, or epoch milliseconds on read.
pub(super) mod iso_millis {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_iso(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match TimestampRepr::deserialize(deserializer)? {
            TimestampRepr::Iso(text) => DateTime::parse_from_rfc3339(text.trim())
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|err| D::Error::custom(format!("timestamp {text:?}: {err}"))),
            TimestampRepr::Millis(millis) => DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| D::Error::custom(format!("timestamp {millis} ms is out of range"))),
        }
    }
}

/// Milliseconds as the `toFixed(3)` string, or a bare number on read.
pub(super) mod fixed_millis {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{value:.3}"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match MillisRepr::deserialize(deserializer)? {
            MillisRepr::Text(text) => text
                .trim()
                .parse()
                .map_err(|err| D::Error::custom(format!("execution time {text:?}: {err}"))),
            MillisRepr::Number(value) => Ok(value),
        }
    }
}

/// Formats a timestamp the way `Date.prototype.toISOString` does.
pub fn format_iso(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "iso_millis")]
        at: DateTime<Utc>,
        #[serde(with = "fixed_millis")]
        took: f64,
    }

    #[test]
    fn writes_front_end_shapes() {
        let sample = Sample {
            at: DateTime::from_timestamp_millis(1_714_557_600_000).expect("in range"),
            took: 0.12,
        };
        let json = serde_json::to_string(&sample).expect("serialize");
        assert_eq!(json, r#"{"at":"2024-05-01T10:00:00.000Z","took":"0.120"}"#);
    }

    #[test]
    fn reads_strings_and_numbers() {
        let expected = DateTime::from_timestamp_millis(1_714_557_600_250).expect("in range");
        let from_text: Sample =
            serde_json::from_str(r#"{"at":"2024-05-01T10:00:00.250Z","took":"1.500"}"#)
                .expect("iso text");
        assert_eq!(from_text.at, expected);
        assert_eq!(from_text.took, 1.5);

        let from_numbers: Sample =
            serde_json::from_str(r#"{"at":1714557600250,"took":1.5}"#).expect("numbers");
        assert_eq!(from_numbers, from_text);

        let offset: Sample =
            serde_json::from_str(r#"{"at":"2024-05-01T12:00:00.250+02:00","took":"1.5"}"#)
                .expect("offset");
        assert_eq!(offset.at, expected);
    }

    #[test]
    fn rejects_unparseable_fields() {
        let err = serde_json::from_str::<Sample>(r#"{"at":"yesterday","took":"1"}"#)
            .expect_err("bad timestamp");
        assert!(err.to_string().contains("timestamp \"yesterday\""));

        let err = serde_json::from_str::<Sample>(r#"{"at":0,"took":"fast"}"#)
            .expect_err("bad duration");
        assert!(err.to_string().contains("execution time \"fast\""));
    }
}
