use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use uhv::config::DigestConfig;
use uhv::history::format_iso;
use uhv::utils::{run_benchmark, standard_messages};
use uhv::{verify, HashHistory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "uhv",
    about = "Compute and verify keyed message digests for the hash verification dApp",
    version
)]
struct Cli {
    /// JSON configuration file (`{"secret": "..."}`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Secret to mix into messages. Overrides UHV_SECRET and the config file.
    #[arg(long, value_name = "TEXT", global = true)]
    secret: Option<String>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Hash one or more messages.
    Hash {
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// Check a message against an expected digest.
    Verify {
        message: String,
        /// Expected 64-character hexadecimal digest.
        #[arg(long, value_name = "HEX")]
        expected: String,
    },
    /// Time the digest over the standard benchmark messages.
    Bench {
        #[arg(long, default_value_t = 100)]
        iterations: usize,
    },
    /// Recompute every digest in an exported history file.
    Audit {
        #[arg(value_name = "HISTORY_JSON")]
        path: PathBuf,
    },
}

impl Cli {
    fn resolve_config(&self) -> Result<DigestConfig> {
        let base = match &self.config {
            Some(path) => DigestConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => DigestConfig::default(),
        };
        let mut config = base.with_env_overrides();
        if let Some(secret) = &self.secret {
            config.secret = secret.clone();
        }
        Ok(config)
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uhv=info"));
    let fmt = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => fmt.json().init(),
        LogFormat::Text => fmt.init(),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);
    let config = cli.resolve_config()?;

    match cli.command {
        Command::Hash { messages } => {
            let mut history = HashHistory::new();
            for message in &messages {
                let record = history.record(message, &config.secret);
                println!("hash:        {}", record.hash);
                println!("input size:  {} bytes", record.input_size);
                println!(
                    "output size: {} bytes ({} bits)",
                    record.output_size,
                    record.output_size * 8
                );
                println!("time:        {:.3} ms", record.elapsed_ms);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { message, expected } => {
            let outcome = verify(&message, &config.secret, &expected);
            println!("computed: {}", outcome.computed);
            match outcome.expected {
                Some(expected) => println!("expected: {expected}"),
                None => println!("expected: <not a 64-character hex digest>"),
            }
            if outcome.matched {
                println!("match");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("mismatch");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Bench { iterations } => {
            let messages = standard_messages();
            let report = run_benchmark(&messages, config.secret_bytes(), iterations);
            for (index, result) in report.results.iter().enumerate() {
                println!(
                    "test {}: {} bytes, avg {:.3} ms, {:.2} bytes/sec",
                    index + 1,
                    result.message_len,
                    result.avg_ms,
                    result.throughput
                );
            }
            println!("total time:      {:.3} ms", report.total_ms);
            println!("average per hash: {:.3} ms", report.avg_ms_per_hash());
            println!("hashes per second: {:.2}", report.hashes_per_second());
            Ok(ExitCode::SUCCESS)
        }
        Command::Audit { path } => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading history from {}", path.display()))?;
            let history = HashHistory::import_json(&raw)
                .with_context(|| format!("parsing history from {}", path.display()))?;
            let report = history.validate_integrity();
            for index in &report.corrupted {
                let record = &history.records()[*index];
                println!(
                    "#{}: corrupted (recorded {}, stored {})",
                    index + 1,
                    format_iso(&record.timestamp),
                    record.hash
                );
            }
            println!("valid hashes:     {}", report.valid);
            println!("corrupted hashes: {}", report.corrupted.len());
            println!("total integrity:  {:.2}%", report.percent_valid());
            tracing::info!(records = report.total(), clean = report.is_clean(), "audit finished");
            Ok(if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
