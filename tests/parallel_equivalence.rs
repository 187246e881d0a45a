#![cfg(feature = "parallel")]

use uhv::utils::{digest_many, parallelism_enabled, set_parallelism};
use uhv::DEFAULT_SECRET;

#[test]
fn batch_parallel_matches_sequential() {
    let messages: Vec<String> = (0..500).map(|i| format!("message #{i} {}", "x".repeat(i % 97))).collect();

    let baseline = {
        let _guard = set_parallelism(false);
        assert!(!parallelism_enabled());
        digest_many(&messages, DEFAULT_SECRET.as_bytes())
    };
    let parallel = {
        let _guard = set_parallelism(true);
        digest_many(&messages, DEFAULT_SECRET.as_bytes())
    };

    assert_eq!(baseline.len(), messages.len());
    assert_eq!(baseline, parallel);
    assert_eq!(parallel[0], uhv::digest(&messages[0], DEFAULT_SECRET));
}
