//! Benchmarking and batch helpers built on the digest engine.

pub mod bench;
pub mod parallel;

pub use bench::{run_benchmark, standard_messages, BenchmarkReport, MessageTiming};
pub use parallel::{
    digest_many, parallelism_enabled, preferred_chunk_size, set_parallelism, ParallelismGuard,
};
