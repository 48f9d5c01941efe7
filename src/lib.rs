//! Benchmark worker adapter.
//!
//! Runs a benchmark payload whenever the host sends a run signal, forwards
//! the payload's output to the host one `stdout` message per completed line,
//! and posts `done` when the entry point returns.

pub mod cli;
pub mod config;
pub mod ipc;
pub mod logging;
pub mod output;
pub mod payload;
pub mod trigger;
pub mod worker;
