use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_READ_CHUNK_BYTES: usize = 8192;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub payload: PayloadConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The external benchmark program to run on each signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayloadConfig {
    /// Program to execute (e.g., "./long-benchmark").
    #[serde(default)]
    pub command: Option<String>,
    /// Arguments passed to the program.
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory; inherits the worker's when unset.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    /// Extra environment variables for the program.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// How payload output is read before line splitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Size of each stdout read from the payload (default: 8192).
    #[serde(default = "default_read_chunk_bytes")]
    pub read_chunk_bytes: usize,
}

fn default_read_chunk_bytes() -> usize {
    DEFAULT_READ_CHUNK_BYTES
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            read_chunk_bytes: default_read_chunk_bytes(),
        }
    }
}
