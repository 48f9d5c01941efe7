mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, OutputConfig, PayloadConfig, DEFAULT_READ_CHUNK_BYTES};
