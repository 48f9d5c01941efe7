use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while delivering a message to the host.
#[derive(Debug, Error)]
pub enum IpcError {
    #[error("IPC channel disconnected")]
    Disconnected,

    #[error("Failed to write message to host: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Message posted from the worker to its host.
///
/// Serialized as `{"type":"stdout","data":"..."}` or `{"type":"done"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerMessage {
    /// One completed line of payload output, without its newline.
    Stdout { data: String },
    /// The benchmark entry point returned.
    Done,
}

impl WorkerMessage {
    pub fn stdout(data: impl Into<String>) -> Self {
        WorkerMessage::Stdout { data: data.into() }
    }
}

/// Inbound "start the benchmark run" signal. Carries nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSignal;
