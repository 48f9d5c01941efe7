use std::io::Write;

use tokio::sync::mpsc;

use crate::ipc::types::{IpcError, WorkerMessage};

/// Destination for outbound worker messages (the host's `postMessage`).
pub trait MessageSink {
    fn post(&mut self, message: WorkerMessage) -> Result<(), IpcError>;
}

impl<S: MessageSink + ?Sized> MessageSink for &mut S {
    fn post(&mut self, message: WorkerMessage) -> Result<(), IpcError> {
        (**self).post(message)
    }
}

/// Records every posted message in order.
impl MessageSink for Vec<WorkerMessage> {
    fn post(&mut self, message: WorkerMessage) -> Result<(), IpcError> {
        self.push(message);
        Ok(())
    }
}

/// Writes one compact JSON object per line and flushes after each message.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink for JsonLinesSink<W> {
    fn post(&mut self, message: WorkerMessage) -> Result<(), IpcError> {
        serde_json::to_writer(&mut self.writer, &message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Sends messages to an in-process host over an unbounded channel.
#[derive(Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<WorkerMessage>,
}

impl ChannelSink {
    pub fn new(sender: mpsc::UnboundedSender<WorkerMessage>) -> Self {
        Self { sender }
    }
}

impl MessageSink for ChannelSink {
    fn post(&mut self, message: WorkerMessage) -> Result<(), IpcError> {
        self.sender
            .send(message)
            .map_err(|_| IpcError::Disconnected)
    }
}
