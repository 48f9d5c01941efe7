mod sink;
mod types;

pub use sink::{ChannelSink, JsonLinesSink, MessageSink};
pub use types::{IpcError, RunSignal, WorkerMessage};

use tokio::sync::mpsc;

const SIGNAL_BUFFER: usize = 16;

/// In-process wiring between a host and a worker.
pub struct IpcLayer;

impl IpcLayer {
    pub fn new() -> (HostEndpoint, WorkerEndpoint) {
        let (signal_sender, signal_receiver) = mpsc::channel(SIGNAL_BUFFER);
        let (message_sender, message_receiver) = mpsc::unbounded_channel();
        (
            HostEndpoint {
                signals: signal_sender,
                messages: message_receiver,
            },
            WorkerEndpoint {
                signals: signal_receiver,
                sink: ChannelSink::new(message_sender),
            },
        )
    }
}

/// Host side: sends run signals, receives worker messages.
pub struct HostEndpoint {
    signals: mpsc::Sender<RunSignal>,
    messages: mpsc::UnboundedReceiver<WorkerMessage>,
}

impl HostEndpoint {
    pub async fn request_run(&self) -> Result<(), IpcError> {
        self.signals
            .send(RunSignal)
            .await
            .map_err(|_| IpcError::Disconnected)
    }

    /// Next message from the worker, or `None` once the worker side is gone.
    pub async fn recv(&mut self) -> Option<WorkerMessage> {
        self.messages.recv().await
    }

    /// Stop sending signals while still draining messages.
    pub fn close_signals(self) -> mpsc::UnboundedReceiver<WorkerMessage> {
        self.messages
    }
}

/// Worker side: the signal stream and the sink messages are posted to.
pub struct WorkerEndpoint {
    pub signals: mpsc::Receiver<RunSignal>,
    pub sink: ChannelSink,
}
