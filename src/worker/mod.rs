//! Host dispatch loops.
//!
//! Each loop waits for run signals and hands every one to the handler.
//! The handler runs synchronously inside the loop, so no signal is read
//! until the current run returns.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::ipc::RunSignal;
use crate::trigger::RunRequestHandler;

/// Serve run signals arriving one per line, e.g. on stdin.
///
/// Every frame is a run signal, an empty one included. Frames are never
/// decoded, so their content (UTF-8 or not) is ignored. Returns the number
/// of runs once the reader reaches EOF.
pub async fn serve_lines<R, H>(reader: R, handler: &mut H) -> anyhow::Result<u64>
where
    R: AsyncBufRead + Unpin,
    H: RunRequestHandler + ?Sized,
{
    tracing::info!("Worker started");

    let mut frames = reader.split(b'\n');
    let mut runs = 0;
    while let Some(mut frame) = frames.next_segment().await? {
        if frame.last() == Some(&b'\r') {
            frame.pop();
        }
        tracing::debug!(frame_bytes = frame.len(), "Run signal received");
        handler.on_run_requested()?;
        runs += 1;
    }

    tracing::info!(runs, "Signal stream closed");
    Ok(runs)
}

/// Serve run signals from an in-process host until every sender is dropped.
pub async fn serve_channel<H>(
    mut signals: mpsc::Receiver<RunSignal>,
    handler: &mut H,
) -> anyhow::Result<u64>
where
    H: RunRequestHandler + ?Sized,
{
    tracing::info!("Worker started");

    let mut runs = 0;
    while let Some(RunSignal) = signals.recv().await {
        handler.on_run_requested()?;
        runs += 1;
    }

    tracing::info!(runs, "Signal channel closed");
    Ok(runs)
}
