//! Benchmark entry points.
//!
//! A payload is a single zero-argument entry point that writes its output
//! through the [`OutputHook`] it is handed.

mod process;

pub use process::ProcessPayload;

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

use crate::output::OutputHook;

/// Errors raised by a child-process payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("No payload command configured (set [payload] command or pass one after --)")]
    MissingCommand,

    #[error("Failed to spawn payload '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Payload '{command}' has no stdout pipe")]
    MissingStdout { command: String },

    #[error("Failed to read payload output: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to wait for payload '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Payload '{command}' exited with {status}")]
    Exit { command: String, status: ExitStatus },

    #[error("Payload working directory '{0}' does not exist")]
    MissingCwd(PathBuf),
}

/// The benchmark's entry point.
pub trait BenchmarkPayload {
    /// Name used in log lines.
    fn name(&self) -> &str;

    /// Run the benchmark to completion, writing output through `out`.
    fn main(&mut self, out: &mut dyn OutputHook) -> anyhow::Result<()>;
}

impl<P: BenchmarkPayload + ?Sized> BenchmarkPayload for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn main(&mut self, out: &mut dyn OutputHook) -> anyhow::Result<()> {
        (**self).main(out)
    }
}

/// Payload backed by a closure.
pub struct FnPayload<F> {
    name: String,
    entry: F,
}

impl<F> FnPayload<F>
where
    F: FnMut(&mut dyn OutputHook) -> anyhow::Result<()>,
{
    pub fn new(name: impl Into<String>, entry: F) -> Self {
        Self {
            name: name.into(),
            entry,
        }
    }
}

impl<F> BenchmarkPayload for FnPayload<F>
where
    F: FnMut(&mut dyn OutputHook) -> anyhow::Result<()>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn main(&mut self, out: &mut dyn OutputHook) -> anyhow::Result<()> {
        (self.entry)(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::WorkerMessage;
    use crate::output::LineForwarder;

    #[test]
    fn fn_payload_writes_through_hook() {
        let mut payload = FnPayload::new("closure", |out: &mut dyn OutputHook| {
            out.put_stdout("Start main thread\n")?;
            out.put_stdout("Finished")?;
            Ok(())
        });
        let mut forwarder = LineForwarder::new(Vec::new());

        payload.main(&mut forwarder).expect("payload runs");

        assert_eq!(payload.name(), "closure");
        assert_eq!(
            forwarder.sink(),
            &vec![WorkerMessage::stdout("Start main thread")]
        );
        assert_eq!(forwarder.pending(), "Finished");
    }

    #[test]
    fn boxed_payload_delegates() {
        let mut payload: Box<dyn BenchmarkPayload> =
            Box::new(FnPayload::new("boxed", |_out: &mut dyn OutputHook| Ok(())));
        let mut forwarder = LineForwarder::new(Vec::new());

        payload.main(&mut forwarder).expect("payload runs");
        assert_eq!(payload.name(), "boxed");
    }
}
