//! Run trigger: one benchmark execution per run signal.

use std::time::Instant;

use crate::ipc::{MessageSink, WorkerMessage};
use crate::output::LineForwarder;
use crate::payload::BenchmarkPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Invoked by the host dispatch loop once per run signal.
pub trait RunRequestHandler {
    fn on_run_requested(&mut self) -> anyhow::Result<()>;
}

impl<H: RunRequestHandler + ?Sized> RunRequestHandler for &mut H {
    fn on_run_requested(&mut self) -> anyhow::Result<()> {
        (**self).on_run_requested()
    }
}

/// Owns the payload and the forwarder its output flows through.
pub struct RunTrigger<P, S> {
    payload: P,
    forwarder: LineForwarder<S>,
    state: RunState,
    completed_runs: u64,
}

impl<P, S> RunTrigger<P, S>
where
    P: BenchmarkPayload,
    S: MessageSink,
{
    pub fn new(payload: P, sink: S) -> Self {
        Self {
            payload,
            forwarder: LineForwarder::new(sink),
            state: RunState::Idle,
            completed_runs: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn completed_runs(&self) -> u64 {
        self.completed_runs
    }

    pub fn forwarder(&self) -> &LineForwarder<S> {
        &self.forwarder
    }
}

impl<P, S> RunRequestHandler for RunTrigger<P, S>
where
    P: BenchmarkPayload,
    S: MessageSink,
{
    /// Run the payload to completion, then post `done`.
    ///
    /// A payload failure propagates unchanged and no `done` is posted.
    fn on_run_requested(&mut self) -> anyhow::Result<()> {
        let mut state = scopeguard::guard(&mut self.state, |state| *state = RunState::Idle);
        **state = RunState::Running;

        tracing::info!(payload = self.payload.name(), "Run benchmark...");
        let started = Instant::now();

        self.payload.main(&mut self.forwarder)?;

        tracing::info!(
            payload = self.payload.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Benchmark finished"
        );
        self.forwarder.sink_mut().post(WorkerMessage::Done)?;
        self.completed_runs += 1;
        Ok(())
    }
}
