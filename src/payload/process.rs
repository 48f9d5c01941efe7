use std::collections::HashMap;
use std::io::{ErrorKind, Read};
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::config::Config;
use crate::output::{OutputHook, Utf8Decoder};
use crate::payload::{BenchmarkPayload, PayloadError};

/// Runs an external benchmark program and forwards its stdout.
///
/// stdin is closed, stderr is inherited, stdout is read in chunks of
/// `read_chunk_bytes` and each chunk is handed to the output hook as one
/// write.
#[derive(Debug, Clone)]
pub struct ProcessPayload {
    command: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: HashMap<String, String>,
    read_chunk_bytes: usize,
}

impl ProcessPayload {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            cwd: None,
            env: HashMap::new(),
            read_chunk_bytes: crate::config::DEFAULT_READ_CHUNK_BYTES,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, PayloadError> {
        let command = config
            .payload
            .command
            .clone()
            .ok_or(PayloadError::MissingCommand)?;

        Ok(Self {
            command,
            args: config.payload.args.clone(),
            cwd: config.payload.cwd.clone(),
            env: config.payload.env.clone(),
            read_chunk_bytes: config.output.read_chunk_bytes,
        })
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_read_chunk_bytes(mut self, bytes: usize) -> Self {
        self.read_chunk_bytes = bytes.max(1);
        self
    }

    fn spawn(&self) -> Result<Child, PayloadError> {
        if let Some(cwd) = &self.cwd {
            if !cwd.is_dir() {
                return Err(PayloadError::MissingCwd(cwd.clone()));
            }
        }

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        cmd.spawn().map_err(|source| PayloadError::Spawn {
            command: self.command.clone(),
            source,
        })
    }

    fn pump(&self, stdout: &mut ChildStdout, out: &mut dyn OutputHook) -> anyhow::Result<()> {
        let mut decoder = Utf8Decoder::new();
        let mut buffer = vec![0u8; self.read_chunk_bytes];

        loop {
            let count = match stdout.read(&mut buffer) {
                Ok(0) => break,
                Ok(count) => count,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(PayloadError::Read(e).into()),
            };
            let text = decoder.decode(&buffer[..count]);
            if !text.is_empty() {
                out.put_stdout(&text)?;
            }
        }

        if decoder.has_carry() {
            out.put_stdout(&decoder.finish())?;
        }
        Ok(())
    }
}

impl BenchmarkPayload for ProcessPayload {
    fn name(&self) -> &str {
        &self.command
    }

    fn main(&mut self, out: &mut dyn OutputHook) -> anyhow::Result<()> {
        let mut child = self.spawn()?;
        let Some(mut stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(PayloadError::MissingStdout {
                command: self.command.clone(),
            }
            .into());
        };

        if let Err(e) = self.pump(&mut stdout, out) {
            tracing::warn!(payload = %self.command, error = %e, "Output forwarding failed, killing payload");
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }
        drop(stdout);

        let status = child.wait().map_err(|source| PayloadError::Wait {
            command: self.command.clone(),
            source,
        })?;
        tracing::debug!(payload = %self.command, %status, "Payload exited");

        if !status.success() {
            return Err(PayloadError::Exit {
                command: self.command.clone(),
                status,
            }
            .into());
        }
        Ok(())
    }
}
