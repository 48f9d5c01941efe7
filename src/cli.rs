use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};

#[derive(Debug, Parser)]
#[command(
    name = "benchworker",
    version,
    about = "Run a benchmark payload and forward its output line by line as JSON messages"
)]
pub struct Cli {
    /// Config file (default: <config dir>/benchworker/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run the benchmark once immediately instead of waiting for run signals on stdin
    #[arg(long)]
    pub once: bool,

    /// Bytes per read from the payload's stdout
    #[arg(long, value_name = "N")]
    pub chunk_bytes: Option<usize>,

    /// Payload command and arguments, overriding [payload] in the config
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    /// Load the config file this invocation points at.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// Layer command-line overrides on top of `config` and re-validate.
    pub fn apply(&self, mut config: Config) -> Result<Config, ConfigError> {
        if let Some((command, args)) = self.command.split_first() {
            config.payload.command = Some(command.clone());
            config.payload.args = args.to_vec();
        }
        if let Some(chunk_bytes) = self.chunk_bytes {
            config.output.read_chunk_bytes = chunk_bytes;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_command_overrides_config() {
        let cli = Cli::try_parse_from(["benchworker", "--", "./bench", "--runs", "100"])
            .expect("parse");
        let mut config = Config::default();
        config.payload.command = Some("old".to_string());
        config.payload.args = vec!["stale".to_string()];

        let config = cli.apply(config).expect("apply");

        assert_eq!(config.payload.command.as_deref(), Some("./bench"));
        assert_eq!(config.payload.args, vec!["--runs", "100"]);
    }

    #[test]
    fn config_command_kept_without_override() {
        let cli = Cli::try_parse_from(["benchworker", "--once"]).expect("parse");
        let mut config = Config::default();
        config.payload.command = Some("./bench".to_string());

        let config = cli.apply(config).expect("apply");

        assert!(cli.once);
        assert_eq!(config.payload.command.as_deref(), Some("./bench"));
    }

    #[test]
    fn zero_chunk_bytes_is_rejected() {
        let cli = Cli::try_parse_from(["benchworker", "--chunk-bytes", "0", "--", "sh"])
            .expect("parse");

        let result = cli.apply(Config::default());
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
