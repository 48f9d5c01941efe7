use benchworker::cli::Cli;
use benchworker::ipc::JsonLinesSink;
use benchworker::logging::init_tracing;
use benchworker::payload::ProcessPayload;
use benchworker::trigger::{RunRequestHandler, RunTrigger};
use benchworker::worker::serve_lines;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.apply(cli.load_config()?)?;
    let payload = ProcessPayload::from_config(&config)?;
    let mut trigger = RunTrigger::new(payload, JsonLinesSink::new(std::io::stdout()));

    if cli.once {
        trigger.on_run_requested()?;
        return Ok(());
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    serve_lines(stdin, &mut trigger).await?;
    Ok(())
}
