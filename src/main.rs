use anyhow::Context;
use artemis::pipeline::{self, RunOptions, Source};
use artemis_core::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "artemis",
    about = "Artemis — normalize auditd and Sysmon telemetry into standard events"
)]
struct Cli {
    /// Telemetry source to normalize.
    #[arg(long, value_enum)]
    source: Source,

    /// TOML config file layered over the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input file (audit log or Sysmon JSON lines). Overrides the config.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Mapping table. Overrides the config.
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Write JSON lines here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long)]
    agent_id: Option<String>,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(level: &str, file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    match file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(
        &config.logging.level,
        cli.log_file.as_ref().or(config.logging.file.as_ref()),
    )?;

    let mut options = RunOptions::from_config(cli.source, &config);
    if let Some(input) = cli.input {
        options.input = input;
    }
    if let Some(mapping) = cli.mapping {
        options.mapping = mapping;
    }
    if let Some(agent_id) = cli.agent_id {
        options.agent_id = agent_id;
    }
    tracing::debug!(?options, "starting run");

    let events = pipeline::run(&options, &config).await?;

    match cli.output {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            pipeline::write_json_lines(std::io::BufWriter::new(file), &events)?;
            tracing::info!(events = events.len(), path = %path.display(), "wrote standard events");
        }
        None => pipeline::write_json_lines(std::io::stdout().lock(), &events)?,
    }
    Ok(())
}
