use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use streaming_insights::{
    config::Config,
    dataset::{load_rows_from_path, partition_by_kind},
    observability::{self, LogFormat},
    platform::Platform,
    report::ReportBuilder,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dataset file: a JSON array of titles
    #[arg(long, short, env = "INSIGHTS_INPUT")]
    input: PathBuf,

    /// Attach the branding of this platform to the report
    #[arg(long, env = "INSIGHTS_PLATFORM")]
    platform: Option<Platform>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Log format (json or text)
    #[arg(long, env = "INSIGHTS_LOG_FORMAT", default_value = "json")]
    log_format: LogFormat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    observability::init(cli.log_format).context("failed to initialize tracing")?;

    let config = Config::from_env().context("failed to load configuration")?;
    let rows = load_rows_from_path(&cli.input)
        .with_context(|| format!("failed to load dataset from {}", cli.input.display()))?;
    let (movies, shows) = partition_by_kind(rows);
    info!(movies = movies.len(), shows = shows.len(), "dataset partitioned");

    let report = ReportBuilder::new(config)
        .with_platform(cli.platform)
        .build(&movies, &shows)
        .context("failed to build dashboard report")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut out, &report)?;
    } else {
        serde_json::to_writer(&mut out, &report)?;
    }
    writeln!(out)?;
    Ok(())
}
