//! hazardmap CLI - Interactive terminal front-end
//!
//! Wires the EONET client, the map state, and the terminal surface into a
//! coordinator, then feeds it commands read from stdin.

mod cli;
mod input;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use console::style;
use hazardmap_app::{Command, Coordinator, CoordinatorHandle, CoordinatorOptions};
use hazardmap_client::EonetClient;
use hazardmap_core::config::LayeredConfig;
use hazardmap_map::{MapState, TileSource};
use input::{parse_line, Input, USAGE};
use std::time::Duration;
use tabled::{settings::Style, Table, Tabled};
use terminal::TerminalSurface;
use tokio::io::{AsyncBufReadExt, BufReader};

fn main() -> Result<()> {
    // Logs go to stderr so they do not interleave with the rendered views
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hazardmap=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if cli.show_config {
        print_config(&config);
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(config));
    // The stdin reader may still be blocked on a read
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = &cli.config {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }
    let mut config = config.load_from_env();
    config.update_from_cli(cli.overrides());
    Ok(config)
}

fn print_config(config: &LayeredConfig) {
    #[derive(Tabled)]
    struct ConfigRow {
        #[tabled(rename = "Key")]
        key: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Source")]
        source: String,
    }

    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    println!(
        "{} CLI arguments > Environment variables > Config file > Defaults",
        style("ℹ").blue().bold()
    );
}

async fn run(config: LayeredConfig) -> Result<()> {
    let client = EonetClient::with_timeout(
        config.api_base_url.value.clone(),
        Duration::from_secs(config.timeout_secs.value),
    )
    .context("Failed to create API client")?;
    let map = MapState::new(TileSource::new(config.tile_url.value.clone()));
    println!("{} {}", style("Tiles:").dim(), style(&map.tiles.attribution).dim());

    let mut coordinator =
        Coordinator::new(client, TerminalSurface::stdout(), map, CoordinatorOptions::from(&config));
    coordinator.init().await.context("Failed to load categories")?;

    println!("{}", style("Type 'help' for commands.").dim());
    let reader = tokio::spawn(read_commands(coordinator.handle()));

    coordinator.run().await;
    reader.abort();
    Ok(())
}

async fn read_commands(handle: CoordinatorHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input");
                break;
            }
        };

        match parse_line(&line) {
            Ok(Some(Input::Command(command))) => {
                let shutdown = command == Command::Shutdown;
                if !handle.send(command) || shutdown {
                    return;
                }
            }
            Ok(Some(Input::Help)) => println!("{}", USAGE),
            Ok(None) => {}
            Err(e) => eprintln!("{} {}", style("⚠").yellow().bold(), e),
        }
    }
    // End of input
    handle.send(Command::Shutdown);
}
