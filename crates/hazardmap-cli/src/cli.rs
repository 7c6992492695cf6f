use clap::Parser;
use hazardmap_core::config::CliConfigOverrides;
use hazardmap_core::models::{Limit, StatusFilter};
use std::path::PathBuf;

/// hazardmap - Natural-hazard events on a map, from the terminal
#[derive(Parser, Debug)]
#[command(name = "hazardmap")]
#[command(about = "Browse natural-hazard events from the EONET API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the events API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Initial status filter (open, closed or all)
    #[arg(long)]
    pub status: Option<StatusFilter>,

    /// Initial event limit (25, 50 or 100)
    #[arg(long)]
    pub limit: Option<Limit>,

    /// Delay before a filter change triggers a refetch
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    pub fn overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            api_base_url: self.api_url.clone(),
            status: self.status,
            limit: self.limit,
            debounce_ms: self.debounce_ms,
        }
    }
}
