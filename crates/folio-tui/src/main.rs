use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use folio_core::load_config;

#[derive(Parser)]
#[command(name = "folio-tui", about = "Terminal portfolio client", version)]
struct Args {
    /// Path to the YAML config file.
    #[arg(short, long, default_value = "folio.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let config = load_config(&args.config)?;
    folio_tui::run_tui(config).await
}
