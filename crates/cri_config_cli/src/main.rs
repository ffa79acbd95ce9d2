use clap::Parser;
use cri_config_cli::commands::config_cmd::{self, ConfigCommands};
use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// cri-config: Validate and inspect CRI plugin configuration
#[derive(Parser)]
#[command(name = "cri-config")]
#[command(about = "Validate and inspect CRI plugin configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: ConfigCommands,
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("CRI_CONFIG_LOG")
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = config_cmd::execute(cli.command) {
        error!("Error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
