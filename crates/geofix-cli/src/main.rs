mod locate;

use clap::{Parser, Subcommand};
use geofix_core::GeolocatorKind;
use tracing_subscriber::EnvFilter;

use crate::locate::LocateArgs;

#[derive(Debug, Parser)]
#[command(name = "geofix")]
#[command(about = "Single-shot geolocation across browser, AMap, BMap and QQ Map backends")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one location request against a scripted vendor scenario
    Locate(LocateArgs),
    /// List the backend identifiers accepted by `--prefer`
    Backends,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = geofix_core::load_locate_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Locate(args) => locate::run_locate(&config, &args).await,
        Commands::Backends => {
            for kind in GeolocatorKind::ALL {
                println!("{kind}");
            }
            Ok(())
        }
    }
}
