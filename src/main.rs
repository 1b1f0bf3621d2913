use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use cep_weather::config::loader;
use cep_weather::observability::{logging, metrics, Telemetry};
use cep_weather::{HttpServer, ServiceRole, Shutdown};

#[derive(Parser)]
#[command(name = "cep-weather")]
#[command(about = "Postal code to temperature services", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the front service (POST /service-A)
    Gateway,
    /// Run the lookup service (POST /service-B)
    Resolver,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let role = match cli.command {
        Commands::Gateway => ServiceRole::Gateway,
        Commands::Resolver => ServiceRole::Resolver,
    };

    let config = loader::load(cli.config.as_deref())?;

    // Exporter failure is fatal.
    let telemetry = Arc::new(Telemetry::init(&config.telemetry, role.service_name())?);
    logging::init_logging(&config.observability, &telemetry)?;

    tracing::info!(
        service = telemetry.service_name(),
        version = env!("CARGO_PKG_VERSION"),
        "cep-weather starting"
    );
    tracing::info!(
        bind_address = role.bind_address(&config),
        exporting_spans = telemetry.is_exporting(),
        otlp_endpoint = %config.telemetry.endpoint,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(role, &config, telemetry.clone())?;
    let listener = TcpListener::bind(role.bind_address(&config)).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();
    server.run(listener, shutdown.subscribe()).await?;

    telemetry.shutdown();
    tracing::info!("Shutdown complete");
    Ok(())
}
