use aceest_api::{router, AppState};
use aceest_core::{get_reference_catalog, Config, Error, Result, WorkoutStore};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "aceest")]
#[command(about = "ACEest Fitness workout logging API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides PORT and the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the effective configuration and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = Config::resolve(cli.config.as_deref())?;
    config.apply_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config, source).await
        }
        Some(Commands::CheckConfig) => check_config(&config),
        None => serve(config, source).await,
    }
}

async fn serve(config: Config, source: Option<PathBuf>) -> Result<()> {
    aceest_core::logging::init_with_level(&config.logging.level);
    match source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!(
            "No config file found at {:?}, using defaults",
            Config::default_config_path()
        ),
    }

    let errors = get_reference_catalog().validate();
    if !errors.is_empty() {
        for error in &errors {
            tracing::error!("Reference catalog: {}", error);
        }
        return Err(Error::Config("Invalid reference catalog".into()));
    }

    let addr = config.server.socket_addr()?;
    let state = AppState::new(Arc::new(WorkoutStore::new()));
    let app = router(state);

    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn check_config(config: &Config) -> Result<()> {
    config.server.socket_addr()?;
    print!("{}", config.to_toml()?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Unable to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
