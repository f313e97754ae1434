use clap::Parser;
use sitegauge::config::Config;
use sitegauge::evaluator::Evaluator;
use sitegauge::server::{create_router, AppState, SharedState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sitegauge", about = "Web scraping complexity evaluation service")]
struct Args {
    /// Path to the TOML config file (defaults to SITEGAUGE_CONFIG, then
    /// ~/.config/sitegauge/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// Override the bind host from the config file
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port from the config file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
        .add_directive("sitegauge=debug".parse()?)
        .add_directive("axum::rejection=trace".parse()?);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter)
        .init();

    info!("Sitegauge web scraping complexity evaluator starting");

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_auto()?,
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    let config = Arc::new(config);

    // The credential is resolved once, before the surface becomes reachable.
    let api_key = config.resolve_api_key().map_err(|e| {
        error!("{}", e);
        e
    })?;

    let evaluator = Arc::new(Evaluator::new(config.clone(), api_key)?);
    info!(model = %config.model.name, "Evaluation model configured");

    let state: SharedState = Arc::new(AppState {
        config: config.clone(),
        evaluator,
    });

    let app = create_router(state);

    let listener_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&listener_addr).await?;
    info!("Server listening on http://{}", listener_addr);

    axum::serve(listener, app).await.map_err(|e| {
        error!("Server error: {}", e);
        e.into()
    })
}
