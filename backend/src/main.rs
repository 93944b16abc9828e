use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use medchat_backend::{AppState, app, config::Config};

#[derive(Parser, Debug)]
#[command(name = "medchat-backend", version, about = "Medical chat assistant backend")]
struct Args {
    /// Path to the configuration file (defaults to conf/config.toml)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Keep the non-blocking writer guard alive for the process lifetime
    let _guard = init_tracing(&config);

    tracing::info!("Starting medchat-backend v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::initialize(config.clone())?;
    let router = app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, router).await?;
    Ok(())
}

fn init_tracing(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let stdout_layer = tracing_subscriber::fmt::layer();

    match &config.logging.file {
        Some(path) => {
            let path = std::path::Path::new(path);
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let file = path.file_name().map(|f| f.to_string_lossy().to_string());
            let appender = tracing_appender::rolling::daily(
                dir,
                file.unwrap_or_else(|| "medchat-backend.log".to_string()),
            );
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let file_layer =
                tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(env_filter).with(stdout_layer).init();
            None
        }
    }
}
