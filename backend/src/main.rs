use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use polyglot_site::{AppState, config::Config, create_router};
use polyglot_site::services::{LocaleStore, MemoryStorage, SystemLanguages};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Multi-locale site server
#[derive(Parser, Debug)]
#[command(
    name = "polyglot-site",
    about = "Multi-locale site with canonical locale routing",
    version
)]
struct Args {
    /// Path to config.toml (default: conf/config.toml or ./config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override server.port
    #[arg(long, short)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate the configuration, then exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if let Some(Command::CheckConfig) = args.command {
        let locales = config.locale_config()?;
        println!(
            "Configuration OK: locales={:?} default={} root_redirect={:?}",
            locales.supported(),
            locales.default_locale(),
            config.locale.root_redirect
        );

        // What a native client on this host would start with
        let mut store = LocaleStore::new(locales, config.store_settings()?, MemoryStorage::new())?;
        println!("Client locale on this host: {}", store.initialize(&SystemLanguages));
        return Ok(());
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(&config);

    tracing::info!(
        "Starting polyglot-site on {}:{} (locales={:?}, default={})",
        config.server.host,
        config.server.port,
        config.locale.supported,
        config.locale.default
    );

    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_router(state, &config);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    let (file_layer, guard) = match config.logging.file.as_deref().map(std::path::Path::new) {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(std::path::Path::new("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "polyglot-site.log".into());
            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
