use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chirp_server::{config::Settings, db::Database, routes::build_router, state::AppState};

/// Chirp timeline server
///
/// Serves the name list, tweet creation and timeline pages on top of a
/// SQLite database. Settings come from settings.toml and the environment;
/// the arguments below override both.
#[derive(Parser, Debug)]
#[command(name = "chirp-server")]
#[command(about = "Serve the Chirp tweet timeline pages", long_about = None)]
struct Args {
    /// Host to bind [default: 0.0.0.0]
    host: Option<String>,

    /// Port to listen on [default: 8111]
    port: Option<u16>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,

    /// Serve requests on a multi-threaded runtime
    #[arg(long)]
    threaded: bool,

    /// Path to the SQLite database file, or :memory:
    #[arg(short, long)]
    database: Option<String>,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.debug);

    let mut settings = Settings::new().context("Failed to load settings")?;
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if let Some(path) = args.database {
        settings.database.path = path;
    }

    let mut builder = if args.threaded {
        tokio::runtime::Builder::new_multi_thread()
    } else {
        tokio::runtime::Builder::new_current_thread()
    };
    let runtime = builder
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    runtime.block_on(serve(settings))
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "chirp_server=debug,tower_http=debug"
    } else {
        "chirp_server=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(settings: Settings) -> Result<()> {
    let db = Database::with_options(&settings.database.path, settings.database.pool_options())
        .context("Failed to create database")?;

    db.initialize()
        .context("Failed to initialize database schema")?;
    tracing::info!("Database initialized at {}", settings.database.path);

    if settings.database.seed_demo_data {
        db.seed_demo_data().context("Failed to seed demo data")?;
        tracing::info!("Demo data seeded successfully");
    }

    let app = build_router(AppState::new(db));

    let addr = settings.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("Running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
