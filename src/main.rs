mod config;
mod db;
mod error;
mod routes;
mod state;

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("Error connecting DB: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Error running migrations: {0}")]
    Migrate(#[from] MigrateError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unknown command {0:?}, expected serve, migrate or revert")]
    UnknownCommand(String),
}

enum Command {
    Serve,
    Migrate,
    Revert,
}

impl Command {
    fn parse(arg: Option<&str>) -> Result<Self, StartupError> {
        match arg {
            None | Some("serve") => Ok(Command::Serve),
            Some("migrate") => Ok(Command::Migrate),
            Some("revert") => Ok(Command::Revert),
            Some(other) => Err(StartupError::UnknownCommand(other.to_string())),
        }
    }
}

/// `RUST_LOG` directives win; otherwise this crate and tower_http log at info.
fn default_filter() -> EnvFilter {
    EnvFilter::new("warn,todo_api=info,tower_http=info")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    init_tracing();

    let command = Command::parse(std::env::args().nth(1).as_deref())?;
    let config = config::Config::from_env()?;

    let db = db::connect(&config).await?;
    tracing::info!("connected to database");

    match command {
        Command::Revert => {
            db::revert(&db).await?;
            tracing::info!("migrations reverted");
            return Ok(());
        }
        Command::Migrate => {
            db::apply(&db).await?;
            tracing::info!("migrations applied");
            return Ok(());
        }
        Command::Serve => {
            db::apply(&db).await?;
            tracing::info!("migrations applied");
        }
    }

    let state = state::AppState { db: db.clone() };

    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;

    tracing::info!("server is chilling at http://{}", config.addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
