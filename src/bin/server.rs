use anyhow::Context;
use clap::Parser;
use trivia_api::db;
use trivia_api::server::app::{run_server, AppState};
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Settings file, without extension
    #[clap(long, default_value = "trivia")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load(&cli.config).context("Failed to load settings")?;

    let pool = db::establish_connection(&settings.database.path)
        .await
        .with_context(|| format!("Cannot open database {}", settings.database.path))?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool).await?;

    let state = AppState::new(pool, settings.pagination());
    run_server(&settings.server.address(), state).await
}
