//! tanyadb — natural-language console for PostgreSQL.
//!
//! # Usage
//!
//! ```bash
//! export DATABASE_URL=postgres://localhost/shop
//! export REPLICATE_API_TOKEN=r8_...
//! export GRANITE_MODEL_VERSION=<model version id>
//! tanyadb
//! ```

use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use tanyadb::config::Config;
use tanyadb::db::PgDatabase;
use tanyadb::predict::ReplicateClient;
use tanyadb::repl;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::parse();
    let budget = config.poll_budget();

    let db = PgDatabase::connect(&config.database_url).await?;
    let api = ReplicateClient::with_api_url(
        config.api_url.as_str(),
        config.api_token.as_str(),
        config.model_version.as_str(),
    );

    println!(
        "{}",
        "tanyadb — tanya database Anda dalam bahasa natural".cyan().bold()
    );

    let outcome = repl::run(&api, &db, &budget).await;

    // Close the pool even when the loop bailed out with an error.
    db.close().await;
    outcome?;

    println!("{}", "Sampai jumpa! 👋".green());
    Ok(())
}
