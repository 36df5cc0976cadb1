//! Rollout dashboard cron entrypoint.
//!
//! Intended to run under a scheduler (cron); success and failure are
//! communicated through the process exit status and the logs.

use tracing::error;
use tracing_subscriber::EnvFilter;

use rollout_dashboard::config::AppConfig;
use rollout_dashboard::database::DatabaseManager;
use rollout_dashboard::mdms::MdmsClient;
use rollout_dashboard::rollout;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("rollout dashboard run failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> rollout_dashboard::Result<()> {
    let config = AppConfig::from_env()?;

    let mdms = MdmsClient::new(
        &config.mdms_base_url,
        &config.tenant_scope,
        config.http_timeout,
    )?;
    let db = DatabaseManager::new(&config.database).await?;

    let summary = rollout::run(&mdms, &db).await?;
    summary.log_report();

    Ok(())
}
