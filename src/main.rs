mod shutdown;
mod startup;

use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Load configuration
    let config = startup::load_config().await?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = startup::init_logging(&*config.read().await)?;

    info!("Starting office display");

    // Run the display until a signal or the quit key
    startup::start_display(config).await
}
