use office_display::components::ComponentManager;
use office_display::config::Config;
use office_display::display::Dashboard;
use office_display::error::{other_error, Error};
use office_display::utils::i18n;
use std::fs;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::shutdown;

/// Log file name inside the configured log directory
const LOG_FILE: &str = "office-display.log";

/// Initialize logging into a file, since the terminal belongs to the display
pub fn init_logging(config: &Config) -> miette::Result<WorkerGuard> {
    fs::create_dir_all(&config.log_dir).map_err(Error::from)?;

    let appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| other_error(&format!("Failed to set up logging: {}", e)))?;

    Ok(guard)
}

/// Load and initialize the application config
///
/// Runs before logging is set up; failures are reported by `main`.
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    let config = Config::load()?;
    Ok(Arc::new(RwLock::new(config)))
}

/// Mount the widgets and run the kiosk until shutdown
pub async fn start_display(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    // Set locale from config
    {
        let config_read = config.read().await;
        i18n::set_locale(&config_read.locale);
    }

    // Register and mount the enabled widgets
    let component_manager = ComponentManager::with_enabled_components(Arc::clone(&config)).await?;
    info!("Components: {}", component_manager.names().join(", "));
    component_manager.init_all().await?;

    // Create shutdown token and spawn signal handler task
    let shutdown_token = CancellationToken::new();
    tokio::spawn(shutdown::handle_signals(shutdown_token.clone()));

    let mut dashboard = Dashboard::enter()?;
    let result = dashboard.run(&component_manager, shutdown_token).await;

    if let Err(e) = dashboard.restore() {
        error!("Failed to restore terminal: {:?}", e);
    }
    drop(dashboard);

    component_manager.shutdown_all().await?;
    info!("Office display stopped");

    result.map_err(Into::into)
}
