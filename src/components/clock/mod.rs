use super::panel::{Panel, PanelEntry};
use crate::config::Config;
use crate::error::DisplayResult;
use crate::utils::scheduler::{spawn_refresh, RefreshHandle};
use crate::utils::time::{format_clock_time, format_long_date, DisplayZone};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use rust_i18n::t;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::info;

/// How often the clock re-reads the system time
pub const TICK: Duration = Duration::from_secs(1);

/// Header clock; local only, never fails
pub struct Clock {
    zone: DisplayZone,
    now: Arc<watch::Sender<DateTime<FixedOffset>>>,
    ticker: Mutex<Option<RefreshHandle>>,
}

impl Clock {
    pub fn new(config: &Config) -> DisplayResult<Self> {
        Ok(Self::with_zone(DisplayZone::from_config(&config.timezone)?))
    }

    pub fn with_zone(zone: DisplayZone) -> Self {
        let (now, _) = watch::channel(zone.now());
        Self {
            zone,
            now: Arc::new(now),
            ticker: Mutex::new(None),
        }
    }

    /// Time of the last tick
    pub fn current(&self) -> DateTime<FixedOffset> {
        *self.now.borrow()
    }
}

#[async_trait]
impl super::Component for Clock {
    fn name(&self) -> &'static str {
        "clock"
    }

    async fn init(&self, _config: Arc<RwLock<Config>>) -> DisplayResult<()> {
        let mut ticker = self.ticker.lock().await;
        if ticker.is_none() {
            let now = Arc::clone(&self.now);
            let zone = self.zone;
            *ticker = Some(spawn_refresh("clock", TICK, move || {
                now.send_replace(zone.now());
                std::future::ready(())
            }));
            info!("Clock started");
        }
        Ok(())
    }

    async fn shutdown(&self) -> DisplayResult<()> {
        if let Some(ticker) = self.ticker.lock().await.take() {
            ticker.stop().await;
        }
        Ok(())
    }

    fn render(&self) -> Panel {
        render_clock(&self.current())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Header panel: time on top, long date below
pub fn render_clock(now: &DateTime<FixedOffset>) -> Panel {
    let wall = now.naive_local();
    Panel::entries(
        t!("app_title"),
        vec![PanelEntry::new(format_clock_time(&wall)).with_detail(format_long_date(&wall))],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renders_time_and_date() {
        let now = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 15, 14, 7, 9)
            .unwrap();

        let panel = render_clock(&now);
        assert_eq!(panel.title, "Office Display");
        let entry = &panel.entry_list()[0];
        assert_eq!(entry.heading, "02:07:09 PM");
        assert_eq!(entry.details, vec!["Monday, January 15, 2024".to_string()]);
    }
}
