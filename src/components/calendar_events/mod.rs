pub mod models;

pub use models::CalendarEvent;

use super::feed::{DisplayState, Feed, FeedWidget};
use super::panel::{Panel, PanelEntry};
use crate::config::Config;
use crate::error::{DisplayResult, FetchError};
use crate::utils::time::{format_short_date, format_short_time, DisplayZone};
use async_trait::async_trait;
use models::EventsResponse;
use rust_i18n::t;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

/// Endpoint path relative to the API base
pub const EVENTS_PATH: &str = "api/calendar/events";

/// How many events the widget shows at most
pub const MAX_VISIBLE_EVENTS: usize = 5;

/// The upcoming events endpoint
pub struct CalendarFeed {
    url: Url,
}

impl CalendarFeed {
    pub fn new(base: &Url) -> DisplayResult<Self> {
        Ok(Self {
            url: base.join(EVENTS_PATH)?,
        })
    }
}

impl Feed for CalendarFeed {
    type Payload = Vec<CalendarEvent>;

    fn name(&self) -> &'static str {
        "calendar_events"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn extract(&self, body: &str) -> Result<Self::Payload, FetchError> {
        let response: EventsResponse =
            serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
        // Server order is kept as-is
        Ok(response.events.unwrap_or_default())
    }
}

/// Upcoming calendar events widget
pub struct CalendarEvents {
    widget: FeedWidget<CalendarFeed>,
    zone: DisplayZone,
}

impl CalendarEvents {
    /// Create the widget for the configured backend
    pub fn new(config: &Config) -> DisplayResult<Self> {
        let feed = CalendarFeed::new(&config.api_base()?)?;
        Ok(Self {
            widget: FeedWidget::new(feed),
            zone: DisplayZone::from_config(&config.timezone)?,
        })
    }

    pub fn widget(&self) -> &FeedWidget<CalendarFeed> {
        &self.widget
    }
}

#[async_trait]
impl super::Component for CalendarEvents {
    fn name(&self) -> &'static str {
        "calendar_events"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> DisplayResult<()> {
        let period = config.read().await.calendar_refresh();
        self.widget.mount(period).await;
        Ok(())
    }

    async fn shutdown(&self) -> DisplayResult<()> {
        self.widget.teardown().await;
        Ok(())
    }

    fn render(&self) -> Panel {
        render_events(&self.widget.state(), self.zone)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Build the calendar panel for a display state
pub fn render_events(state: &DisplayState<Vec<CalendarEvent>>, zone: DisplayZone) -> Panel {
    let title = t!("calendar_title");

    match state {
        DisplayState::Loading => Panel::loading(title),
        DisplayState::Failed(message) => {
            Panel::notice(title, t!("calendar_error"), Some(message.clone()))
        }
        DisplayState::Ready(events) if events.is_empty() => {
            Panel::notice(title, t!("calendar_empty"), None)
        }
        DisplayState::Ready(events) => {
            let entries = events
                .iter()
                .take(MAX_VISIBLE_EVENTS)
                .map(|event| event_entry(event, zone))
                .collect();
            Panel::entries(title, entries)
        }
    }
}

fn event_entry(event: &CalendarEvent, zone: DisplayZone) -> PanelEntry {
    let start = event.start.wall_clock(zone);
    let date = format_short_date(&start);
    let time = format_short_time(&start);

    let mut entry = PanelEntry::new(event.title.clone())
        .with_detail(format!("🕒 {}", t!("calendar_event_when", date = date, time = time)));

    if let Some(location) = event.location.as_deref().filter(|l| !l.trim().is_empty()) {
        entry = entry.with_detail(format!("📍 {}", location));
    }

    entry
}
