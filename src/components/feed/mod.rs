//! Polling fetch-and-render lifecycle shared by the data-driven widgets.
//!
//! A [`Feed`] knows one backend endpoint and how to pull its payload out of
//! a response body. A [`FeedWidget`] drives a feed on a timer and keeps the
//! resulting [`DisplayState`] in a [`StateCell`].

mod state;

pub use state::{DisplayState, StateCell};

use crate::error::FetchError;
use crate::utils::scheduler::{spawn_refresh, RefreshHandle};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};
use url::Url;

/// A backend endpoint polled by a widget
pub trait Feed: Send + Sync + 'static {
    /// What a successful fetch yields
    type Payload: Clone + Send + Sync + 'static;

    /// Name used in logs and timer names
    fn name(&self) -> &'static str;

    /// Endpoint to GET
    fn url(&self) -> &Url;

    /// Pull the payload out of a successful response body
    fn extract(&self, body: &str) -> Result<Self::Payload, FetchError>;
}

/// GET `url` and return the body of a successful response
pub async fn fetch_body(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http(status));
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))
}

/// A feed bound to a display state and, once mounted, a refresh timer
pub struct FeedWidget<F: Feed> {
    feed: Arc<F>,
    client: Client,
    state: Arc<StateCell<F::Payload>>,
    refresh: Mutex<Option<RefreshHandle>>,
}

impl<F: Feed> FeedWidget<F> {
    pub fn new(feed: F) -> Self {
        Self::with_client(feed, Client::new())
    }

    pub fn with_client(feed: F, client: Client) -> Self {
        Self {
            feed: Arc::new(feed),
            client,
            state: Arc::new(StateCell::new()),
            refresh: Mutex::new(None),
        }
    }

    /// Start polling: one fetch now, then one every `period`.
    ///
    /// Mounting an already mounted widget does nothing, and neither does
    /// mounting one that was torn down: its state no longer accepts writes.
    pub async fn mount(&self, period: Duration) {
        let mut refresh = self.refresh.lock().await;
        if self.state.is_disposed() {
            warn!("{} was torn down; not mounting again", self.feed.name());
            return;
        }
        if refresh.is_some() {
            debug!("{} already mounted", self.feed.name());
            return;
        }

        let feed = Arc::clone(&self.feed);
        let client = self.client.clone();
        let state = Arc::clone(&self.state);

        info!(
            "Mounting {} (refresh every {}s)",
            self.feed.name(),
            period.as_secs()
        );
        *refresh = Some(spawn_refresh(self.feed.name(), period, move || {
            Self::refresh_cycle(Arc::clone(&feed), client.clone(), Arc::clone(&state))
        }));
    }

    /// Stop polling and freeze the display state.
    ///
    /// When this returns no new fetch will start, and fetches still in flight
    /// can no longer change the state.
    pub async fn teardown(&self) {
        if let Some(handle) = self.refresh.lock().await.take() {
            handle.stop().await;
        }
        self.state.dispose();
        info!("{} torn down", self.feed.name());
    }

    /// Run a single fetch cycle outside the timer
    pub async fn refresh_now(&self) {
        Self::refresh_cycle(
            Arc::clone(&self.feed),
            self.client.clone(),
            Arc::clone(&self.state),
        )
        .await;
    }

    pub fn state(&self) -> DisplayState<F::Payload> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState<F::Payload>> {
        self.state.subscribe()
    }

    pub fn is_torn_down(&self) -> bool {
        self.state.is_disposed()
    }

    async fn refresh_cycle(feed: Arc<F>, client: Client, state: Arc<StateCell<F::Payload>>) {
        state.publish(DisplayState::Loading);

        let outcome = match fetch_body(&client, feed.url()).await {
            Ok(body) => feed.extract(&body),
            Err(e) => Err(e),
        };

        let next = match outcome {
            Ok(payload) => {
                debug!("{} refreshed", feed.name());
                DisplayState::Ready(payload)
            }
            Err(e) => {
                warn!(widget = feed.name(), error = %e, "Refresh failed");
                DisplayState::Failed(e.to_string())
            }
        };

        if !state.publish(next) {
            debug!("Discarding late {} result after teardown", feed.name());
        }
    }
}
