use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Handle to a running refresh timer.
///
/// The timer keeps firing until [`RefreshHandle::stop`] is awaited or the
/// handle is dropped. Only `stop` guarantees that no further job is started
/// once it returns; dropping merely requests cancellation.
#[derive(Debug)]
pub struct RefreshHandle {
    name: &'static str,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Whether cancellation has been requested
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel the timer and wait for its loop to exit
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Refresh timer '{}' ended abnormally: {}", self.name, e);
            }
        }
        debug!("Refresh timer '{}' stopped", self.name);
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Run `job` immediately and then every `period`, each run on its own task.
///
/// Runs are fire-and-forget: a slow run is not awaited before the next tick,
/// so runs may overlap.
pub fn spawn_refresh<F, Fut>(name: &'static str, period: Duration, mut job: F) -> RefreshHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let token = CancellationToken::new();
    let cancelled = token.clone();

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => break,
                _ = ticker.tick() => {
                    debug!("Refresh timer '{}' fired", name);
                    tokio::spawn(job());
                }
            }
        }
    });

    RefreshHandle {
        name,
        token,
        task: Some(task),
    }
}
