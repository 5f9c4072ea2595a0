use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use std::io;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// What a key press asks the dashboard to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleFullscreen,
    Quit,
}

/// Map a terminal event to a dashboard action
pub fn action_for(event: &Event) -> Option<KeyAction> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::F(11) => Some(KeyAction::ToggleFullscreen),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(KeyAction::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyAction::Quit),
        _ => None,
    }
}

/// A live key listener.
///
/// Held for as long as the dashboard runs; [`KeySubscription::release`]
/// stops the listener and waits for it to finish.
#[derive(Debug)]
pub struct KeySubscription {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl KeySubscription {
    /// Listen to the terminal's key events
    pub fn acquire(actions: mpsc::Sender<KeyAction>) -> Self {
        Self::acquire_from(EventStream::new(), actions)
    }

    /// Listen to an arbitrary event stream
    pub fn acquire_from<S>(events: S, actions: mpsc::Sender<KeyAction>) -> Self
    where
        S: Stream<Item = io::Result<Event>> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let task = tokio::spawn(async move {
            let mut events = Box::pin(events);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    next = events.next() => match next {
                        Some(Ok(event)) => {
                            if let Some(action) = action_for(&event) {
                                debug!("Key action: {:?}", action);
                                if actions.send(action).await.is_err() {
                                    break;
                                }
                            }
                        }
                        Some(Err(e)) => {
                            warn!("Failed to read terminal events: {}", e);
                            break;
                        }
                        None => break,
                    }
                }
            }
            debug!("Key listener stopped");
        });

        Self {
            token,
            task: Some(task),
        }
    }

    /// Stop listening and wait for the listener task to exit
    pub async fn release(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Key listener ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn f11_toggles_fullscreen() {
        assert_eq!(
            action_for(&key(KeyCode::F(11), KeyModifiers::NONE)),
            Some(KeyAction::ToggleFullscreen)
        );
    }

    #[test]
    fn ctrl_c_and_q_quit() {
        assert_eq!(
            action_for(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(action_for(&key(KeyCode::Char('q'), KeyModifiers::NONE)), Some(KeyAction::Quit));
        assert_eq!(action_for(&key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn key_releases_and_other_events_are_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::F(11),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(action_for(&release), None);
        assert_eq!(action_for(&Event::Resize(80, 24)), None);
        assert_eq!(action_for(&key(KeyCode::F(5), KeyModifiers::NONE)), None);
    }

    #[tokio::test]
    async fn forwards_actions_until_released() {
        let (tx, mut rx) = mpsc::channel(4);
        let events = futures::stream::iter(vec![
            Ok(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Ok(key(KeyCode::F(11), KeyModifiers::NONE)),
        ])
        .chain(futures::stream::pending());

        let subscription = KeySubscription::acquire_from(events, tx);
        assert_eq!(rx.recv().await, Some(KeyAction::ToggleFullscreen));

        subscription.release().await;
        // The sender was dropped with the listener task
        assert_eq!(rx.recv().await, None);
    }
}
