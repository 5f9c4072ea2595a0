//! Terminal kiosk that composes the component panels into one screen.

pub mod fullscreen;
pub mod keys;
pub mod layout;

use crate::components::ComponentManager;
use crate::error::DisplayResult;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use fullscreen::FullscreenToggle;
use keys::{KeyAction, KeySubscription};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Redraw period; also paces the loading spinner
pub const FRAME_INTERVAL: Duration = Duration::from_millis(250);

/// The kiosk screen
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    fullscreen: FullscreenToggle,
    tick: usize,
}

impl Dashboard {
    /// Take over the terminal
    pub fn enter() -> DisplayResult<Self> {
        with_raw_mode(&CrosstermRawMode, || {
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            terminal.hide_cursor()?;
            terminal.clear()?;

            Ok(Self {
                terminal,
                fullscreen: FullscreenToggle::default(),
                tick: 0,
            })
        })
    }

    /// Redraw until `shutdown` is cancelled or the user quits.
    ///
    /// A quit key cancels `shutdown` so the rest of the process follows.
    pub async fn run(
        &mut self,
        manager: &ComponentManager,
        shutdown: CancellationToken,
    ) -> DisplayResult<()> {
        let (action_tx, mut action_rx) = mpsc::channel(8);
        let keys = KeySubscription::acquire(action_tx);

        let mut frames = interval(FRAME_INTERVAL);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("Display running");
        let result = loop {
            tokio::select! {
                _ = shutdown.cancelled() => break Ok(()),
                _ = frames.tick() => {
                    if let Err(e) = self.draw(manager) {
                        break Err(e);
                    }
                }
                Some(action) = action_rx.recv() => match action {
                    KeyAction::ToggleFullscreen => {
                        if let Err(e) = self.toggle_fullscreen().and_then(|_| self.draw(manager)) {
                            break Err(e);
                        }
                    }
                    KeyAction::Quit => {
                        info!("Quit requested from keyboard");
                        shutdown.cancel();
                        break Ok(());
                    }
                },
            }
        };

        keys.release().await;
        result
    }

    fn draw(&mut self, manager: &ComponentManager) -> DisplayResult<()> {
        let panels = manager.panels();
        self.tick = self.tick.wrapping_add(1);
        let tick = self.tick;
        self.terminal
            .draw(|frame| layout::draw_dashboard(frame, &panels, tick))?;
        Ok(())
    }

    fn toggle_fullscreen(&mut self) -> DisplayResult<()> {
        self.fullscreen.toggle(self.terminal.backend_mut());
        // The other screen holds stale content
        self.terminal.clear()?;
        Ok(())
    }

    /// Give the terminal back in the state it was found
    pub fn restore(&mut self) -> DisplayResult<()> {
        if self.fullscreen.is_active() {
            self.fullscreen.exit(self.terminal.backend_mut());
        }
        disable_raw_mode()?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

trait RawModeSwitch {
    fn enable(&self) -> io::Result<()>;
    fn disable(&self) -> io::Result<()>;
}

struct CrosstermRawMode;

impl RawModeSwitch for CrosstermRawMode {
    fn enable(&self) -> io::Result<()> {
        enable_raw_mode()
    }

    fn disable(&self) -> io::Result<()> {
        disable_raw_mode()
    }
}

/// Enable raw mode and run `setup`; raw mode is switched off again if it fails
fn with_raw_mode<S, T, F>(switch: &S, setup: F) -> DisplayResult<T>
where
    S: RawModeSwitch,
    F: FnOnce() -> DisplayResult<T>,
{
    switch.enable()?;
    setup().map_err(|e| {
        if let Err(reset) = switch.disable() {
            error!("Failed to disable raw mode: {}", reset);
        }
        e
    })
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        // Raw mode must not outlive the dashboard
        if let Err(e) = disable_raw_mode() {
            error!("Failed to disable raw mode: {}", e);
        }
    }
}
