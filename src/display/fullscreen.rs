use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use std::io::Write;
use tracing::{debug, info, warn};

/// Fullscreen mode, backed by the terminal's alternate screen
#[derive(Debug, Default)]
pub struct FullscreenToggle {
    active: bool,
}

impl FullscreenToggle {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Leave fullscreen if active, otherwise request it. Returns the new mode.
    pub fn toggle<W: Write>(&mut self, out: &mut W) -> bool {
        if self.active {
            self.exit(out);
        } else {
            self.request(out);
        }
        self.active
    }

    /// Request fullscreen; a refusal leaves the mode unchanged
    pub fn request<W: Write>(&mut self, out: &mut W) {
        match execute!(out, EnterAlternateScreen) {
            Ok(()) => {
                self.active = true;
                info!("Entered fullscreen");
            }
            Err(e) => debug!("Fullscreen request refused: {}", e),
        }
    }

    /// Leave fullscreen
    pub fn exit<W: Write>(&mut self, out: &mut W) {
        match execute!(out, LeaveAlternateScreen) {
            Ok(()) => {
                self.active = false;
                info!("Left fullscreen");
            }
            Err(e) => warn!("Failed to leave fullscreen: {}", e),
        }
    }
}
