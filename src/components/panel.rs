//! Backend-independent description of what a widget shows.
//!
//! Components produce a [`Panel`] from their current state; the display
//! turns panels into terminal widgets. Keeping this step pure lets widget
//! rendering be tested without a terminal.

/// A rendered widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: String,
    pub body: PanelBody,
}

/// The content area of a panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    /// A fetch is in progress; nothing else is shown
    Loading,
    /// One block per item
    Entries(Vec<PanelEntry>),
    /// A single centered message, used for empty and failed states
    Notice {
        headline: String,
        detail: Option<String>,
    },
}

/// One item in a panel, a heading with secondary lines below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEntry {
    pub heading: String,
    pub details: Vec<String>,
}

impl Panel {
    pub fn loading(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: PanelBody::Loading,
        }
    }

    pub fn entries(title: impl Into<String>, entries: Vec<PanelEntry>) -> Self {
        Self {
            title: title.into(),
            body: PanelBody::Entries(entries),
        }
    }

    pub fn notice(
        title: impl Into<String>,
        headline: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: PanelBody::Notice {
                headline: headline.into(),
                detail,
            },
        }
    }

    /// Entries shown by the panel; empty for loading and notice bodies
    pub fn entry_list(&self) -> &[PanelEntry] {
        match &self.body {
            PanelBody::Entries(entries) => entries,
            _ => &[],
        }
    }
}

impl PanelEntry {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}
