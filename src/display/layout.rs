use crate::components::{Panel, PanelBody};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;
use rust_i18n::t;

/// Height of the clock header including its border
pub const HEADER_HEIGHT: u16 = 5;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Draw the clock header, the widget row and the footer hint
pub fn draw_dashboard(frame: &mut Frame, panels: &[(&str, Panel)], tick: usize) {
    let header = panels.iter().find(|(name, _)| *name == "clock");
    let body: Vec<&Panel> = panels
        .iter()
        .filter(|(name, _)| *name != "clock")
        .map(|(_, panel)| panel)
        .collect();

    let header_height = if header.is_some() { HEADER_HEIGHT } else { 0 };
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    if let Some((_, clock)) = header {
        render_panel(frame, header_area, clock, tick);
    }

    if !body.is_empty() {
        let columns = Layout::horizontal(vec![Constraint::Ratio(1, body.len() as u32); body.len()])
            .spacing(1)
            .split(body_area);
        for (panel, area) in body.iter().zip(columns.iter()) {
            render_panel(frame, *area, panel, tick);
        }
    }

    let footer = Paragraph::new(t!("footer_hint").to_string())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(footer, footer_area);
}

fn render_panel(frame: &mut Frame, area: Rect, panel: &Panel, tick: usize) {
    let title = Line::from(format!(" {} ", panel.title))
        .style(Style::default().add_modifier(Modifier::BOLD));
    let block = Block::bordered().title(title);
    let paragraph = Paragraph::new(panel_lines(panel, tick))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Text lines for a panel body
pub fn panel_lines(panel: &Panel, tick: usize) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    match &panel.body {
        PanelBody::Loading => vec![
            Line::default(),
            Line::from(format!(
                "{} {}",
                SPINNER_FRAMES[tick % SPINNER_FRAMES.len()],
                t!("loading")
            )),
        ],
        PanelBody::Notice { headline, detail } => {
            let mut lines = vec![Line::default(), Line::from(headline.clone())];
            if let Some(detail) = detail {
                lines.push(Line::from(Span::styled(detail.clone(), dim)));
            }
            lines
        }
        PanelBody::Entries(entries) => {
            let mut lines = Vec::new();
            for (index, entry) in entries.iter().enumerate() {
                if index > 0 {
                    lines.push(Line::default());
                }
                lines.push(Line::from(Span::styled(entry.heading.clone(), bold)));
                for detail in &entry.details {
                    lines.push(Line::from(Span::styled(detail.clone(), dim)));
                }
            }
            lines
        }
    }
}
