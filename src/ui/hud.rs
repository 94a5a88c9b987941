use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::snapshot::Snapshot;

const HUD_HEIGHT: u16 = 1;

/// Renders the status line and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_HEIGHT)]).areas(area);

    frame.render_widget(
        Paragraph::new(status_line(snapshot))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        status_area,
    );

    play_area
}

fn status_line(snapshot: &Snapshot) -> Line<'static> {
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::raw("Length "),
        Span::styled(snapshot.length.to_string(), value),
        Span::raw("  Best "),
        Span::styled(snapshot.best_length.to_string(), value),
        Span::raw("  Tick "),
        Span::styled(snapshot.tick.to_string(), value),
        Span::raw("  Resets "),
        Span::styled(snapshot.resets.to_string(), value),
        Span::raw("  Obstacles in "),
        Span::styled(format_countdown(snapshot.obstacles_refresh_in_ms), value),
        Span::raw("  [Q] Quit"),
    ])
}

/// Whole seconds, rounded up, so the countdown never shows `0s` early.
fn format_countdown(millis: u64) -> String {
    format!("{}s", millis.div_ceil(1000))
}
