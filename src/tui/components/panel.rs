//! Building blocks for view panels.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rust_decimal::Decimal;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::pricing;
use crate::resource::Resource;

/// Bordered block, highlighted when focused.
pub fn block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Loading indicator or error message for a resource, if any.
pub fn status_line<T>(resource: &Resource<T>) -> Option<Line<'static>> {
    if let Some(message) = resource.error() {
        Some(Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red),
        )))
    } else if resource.is_loading() {
        Some(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )))
    } else {
        None
    }
}

/// Dimmed one-line placeholder.
pub fn hint(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

/// Money amount in bold green.
pub fn price(amount: Decimal) -> Span<'static> {
    Span::styled(
        pricing::format_amount(amount),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )
}

/// Cuts `text` to at most `max` terminal columns, ending in `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max > 0 {
        out.push('…');
    }
    out
}

/// Renders the keybindings help line.
pub fn render_keybindings(frame: &mut Frame, area: Rect, help: &str) {
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Halo Ring", 20), "Halo Ring");
    }

    #[test]
    fn truncate_counts_columns() {
        assert_eq!(truncate("Diamond Solitaire", 8), "Diamond…");
        // Wide characters take two columns each.
        assert_eq!(truncate("指輪指輪", 5), "指輪…");
        assert_eq!(truncate("abc", 0), "");
    }
}
