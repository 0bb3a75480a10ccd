//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, Mode};

/// Renders the session state, the current notice and the input mode.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session_span = match &app.session {
        Some(session) => Span::styled(
            format!(" Signed in: {} ", session.username),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled(" Guest ", Style::default().fg(Color::Gray)),
    };

    let notice_span = match &app.notice {
        Some(notice) => Span::styled(
            format!(" {} ", notice.message),
            Style::default().fg(if notice.is_error {
                Color::Red
            } else {
                Color::Cyan
            }),
        ),
        None => Span::raw(""),
    };

    let mode = match app.mode {
        Mode::Normal => " NORMAL ",
        Mode::Insert => " INSERT ",
    };

    let spans = vec![
        session_span,
        Span::raw("│"),
        notice_span,
        Span::raw(format!(
            "{:>width$}",
            mode,
            width = area.width.saturating_sub(50) as usize
        )),
    ];

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
