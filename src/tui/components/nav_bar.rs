//! Navigation bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, View};

/// Renders the brand, the navigation views and the account entry.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let active = app.view.nav_index();
    let mut spans: Vec<Span> = vec![
        Span::styled(
            " ◆ Gemshop ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    for (i, view) in View::NAV.iter().enumerate() {
        spans.push(Span::styled(format!(" {} ", view.title()), tab_style(active == Some(i))));
        spans.push(Span::raw(" "));
    }

    let account = match &app.session {
        Some(session) => Span::styled(
            format!(" {} ", session.username),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled(
            " Sign In ",
            tab_style(matches!(app.view, View::SignIn | View::SignUp)),
        ),
    };
    spans.push(Span::raw("│"));
    spans.push(account);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn tab_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}
