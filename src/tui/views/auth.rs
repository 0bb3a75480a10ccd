//! Sign-in and registration forms.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, AuthField, AuthForm, Mode, View};
use crate::tui::components::panel;

/// Keybindings for the form on screen.
pub fn help(app: &App) -> &'static str {
    if app.view == View::SignUp {
        "[j/k]field [i]edit [s]register [g]sign in instead [Tab]next view [q]quit"
    } else {
        "[j/k]field [i]edit [s]sign in [g]register instead [Tab]next view [q]quit"
    }
}

/// Renders the active auth form, centred.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let fields = AuthForm::fields(app.view);
    let height = fields.len() as u16 * 3 + 4;
    let area = centered(area, 50, height);

    let block = panel::block(
        if app.view == View::SignUp {
            " Register "
        } else {
            " Sign In "
        },
        true,
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (field, row) in fields.iter().zip(rows.iter()) {
        render_field(frame, *row, app, *field);
    }

    let form = &app.auth;
    let footer = if form.submitting {
        Line::from(Span::styled("Submitting...", Style::default().fg(Color::Yellow)))
    } else if let Some(error) = form.error {
        Line::from(Span::styled(error, Style::default().fg(Color::Red)))
    } else {
        panel::hint("Press s to submit")
    };
    if let Some(last) = rows.last() {
        frame.render_widget(Paragraph::new(footer), *last);
    }
}

fn render_field(frame: &mut Frame, area: Rect, app: &App, field: AuthField) {
    let form = &app.auth;
    let focused = form.focus == field;
    let editing = focused && app.mode == Mode::Insert;
    let title = if editing {
        format!(" {} (INSERT) ", field.label())
    } else {
        format!(" {} ", field.label())
    };
    let block = panel::block(&title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = match field {
        AuthField::Username => &form.username,
        AuthField::Email => &form.email,
        AuthField::Password => &form.password,
    };
    let text = if field == AuthField::Password {
        input.masked()
    } else {
        input.as_str().to_string()
    };
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    frame.render_widget(Paragraph::new(Span::styled(text, style)), inner);

    if editing {
        frame.set_cursor_position((inner.x + input.cursor() as u16, inner.y));
    }
}

/// A `width` × `height` rectangle centred in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
