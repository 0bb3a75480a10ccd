//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::gateway::Gateway;

use super::app::{App, Mode, View};
use super::components::{nav_bar, panel, status_bar};
use super::views::{auth, cart, catalog, home, orders, product};

/// Renders the entire application UI.
///
/// `gateway` is only consulted for image URLs, which it memoizes.
pub fn render(frame: &mut Frame, app: &App, gateway: &Gateway) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Navigation bar
            Constraint::Length(1), // Status bar
            Constraint::Min(8),    // View content
            Constraint::Length(1), // Keybindings help
        ])
        .split(frame.area());

    nav_bar::render(frame, layout[0], app);
    status_bar::render(frame, layout[1], app);

    let content = layout[2];
    let help = match app.view {
        View::Home => {
            home::render(frame, content, app);
            home::HELP
        }
        View::Catalog => {
            catalog::render(frame, content, app);
            catalog::help(app)
        }
        View::Product(_) => {
            product::render(frame, content, app, gateway);
            product::HELP
        }
        View::Cart => {
            cart::render(frame, content, app, gateway);
            cart::help(app)
        }
        View::Orders => {
            orders::render(frame, content, app);
            orders::HELP
        }
        View::SignIn | View::SignUp => {
            auth::render(frame, content, app);
            auth::help(app)
        }
    };

    let help = match app.mode {
        Mode::Insert => "[Esc]normal [Enter]confirm [←/→]move cursor",
        Mode::Normal => help,
    };
    panel::render_keybindings(frame, layout[3], help);
}
