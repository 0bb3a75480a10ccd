//! Home view: welcome banner and featured products.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::models::Product;
use crate::tui::app::App;
use crate::tui::components::panel;

pub const HELP: &str = "[Tab]next view [Enter]shop all [r]refresh [S]sign in [X]sign out [q]quit";

/// Renders the home view.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(area);

    render_banner(frame, layout[0]);
    render_featured(frame, layout[1], app);
}

fn render_banner(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Discover Timeless Elegance",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Rings, necklaces, bracelets, earrings and watches from the houses you love."),
    ];
    let para = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

fn render_featured(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel::block(" Featured ", true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(status) = panel::status_line(&app.home) {
        lines.push(status);
    }

    let featured = app.featured();
    if featured.is_empty() && !app.home.is_loading() {
        lines.push(panel::hint("No products yet"));
    }
    let width = inner.width as usize;
    lines.extend(featured.iter().flat_map(|p| product_card(p, width)));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Two lines per product: name and price, then category and brand.
fn product_card(product: &Product, width: usize) -> [Line<'static>; 2] {
    let name_width = width.saturating_sub(14);
    [
        Line::from(vec![
            Span::styled(
                format!("{:<name_width$}", panel::truncate(&product.name, name_width)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            panel::price(product.price),
        ]),
        Line::from(Span::styled(
            format!("  {} · {}", product.category, product.brand),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}
