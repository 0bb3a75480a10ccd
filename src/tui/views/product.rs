//! Product detail view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::gateway::Gateway;
use crate::models::Product;
use crate::tui::app::App;
use crate::tui::components::panel;

pub const HELP: &str = "[+/-]quantity [Enter]add to cart [b]back [r]refresh [Tab]next view [q]quit";

/// Renders the product detail view.
pub fn render(frame: &mut Frame, area: Rect, app: &App, gateway: &Gateway) {
    let detail = &app.detail;
    let title = detail
        .product
        .data()
        .map_or_else(|| " Product ".to_string(), |p| format!(" {} ", p.name));
    let block = panel::block(&title, true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(product) = detail.product.data() else {
        let line = panel::status_line(&detail.product)
            .unwrap_or_else(|| panel::hint("Product not found"));
        frame.render_widget(Paragraph::new(line), inner);
        return;
    };

    let description = Paragraph::new(product.description.as_str()).wrap(Wrap { trim: true });
    let description_height = description.line_count(inner.width).min(8) as u16;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),                  // Summary
            Constraint::Length(description_height), // Description
            Constraint::Min(1),                     // Specifications
            Constraint::Length(3),                  // Add to cart
        ])
        .split(inner);

    render_summary(frame, layout[0], product, gateway);
    frame.render_widget(description, layout[1]);
    render_specifications(frame, layout[2], product);
    render_purchase(frame, layout[3], app);
}

fn render_summary(frame: &mut Frame, area: Rect, product: &Product, gateway: &Gateway) {
    let dim = Style::default().fg(Color::DarkGray);
    let stock = if product.in_stock() {
        Span::styled(
            format!("{} in stock", product.stock_quantity),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::styled("Out of stock", Style::default().fg(Color::Red))
    };
    let image = gateway.image_url(product.image_url.as_deref());

    let lines = vec![
        Line::from(panel::price(product.price)),
        Line::from(vec![
            Span::styled("Category: ", dim),
            Span::raw(product.category.clone()),
            Span::styled("  Brand: ", dim),
            Span::raw(product.brand.clone()),
            Span::styled("  Color: ", dim),
            Span::raw(product.color.clone()),
        ]),
        Line::from(stock),
        Line::from(vec![
            Span::styled("Image: ", dim),
            Span::raw(panel::truncate(&image, area.width.saturating_sub(7) as usize)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_specifications(frame: &mut Frame, area: Rect, product: &Product) {
    if product.specifications.is_empty() {
        return;
    }
    let mut lines = vec![Line::from(Span::styled(
        "Specifications",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(product.specifications.iter().map(|(key, value)| {
        Line::from(vec![
            Span::styled(format!("  {key}: "), Style::default().fg(Color::DarkGray)),
            Span::raw(value.clone()),
        ])
    }));
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_purchase(frame: &mut Frame, area: Rect, app: &App) {
    let detail = &app.detail;
    let mut spans = vec![
        Span::raw("Quantity: "),
        Span::styled(
            format!(" - {} + ", detail.quantity),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    let in_stock = detail.product.data().is_some_and(Product::in_stock);
    if detail.adding {
        spans.push(Span::styled("Adding...", Style::default().fg(Color::Yellow)));
    } else if !in_stock {
        spans.push(Span::styled(
            "[Enter] Add to Cart (out of stock)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        ));
    } else {
        spans.push(Span::styled("[Enter] Add to Cart", Style::default().fg(Color::Green)));
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(message) = detail.product.error() {
        lines.push(Line::from(Span::styled(message, Style::default().fg(Color::Red))));
    }
    frame.render_widget(Paragraph::new(lines), area);
}
