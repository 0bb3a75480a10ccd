//! Order history view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::models::Order;
use crate::pricing;
use crate::tui::app::App;
use crate::tui::components::panel;

pub const HELP: &str = "[j/k]select [r]refresh [Tab]next view [q]quit";

/// Renders the orders view.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let state = &app.orders;
    let block = panel::block(" My Orders ", true);
    let inner = block.inner(columns[0]);
    frame.render_widget(block, columns[0]);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);
    if let Some(status) = panel::status_line(&state.orders) {
        frame.render_widget(Paragraph::new(status), layout[0]);
    }

    let orders = state.orders.data().map_or(&[][..], Vec::as_slice);
    if orders.is_empty() {
        if state.orders.data().is_some() {
            frame.render_widget(Paragraph::new(panel::hint("No orders yet")), layout[1]);
        }
    } else {
        let items: Vec<ListItem> = orders
            .iter()
            .map(|o| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("#{:<6}", o.id),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("{:<12}", o.placed_on())),
                    Span::styled(format!("{:<10}", o.status), status_style(&o.status)),
                    panel::price(o.total_amount),
                ]))
            })
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▶ ");
        let mut list_state = ListState::default().with_selected(Some(state.selected));
        frame.render_stateful_widget(list, layout[1], &mut list_state);
    }

    render_order_detail(frame, columns[1], orders.get(state.selected));
}

fn render_order_detail(frame: &mut Frame, area: Rect, order: Option<&Order>) {
    let block = panel::block(" Order Details ", false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(order) = order else {
        return;
    };
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Placed: ", dim),
            Span::raw(order.placed_on().to_string()),
            Span::styled("  Status: ", dim),
            Span::styled(order.status.clone(), status_style(&order.status)),
        ]),
        Line::from(""),
    ];
    let name_width = (inner.width as usize).saturating_sub(24);
    lines.extend(order.items.iter().map(|item| {
        let name = item.product_name.as_deref().unwrap_or("Product");
        Line::from(vec![
            Span::raw(format!("{:<name_width$} ", panel::truncate(name, name_width))),
            Span::styled(format!("{:>3} × ", item.quantity), dim),
            Span::raw(pricing::format_amount(item.line_total())),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Total: "),
        panel::price(order.total_amount),
    ]));
    if let Some(address) = &order.shipping_address {
        let city = order.shipping_city.as_deref().unwrap_or_default();
        lines.push(Line::from(Span::styled(
            format!("Ship to: {address} {city}"),
            dim,
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn status_style(status: &str) -> Style {
    let color = match status {
        "DELIVERED" | "COMPLETED" => Color::Green,
        "CANCELLED" => Color::Red,
        _ => Color::Yellow,
    };
    Style::default().fg(color)
}
