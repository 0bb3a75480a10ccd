//! Cart view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::gateway::Gateway;
use crate::pricing;
use crate::tui::app::App;
use crate::tui::components::panel;

/// Keybindings for the cart; `-` is left out while the selected line is at 1.
pub fn help(app: &App) -> &'static str {
    let can_decrement = app
        .cart
        .selected_item()
        .is_some_and(|item| pricing::decrement(item.quantity).is_some());
    if can_decrement {
        "[j/k]select [+/-]quantity [d]remove [c]checkout [r]refresh [Tab]next view [q]quit"
    } else {
        "[j/k]select [+]quantity [d]remove [c]checkout [r]refresh [Tab]next view [q]quit"
    }
}

/// Renders the cart view.
pub fn render(frame: &mut Frame, area: Rect, app: &App, gateway: &Gateway) {
    let state = &app.cart;
    let block = panel::block(" Shopping Cart ", true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status
            Constraint::Min(3),    // Lines
            Constraint::Length(1), // Selected image
            Constraint::Length(2), // Summary
        ])
        .split(inner);

    if let Some(status) = panel::status_line(&state.cart) {
        frame.render_widget(Paragraph::new(status), layout[0]);
    }

    let items = state.cart.data().map_or(&[][..], |c| c.items.as_slice());
    if items.is_empty() {
        if state.cart.data().is_some() {
            frame.render_widget(
                Paragraph::new(panel::hint("Your cart is empty")),
                layout[1],
            );
        }
        return;
    }

    let rows: Vec<Row> = items
        .iter()
        .map(|item| {
            Row::new(vec![
                Cell::from(item.display_name().to_string()),
                Cell::from(pricing::format_amount(item.product_price.unwrap_or_default())),
                Cell::from(quantity_selector(item.quantity)),
                Cell::from(pricing::format_amount(pricing::line_subtotal(item))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Product", "Price", "Qty", "Subtotal"])
            .style(Style::default().fg(Color::DarkGray)),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("▶ ");
    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, layout[1], &mut table_state);

    if let Some(item) = state.selected_item() {
        let image = gateway.image_url(item.image_url.as_deref());
        frame.render_widget(
            Paragraph::new(panel::hint(&panel::truncate(
                &format!("Image: {image}"),
                layout[2].width as usize,
            ))),
            layout[2],
        );
    }

    let count: u32 = items.iter().map(|i| i.quantity).sum();
    let mut summary = vec![
        Span::raw(format!("Items: {count}   Shipping: ")),
        Span::styled("Free", Style::default().fg(Color::Green)),
        Span::raw("   Total: "),
        panel::price(pricing::cart_total(items)),
        Span::raw("   "),
    ];
    if state.checking_out {
        summary.push(Span::styled("Placing order...", Style::default().fg(Color::Yellow)));
    } else {
        summary.push(Span::styled(
            "[c] Checkout",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(summary)), layout[3]);
}

/// `- n +` with the minus greyed out once the line is down to one unit.
fn quantity_selector(quantity: u32) -> Line<'static> {
    let minus = if pricing::decrement(quantity).is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled("- ", minus),
        Span::raw(quantity.to_string()),
        Span::styled(" +", Style::default().fg(Color::Cyan)),
    ])
}
