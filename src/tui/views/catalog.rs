//! Catalog view: filter panel and search results.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::filter::FilterField;
use crate::tui::app::{App, CatalogFocus, Mode};
use crate::tui::components::panel;

/// Renders the catalog view.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(20)])
        .split(area);

    render_filters(frame, columns[0], app);
    render_products(frame, columns[1], app);
}

/// Keybindings for the focused panel.
pub fn help(app: &App) -> &'static str {
    match app.catalog.focus {
        CatalogFocus::Filters => {
            "[h/l]field [j/k]option [i]type price [c]clear [f]results [Tab]next view [q]quit"
        }
        CatalogFocus::List => "[j/k]select [Enter]details [f]filters [c]clear [r]refresh [q]quit",
    }
}

fn render_filters(frame: &mut Frame, area: Rect, app: &App) {
    let catalog = &app.catalog;
    let focused = catalog.focus == CatalogFocus::Filters;
    let block = panel::block(" Filters ", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor = None;
    for field in FilterField::ALL {
        let selected = focused && catalog.field == field;
        let editing = selected && app.mode == Mode::Insert && field.is_price();
        let value = if editing {
            catalog.price_input.as_str()
        } else {
            catalog.filter.get(field)
        };

        let label_style = if selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        let shown = match (value.is_empty(), field.is_price()) {
            (true, true) if !editing => "any".to_string(),
            (true, false) => "All".to_string(),
            _ => value.to_string(),
        };
        let arrows = if selected && !field.is_price() { "◂ ▸ " } else { "" };
        let value_style = if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Yellow)
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(arrows, Style::default().fg(Color::Cyan)),
            Span::styled(shown, value_style),
        ]));

        if editing {
            let row = (lines.len() - 1) as u16;
            cursor = Some((inner.x + 2 + catalog.price_input.cursor() as u16, inner.y + row));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

fn render_products(frame: &mut Frame, area: Rect, app: &App) {
    let catalog = &app.catalog;
    let count = catalog.products.data().map_or(0, Vec::len);
    let title = format!(" Products ({count}) ");
    let block = panel::block(&title, catalog.focus == CatalogFocus::List);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let status = panel::status_line(&catalog.products)
        .unwrap_or_else(|| Line::from(filter_summary(app)));
    frame.render_widget(Paragraph::new(status), layout[0]);

    let products = catalog.products.data().map_or(&[][..], Vec::as_slice);
    if products.is_empty() {
        if !catalog.products.is_loading() {
            frame.render_widget(
                Paragraph::new(panel::hint("No products match these filters")),
                layout[1],
            );
        }
        return;
    }

    let width = layout[1].width as usize;
    let name_width = width.saturating_sub(30);
    let items: Vec<ListItem> = products
        .iter()
        .map(|p| {
            let stock = if p.in_stock() {
                Span::styled(" in stock", Style::default().fg(Color::Green))
            } else {
                Span::styled(" sold out", Style::default().fg(Color::Red))
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    "{:<name_width$} ",
                    panel::truncate(&p.name, name_width)
                )),
                Span::styled(
                    format!("{:<10}", panel::truncate(&p.brand, 10)),
                    Style::default().fg(Color::DarkGray),
                ),
                panel::price(p.price),
                stock,
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(
        (catalog.focus == CatalogFocus::List).then_some(catalog.selected),
    );
    frame.render_stateful_widget(list, layout[1], &mut state);
}

/// One-line description of the active filters.
fn filter_summary(app: &App) -> Span<'static> {
    let query = app.catalog.filter.to_query();
    if query.is_empty() {
        return Span::styled("All products", Style::default().fg(Color::DarkGray));
    }
    let text = query
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ");
    Span::styled(text, Style::default().fg(Color::DarkGray))
}
