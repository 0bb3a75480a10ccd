//! Event handling for the TUI.
//!
//! [`update`] is the only place application state changes. Gateway results
//! come back as [`Message`]s; anything that needs the network leaves as an
//! [`Action`] for the [`Dispatcher`](super::dispatch::Dispatcher). Writes
//! never patch local state: a successful mutation is answered with a fresh
//! read of the affected view.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::Result;
use crate::filter::FilterSelection;
use crate::models::{
    Cart, CheckoutRequest, Order, Product, Secret, SignInRequest, SignUpRequest,
};
use crate::pricing;
use crate::resource::Ticket;
use crate::session::Session;

use super::app::{App, AuthForm, CatalogFocus, Mode, View, messages};
use super::input::text_input::TextInput;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// Home view product list.
    FeaturedLoaded(Ticket, Result<Vec<Product>>),
    /// Catalog search results.
    ProductsLoaded(Ticket, Result<Vec<Product>>),
    /// Product detail.
    ProductLoaded(Ticket, Result<Product>),
    /// Cart snapshot.
    CartLoaded(Ticket, Result<Cart>),
    /// Order history.
    OrdersLoaded(Ticket, Result<Vec<Order>>),

    /// Add-to-cart finished.
    AddedToCart(Result<()>),
    /// Quantity change finished.
    QuantityUpdated(Result<()>),
    /// Line removal finished.
    ItemRemoved(Result<()>),
    /// Order placed and cart cleared.
    CheckedOut(Result<Order>),

    /// Sign-in finished; the session is already persisted.
    SignedIn(Result<Session>),
    /// Registration finished.
    SignedUp(Result<()>),
}

/// Actions that require external handling (gateway calls, session storage).
#[derive(Debug)]
pub enum Action {
    LoadFeatured(Ticket),
    SearchProducts {
        ticket: Ticket,
        filter: FilterSelection,
    },
    LoadProduct {
        ticket: Ticket,
        id: u64,
    },
    LoadCart {
        ticket: Ticket,
        session: Option<Session>,
    },
    LoadOrders {
        ticket: Ticket,
        session: Option<Session>,
    },
    AddToCart {
        session: Option<Session>,
        product_id: u64,
        quantity: u32,
    },
    /// Cart writes address the cart line id, not the product id.
    UpdateQuantity {
        session: Option<Session>,
        item_id: u64,
        quantity: u32,
    },
    RemoveItem {
        session: Option<Session>,
        item_id: u64,
    },
    /// Create the order, then clear the cart.
    Checkout {
        session: Option<Session>,
        request: CheckoutRequest,
    },
    SignIn(SignInRequest),
    SignUp(SignUpRequest),
    /// Remove the persisted session.
    ClearSession,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::FeaturedLoaded(ticket, result) => {
            app.home.resolve(ticket, result, messages::FETCH_FEATURED);
            None
        }
        Message::ProductsLoaded(ticket, result) => {
            if app
                .catalog
                .products
                .resolve(ticket, result, messages::FETCH_PRODUCTS)
            {
                let len = app.catalog.products.data().map_or(0, Vec::len);
                app.catalog.selected = app.catalog.selected.min(len.saturating_sub(1));
            }
            None
        }
        Message::ProductLoaded(ticket, result) => {
            app.detail
                .product
                .resolve(ticket, result, messages::FETCH_PRODUCT);
            None
        }
        Message::CartLoaded(ticket, result) => {
            if app.cart.cart.resolve(ticket, result, messages::FETCH_CART) {
                let len = app.cart.cart.data().map_or(0, |c| c.items.len());
                app.cart.selected = app.cart.selected.min(len.saturating_sub(1));
            }
            None
        }
        Message::OrdersLoaded(ticket, result) => {
            if app
                .orders
                .orders
                .resolve(ticket, result, messages::FETCH_ORDERS)
            {
                let len = app.orders.orders.data().map_or(0, Vec::len);
                app.orders.selected = app.orders.selected.min(len.saturating_sub(1));
            }
            None
        }
        Message::AddedToCart(result) => {
            app.detail.adding = false;
            match result {
                Ok(()) if matches!(app.view, View::Product(_)) => app.navigate(View::Cart),
                Ok(()) => None,
                Err(e) => {
                    app.detail.product.fail(&e, messages::ADD_TO_CART);
                    None
                }
            }
        }
        Message::QuantityUpdated(result) => {
            after_cart_mutation(app, result, messages::UPDATE_QUANTITY)
        }
        Message::ItemRemoved(result) => after_cart_mutation(app, result, messages::REMOVE_ITEM),
        Message::CheckedOut(result) => {
            app.cart.checking_out = false;
            match result {
                Ok(order) => {
                    app.show_notice(format!("Order #{} placed", order.id), false);
                    if app.view == View::Cart {
                        app.navigate(View::Orders)
                    } else {
                        None
                    }
                }
                Err(e) => {
                    app.cart.cart.fail(&e, messages::CREATE_ORDER);
                    None
                }
            }
        }
        Message::SignedIn(result) => {
            app.auth.submitting = false;
            match result {
                Ok(session) => {
                    info!(username = %session.username, "session started");
                    app.show_notice(format!("Signed in as {}", session.username), false);
                    app.session = Some(session);
                    app.auth.reset(false);
                    app.navigate(View::Home)
                }
                Err(e) => {
                    warn!(error = %e, "sign-in failed");
                    app.auth.error = Some(messages::SIGN_IN);
                    None
                }
            }
        }
        Message::SignedUp(result) => {
            app.auth.submitting = false;
            match result {
                Ok(()) => {
                    app.auth.reset(true);
                    app.show_notice("Registration successful, please sign in", false);
                    app.navigate(View::SignIn)
                }
                Err(e) => {
                    warn!(error = %e, "registration failed");
                    app.auth.error = Some(messages::SIGN_UP);
                    None
                }
            }
        }
    }
}

/// Refetches the cart after a successful write, or records the failure.
fn after_cart_mutation(app: &mut App, result: Result<()>, message: &'static str) -> Option<Action> {
    match result {
        Ok(()) if app.view == View::Cart => Some(app.load_cart()),
        Ok(()) => None,
        Err(e) => {
            app.cart.cart.fail(&e, message);
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_notices();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys (work in any mode)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Esc if app.mode == Mode::Insert => {
            app.mode = Mode::Normal;
            return None;
        }
        _ => {}
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        KeyCode::Tab => {
            let next = app
                .view
                .nav_index()
                .map_or(0, |i| (i + 1) % View::NAV.len());
            app.navigate(View::NAV[next])
        }
        KeyCode::BackTab => {
            let len = View::NAV.len();
            let prev = app.view.nav_index().map_or(len - 1, |i| (i + len - 1) % len);
            app.navigate(View::NAV[prev])
        }
        KeyCode::Char('S') if !app.is_signed_in() => app.navigate(View::SignIn),
        KeyCode::Char('X') if app.is_signed_in() => sign_out(app),
        _ => match app.view {
            View::Home => handle_home_keys(app, key),
            View::Catalog => handle_catalog_keys(app, key),
            View::Product(id) => handle_product_keys(app, key, id),
            View::Cart => handle_cart_keys(app, key),
            View::Orders => handle_orders_keys(app, key),
            View::SignIn | View::SignUp => handle_auth_keys(app, key),
        },
    }
}

/// Drops the session locally and asks the dispatcher to forget it.
fn sign_out(app: &mut App) -> Option<Action> {
    if let Some(session) = app.sign_out() {
        info!(username = %session.username, "signed out");
    }
    app.show_notice("Signed out", false);
    Some(Action::ClearSession)
}

fn handle_home_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Enter => app.navigate(View::Catalog),
        _ => None,
    }
}

/// Handles keys for the catalog view (filter panel and product list).
fn handle_catalog_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    let catalog = &mut app.catalog;
    match key.code {
        KeyCode::Char('f') => {
            catalog.focus = match catalog.focus {
                CatalogFocus::Filters => CatalogFocus::List,
                CatalogFocus::List => CatalogFocus::Filters,
            };
            None
        }
        KeyCode::Char('c') => {
            catalog.filter = FilterSelection::clear();
            catalog.price_input.take();
            Some(catalog.search())
        }
        KeyCode::Char('r') => Some(catalog.search()),
        _ => match app.catalog.focus {
            CatalogFocus::Filters => handle_filter_keys(app, key),
            CatalogFocus::List => handle_product_list_keys(app, key),
        },
    }
}

fn handle_filter_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    let catalog = &mut app.catalog;
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => {
            catalog.field = catalog.field.previous();
            None
        }
        KeyCode::Char('l') | KeyCode::Right => {
            catalog.field = catalog.field.next();
            None
        }
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('k') | KeyCode::Up
            if !catalog.field.is_price() =>
        {
            let forward = matches!(key.code, KeyCode::Char('j') | KeyCode::Down);
            catalog.filter.cycle_option(catalog.field, forward);
            Some(catalog.search())
        }
        KeyCode::Char('i') | KeyCode::Enter if catalog.field.is_price() => {
            catalog.price_input = TextInput::with_text(catalog.filter.get(catalog.field));
            app.mode = Mode::Insert;
            None
        }
        KeyCode::Enter => {
            catalog.focus = CatalogFocus::List;
            None
        }
        _ => None,
    }
}

fn handle_product_list_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    let catalog = &mut app.catalog;
    let len = catalog.products.data().map_or(0, Vec::len);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if catalog.selected + 1 < len {
                catalog.selected += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            catalog.selected = catalog.selected.saturating_sub(1);
            None
        }
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            let id = catalog.selected_product()?.id;
            app.navigate(View::Product(id))
        }
        _ => None,
    }
}

/// Handles keys for the product detail view.
fn handle_product_keys(app: &mut App, key: KeyEvent, id: u64) -> Option<Action> {
    let detail = &mut app.detail;
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('k') | KeyCode::Up => {
            detail.quantity = pricing::increment(detail.quantity);
            None
        }
        KeyCode::Char('-') | KeyCode::Char('j') | KeyCode::Down => {
            detail.quantity = pricing::clamp_quantity(i64::from(detail.quantity) - 1);
            None
        }
        KeyCode::Enter | KeyCode::Char('a') => {
            if detail.adding || !detail.product.data().is_some_and(Product::in_stock) {
                return None;
            }
            detail.adding = true;
            Some(Action::AddToCart {
                session: app.session.clone(),
                product_id: id,
                quantity: detail.quantity,
            })
        }
        KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => app.navigate(View::Catalog),
        KeyCode::Char('r') => app.refresh(),
        _ => None,
    }
}

/// Handles keys for the cart view.
fn handle_cart_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    let len = app.cart.cart.data().map_or(0, |c| c.items.len());
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.cart.selected + 1 < len {
                app.cart.selected += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cart.selected = app.cart.selected.saturating_sub(1);
            None
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let item = app.cart.selected_item()?;
            Some(Action::UpdateQuantity {
                session: app.session.clone(),
                item_id: item.id,
                quantity: pricing::increment(item.quantity),
            })
        }
        KeyCode::Char('-') => {
            let item = app.cart.selected_item()?;
            // At quantity 1 the control is disabled: no request is issued.
            let quantity = pricing::decrement(item.quantity)?;
            Some(Action::UpdateQuantity {
                session: app.session.clone(),
                item_id: item.id,
                quantity,
            })
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let item_id = app.cart.selected_item()?.id;
            Some(Action::RemoveItem {
                session: app.session.clone(),
                item_id,
            })
        }
        KeyCode::Char('c') => {
            if app.cart.checking_out {
                return None;
            }
            let items = app.cart.cart.data().filter(|c| !c.is_empty())?.items.clone();
            app.cart.checking_out = true;
            Some(Action::Checkout {
                session: app.session.clone(),
                request: CheckoutRequest::from_items(items),
            })
        }
        KeyCode::Char('r') => app.refresh(),
        _ => None,
    }
}

/// Handles keys for the orders view.
fn handle_orders_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    let len = app.orders.orders.data().map_or(0, Vec::len);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.orders.selected + 1 < len {
                app.orders.selected += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.orders.selected = app.orders.selected.saturating_sub(1);
            None
        }
        KeyCode::Char('r') => app.refresh(),
        _ => None,
    }
}

/// Handles keys for the sign-in and registration forms.
fn handle_auth_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    let fields = AuthForm::fields(app.view);
    let pos = fields.iter().position(|f| *f == app.auth.focus).unwrap_or(0);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.auth.focus = fields[(pos + 1) % fields.len()];
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.auth.focus = fields[(pos + fields.len() - 1) % fields.len()];
            None
        }
        KeyCode::Char('i') | KeyCode::Enter => {
            app.auth.focus = fields[pos];
            app.mode = Mode::Insert;
            None
        }
        KeyCode::Char('s') => submit_auth(app),
        KeyCode::Char('g') => {
            let other = if app.view == View::SignIn {
                View::SignUp
            } else {
                View::SignIn
            };
            app.auth.reset(true);
            app.navigate(other)
        }
        _ => None,
    }
}

/// Builds the sign-in or registration request from the form.
///
/// Incomplete forms are ignored.
fn submit_auth(app: &mut App) -> Option<Action> {
    let username = app.auth.username.as_str().trim().to_string();
    let password = app.auth.password.as_str();
    if app.auth.submitting || username.is_empty() || password.is_empty() {
        return None;
    }
    let password = Secret::new(password);
    let action = if app.view == View::SignUp {
        let email = app.auth.email.as_str().trim().to_string();
        if email.is_empty() {
            return None;
        }
        Action::SignUp(SignUpRequest {
            username,
            email,
            password,
        })
    } else {
        Action::SignIn(SignInRequest { username, password })
    };
    app.auth.submitting = true;
    app.auth.error = None;
    Some(action)
}

/// Handles keys in insert mode (text input).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match app.view {
        View::Catalog if app.catalog.field.is_price() => edit_price(app, key),
        View::SignIn | View::SignUp => edit_auth(app, key),
        _ => {
            app.mode = Mode::Normal;
            None
        }
    }
}

/// Applies a keystroke to the price filter being typed.
///
/// Edits that would leave invalid price text are dropped; accepted edits
/// re-run the search.
fn edit_price(app: &mut App, key: KeyEvent) -> Option<Action> {
    let catalog = &mut app.catalog;
    let mut candidate = catalog.price_input.clone();
    if key.code == KeyCode::Enter {
        app.mode = Mode::Normal;
        return None;
    }
    if !apply_edit(&mut candidate, key) {
        return None;
    }
    if candidate.as_str() == catalog.price_input.as_str() {
        // Cursor movement only.
        catalog.price_input = candidate;
        return None;
    }
    if !catalog.filter.set_field(catalog.field, candidate.as_str()) {
        return None;
    }
    catalog.price_input = candidate;
    Some(catalog.search())
}

/// Applies a keystroke to the focused auth field.
fn edit_auth(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Enter {
        let fields = AuthForm::fields(app.view);
        let pos = fields.iter().position(|f| *f == app.auth.focus).unwrap_or(0);
        if pos + 1 < fields.len() {
            app.auth.focus = fields[pos + 1];
            return None;
        }
        app.mode = Mode::Normal;
        return submit_auth(app);
    }
    let focus = app.auth.focus;
    apply_edit(app.auth.input_mut(focus), key);
    None
}

/// Applies a line-editing key to `input`; returns whether the key was one.
fn apply_edit(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::GemshopError;
    use crate::filter::FilterField;
    use crate::models::CartItem;

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        update(
            app,
            Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn type_text(app: &mut App, text: &str) -> Vec<Action> {
        text.chars()
            .filter_map(|c| press(app, KeyCode::Char(c)))
            .collect()
    }

    fn item(product_id: u64, price: rust_decimal::Decimal, quantity: u32) -> CartItem {
        CartItem {
            id: product_id * 10,
            product_id,
            product_name: Some(format!("Product {product_id}")),
            product_price: Some(price),
            image_url: None,
            quantity,
        }
    }

    fn cart_app(items: Vec<CartItem>) -> App {
        let mut app = App::new(Some(Session::new("alice", Secret::new("t"))));
        let Some(Action::LoadCart { ticket, .. }) = app.navigate(View::Cart) else {
            panic!("cart view should load the cart");
        };
        update(
            &mut app,
            Message::CartLoaded(
                ticket,
                Ok(Cart {
                    id: Some(1),
                    items,
                    total_amount: None,
                }),
            ),
        );
        app
    }

    fn gateway_error() -> GemshopError {
        GemshopError::Status {
            status: 500,
            body: "boom".into(),
        }
    }

    #[test]
    fn decrement_at_quantity_one_issues_nothing() {
        let mut app = cart_app(vec![item(1, dec!(10), 1)]);
        assert!(press(&mut app, KeyCode::Char('-')).is_none());
        assert_eq!(app.cart.selected_item().map(|i| i.quantity), Some(1));
    }

    #[test]
    fn decrement_above_one_updates_quantity() {
        let mut app = cart_app(vec![item(4, dec!(10), 3)]);
        let action = press(&mut app, KeyCode::Char('-'));
        assert!(matches!(
            action,
            Some(Action::UpdateQuantity {
                item_id: 40,
                quantity: 2,
                ..
            })
        ));
    }

    #[test]
    fn cart_writes_address_the_line_not_the_product() {
        let mut app = cart_app(vec![CartItem {
            id: 101,
            ..item(4, dec!(49.99), 3)
        }]);
        assert!(matches!(
            press(&mut app, KeyCode::Char('+')),
            Some(Action::UpdateQuantity {
                item_id: 101,
                quantity: 4,
                ..
            })
        ));
        assert!(matches!(
            press(&mut app, KeyCode::Char('-')),
            Some(Action::UpdateQuantity {
                item_id: 101,
                quantity: 2,
                ..
            })
        ));
        assert!(matches!(
            press(&mut app, KeyCode::Char('d')),
            Some(Action::RemoveItem { item_id: 101, .. })
        ));
    }

    #[test]
    fn successful_write_refetches_cart() {
        let mut app = cart_app(vec![item(1, dec!(10), 1)]);
        let action = update(&mut app, Message::QuantityUpdated(Ok(())));
        assert!(matches!(action, Some(Action::LoadCart { .. })));
        assert!(app.cart.cart.is_loading());
    }

    #[test]
    fn failed_removal_keeps_snapshot_and_shows_error() {
        let mut app = cart_app(vec![item(1, dec!(10), 2)]);
        let action = update(&mut app, Message::ItemRemoved(Err(gateway_error())));
        assert!(action.is_none());
        assert_eq!(app.cart.cart.error(), Some(messages::REMOVE_ITEM));
        assert_eq!(app.cart.cart.data().map(|c| c.items.len()), Some(1));
    }

    #[test]
    fn checkout_sends_items_with_total() {
        let mut app = cart_app(vec![item(1, dec!(10), 2), item(2, dec!(5), 1)]);
        let Some(Action::Checkout { request, session }) = press(&mut app, KeyCode::Char('c'))
        else {
            panic!("expected checkout");
        };
        assert_eq!(request.total_amount, dec!(25));
        assert_eq!(request.items.len(), 2);
        assert!(session.is_some());
        assert!(press(&mut app, KeyCode::Char('c')).is_none());
    }

    #[test]
    fn checkout_of_empty_cart_is_ignored() {
        let mut app = cart_app(vec![]);
        assert!(press(&mut app, KeyCode::Char('c')).is_none());
    }

    #[test]
    fn checkout_success_moves_to_orders() {
        let mut app = cart_app(vec![item(1, dec!(10), 1)]);
        app.cart.checking_out = true;
        let order = Order {
            id: 9,
            order_date: "2024-05-01T10:00:00".into(),
            total_amount: dec!(10),
            status: "PENDING".into(),
            shipping_address: None,
            shipping_city: None,
            payment_method: None,
            payment_status: None,
            items: vec![],
        };
        let action = update(&mut app, Message::CheckedOut(Ok(order)));
        assert!(matches!(action, Some(Action::LoadOrders { .. })));
        assert_eq!(app.view, View::Orders);
        assert!(!app.cart.checking_out);
    }

    #[test]
    fn stale_search_results_are_ignored() {
        let mut app = App::default();
        let Some(Action::SearchProducts { ticket: first, .. }) = app.navigate(View::Catalog)
        else {
            panic!("catalog should search");
        };
        // Cycling the category re-runs the search.
        let Some(Action::SearchProducts {
            ticket: second,
            filter,
        }) = press(&mut app, KeyCode::Down)
        else {
            panic!("filter change should search");
        };
        assert_eq!(filter.get(FilterField::Category), "Rings");

        update(&mut app, Message::ProductsLoaded(second, Ok(vec![])));
        update(
            &mut app,
            Message::ProductsLoaded(first, Err(gateway_error())),
        );
        assert!(app.catalog.products.error().is_none());
        assert_eq!(app.catalog.products.data().map(Vec::len), Some(0));
    }

    #[test]
    fn price_typing_rejects_invalid_characters() {
        let mut app = App::default();
        app.navigate(View::Catalog);
        press(&mut app, KeyCode::Right); // minPrice
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Insert);

        let searches = type_text(&mut app, "1x0.5.");
        assert_eq!(app.catalog.filter.get(FilterField::MinPrice), "10.5");
        assert_eq!(searches.len(), 4);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn clearing_filters_searches_everything() {
        let mut app = App::default();
        app.navigate(View::Catalog);
        press(&mut app, KeyCode::Down);
        let Some(Action::SearchProducts { filter, .. }) = press(&mut app, KeyCode::Char('c'))
        else {
            panic!("clear should search");
        };
        assert!(filter.is_empty());
    }

    #[test]
    fn product_quantity_never_drops_below_one() {
        let mut app = App::default();
        app.navigate(View::Product(3));
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.detail.quantity, 1);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.detail.quantity, 2);
    }

    #[test]
    fn add_to_cart_then_navigates_to_cart() {
        let mut app = App::default();
        let Some(Action::LoadProduct { ticket, id }) = app.navigate(View::Product(3)) else {
            panic!("product view should load");
        };
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": id, "name": "Halo Ring", "price": 49.99, "stockQuantity": 5
        }))
        .unwrap();
        update(&mut app, Message::ProductLoaded(ticket, Ok(product)));

        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        let action = press(&mut app, KeyCode::Enter);
        assert!(matches!(
            action,
            Some(Action::AddToCart {
                product_id: 3,
                quantity: 3,
                ..
            })
        ));

        let action = update(&mut app, Message::AddedToCart(Ok(())));
        assert!(matches!(action, Some(Action::LoadCart { .. })));
        assert_eq!(app.view, View::Cart);
    }

    #[test]
    fn out_of_stock_product_cannot_be_added() {
        let mut app = App::default();
        let Some(Action::LoadProduct { ticket, id }) = app.navigate(View::Product(3)) else {
            panic!("product view should load");
        };
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": id, "name": "Charm Bracelet", "price": 89.99, "stockQuantity": 0
        }))
        .unwrap();
        update(&mut app, Message::ProductLoaded(ticket, Ok(product)));

        assert!(press(&mut app, KeyCode::Enter).is_none());
        assert!(press(&mut app, KeyCode::Char('a')).is_none());
        assert!(!app.detail.adding);
        assert_eq!(app.view, View::Product(3));
    }

    #[test]
    fn late_mutation_result_does_not_navigate() {
        let mut app = App::default();
        app.navigate(View::Product(3));
        app.navigate(View::Orders);
        assert!(update(&mut app, Message::AddedToCart(Ok(()))).is_none());
        assert_eq!(app.view, View::Orders);
    }

    #[test]
    fn sign_in_form_submits_credentials() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('S'));
        assert_eq!(app.view, View::SignIn);

        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "alice");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "s3cret");
        let Some(Action::SignIn(request)) = press(&mut app, KeyCode::Enter) else {
            panic!("expected sign-in");
        };
        assert_eq!(request.username, "alice");
        assert_eq!(request.password.expose(), "s3cret");
        assert!(app.auth.submitting);
    }

    #[test]
    fn signed_in_session_is_kept_and_sign_out_clears_it() {
        let mut app = App::default();
        app.navigate(View::SignIn);
        let action = update(
            &mut app,
            Message::SignedIn(Ok(Session::new("alice", Secret::new("t")))),
        );
        assert!(matches!(action, Some(Action::LoadFeatured(_))));
        assert_eq!(app.session.as_ref().map(|s| s.username.as_str()), Some("alice"));

        let action = press(&mut app, KeyCode::Char('X'));
        assert!(matches!(action, Some(Action::ClearSession)));
        assert!(app.session.is_none());
    }

    #[test]
    fn tab_cycles_navigation_views() {
        let mut app = App::default();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Catalog);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.view, View::Home);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.view, View::Orders);
    }
}
