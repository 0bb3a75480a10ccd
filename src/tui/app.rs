//! Application state for the TUI.

use std::time::{Duration, Instant};

use crate::filter::{FilterField, FilterSelection};
use crate::models::{Cart, Order, Product};
use crate::resource::Resource;
use crate::session::Session;

use super::event::Action;
use super::input::text_input::TextInput;

/// How long a notice stays in the status bar.
const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Number of products featured on the home view.
pub const FEATURED_COUNT: usize = 4;

/// Fixed view messages shown when a gateway call fails.
pub mod messages {
    pub const FETCH_FEATURED: &str = "Failed to fetch featured products";
    pub const FETCH_PRODUCTS: &str = "Failed to fetch products";
    pub const FETCH_PRODUCT: &str = "Failed to fetch product details";
    pub const ADD_TO_CART: &str = "Failed to add item to cart";
    pub const FETCH_CART: &str = "Failed to fetch cart, Login to continue";
    pub const UPDATE_QUANTITY: &str = "Failed to update quantity";
    pub const REMOVE_ITEM: &str = "Failed to remove item";
    pub const CREATE_ORDER: &str = "Failed to create order";
    pub const FETCH_ORDERS: &str = "Failed to fetch orders";
    pub const SIGN_IN: &str = "Failed to sign in, check your username and password";
    pub const SIGN_UP: &str = "Failed to register";
}

/// Central application state container.
pub struct App {
    /// The view currently on screen.
    pub view: View,
    /// Signed-in user, if any. Passed explicitly into authenticated actions.
    pub session: Option<Session>,

    pub home: Resource<Vec<Product>>,
    pub catalog: CatalogState,
    pub detail: DetailState,
    pub cart: CartState,
    pub orders: OrdersState,
    pub auth: AuthForm,

    /// Current input mode.
    pub mode: Mode,
    /// Transient notice in the status bar (clears after a timeout).
    pub notice: Option<Notice>,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app for an optional restored session.
    pub fn new(session: Option<Session>) -> Self {
        Self {
            view: View::Home,
            session,
            home: Resource::new(),
            catalog: CatalogState::default(),
            detail: DetailState::default(),
            cart: CartState::default(),
            orders: OrdersState::default(),
            auth: AuthForm::default(),
            mode: Mode::Normal,
            notice: None,
            should_quit: false,
        }
    }

    /// Returns whether a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Switches to `view`, dropping in-flight reads of the view being left,
    /// and returns the read the new view issues on activation.
    pub fn navigate(&mut self, view: View) -> Option<Action> {
        if view == View::Catalog && self.view != View::Catalog {
            self.catalog.reset_filters();
        }
        self.leave_current_view();
        self.view = view;
        self.mode = Mode::Normal;
        self.activate()
    }

    /// Forgets the session and the user's data and returns to Home.
    ///
    /// Home keeps its last snapshot, so no read is issued.
    pub fn sign_out(&mut self) -> Option<Session> {
        let session = self.session.take();
        self.leave_current_view();
        self.cart.cart.reset();
        self.orders.orders.reset();
        self.view = View::Home;
        self.mode = Mode::Normal;
        session
    }

    /// Re-issues the current view's read.
    pub fn refresh(&mut self) -> Option<Action> {
        self.activate()
    }

    fn leave_current_view(&mut self) {
        match self.view {
            View::Home => self.home.invalidate(),
            View::Catalog => self.catalog.products.invalidate(),
            View::Product(_) => self.detail.product.invalidate(),
            View::Cart => self.cart.cart.invalidate(),
            View::Orders => self.orders.orders.invalidate(),
            View::SignIn | View::SignUp => {}
        }
    }

    fn activate(&mut self) -> Option<Action> {
        match self.view {
            View::Home => Some(Action::LoadFeatured(self.home.begin())),
            View::Catalog => Some(self.catalog.search()),
            View::Product(id) => {
                self.detail.product.reset();
                self.detail.quantity = 1;
                Some(Action::LoadProduct {
                    ticket: self.detail.product.begin(),
                    id,
                })
            }
            View::Cart => Some(self.load_cart()),
            View::Orders => Some(self.load_orders()),
            View::SignIn | View::SignUp => None,
        }
    }

    /// Begins a cart read.
    pub fn load_cart(&mut self) -> Action {
        Action::LoadCart {
            ticket: self.cart.cart.begin(),
            session: self.session.clone(),
        }
    }

    /// Begins an orders read.
    pub fn load_orders(&mut self) -> Action {
        Action::LoadOrders {
            ticket: self.orders.orders.begin(),
            session: self.session.clone(),
        }
    }

    /// Shows a transient notice in the status bar.
    pub fn show_notice(&mut self, message: impl Into<String>, is_error: bool) {
        self.notice = Some(Notice {
            message: message.into(),
            is_error,
            timestamp: Instant::now(),
        });
    }

    /// Clears notices older than the display timeout.
    pub fn clear_stale_notices(&mut self) {
        if let Some(ref notice) = self.notice
            && notice.timestamp.elapsed() > NOTICE_TTL
        {
            self.notice = None;
        }
    }

    /// Products featured on the home view.
    pub fn featured(&self) -> &[Product] {
        self.home
            .data()
            .map_or(&[][..], |p| &p[..p.len().min(FEATURED_COUNT)])
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Views of the storefront.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Catalog,
    Product(u64),
    Cart,
    Orders,
    SignIn,
    SignUp,
}

impl View {
    /// Views reachable from the navigation bar, in order.
    pub const NAV: [View; 4] = [View::Home, View::Catalog, View::Cart, View::Orders];

    /// Returns the display title for the view.
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Catalog => "Products",
            View::Product(_) => "Product",
            View::Cart => "Cart",
            View::Orders => "Orders",
            View::SignIn => "Sign In",
            View::SignUp => "Register",
        }
    }

    /// Position in [`View::NAV`], with the product view counting as Products.
    pub fn nav_index(&self) -> Option<usize> {
        let target = match self {
            View::Product(_) => View::Catalog,
            other => *other,
        };
        Self::NAV.iter().position(|v| *v == target)
    }
}

/// Catalog view state: filters plus the search results.
#[derive(Debug, Default)]
pub struct CatalogState {
    pub products: Resource<Vec<Product>>,
    pub filter: FilterSelection,
    pub focus: CatalogFocus,
    /// Filter field under the cursor in the filter panel.
    pub field: FilterField,
    /// Edit buffer for the price field being typed into.
    pub price_input: TextInput,
    /// Selected row in the product list.
    pub selected: usize,
}

impl CatalogState {
    /// Begins a search with the current filter.
    pub fn search(&mut self) -> Action {
        self.selected = 0;
        Action::SearchProducts {
            ticket: self.products.begin(),
            filter: self.filter.clone(),
        }
    }

    /// Starts over with every filter unset.
    pub fn reset_filters(&mut self) {
        self.filter = FilterSelection::clear();
        self.field = FilterField::default();
        self.focus = CatalogFocus::default();
        self.price_input.take();
    }

    /// The product under the list cursor.
    pub fn selected_product(&self) -> Option<&Product> {
        self.products.data().and_then(|p| p.get(self.selected))
    }
}

/// Focus within the catalog view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CatalogFocus {
    #[default]
    Filters,
    List,
}

/// Product detail view state.
#[derive(Debug)]
pub struct DetailState {
    pub product: Resource<Product>,
    /// Quantity to add, never below 1.
    pub quantity: u32,
    /// An add-to-cart request is in flight.
    pub adding: bool,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            product: Resource::new(),
            quantity: 1,
            adding: false,
        }
    }
}

/// Cart view state.
#[derive(Debug, Default)]
pub struct CartState {
    pub cart: Resource<Cart>,
    pub selected: usize,
    /// A checkout is in flight.
    pub checking_out: bool,
}

impl CartState {
    /// The cart line under the cursor.
    pub fn selected_item(&self) -> Option<&crate::models::CartItem> {
        self.cart.data().and_then(|c| c.items.get(self.selected))
    }
}

/// Orders view state.
#[derive(Debug, Default)]
pub struct OrdersState {
    pub orders: Resource<Vec<Order>>,
    pub selected: usize,
}

/// Sign-in / registration form.
#[derive(Debug, Default)]
pub struct AuthForm {
    pub username: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    pub focus: AuthField,
    pub submitting: bool,
    pub error: Option<&'static str>,
}

impl AuthForm {
    /// Fields shown for the given form.
    pub fn fields(view: View) -> &'static [AuthField] {
        match view {
            View::SignUp => &[AuthField::Username, AuthField::Email, AuthField::Password],
            _ => &[AuthField::Username, AuthField::Password],
        }
    }

    /// Edit buffer of a field.
    pub fn input_mut(&mut self, field: AuthField) -> &mut TextInput {
        match field {
            AuthField::Username => &mut self.username,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    /// Empties every field; the username is kept when `keep_username`.
    pub fn reset(&mut self, keep_username: bool) {
        if !keep_username {
            self.username.take();
        }
        self.email.take();
        self.password.take();
        self.focus = AuthField::Username;
        self.submitting = false;
        self.error = None;
    }
}

/// Fields of the auth forms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthField {
    #[default]
    Username,
    Email,
    Password,
}

impl AuthField {
    /// Returns the field label.
    pub fn label(&self) -> &'static str {
        match self {
            AuthField::Username => "Username",
            AuthField::Email => "Email",
            AuthField::Password => "Password",
        }
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
}

/// Status bar notice with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
    pub timestamp: Instant,
}
