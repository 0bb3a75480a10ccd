//! Terminal storefront.
//!
//! Ratatui views over the gateway: home, catalog, product detail, cart,
//! orders and the sign-in / registration forms. State lives in [`App`] and
//! changes only in [`update`]; network work runs on the [`Dispatcher`].

pub mod app;
pub mod components;
pub mod dispatch;
pub mod event;
pub mod input;
pub mod runner;
pub mod terminal;
pub mod ui;
pub mod views;

pub use app::{App, View};
pub use dispatch::{Dispatcher, execute};
pub use event::{Action, Event, Message, update};
pub use runner::run;
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
