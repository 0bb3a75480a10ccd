//! Runs [`Action`]s against the gateway and session store.
//!
//! Every action becomes one spawned task whose outcome is posted back to the
//! main loop as a [`Message`]. Tasks never touch [`App`](super::App) state.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::GemshopError;
use crate::gateway::Gateway;
use crate::session::{Session, SessionStore};

use super::event::{Action, Message};

/// Spawns gateway calls for actions produced by [`update`](super::event::update).
#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<Gateway>,
    store: Arc<dyn SessionStore>,
    tx: mpsc::UnboundedSender<Message>,
}

impl Dispatcher {
    /// Creates a dispatcher posting results to `tx`.
    #[must_use]
    pub fn new(
        gateway: Arc<Gateway>,
        store: Arc<dyn SessionStore>,
        tx: mpsc::UnboundedSender<Message>,
    ) -> Self {
        Self { gateway, store, tx }
    }

    /// Runs `action` in the background.
    pub fn dispatch(&self, action: Action) {
        let gateway = Arc::clone(&self.gateway);
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Some(message) = execute(&gateway, store.as_ref(), action).await
                && tx.send(message).is_err()
            {
                debug!("main loop gone, dropping result");
            }
        });
    }
}

/// Performs one action and returns the message describing its outcome.
///
/// Returns `None` for actions nobody waits on.
pub async fn execute(
    gateway: &Gateway,
    store: &dyn SessionStore,
    action: Action,
) -> Option<Message> {
    let message = match action {
        Action::LoadFeatured(ticket) => Message::FeaturedLoaded(ticket, gateway.products().await),
        Action::SearchProducts { ticket, filter } => {
            Message::ProductsLoaded(ticket, gateway.search_products(&filter).await)
        }
        Action::LoadProduct { ticket, id } => {
            Message::ProductLoaded(ticket, gateway.product(id).await)
        }
        Action::LoadCart { ticket, session } => {
            Message::CartLoaded(ticket, gateway.cart(session.as_ref()).await)
        }
        Action::LoadOrders { ticket, session } => {
            Message::OrdersLoaded(ticket, gateway.orders(session.as_ref()).await)
        }
        Action::AddToCart {
            session,
            product_id,
            quantity,
        } => Message::AddedToCart(
            gateway
                .add_to_cart(session.as_ref(), product_id, quantity)
                .await,
        ),
        Action::UpdateQuantity {
            session,
            item_id,
            quantity,
        } => Message::QuantityUpdated(
            gateway
                .update_cart_item(session.as_ref(), item_id, quantity)
                .await,
        ),
        Action::RemoveItem { session, item_id } => {
            Message::ItemRemoved(gateway.remove_from_cart(session.as_ref(), item_id).await)
        }
        Action::Checkout { session, request } => {
            let result = async {
                let order = gateway.create_order(session.as_ref(), &request).await?;
                gateway.clear_cart(session.as_ref()).await?;
                Ok::<_, GemshopError>(order)
            }
            .await;
            Message::CheckedOut(result)
        }
        Action::SignIn(request) => Message::SignedIn(sign_in(gateway, store, &request).await),
        Action::SignUp(request) => Message::SignedUp(gateway.sign_up(&request).await),
        Action::ClearSession => {
            if let Err(e) = store.clear() {
                warn!(error = %e, "failed to clear stored session");
            }
            return None;
        }
    };
    Some(message)
}

/// Exchanges credentials for a session and persists it.
///
/// A store failure does not undo the sign-in; the session just won't
/// survive a restart.
async fn sign_in(
    gateway: &Gateway,
    store: &dyn SessionStore,
    request: &crate::models::SignInRequest,
) -> crate::Result<Session> {
    let response = gateway.sign_in(request).await?;
    let session = Session::from_auth(response)
        .ok_or_else(|| GemshopError::Session("gateway issued no token".to_string()))?;
    match store.save(&session) {
        Ok(()) => info!(username = %session.username, "session persisted"),
        Err(e) => warn!(error = %e, "failed to persist session"),
    }
    Ok(session)
}
