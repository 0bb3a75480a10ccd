//! `/orders` endpoints.

use reqwest::Method;
use tracing::info;

use super::{Gateway, send_json};
use crate::models::{CheckoutRequest, Order};
use crate::session::Session;

impl Gateway {
    /// Places an order via `POST /orders` and returns it as created.
    pub async fn create_order(
        &self,
        session: Option<&Session>,
        checkout: &CheckoutRequest,
    ) -> crate::Result<Order> {
        let url = self.endpoint(&["orders"]);
        let order: Order =
            send_json(self.request(Method::POST, url, session).json(checkout)).await?;
        info!(order_id = order.id, total = %order.total_amount, "order created");
        Ok(order)
    }

    /// Lists the signed-in user's orders via `GET /orders`.
    pub async fn orders(&self, session: Option<&Session>) -> crate::Result<Vec<Order>> {
        send_json(self.request(Method::GET, self.endpoint(&["orders"]), session)).await
    }

    /// Fetches one order via `GET /orders/{id}`.
    pub async fn order(&self, session: Option<&Session>, id: u64) -> crate::Result<Order> {
        let id = id.to_string();
        send_json(self.request(Method::GET, self.endpoint(&["orders", &id]), session)).await
    }
}
