//! `/cart` reads and mutations. Every call requires a session.

use reqwest::Method;
use tracing::info;

use super::{Gateway, send_empty, send_json};
use crate::models::Cart;
use crate::session::Session;

impl Gateway {
    /// Reads the cart via `GET /cart`.
    pub async fn cart(&self, session: Option<&Session>) -> crate::Result<Cart> {
        send_json(self.request(Method::GET, self.endpoint(&["cart"]), session)).await
    }

    /// Adds `quantity` units via `POST /cart/add/{productId}?quantity=N`.
    pub async fn add_to_cart(
        &self,
        session: Option<&Session>,
        product_id: u64,
        quantity: u32,
    ) -> crate::Result<()> {
        let id = product_id.to_string();
        let url = self.endpoint(&["cart", "add", &id]);
        send_empty(
            self.request(Method::POST, url, session)
                .query(&[("quantity", quantity)]),
        )
        .await?;
        info!(product_id, quantity, "added to cart");
        Ok(())
    }

    /// Sets a line's quantity via `PUT /cart/update/{id}?quantity=N`.
    ///
    /// Despite the `productId` path name, the backend matches `item_id`
    /// against [`CartItem::id`](crate::models::CartItem::id), the cart line.
    pub async fn update_cart_item(
        &self,
        session: Option<&Session>,
        item_id: u64,
        quantity: u32,
    ) -> crate::Result<()> {
        let id = item_id.to_string();
        let url = self.endpoint(&["cart", "update", &id]);
        send_empty(
            self.request(Method::PUT, url, session)
                .query(&[("quantity", quantity)]),
        )
        .await?;
        info!(item_id, quantity, "updated cart line");
        Ok(())
    }

    /// Removes a line via `DELETE /cart/remove/{id}`, keyed on the cart line id.
    pub async fn remove_from_cart(
        &self,
        session: Option<&Session>,
        item_id: u64,
    ) -> crate::Result<()> {
        let id = item_id.to_string();
        let url = self.endpoint(&["cart", "remove", &id]);
        send_empty(self.request(Method::DELETE, url, session)).await?;
        info!(item_id, "removed cart line");
        Ok(())
    }

    /// Empties the cart via `DELETE /cart/clear`.
    pub async fn clear_cart(&self, session: Option<&Session>) -> crate::Result<()> {
        let url = self.endpoint(&["cart", "clear"]);
        send_empty(self.request(Method::DELETE, url, session)).await?;
        info!("cleared cart");
        Ok(())
    }
}
