//! `/products` catalog reads.

use reqwest::{Method, Url};

use super::{Gateway, send_json};
use crate::filter::FilterSelection;
use crate::models::Product;

impl Gateway {
    /// Lists the whole catalog via `GET /products`.
    pub async fn products(&self) -> crate::Result<Vec<Product>> {
        send_json(self.request(Method::GET, self.endpoint(&["products"]), None)).await
    }

    /// Fetches one product via `GET /products/{id}`.
    pub async fn product(&self, id: u64) -> crate::Result<Product> {
        let id = id.to_string();
        send_json(self.request(Method::GET, self.endpoint(&["products", &id]), None)).await
    }

    /// Lists one category via `GET /products/category/{category}`.
    pub async fn products_by_category(&self, category: &str) -> crate::Result<Vec<Product>> {
        let url = self.endpoint(&["products", "category", category]);
        send_json(self.request(Method::GET, url, None)).await
    }

    /// Runs a filtered search via `GET /products/search`.
    pub async fn search_products(&self, filter: &FilterSelection) -> crate::Result<Vec<Product>> {
        send_json(self.request(Method::GET, self.search_url(filter), None)).await
    }

    /// Builds the search URL; only set filter fields become parameters.
    #[must_use]
    pub fn search_url(&self, filter: &FilterSelection) -> Url {
        let mut url = self.endpoint(&["products", "search"]);
        let query = filter.to_query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }
}
