//! Tests against a running gateway.
//!
//! These need the storefront backend listening at `GEMSHOP_API_URL`
//! (default `http://localhost:8080/api`).
//! Run with: `cargo test --features integration-tests`

#![cfg(feature = "integration-tests")]

use gemshop::config::fetch_config;
use gemshop::filter::{FilterField, FilterSelection};
use gemshop::gateway::Gateway;

fn live_gateway() -> Gateway {
    let config = fetch_config().expect("Failed to load config");
    Gateway::new(&config.gateway).expect("Failed to build gateway")
}

#[tokio::test]
async fn test_lists_live_products() {
    let products = live_gateway()
        .products()
        .await
        .expect("Failed to list products");
    for product in &products {
        assert!(!product.name.is_empty());
    }
}

#[tokio::test]
async fn test_live_search_respects_category() {
    let mut filter = FilterSelection::clear();
    filter.set_field(FilterField::Category, "Rings");

    let products = live_gateway()
        .search_products(&filter)
        .await
        .expect("Failed to search products");
    assert!(products.iter().all(|p| p.category == "Rings"));
}

#[tokio::test]
async fn test_live_cart_requires_sign_in() {
    let err = live_gateway()
        .cart(None)
        .await
        .expect_err("anonymous cart read should be rejected");
    assert!(matches!(err.status(), Some(401 | 403)));
}
