//! Deserialization tests for the gateway's JSON bodies.

use rust_decimal_macros::dec;

use gemshop::models::{AuthResponse, Cart, CheckoutRequest, Order, Product};
use gemshop::pricing;
use gemshop::session::Session;

const PRODUCT_JSON: &str = include_str!("fixtures/product.json");
const PRODUCTS_JSON: &str = include_str!("fixtures/products.json");
const CART_JSON: &str = include_str!("fixtures/cart.json");
const ORDERS_JSON: &str = include_str!("fixtures/orders.json");
const AUTH_JSON: &str = include_str!("fixtures/auth.json");

#[test]
fn test_product_deserializes() {
    let product: Product =
        serde_json::from_str(PRODUCT_JSON).expect("Failed to deserialize product");

    assert_eq!(product.id, 7);
    assert_eq!(product.name, "Eternity Halo Ring");
    assert_eq!(product.category, "Rings");
    assert_eq!(product.color, "White Gold");
    assert_eq!(product.price, dec!(1249.99));
    assert_eq!(product.stock_quantity, 12);
    assert!(product.in_stock());
    assert_eq!(product.image_url.as_deref(), Some("halo-ring.jpg"));
    assert_eq!(
        product.specifications.get("Material").map(String::as_str),
        Some("18k white gold")
    );
}

#[test]
fn test_product_list_tolerates_missing_fields() {
    let products: Vec<Product> =
        serde_json::from_str(PRODUCTS_JSON).expect("Failed to deserialize products");

    assert_eq!(products.len(), 5);
    assert_eq!(products[1].image_url, None);
    assert!(!products[2].in_stock());
    assert!(products[2].description.is_empty());
    assert!(products[4].specifications.is_empty());
}

#[test]
fn test_cart_deserializes_and_totals() {
    let cart: Cart = serde_json::from_str(CART_JSON).expect("Failed to deserialize cart");

    assert_eq!(cart.id, Some(31));
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.items[0].product_id, 4);
    assert_eq!(cart.items[0].display_name(), "Crystal Studs");
    assert_eq!(cart.items[1].display_name(), "Product Name Not Available");

    // A line without a price contributes nothing.
    assert_eq!(pricing::cart_total(&cart.items), dec!(149.97));
    assert_eq!(pricing::format_amount(pricing::cart_total(&cart.items)), "$149.97");
}

#[test]
fn test_empty_cart_body_deserializes() {
    let cart: Cart = serde_json::from_str("{}").expect("Failed to deserialize empty cart");
    assert!(cart.is_empty());
    assert_eq!(cart.total_amount, None);
}

#[test]
fn test_orders_deserialize() {
    let orders: Vec<Order> =
        serde_json::from_str(ORDERS_JSON).expect("Failed to deserialize orders");

    assert_eq!(orders.len(), 2);
    let first = &orders[0];
    assert_eq!(first.id, 501);
    assert_eq!(first.placed_on(), "2024-05-01");
    assert_eq!(first.total_amount, dec!(149.97));
    assert_eq!(first.shipping_city.as_deref(), Some("Springfield"));
    assert_eq!(first.items[0].line_total(), dec!(149.97));

    let second = &orders[1];
    assert_eq!(second.status, "DELIVERED");
    assert_eq!(second.shipping_address, None);
    assert!(second.items.is_empty());
}

#[test]
fn test_checkout_request_serializes_camel_case() {
    let cart: Cart = serde_json::from_str(CART_JSON).expect("Failed to deserialize cart");
    let request = CheckoutRequest::from_items(cart.items);

    let value = serde_json::to_value(&request).expect("Failed to serialize checkout");
    assert_eq!(value["totalAmount"], serde_json::json!(149.97));
    assert_eq!(value["items"][0]["productId"], 4);
    assert_eq!(value["items"][0]["quantity"], 3);
    // Unset shipping details are omitted.
    assert!(value.get("shippingAddress").is_none());
}

#[test]
fn test_auth_response_builds_session() {
    let response: AuthResponse =
        serde_json::from_str(AUTH_JSON).expect("Failed to deserialize auth response");

    assert_eq!(response.roles, vec!["ROLE_USER".to_string()]);
    let session = Session::from_auth(response).expect("token present");
    assert_eq!(session.username, "alice");
    assert_eq!(session.token.expose(), "eyJhbGciOiJIUzI1NiJ9.payload.signature");
}
