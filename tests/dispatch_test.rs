//! End-to-end flows: key presses through `update`, actions through
//! `execute` against a mock gateway, results back through `update`.

mod common;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mockito::{Matcher, Server};
use rust_decimal_macros::dec;

use gemshop::models::{Secret, SignInRequest};
use gemshop::session::{FileSessionStore, SessionStore};
use gemshop::tui::{Action, App, Event, Message, View, execute, update};

use common::{ALICE_AUTH, alice, gateway_for};

const CART_JSON: &str = include_str!("fixtures/cart.json");
const ORDERS_JSON: &str = include_str!("fixtures/orders.json");
const AUTH_JSON: &str = include_str!("fixtures/auth.json");

fn key(code: KeyCode) -> Message {
    Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn temp_store() -> (tempfile::TempDir, FileSessionStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileSessionStore::new(dir.path().join("session.json"));
    (dir, store)
}

#[tokio::test]
async fn test_sign_in_persists_session() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/auth/signin")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(AUTH_JSON)
        .create_async()
        .await;
    // Signing in lands on Home, which loads the products.
    server
        .mock("GET", "/api/products")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let (_dir, store) = temp_store();
    let mut app = App::default();
    app.navigate(View::SignIn);

    let action = Action::SignIn(SignInRequest {
        username: "alice".into(),
        password: Secret::new("hunter2"),
    });
    let message = execute(&gateway, &store, action).await.expect("reply");
    let next = update(&mut app, message);

    assert_eq!(app.view, View::Home);
    assert_eq!(
        app.session.as_ref().map(|s| s.username.as_str()),
        Some("alice")
    );
    let stored = store.load().expect("load").expect("session saved");
    assert_eq!(stored.username, "alice");

    let message = execute(&gateway, &store, next.expect("home read"))
        .await
        .expect("reply");
    update(&mut app, message);
    assert!(app.featured().is_empty());
    assert!(!app.home.is_loading());
}

#[tokio::test]
async fn test_failed_sign_in_shows_fixed_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/auth/signin")
        .with_status(401)
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let (_dir, store) = temp_store();
    let mut app = App::default();
    app.navigate(View::SignIn);

    let action = Action::SignIn(SignInRequest {
        username: "alice".into(),
        password: Secret::new("wrong"),
    });
    let message = execute(&gateway, &store, action).await.expect("reply");
    assert!(update(&mut app, message).is_none());

    assert!(app.session.is_none());
    assert_eq!(app.view, View::SignIn);
    assert_eq!(
        app.auth.error,
        Some("Failed to sign in, check your username and password")
    );
    assert_eq!(store.load().expect("load"), None);
}

#[tokio::test]
async fn test_quantity_change_refetches_cart() {
    let mut server = Server::new_async().await;
    let first_read = server
        .mock("GET", "/api/cart")
        .match_header("authorization", ALICE_AUTH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CART_JSON)
        .create_async()
        .await;
    let update_mock = server
        .mock("PUT", "/api/cart/update/101")
        .match_query(Matcher::UrlEncoded("quantity".into(), "2".into()))
        .with_status(200)
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let (_dir, store) = temp_store();
    let mut app = App::new(Some(alice()));

    let load = app.navigate(View::Cart).expect("cart read");
    let message = execute(&gateway, &store, load).await.expect("reply");
    update(&mut app, message);
    first_read.assert_async().await;
    first_read.remove_async().await;

    let second_read = server
        .mock("GET", "/api/cart")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": 31, "items": [{"id": 101, "productId": 4, "productName": "Crystal Studs", "productPrice": 49.99, "quantity": 2}]}"#,
        )
        .create_async()
        .await;

    let change = update(&mut app, key(KeyCode::Char('-'))).expect("quantity action");
    let message = execute(&gateway, &store, change).await.expect("reply");
    let refetch = update(&mut app, message).expect("refetch after write");
    assert!(matches!(refetch, Action::LoadCart { .. }));

    let message = execute(&gateway, &store, refetch).await.expect("reply");
    update(&mut app, message);

    update_mock.assert_async().await;
    second_read.assert_async().await;
    let cart = app.cart.cart.data().expect("cart snapshot");
    assert_eq!(cart.items.len(), 1);
    assert_eq!(gemshop::pricing::cart_total(&cart.items), dec!(99.98));
    assert!(app.cart.cart.error().is_none());
}

#[tokio::test]
async fn test_failed_cart_read_uses_login_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/cart")
        .with_status(401)
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let (_dir, store) = temp_store();
    let mut app = App::default();

    let load = app.navigate(View::Cart).expect("cart read");
    let message = execute(&gateway, &store, load).await.expect("reply");
    update(&mut app, message);

    assert_eq!(
        app.cart.cart.error(),
        Some("Failed to fetch cart, Login to continue")
    );
    assert!(app.cart.cart.data().is_none());
}

#[tokio::test]
async fn test_checkout_clears_cart_and_shows_orders() {
    let mut server = Server::new_async().await;
    let full_cart = server
        .mock("GET", "/api/cart")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CART_JSON)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/orders")
        .match_body(Matcher::PartialJson(serde_json::json!({"totalAmount": 149.97})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 501, "orderDate": "2024-05-01T14:32:10", "totalAmount": 149.97, "status": "PENDING"}"#)
        .create_async()
        .await;
    let clear = server
        .mock("DELETE", "/api/cart/clear")
        .with_status(200)
        .create_async()
        .await;
    server
        .mock("GET", "/api/orders")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ORDERS_JSON)
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let (_dir, store) = temp_store();
    let mut app = App::new(Some(alice()));

    let load = app.navigate(View::Cart).expect("cart read");
    let message = execute(&gateway, &store, load).await.expect("reply");
    update(&mut app, message);

    full_cart.remove_async().await;
    let empty_cart = server
        .mock("GET", "/api/cart")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 31, "items": []}"#)
        .create_async()
        .await;

    let checkout = update(&mut app, key(KeyCode::Char('c'))).expect("checkout");
    let message = execute(&gateway, &store, checkout).await.expect("reply");
    let load_orders = update(&mut app, message).expect("orders read");
    assert_eq!(app.view, View::Orders);

    let message = execute(&gateway, &store, load_orders)
        .await
        .expect("reply");
    update(&mut app, message);

    create.assert_async().await;
    clear.assert_async().await;
    assert_eq!(app.orders.orders.data().map(Vec::len), Some(2));
    assert!(!app.cart.checking_out);

    let load = app.navigate(View::Cart).expect("cart read");
    let message = execute(&gateway, &store, load).await.expect("reply");
    update(&mut app, message);
    empty_cart.assert_async().await;
    assert!(app.cart.cart.data().is_some_and(|c| c.is_empty()));
}

#[tokio::test]
async fn test_clear_session_forgets_stored_user() {
    let server = Server::new_async().await;
    let gateway = gateway_for(&server);
    let (_dir, store) = temp_store();
    store.save(&alice()).expect("save");

    let mut app = App::new(Some(alice()));
    let action = update(&mut app, key(KeyCode::Char('X'))).expect("clear session");
    assert!(execute(&gateway, &store, action).await.is_none());

    assert!(app.session.is_none());
    assert_eq!(store.load().expect("load"), None);
}
