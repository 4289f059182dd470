//! Integration tests for the storefront catalog and cart flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations and seed applied
//! - The storefront server running (cargo run -p talad-storefront)
//!
//! Run with: cargo test -p talad-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use talad_integration_tests::storefront_base_url;

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_health() {
    let client = Client::new();
    let resp = client
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_product_listing_and_detail() {
    let client = Client::new();
    let base_url = storefront_base_url();

    let listing: Value = client
        .get(format!("{base_url}/api/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse listing");

    let first = &listing["data"][0];
    let id = first["id"].as_i64().expect("product id");

    let detail: Value = client
        .get(format!("{base_url}/api/products/{id}"))
        .send()
        .await
        .expect("Failed to get product")
        .json()
        .await
        .expect("Failed to parse product");

    assert_eq!(detail["id"], *first.get("id").expect("id"));
    assert!(detail["options"].is_array());
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_price_quote_applies_selected_options() {
    let client = Client::new();
    let base_url = storefront_base_url();

    // The seeded "เสื้อยืดลายช้าง" has base 299, ขนาด M = +50, 10% discount.
    let listing: Value = client
        .get(format!("{base_url}/api/products?q=เสื้อยืดลายช้าง"))
        .send()
        .await
        .expect("Failed to search")
        .json()
        .await
        .expect("Failed to parse listing");

    let id = listing["data"][0]["id"].as_i64().expect("product id");

    let quote: Value = client
        .post(format!("{base_url}/api/products/{id}/price"))
        .json(&json!({"selected_options": {"ขนาด": "M"}}))
        .send()
        .await
        .expect("Failed to quote")
        .json()
        .await
        .expect("Failed to parse quote");

    // round((299 + 50) * 0.9) = 314
    assert_eq!(quote["price"], 314);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_cart_flow() {
    let client = Client::new();
    let base_url = storefront_base_url();

    let created: Value = client
        .post(format!("{base_url}/api/cart"))
        .send()
        .await
        .expect("Failed to create cart")
        .json()
        .await
        .expect("Failed to parse cart token");
    let token = created["token"].as_str().expect("token").to_owned();

    let listing: Value = client
        .get(format!("{base_url}/api/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse listing");
    let product_id = listing["data"][0]["id"].as_i64().expect("product id");

    let resp = client
        .post(format!("{base_url}/api/cart/{token}/items"))
        .json(&json!({"product_id": product_id, "quantity": 2}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let cart: Value = resp.json().await.expect("Failed to parse cart");
    assert_eq!(cart["items"].as_array().expect("items").len(), 1);
    let line = &cart["items"][0];
    assert_eq!(
        cart["subtotal"].as_i64().expect("subtotal"),
        line["unit_price"].as_i64().expect("unit price") * 2
    );
}
