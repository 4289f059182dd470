//! Integration tests for admin product management.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The admin server running (cargo run -p talad-admin)
//!
//! Run with: cargo test -p talad-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use talad_integration_tests::admin_base_url;

/// Test helper: create a seller to hang products off.
async fn ensure_test_seller(client: &Client) -> i64 {
    let base_url = admin_base_url();

    let sellers: Value = client
        .get(format!("{base_url}/api/sellers"))
        .send()
        .await
        .expect("Failed to list sellers")
        .json()
        .await
        .expect("Failed to parse sellers");

    if let Some(existing) = sellers
        .as_array()
        .and_then(|list| list.iter().find(|s| s["slug"] == "integration-seller"))
    {
        return existing["id"].as_i64().expect("seller id");
    }

    let created: Value = client
        .post(format!("{base_url}/api/sellers"))
        .json(&json!({"name": "Integration Seller", "slug": "integration-seller"}))
        .send()
        .await
        .expect("Failed to create seller")
        .json()
        .await
        .expect("Failed to parse seller");

    created["id"].as_i64().expect("seller id")
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_create_product_with_structured_options() {
    let client = Client::new();
    let base_url = admin_base_url();
    let seller_id = ensure_test_seller(&client).await;

    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "seller_id": seller_id,
            "name": "เสื้อยืดทดสอบ",
            "price": 299,
            "status": "active",
            "options": [
                {"name": "ขนาด", "values": [
                    {"value": "S"},
                    {"value": "M", "price": 50, "priceType": "add", "stock": 10},
                ]},
            ],
        }))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = resp.json().await.expect("Failed to parse product");

    let options = product["options"].as_array().expect("options array");
    assert_eq!(options.len(), 1);
    assert_eq!(options[0]["name"], "ขนาด");
    assert_eq!(options[0]["values"][1]["priceType"], "add");
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_legacy_flat_labels_promote_to_default_option() {
    let client = Client::new();
    let base_url = admin_base_url();
    let seller_id = ensure_test_seller(&client).await;

    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "seller_id": seller_id,
            "name": "สินค้า legacy options",
            "price": 100,
            "options": ["S", "M", "L"],
        }))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(product["options"][0]["name"], "ตัวเลือก");
    assert_eq!(
        product["options"][0]["values"]
            .as_array()
            .expect("values")
            .len(),
        3
    );
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_invalid_option_price_is_rejected_with_identifying_message() {
    let client = Client::new();
    let base_url = admin_base_url();
    let seller_id = ensure_test_seller(&client).await;

    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "seller_id": seller_id,
            "name": "สินค้า option พัง",
            "price": 100,
            "options": [{"name": "ขนาด", "values": [{"value": "M", "price": -50}]}],
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(
        body["message"],
        "price of option \"ขนาด: M\" must be zero or greater"
    );
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_update_replaces_option_tree_wholesale() {
    let client = Client::new();
    let base_url = admin_base_url();
    let seller_id = ensure_test_seller(&client).await;

    let created: Value = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "seller_id": seller_id,
            "name": "สินค้า replace options",
            "price": 100,
            "options": [{"name": "ขนาด", "values": ["S", "M"]}],
        }))
        .send()
        .await
        .expect("Failed to create product")
        .json()
        .await
        .expect("Failed to parse product");

    let id = created["id"].as_i64().expect("product id");

    let updated: Value = client
        .put(format!("{base_url}/api/products/{id}"))
        .json(&json!({
            "seller_id": seller_id,
            "name": "สินค้า replace options",
            "price": 100,
            "options": [{"name": "สี", "values": ["แดง"]}],
        }))
        .send()
        .await
        .expect("Failed to update product")
        .json()
        .await
        .expect("Failed to parse product");

    let options = updated["options"].as_array().expect("options array");
    assert_eq!(options.len(), 1);
    assert_eq!(options[0]["name"], "สี");
}
