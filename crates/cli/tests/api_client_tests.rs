#[path = "../src/api_client.rs"]
#[allow(dead_code)] // Some methods are used by the binary but not by tests
mod api_client;

use api_client::{ApiClient, CreateProductRequest, UpsertCategoryRequest};
use httpmock::Method::{DELETE, GET, POST, PUT};
use httpmock::MockServer;
use serde_json::json;
use std::collections::BTreeMap;
use std::net::TcpListener;

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

const PIN: &str = "1234";
const PRODUCT_ID: &str = "00000000-0000-0000-0000-000000000001";
const ORDER_ID: &str = "00000000-0000-0000-0000-000000000002";

fn product_response() -> serde_json::Value {
    json!({
        "product_id": PRODUCT_ID,
        "title": "Rose Glow Serum",
        "title_ar": "سيروم الورد المضيء",
        "description": "",
        "description_ar": "",
        "sku": "AT-SRM-001",
        "category_slug": "skincare",
        "price": 650.0,
        "compare_at_price": null,
        "stock": 25,
        "status": "active",
        "images": [],
        "benefits": [],
        "size_guide": null,
        "sales_count": 3,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

fn order_response() -> serde_json::Value {
    json!({
        "order_id": ORDER_ID,
        "order_number": "AT-9X3K2M",
        "customer_name": "Mona",
        "customer_phone": "+201000000000",
        "customer_email": null,
        "governorate": "Cairo",
        "city": "Nasr City",
        "address_line": "12 Abbas El Akkad",
        "subtotal": 650.0,
        "shipping_cost": 50.0,
        "total": 700.0,
        "status": "confirmed",
        "created_at": "2024-01-02T00:00:00Z",
        "items": []
    })
}

#[tokio::test]
async fn api_client_success_paths() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/health")
            .header("x-admin-pin", PIN);
        then.status(200)
            .json_body(json!({ "status": "ok", "version": "1.0.0" }));
    });

    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/admin/products")
            .header("x-admin-pin", PIN);
        then.status(201).json_body(product_response());
    });

    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/admin/products")
            .query_param("status", "active")
            .header("x-admin-pin", PIN);
        then.status(200)
            .json_body(json!({ "products": [product_response()] }));
    });

    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/v1/admin/products/{PRODUCT_ID}"))
            .header("x-admin-pin", PIN);
        then.status(200).json_body(product_response());
    });

    server.mock(|when, then| {
        when.method(DELETE)
            .path(format!("/v1/admin/products/{PRODUCT_ID}"))
            .header("x-admin-pin", PIN);
        then.status(204);
    });

    server.mock(|when, then| {
        when.method(PUT)
            .path("/v1/admin/categories")
            .header("x-admin-pin", PIN);
        then.status(204);
    });

    server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1/admin/products/{PRODUCT_ID}/variants/generate"))
            .header("x-admin-pin", PIN);
        then.status(201)
            .json_body(json!({ "created": [{}, {}], "skipped": 1 }));
    });

    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/admin/orders")
            .header("x-admin-pin", PIN);
        then.status(200)
            .json_body(json!({ "orders": [order_response()] }));
    });

    server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1/admin/orders/{ORDER_ID}/status"))
            .header("x-admin-pin", PIN)
            .json_body(json!({ "status": "shipped" }));
        then.status(200).json_body(order_response());
    });

    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/admin/settings")
            .header("x-admin-pin", PIN);
        then.status(200)
            .json_body(json!({ "settings": { "shipping_cost": "50" } }));
    });

    server.mock(|when, then| {
        when.method(PUT)
            .path("/v1/admin/settings")
            .header("x-admin-pin", PIN)
            .json_body(json!({ "shipping_cost": "75" }));
        then.status(204);
    });

    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/admin/rewrite")
            .header("x-admin-pin", PIN);
        then.status(200)
            .json_body(json!({ "text": "polished copy", "source": "primary" }));
    });

    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/admin/generate-benefits")
            .header("x-admin-pin", PIN);
        then.status(200)
            .json_body(json!({ "benefits": ["ترطيب عميق"], "source": "cache" }));
    });

    let client = ApiClient::new(&server.base_url(), PIN).unwrap();

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, "1.0.0");

    let created = client
        .create_product(&CreateProductRequest {
            title: "Rose Glow Serum".to_string(),
            sku: "AT-SRM-001".to_string(),
            category_slug: "skincare".to_string(),
            price: 650.0,
            stock: 25,
            status: "active".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.product_id, PRODUCT_ID);

    let products = client.list_products(Some("active")).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].sku, "AT-SRM-001");

    let product = client.get_product(PRODUCT_ID).await.unwrap();
    assert_eq!(product.title_ar, "سيروم الورد المضيء");

    client.delete_product(PRODUCT_ID).await.unwrap();

    client
        .upsert_category(&UpsertCategoryRequest {
            slug: "skincare".to_string(),
            name: "Skincare".to_string(),
            name_ar: "العناية بالبشرة".to_string(),
            position: 1,
        })
        .await
        .unwrap();

    let generated = client
        .generate_variants(PRODUCT_ID, &["50ml".to_string()], &[])
        .await
        .unwrap();
    assert_eq!(generated.created.len(), 2);
    assert_eq!(generated.skipped, 1);

    let orders = client.list_orders(None).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_number, "AT-9X3K2M");

    let order = client.set_order_status(ORDER_ID, "shipped").await.unwrap();
    assert_eq!(order.order_id, ORDER_ID);

    let settings = client.get_settings().await.unwrap();
    assert_eq!(settings.get("shipping_cost").map(String::as_str), Some("50"));

    let mut entries = BTreeMap::new();
    entries.insert("shipping_cost".to_string(), "75".to_string());
    client.set_settings(&entries).await.unwrap();

    let rewritten = client.rewrite("raw copy", "description").await.unwrap();
    assert_eq!(rewritten.text, "polished copy");
    assert_eq!(rewritten.source, "primary");

    let benefits = client.generate_benefits("hydrating oil").await.unwrap();
    assert_eq!(benefits.benefits, vec!["ترطيب عميق"]);
    assert_eq!(benefits.source, "cache");
}

#[tokio::test]
async fn api_client_reports_error_status_and_body() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/v1/admin/products/{PRODUCT_ID}"));
        then.status(404)
            .json_body(json!({ "code": "not_found", "message": "product not found" }));
    });

    let client = ApiClient::new(&server.base_url(), PIN).unwrap();
    let err = client.get_product(PRODUCT_ID).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("404"), "unexpected error: {message}");
    assert!(message.contains("product not found"), "unexpected error: {message}");
}

#[tokio::test]
async fn api_client_rejects_invalid_server_urls() {
    assert!(ApiClient::new("not a url", PIN).is_err());
}
