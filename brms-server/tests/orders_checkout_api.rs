mod common;

use common::*;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_order_search() {
    let (app, _) = seeded_app();

    let (status, body) = get(&app, "/api/orders?q=tilapia").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field_list(&body, "id"), vec!["ORD-2024-002"]);

    let (_, body) = get(&app, "/api/orders?sort=total&dir=asc").await;
    assert_eq!(
        field_list(&body, "id"),
        vec!["ORD-2024-004", "ORD-2024-003", "ORD-2024-001", "ORD-2024-002", "ORD-2024-005"]
    );

    let (_, body) = get(&app, "/api/orders?status=pending").await;
    assert_eq!(field_list(&body, "id"), vec!["ORD-2024-003"]);
}

#[tokio::test]
async fn test_order_history_and_lookup() {
    let (app, _) = seeded_app();

    let (_, body) = get(&app, "/api/orders/history/AMINA.UWASE@example.rw").await;
    assert_eq!(field_list(&body, "id"), vec!["ORD-2024-003", "ORD-2024-001"]);

    let (status, body) = get(&app, "/api/orders/ORD-2024-005").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"].as_f64(), Some(17_500.0));

    let (status, body) = get(&app, "/api/orders/ORD-1999-000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_order_status_update() {
    let (app, _) = seeded_app();

    let (status, body) = put(&app, "/api/orders/ORD-2024-003/status", json!({ "status": "confirmed" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");

    let (status, body) = put(&app, "/api/orders/ORD-2024-001/status", json!({ "status": "pending" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4010);
}

#[tokio::test]
async fn test_checkout_totals() {
    let (app, _) = seeded_app();
    let items = json!([
        { "id": "menu-1", "name": "Goat Brochettes", "price": 4000, "quantity": 2 },
        { "id": "menu-7", "name": "Passion Juice", "price": 2000, "quantity": 1 }
    ]);

    let (status, body) = post(&app, "/api/checkout/totals", json!({ "items": items })).await;
    assert_eq!(status, StatusCode::OK);
    let totals = &body["data"]["totals"];
    assert_eq!(totals["subtotal"].as_f64(), Some(10_000.0));
    assert_eq!(totals["tax"].as_f64(), Some(800.0));
    assert_eq!(totals["service_charge"].as_f64(), Some(500.0));
    assert_eq!(totals["total"].as_f64(), Some(11_300.0));
    assert_eq!(body["data"]["formatted"]["total"], "RWF 11,300");

    let (_, body) = post(
        &app,
        "/api/checkout/totals",
        json!({ "items": items, "discount_percent": 10 }),
    )
    .await;
    assert_eq!(body["data"]["totals"]["discount"].as_f64(), Some(1_000.0));
    assert_eq!(body["data"]["formatted"]["total"], "RWF 10,300");

    let (status, body) = post(
        &app,
        "/api/checkout/totals",
        json!({ "items": items, "discount_percent": 150 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8);
}

#[tokio::test]
async fn test_checkout_empty_cart_is_zero() {
    let (app, _) = seeded_app();
    let (status, body) = post(&app, "/api/checkout/totals", json!({ "items": [] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totals"]["total"].as_f64(), Some(0.0));
    assert_eq!(body["data"]["formatted"]["total"], "RWF 0");
}

#[tokio::test]
async fn test_format_endpoint() {
    let (app, _) = seeded_app();

    let (_, body) = get(&app, "/api/checkout/format?amount=1000").await;
    assert_eq!(body["data"]["formatted"], "RWF 1,000");

    let (_, body) = get(&app, "/api/checkout/format?amount=1234567.5").await;
    assert_eq!(body["data"]["formatted"], "RWF 1,234,568");

    let (status, body) = get(&app, "/api/checkout/format?amount=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "amount");
}

#[tokio::test]
async fn test_restaurant_menu() {
    let (app, _) = seeded_app();

    let (_, body) = get(&app, "/api/restaurant").await;
    assert_eq!(body["data"]["name"], "Heaven Restaurant");

    let (_, body) = get(&app, "/api/restaurant/menu?available_only=true").await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 6);

    let (_, body) = get(&app, "/api/restaurant/menu?category=grill").await;
    let names: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Goat Brochettes", "Grilled Tilapia"]);
    assert_eq!(body["data"]["categories"][0], "Grill");
}
