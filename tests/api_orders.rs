mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use diesel::dsl::count_star;
use diesel::prelude::*;
use serde_json::{json, Value};
use tableside::db::DbConnection;
use tableside::test_utils::build_test_pool;

#[actix_rt::test]
async fn place_order_snapshots_prices_and_totals() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let sid = common::login_as(&app, "customer1@example.com", "customer").await;

    // 2 * 900 + 1 * 450 = 2250 cents.
    let req = test::TestRequest::post()
        .uri("/api/customers/orders")
        .cookie(sid.clone())
        .set_json(json!({
            "restaurant_id": fixtures.restaurant_id,
            "items": [
                { "dish_id": fixtures.dish_ids[0], "quantity": 2 },
                { "dish_id": fixtures.dish_ids[1], "quantity": 1 },
            ],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["order"]["status"], "New");
    assert_eq!(body["order"]["total_amount"], 2250);
    assert_eq!(body["order"]["restaurant_name"], "Pizza Palace");
    let items = body["order"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["dish_name"], "Margherita");
    assert_eq!(items[0]["price"], 900);
    assert_eq!(items[0]["quantity"], 2);

    // The customer sees the order in their own listing.
    let req = test::TestRequest::get()
        .uri("/api/customers/orders")
        .cookie(sid)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["orders"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn unauthenticated_order_is_rejected_and_writes_nothing() {
    let (app, fixtures, db_url) = common::setup_api_app().await;

    let req = test::TestRequest::post()
        .uri("/api/customers/orders")
        .set_json(json!({
            "restaurant_id": fixtures.restaurant_id,
            "items": [{ "dish_id": fixtures.dish_ids[0], "quantity": 1 }],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let pool = build_test_pool(&db_url);
    let mut conn = DbConnection::new(&pool).expect("db connection");
    use tableside::db::schema::orders::dsl::*;
    let order_count: i64 = orders
        .select(count_star())
        .first(conn.connection())
        .expect("count orders");
    assert_eq!(order_count, 0);
}

#[actix_rt::test]
async fn restaurant_session_cannot_place_orders() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let sid = common::login_as(&app, "palace@example.com", "restaurant").await;

    let req = test::TestRequest::post()
        .uri("/api/customers/orders")
        .cookie(sid)
        .set_json(json!({
            "restaurant_id": fixtures.restaurant_id,
            "items": [{ "dish_id": fixtures.dish_ids[0], "quantity": 1 }],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn order_validation_rejects_bad_payloads() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let sid = common::login_as(&app, "customer1@example.com", "customer").await;

    // Empty item list.
    let req = test::TestRequest::post()
        .uri("/api/customers/orders")
        .cookie(sid.clone())
        .set_json(json!({ "restaurant_id": fixtures.restaurant_id, "items": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Zero quantity.
    let req = test::TestRequest::post()
        .uri("/api/customers/orders")
        .cookie(sid.clone())
        .set_json(json!({
            "restaurant_id": fixtures.restaurant_id,
            "items": [{ "dish_id": fixtures.dish_ids[0], "quantity": 0 }],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Dish id that is not on this restaurant's menu.
    let req = test::TestRequest::post()
        .uri("/api/customers/orders")
        .cookie(sid.clone())
        .set_json(json!({
            "restaurant_id": fixtures.restaurant_id,
            "items": [{ "dish_id": 999999, "quantity": 1 }],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Unknown restaurant.
    let req = test::TestRequest::post()
        .uri("/api/customers/orders")
        .cookie(sid)
        .set_json(json!({
            "restaurant_id": 999999,
            "items": [{ "dish_id": fixtures.dish_ids[0], "quantity": 1 }],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

async fn place_fixture_order<S, B>(
    app: &S,
    customer_sid: &actix_web::cookie::Cookie<'static>,
    restaurant_id: i32,
    dish_id: i32,
) -> i64
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/customers/orders")
        .cookie(customer_sid.clone())
        .set_json(json!({
            "restaurant_id": restaurant_id,
            "items": [{ "dish_id": dish_id, "quantity": 1 }],
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    body["order"]["id"].as_i64().expect("order id")
}

#[actix_rt::test]
async fn restaurant_walks_order_through_delivery() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let customer_sid = common::login_as(&app, "customer1@example.com", "customer").await;
    let restaurant_sid = common::login_as(&app, "palace@example.com", "restaurant").await;

    let order_id = place_fixture_order(
        &app,
        &customer_sid,
        fixtures.restaurant_id,
        fixtures.dish_ids[0],
    )
    .await;

    for next in ["Order Received", "Preparing", "On the Way", "Delivered"] {
        let req = test::TestRequest::put()
            .uri(&format!("/api/restaurants/orders/{order_id}/status"))
            .cookie(restaurant_sid.clone())
            .set_json(json!({ "status": next }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "transition to {next}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["order"]["status"], *next);
    }

    // Delivered is terminal.
    let req = test::TestRequest::put()
        .uri(&format!("/api/restaurants/orders/{order_id}/status"))
        .cookie(restaurant_sid)
        .set_json(json!({ "status": "Cancelled" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn illegal_transitions_leave_status_unchanged() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let customer_sid = common::login_as(&app, "customer1@example.com", "customer").await;
    let restaurant_sid = common::login_as(&app, "palace@example.com", "restaurant").await;

    let order_id = place_fixture_order(
        &app,
        &customer_sid,
        fixtures.restaurant_id,
        fixtures.dish_ids[0],
    )
    .await;

    // New cannot jump straight to Delivered.
    let req = test::TestRequest::put()
        .uri(&format!("/api/restaurants/orders/{order_id}/status"))
        .cookie(restaurant_sid.clone())
        .set_json(json!({ "status": "Delivered" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/restaurants/orders")
        .cookie(restaurant_sid)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["orders"][0]["status"], "New");
}

#[actix_rt::test]
async fn foreign_restaurant_cannot_touch_the_order() {
    let (app, fixtures, db_url) = common::setup_api_app().await;
    let customer_sid = common::login_as(&app, "customer1@example.com", "customer").await;

    let pool = build_test_pool(&db_url);
    {
        let mut conn = DbConnection::new(&pool).expect("db connection");
        tableside::test_utils::insert_user(
            conn.connection(),
            "Rival Diner",
            "rival@example.com",
            tableside::models::user::Role::Restaurant,
            Some("Across the street"),
        )
        .expect("insert rival");
    }
    let rival_sid = common::login_as(&app, "rival@example.com", "restaurant").await;

    let order_id = place_fixture_order(
        &app,
        &customer_sid,
        fixtures.restaurant_id,
        fixtures.dish_ids[0],
    )
    .await;

    // Existence is not revealed to the other tenant.
    let req = test::TestRequest::put()
        .uri(&format!("/api/restaurants/orders/{order_id}/status"))
        .cookie(rival_sid.clone())
        .set_json(json!({ "status": "Order Received" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Nor does the order appear in the rival's listing.
    let req = test::TestRequest::get()
        .uri("/api/restaurants/orders")
        .cookie(rival_sid)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["orders"].as_array().unwrap().len(), 0);
}

#[actix_rt::test]
async fn restaurant_order_listing_supports_status_filter() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let customer_sid = common::login_as(&app, "customer1@example.com", "customer").await;
    let restaurant_sid = common::login_as(&app, "palace@example.com", "restaurant").await;

    let first = place_fixture_order(
        &app,
        &customer_sid,
        fixtures.restaurant_id,
        fixtures.dish_ids[0],
    )
    .await;
    let _second = place_fixture_order(
        &app,
        &customer_sid,
        fixtures.restaurant_id,
        fixtures.dish_ids[1],
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/restaurants/orders/{first}/status"))
        .cookie(restaurant_sid.clone())
        .set_json(json!({ "status": "Order Received" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/restaurants/orders?status=Order%20Received")
        .cookie(restaurant_sid.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let listed = body["orders"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"].as_i64().unwrap(), first);

    let req = test::TestRequest::get()
        .uri("/api/restaurants/orders")
        .cookie(restaurant_sid)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["orders"].as_array().unwrap().len(), 2);
}
