mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

#[actix_rt::test]
async fn dish_management_is_restaurant_only() {
    let (app, _fixtures, _db_url) = common::setup_api_app().await;

    let payload = json!({
        "name": "Quattro Formaggi",
        "description": "Four cheese pizza",
        "price": 1100,
        "category": "Main Course",
        "ingredients": "Mozzarella, gorgonzola, parmesan, fontina",
    });

    let req = test::TestRequest::post()
        .uri("/api/restaurants/dishes")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let customer_sid = common::login_as(&app, "customer1@example.com", "customer").await;
    let req = test::TestRequest::post()
        .uri("/api/restaurants/dishes")
        .cookie(customer_sid)
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Restaurant access required");
}

#[actix_rt::test]
async fn add_list_update_delete_dish() {
    let (app, _fixtures, _db_url) = common::setup_api_app().await;
    let sid = common::login_as(&app, "palace@example.com", "restaurant").await;

    let req = test::TestRequest::post()
        .uri("/api/restaurants/dishes")
        .cookie(sid.clone())
        .set_json(json!({
            "name": "Limoncello Spritz",
            "description": "House aperitivo",
            "price": 650,
            "category": "Beverage",
            "ingredients": "Limoncello, prosecco, soda",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["dish"]["category"], "Beverage");
    let dish_id = body["dish"]["id"].as_i64().expect("dish id");

    let req = test::TestRequest::get()
        .uri("/api/restaurants/dishes")
        .cookie(sid.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["dishes"].as_array().unwrap().len(), 3);

    let req = test::TestRequest::put()
        .uri(&format!("/api/restaurants/dishes/{dish_id}"))
        .cookie(sid.clone())
        .set_json(json!({ "price": 700 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["dish"]["price"], 700);
    // Untouched fields keep their values.
    assert_eq!(body["dish"]["name"], "Limoncello Spritz");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/restaurants/dishes/{dish_id}"))
        .cookie(sid.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/restaurants/dishes")
        .cookie(sid)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["dishes"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn foreign_dishes_are_not_reachable() {
    let (app, fixtures, db_url) = common::setup_api_app().await;
    let pool = tableside::test_utils::build_test_pool(&db_url);
    {
        let mut conn = tableside::db::DbConnection::new(&pool).expect("db connection");
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

    let req = test::TestRequest::put()
        .uri(&format!("/api/restaurants/dishes/{}", fixtures.dish_ids[0]))
        .cookie(rival_sid.clone())
        .set_json(json!({ "price": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/restaurants/dishes/{}", fixtures.dish_ids[0]))
        .cookie(rival_sid)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn deleting_a_dish_keeps_order_history_intact() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let customer_sid = common::login_as(&app, "customer1@example.com", "customer").await;
    let restaurant_sid = common::login_as(&app, "palace@example.com", "restaurant").await;

    let req = test::TestRequest::post()
        .uri("/api/customers/orders")
        .cookie(customer_sid.clone())
        .set_json(json!({
            "restaurant_id": fixtures.restaurant_id,
            "items": [{ "dish_id": fixtures.dish_ids[0], "quantity": 1 }],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/restaurants/dishes/{}", fixtures.dish_ids[0]))
        .cookie(restaurant_sid)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The order line survives with its snapshotted price; only the live
    // dish name is gone.
    let req = test::TestRequest::get()
        .uri("/api/customers/orders")
        .cookie(customer_sid)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let items = body["orders"][0]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["price"], 900);
    assert!(items[0]["dish_name"].is_null());
    assert_eq!(body["orders"][0]["total_amount"], 900);
}
