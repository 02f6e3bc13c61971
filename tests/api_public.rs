mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;
use tableside::db::DbConnection;
use tableside::models::user::Role;
use tableside::test_utils::{build_test_pool, insert_user, seed_dish};

#[actix_rt::test]
async fn browse_restaurants_is_public_and_excludes_customers() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;

    let req = test::TestRequest::get()
        .uri("/api/customers/restaurants")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    let restaurants = body["restaurants"].as_array().expect("restaurants array");
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0]["id"], fixtures.restaurant_id);
    assert_eq!(restaurants[0]["name"], "Pizza Palace");
}

#[actix_rt::test]
async fn search_matches_name_or_description_and_dedupes_by_name() {
    let (app, _fixtures, db_url) = common::setup_api_app().await;
    let pool = build_test_pool(&db_url);
    {
        let mut conn = DbConnection::new(&pool).expect("db connection");
        // Same display name as the fixture restaurant; only the first id
        // should survive de-duplication.
        insert_user(
            conn.connection(),
            "Pizza Palace",
            "palace2@example.com",
            Role::Restaurant,
            Some("Second branch"),
        )
        .expect("insert duplicate-name restaurant");
        insert_user(
            conn.connection(),
            "Curry Corner",
            "curry@example.com",
            Role::Restaurant,
            Some("Best pizza-adjacent curries"),
        )
        .expect("insert curry corner");
    }

    let req = test::TestRequest::get()
        .uri("/api/customers/restaurants?search=pizza")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let restaurants = body["restaurants"].as_array().expect("restaurants array");
    let names: Vec<&str> = restaurants
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    // "pizza" hits Pizza Palace by name and Curry Corner by description,
    // and the duplicate Pizza Palace collapses to one entry.
    assert_eq!(names, vec!["Pizza Palace", "Curry Corner"]);
}

#[actix_rt::test]
async fn restaurant_details_include_menu() {
    let (app, fixtures, db_url) = common::setup_api_app().await;
    let pool = build_test_pool(&db_url);
    {
        let mut conn = DbConnection::new(&pool).expect("db connection");
        seed_dish(
            conn.connection(),
            fixtures.restaurant_id,
            "Garlic Bread",
            350,
            tableside::models::dish::DishCategory::Appetizer,
            "Bread, garlic, butter",
        )
        .expect("seed extra dish");
    }

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/customers/restaurants/{}",
            fixtures.restaurant_id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["restaurant"]["name"], "Pizza Palace");
    assert!(body["restaurant"].get("password_hash").is_none());
    let dishes = body["restaurant"]["dishes"].as_array().expect("dishes");
    assert_eq!(dishes.len(), 3);
    assert_eq!(dishes[0]["name"], "Margherita");
    assert_eq!(dishes[0]["price"], 900);
}

#[actix_rt::test]
async fn restaurant_details_reject_non_restaurant_ids() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;

    // A customer id is not a restaurant.
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/customers/restaurants/{}",
            fixtures.customer_id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/customers/restaurants/999999")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
