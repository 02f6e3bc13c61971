use crate::auth::CustomerSession;
use crate::db::{FavoriteOperations, OrderOperations, UserOperations};
use crate::enums::auth::MessageResp;
use crate::enums::customers::{
    FavoriteReq, FavoritesResp, OrderReq, OrderResp, OrdersResp, RestaurantDetail,
    RestaurantDetailResp, RestaurantSearchQuery, RestaurantsResp,
};
use actix_web::middleware::NormalizePath;
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(cfg: &mut ServiceConfig, state: &crate::AppState) {
    cfg.service(
        scope::scope("/api/customers")
            .app_data(web::Data::new(state.user_ops.clone()))
            .app_data(web::Data::new(state.order_ops.clone()))
            .app_data(web::Data::new(state.favorite_ops.clone()))
            .wrap(NormalizePath::trim())
            .service(get_restaurants)
            .service(get_restaurant_details)
            .service(create_order)
            .service(get_orders)
            .service(add_favorite)
            .service(remove_favorite)
            .service(get_favorites),
    );
}

#[utoipa::path(
    tag = "Customers",
    params(RestaurantSearchQuery),
    responses(
        (status = 200, description = "Browsable restaurants", body = RestaurantsResp)
    ),
    summary = "Browse restaurants, optionally filtered by a search term"
)]
#[get("/restaurants")]
pub(super) async fn get_restaurants(
    user_ops: web::Data<UserOperations>,
    query: web::Query<RestaurantSearchQuery>,
) -> impl Responder {
    match user_ops.list_restaurants(query.search.as_deref()) {
        Ok(restaurants) => HttpResponse::Ok().json(RestaurantsResp {
            status: "ok".to_string(),
            restaurants,
            error: None,
        }),
        Err(e) => {
            error!("get_restaurants: failed to list restaurants: {}", e);
            HttpResponse::build(e.status()).json(RestaurantsResp {
                status: "error".to_string(),
                restaurants: vec![],
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Customers",
    params(("restaurant_id", description = "Restaurant user id")),
    responses(
        (status = 200, description = "Restaurant profile with its menu", body = RestaurantDetailResp),
        (status = 404, description = "No such restaurant", body = RestaurantDetailResp)
    ),
    summary = "Fetch one restaurant's profile and menu"
)]
#[get("/restaurants/{restaurant_id}")]
pub(super) async fn get_restaurant_details(
    user_ops: web::Data<UserOperations>,
    path: web::Path<i32>,
) -> impl Responder {
    let restaurant_id = path.into_inner();
    match user_ops.get_restaurant_with_dishes(restaurant_id) {
        Ok((restaurant, dishes)) => HttpResponse::Ok().json(RestaurantDetailResp {
            status: "ok".to_string(),
            restaurant: Some(RestaurantDetail {
                profile: restaurant.into(),
                dishes,
            }),
            error: None,
        }),
        Err(e) => {
            error!(
                "get_restaurant_details: failed for restaurant {}: {}",
                restaurant_id, e
            );
            HttpResponse::build(e.status()).json(RestaurantDetailResp {
                status: "error".to_string(),
                restaurant: None,
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Customers",
    request_body = OrderReq,
    responses(
        (status = 201, description = "Order placed", body = OrderResp),
        (status = 400, description = "Empty order or dishes outside the restaurant's catalog", body = OrderResp),
        (status = 401, description = "No active session", body = OrderResp),
        (status = 404, description = "No such restaurant", body = OrderResp)
    ),
    summary = "Place an order against one restaurant's menu"
)]
#[post("/orders")]
pub(super) async fn create_order(
    order_ops: web::Data<OrderOperations>,
    session: CustomerSession,
    req_data: web::Json<OrderReq>,
) -> impl Responder {
    let req = req_data.into_inner();
    match order_ops.create_order(session.user_id(), req.restaurant_id, &req.items) {
        Ok(order) => {
            info!(
                "create_order: customer {} placed order {} at restaurant {}",
                session.user_id(),
                order.id,
                req.restaurant_id
            );
            HttpResponse::Created().json(OrderResp {
                status: "ok".to_string(),
                order: Some(order),
                error: None,
            })
        }
        Err(e) => {
            error!(
                "create_order: failed for customer {} at restaurant {}: {}",
                session.user_id(),
                req.restaurant_id,
                e
            );
            HttpResponse::build(e.status()).json(OrderResp {
                status: "error".to_string(),
                order: None,
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Customers",
    responses(
        (status = 200, description = "Own orders, newest first", body = OrdersResp),
        (status = 401, description = "No active session", body = OrdersResp)
    ),
    summary = "List the customer's own orders"
)]
#[get("/orders")]
pub(super) async fn get_orders(
    order_ops: web::Data<OrderOperations>,
    session: CustomerSession,
) -> impl Responder {
    match order_ops.list_for_customer(session.user_id()) {
        Ok(orders) => HttpResponse::Ok().json(OrdersResp {
            status: "ok".to_string(),
            orders,
            error: None,
        }),
        Err(e) => {
            error!(
                "get_orders: failed for customer {}: {}",
                session.user_id(),
                e
            );
            HttpResponse::build(e.status()).json(OrdersResp {
                status: "error".to_string(),
                orders: vec![],
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Customers",
    request_body = FavoriteReq,
    responses(
        (status = 201, description = "Restaurant bookmarked", body = MessageResp),
        (status = 404, description = "No such restaurant", body = MessageResp),
        (status = 409, description = "Already bookmarked", body = MessageResp)
    ),
    summary = "Bookmark a restaurant"
)]
#[post("/favorites")]
pub(super) async fn add_favorite(
    favorite_ops: web::Data<FavoriteOperations>,
    session: CustomerSession,
    req_data: web::Json<FavoriteReq>,
) -> impl Responder {
    let restaurant_id = req_data.restaurant_id;
    match favorite_ops.add_favorite(session.user_id(), restaurant_id) {
        Ok(_) => {
            debug!(
                "add_favorite: customer {} bookmarked restaurant {}",
                session.user_id(),
                restaurant_id
            );
            HttpResponse::Created().json(MessageResp {
                status: "ok".to_string(),
                error: None,
            })
        }
        Err(e) => {
            error!(
                "add_favorite: failed for customer {} and restaurant {}: {}",
                session.user_id(),
                restaurant_id,
                e
            );
            HttpResponse::build(e.status()).json(MessageResp {
                status: "error".to_string(),
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Customers",
    params(("restaurant_id", description = "Restaurant user id")),
    responses(
        (status = 200, description = "Bookmark removed", body = MessageResp),
        (status = 404, description = "Not bookmarked", body = MessageResp)
    ),
    summary = "Remove a bookmarked restaurant"
)]
#[delete("/favorites/{restaurant_id}")]
pub(super) async fn remove_favorite(
    favorite_ops: web::Data<FavoriteOperations>,
    session: CustomerSession,
    path: web::Path<i32>,
) -> impl Responder {
    let restaurant_id = path.into_inner();
    match favorite_ops.remove_favorite(session.user_id(), restaurant_id) {
        Ok(()) => HttpResponse::Ok().json(MessageResp {
            status: "ok".to_string(),
            error: None,
        }),
        Err(e) => {
            error!(
                "remove_favorite: failed for customer {} and restaurant {}: {}",
                session.user_id(),
                restaurant_id,
                e
            );
            HttpResponse::build(e.status()).json(MessageResp {
                status: "error".to_string(),
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Customers",
    responses(
        (status = 200, description = "Bookmarked restaurants", body = FavoritesResp),
        (status = 401, description = "No active session", body = FavoritesResp)
    ),
    summary = "List bookmarked restaurants"
)]
#[get("/favorites")]
pub(super) async fn get_favorites(
    favorite_ops: web::Data<FavoriteOperations>,
    session: CustomerSession,
) -> impl Responder {
    match favorite_ops.list_favorites(session.user_id()) {
        Ok(restaurants) => HttpResponse::Ok().json(FavoritesResp {
            status: "ok".to_string(),
            restaurants,
            error: None,
        }),
        Err(e) => {
            error!(
                "get_favorites: failed for customer {}: {}",
                session.user_id(),
                e
            );
            HttpResponse::build(e.status()).json(FavoritesResp {
                status: "error".to_string(),
                restaurants: vec![],
                error: Some(e.public_message()),
            })
        }
    }
}
