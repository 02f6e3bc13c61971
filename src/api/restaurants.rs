use crate::auth::RestaurantSession;
use crate::db::{DishOperations, OrderOperations};
use crate::enums::customers::{OrderResp, OrdersResp};
use crate::enums::restaurants::{
    DishPayload, DishResp, DishesResp, OrderFilterQuery, StatusUpdateReq,
};
use crate::models::dish::NewDish;
use actix_web::middleware::NormalizePath;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(cfg: &mut ServiceConfig, state: &crate::AppState) {
    cfg.service(
        scope::scope("/api/restaurants")
            .app_data(web::Data::new(state.dish_ops.clone()))
            .app_data(web::Data::new(state.order_ops.clone()))
            .wrap(NormalizePath::trim())
            .service(add_dish)
            .service(get_dishes)
            .service(update_dish)
            .service(delete_dish)
            .service(get_orders)
            .service(update_order_status),
    );
}

#[utoipa::path(
    tag = "Restaurants",
    request_body = DishPayload,
    responses(
        (status = 201, description = "Dish added to the menu", body = DishResp),
        (status = 401, description = "No active session", body = DishResp),
        (status = 403, description = "Caller is not a restaurant", body = DishResp)
    ),
    summary = "Add a dish to the restaurant's menu"
)]
#[post("/dishes")]
pub(super) async fn add_dish(
    dish_ops: web::Data<DishOperations>,
    session: RestaurantSession,
    req_data: web::Json<DishPayload>,
) -> impl Responder {
    let req = req_data.into_inner();
    let new_dish = NewDish {
        restaurant_id: session.user_id(),
        name: req.name,
        description: req.description,
        price: req.price,
        image: req.image,
        category: req.category,
        ingredients: req.ingredients,
    };
    match dish_ops.add_dish(new_dish) {
        Ok(dish) => {
            info!(
                "add_dish: restaurant {} added dish {} ('{}')",
                session.user_id(),
                dish.id,
                dish.name
            );
            HttpResponse::Created().json(DishResp {
                status: "ok".to_string(),
                dish: Some(dish),
                error: None,
            })
        }
        Err(e) => {
            error!(
                "add_dish: failed for restaurant {}: {}",
                session.user_id(),
                e
            );
            HttpResponse::build(e.status()).json(DishResp {
                status: "error".to_string(),
                dish: None,
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Restaurants",
    responses(
        (status = 200, description = "The restaurant's own menu", body = DishesResp),
        (status = 401, description = "No active session", body = DishesResp)
    ),
    summary = "List the restaurant's own dishes"
)]
#[get("/dishes")]
pub(super) async fn get_dishes(
    dish_ops: web::Data<DishOperations>,
    session: RestaurantSession,
) -> impl Responder {
    match dish_ops.list_dishes(session.user_id()) {
        Ok(dishes) => HttpResponse::Ok().json(DishesResp {
            status: "ok".to_string(),
            dishes,
            error: None,
        }),
        Err(e) => {
            error!(
                "get_dishes: failed for restaurant {}: {}",
                session.user_id(),
                e
            );
            HttpResponse::build(e.status()).json(DishesResp {
                status: "error".to_string(),
                dishes: vec![],
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Restaurants",
    params(("dish_id", description = "Dish id within the caller's menu")),
    request_body = crate::models::dish::UpdateDish,
    responses(
        (status = 200, description = "Dish updated", body = DishResp),
        (status = 404, description = "Dish missing or owned by another restaurant", body = DishResp)
    ),
    summary = "Partially update one of the restaurant's dishes"
)]
#[put("/dishes/{dish_id}")]
pub(super) async fn update_dish(
    dish_ops: web::Data<DishOperations>,
    session: RestaurantSession,
    path: web::Path<i32>,
    req_data: web::Json<crate::models::dish::UpdateDish>,
) -> impl Responder {
    let dish_id = path.into_inner();
    match dish_ops.update_dish(dish_id, session.user_id(), req_data.into_inner()) {
        Ok(dish) => {
            debug!(
                "update_dish: restaurant {} updated dish {}",
                session.user_id(),
                dish_id
            );
            HttpResponse::Ok().json(DishResp {
                status: "ok".to_string(),
                dish: Some(dish),
                error: None,
            })
        }
        Err(e) => {
            error!(
                "update_dish: failed for dish {} of restaurant {}: {}",
                dish_id,
                session.user_id(),
                e
            );
            HttpResponse::build(e.status()).json(DishResp {
                status: "error".to_string(),
                dish: None,
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Restaurants",
    params(("dish_id", description = "Dish id within the caller's menu")),
    responses(
        (status = 200, description = "Dish removed; past order lines keep their snapshot", body = DishResp),
        (status = 404, description = "Dish missing or owned by another restaurant", body = DishResp)
    ),
    summary = "Remove a dish from the restaurant's menu"
)]
#[delete("/dishes/{dish_id}")]
pub(super) async fn delete_dish(
    dish_ops: web::Data<DishOperations>,
    session: RestaurantSession,
    path: web::Path<i32>,
) -> impl Responder {
    let dish_id = path.into_inner();
    match dish_ops.delete_dish(dish_id, session.user_id()) {
        Ok(dish) => {
            info!(
                "delete_dish: restaurant {} removed dish {} ('{}')",
                session.user_id(),
                dish_id,
                dish.name
            );
            HttpResponse::Ok().json(DishResp {
                status: "ok".to_string(),
                dish: Some(dish),
                error: None,
            })
        }
        Err(e) => {
            error!(
                "delete_dish: failed for dish {} of restaurant {}: {}",
                dish_id,
                session.user_id(),
                e
            );
            HttpResponse::build(e.status()).json(DishResp {
                status: "error".to_string(),
                dish: None,
                error: Some(e.public_message()),
            })
        }
    }
}

#[utoipa::path(
    tag = "Restaurants",
    params(OrderFilterQuery),
    responses(
        (status = 200, description = "Incoming orders, newest first", body = OrdersResp),
        (status = 401, description = "No active session", body = OrdersResp)
    ),
    summary = "List the restaurant's incoming orders"
)]
#[get("/orders")]
pub(super) async fn get_orders(
    order_ops: web::Data<OrderOperations>,
    session: RestaurantSession,
    query: web::Query<OrderFilterQuery>,
) -> impl Responder {
    match order_ops.list_for_restaurant(session.user_id(), query.status) {
        Ok(orders) => HttpResponse::Ok().json(OrdersResp {
            status: "ok".to_string(),
            orders,
            error: None,
        }),
        Err(e) => {
            error!(
                "get_orders: failed for restaurant {}: {}",
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
    tag = "Restaurants",
    params(("order_id", description = "Order id owned by the caller")),
    request_body = StatusUpdateReq,
    responses(
        (status = 200, description = "Status advanced", body = OrderResp),
        (status = 400, description = "Transition not allowed from the current status", body = OrderResp),
        (status = 404, description = "Order missing or owned by another restaurant", body = OrderResp)
    ),
    summary = "Advance an order through the fulfilment workflow"
)]
#[put("/orders/{order_id}/status")]
pub(super) async fn update_order_status(
    order_ops: web::Data<OrderOperations>,
    session: RestaurantSession,
    path: web::Path<i32>,
    req_data: web::Json<StatusUpdateReq>,
) -> impl Responder {
    let order_id = path.into_inner();
    let wanted = req_data.status;
    match order_ops.update_status(order_id, session.user_id(), wanted) {
        Ok(order) => {
            info!(
                "update_order_status: order {} moved to '{}' by restaurant {}",
                order_id,
                wanted,
                session.user_id()
            );
            HttpResponse::Ok().json(OrderResp {
                status: "ok".to_string(),
                order: Some(order),
                error: None,
            })
        }
        Err(e) => {
            error!(
                "update_order_status: failed for order {} of restaurant {}: {}",
                order_id,
                session.user_id(),
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
