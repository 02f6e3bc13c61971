use crate::models::dish::{Dish, DishCategory};
use crate::models::order::OrderStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct DishPayload {
    pub name: String,
    pub description: String,
    /// Integer cents.
    pub price: i32,
    pub image: Option<String>,
    pub category: DishCategory,
    pub ingredients: String,
}

#[derive(Serialize, ToSchema)]
pub struct DishResp {
    pub status: String,
    pub dish: Option<Dish>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct DishesResp {
    pub status: String,
    pub dishes: Vec<Dish>,
    pub error: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct OrderFilterQuery {
    /// Exact status match, e.g. `Preparing` or `Order Received`.
    pub status: Option<OrderStatus>,
}

#[derive(Deserialize, ToSchema)]
pub struct StatusUpdateReq {
    pub status: OrderStatus,
}
