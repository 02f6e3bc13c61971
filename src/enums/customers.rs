use crate::models::dish::Dish;
use crate::models::order::OrderView;
use crate::models::user::{RestaurantSummary, UserPublic};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams)]
pub struct RestaurantSearchQuery {
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RestaurantsResp {
    pub status: String,
    pub restaurants: Vec<RestaurantSummary>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub profile: UserPublic,
    pub dishes: Vec<Dish>,
}

#[derive(Serialize, ToSchema)]
pub struct RestaurantDetailResp {
    pub status: String,
    pub restaurant: Option<RestaurantDetail>,
    pub error: Option<String>,
}

#[derive(Deserialize, Clone, Copy, ToSchema, Debug)]
pub struct OrderItemReq {
    pub dish_id: i32,
    pub quantity: i32,
}

#[derive(Deserialize, ToSchema)]
pub struct OrderReq {
    pub restaurant_id: i32,
    pub items: Vec<OrderItemReq>,
}

#[derive(Serialize, ToSchema)]
pub struct OrderResp {
    pub status: String,
    pub order: Option<OrderView>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct OrdersResp {
    pub status: String,
    pub orders: Vec<OrderView>,
    pub error: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct FavoriteReq {
    pub restaurant_id: i32,
}

#[derive(Serialize, ToSchema)]
pub struct FavoritesResp {
    pub status: String,
    pub restaurants: Vec<RestaurantSummary>,
    pub error: Option<String>,
}
