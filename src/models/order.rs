use chrono::{DateTime, Utc};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{Identifiable, Insertable, Queryable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use utoipa::ToSchema;

/// Fulfillment progress of an order. `Delivered`, `Picked Up` and
/// `Cancelled` are terminal; `Cancelled` is reachable from any
/// non-terminal state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum OrderStatus {
    New,
    #[serde(rename = "Order Received")]
    OrderReceived,
    Preparing,
    #[serde(rename = "On the Way")]
    OnTheWay,
    #[serde(rename = "Pick-up Ready")]
    PickupReady,
    Delivered,
    #[serde(rename = "Picked Up")]
    PickedUp,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::OrderReceived => "Order Received",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OnTheWay => "On the Way",
            OrderStatus::PickupReady => "Pick-up Ready",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::PickedUp => "Picked Up",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::PickedUp | OrderStatus::Cancelled
        )
    }

    /// The workflow is linear with a delivery/pick-up branch after
    /// `Preparing`; cancellation is allowed from any non-terminal state.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (*self, next) {
            (current, Cancelled) => !current.is_terminal(),
            (New, OrderReceived) => true,
            (OrderReceived, Preparing) => true,
            (Preparing, OnTheWay) | (Preparing, PickupReady) => true,
            (OnTheWay, Delivered) => true,
            (PickupReady, PickedUp) => true,
            _ => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(OrderStatus::New),
            "Order Received" => Ok(OrderStatus::OrderReceived),
            "Preparing" => Ok(OrderStatus::Preparing),
            "On the Way" => Ok(OrderStatus::OnTheWay),
            "Pick-up Ready" => Ok(OrderStatus::PickupReady),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Picked Up" => Ok(OrderStatus::PickedUp),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unrecognized order status: {other}")),
        }
    }
}

impl ToSql<Text, Pg> for OrderStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for OrderStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let s = std::str::from_utf8(bytes.as_bytes())?;
        s.parse().map_err(|e: String| e.into())
    }
}

#[derive(Queryable, Identifiable, Debug)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub restaurant_id: i32,
    pub status: OrderStatus,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct NewOrder {
    pub customer_id: i32,
    pub restaurant_id: i32,
    pub status: OrderStatus,
    pub total_amount: i64,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub dish_id: i32,
    pub quantity: i32,
    pub price: i32,
}

/// Raw item row joined with the (possibly deleted) dish it snapshotted.
#[derive(Queryable, Debug)]
pub struct OrderItemRecord {
    pub id: i32,
    pub order_id: i32,
    pub dish_id: i32,
    pub quantity: i32,
    pub price: i32,
    pub dish_name: Option<String>,
}

/// One line of an order as returned by the API. `price` is the snapshot
/// taken at order time, never the dish's live price. `dish_name` is null
/// when the dish has since been deleted from the catalog.
#[derive(Serialize, ToSchema, Debug)]
pub struct OrderItemView {
    pub id: i32,
    pub dish_id: i32,
    pub dish_name: Option<String>,
    pub quantity: i32,
    pub price: i32,
}

/// Composed order returned by the API, with items and both participants'
/// display names joined in.
#[derive(Serialize, ToSchema, Debug)]
pub struct OrderView {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub status: OrderStatus,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}
