use crate::db::{DbConnection, RepositoryError};
use crate::enums::customers::OrderItemReq;
use crate::models::order::{
    NewOrder, NewOrderItem, Order, OrderItemRecord, OrderItemView, OrderStatus, OrderView,
};
use crate::models::user::Role;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use diesel::PgConnection;
use log::{debug, error};
use std::collections::{HashMap, HashSet};

#[derive(Clone)]
pub struct OrderOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl OrderOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// Creates an order for `customer_id_val` against one restaurant's
    /// catalog. Item prices are snapshotted from the dishes at this moment;
    /// the stored rows never track later catalog changes. The order and its
    /// items are committed in a single transaction, so a half-created order
    /// cannot exist.
    pub fn create_order(
        &self,
        customer_id_val: i32,
        restaurant_id_val: i32,
        items_req: &[OrderItemReq],
    ) -> Result<OrderView, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_order: failed to acquire DB connection: {}", e);
            e
        })?;

        if items_req.is_empty() {
            return Err(RepositoryError::ValidationError(format!(
                "Order is empty for customer {customer_id_val}"
            )));
        }
        for item in items_req {
            if item.quantity < 1 {
                return Err(RepositoryError::ValidationError(format!(
                    "Invalid quantity {} for dish {}",
                    item.quantity, item.dish_id
                )));
            }
        }

        // The restaurant must exist and actually be a restaurant.
        {
            use crate::db::schema::users::dsl::*;
            users
                .find(restaurant_id_val)
                .filter(role.eq(Role::Restaurant))
                .select(id)
                .first::<i32>(conn.connection())
                .map_err(|e| match e {
                    Error::NotFound => {
                        RepositoryError::NotFound(format!("restaurants: {restaurant_id_val}"))
                    }
                    other => {
                        error!(
                            "create_order: error checking restaurant {}: {}",
                            restaurant_id_val, other
                        );
                        RepositoryError::DatabaseError(other)
                    }
                })?;
        }

        // Resolve every requested dish inside that restaurant's catalog.
        // Any miss rejects the whole request; there are no partial orders.
        let mut price_by_dish: HashMap<i32, i32> = HashMap::new();
        {
            use crate::db::schema::dishes::dsl::*;
            let requested: HashSet<i32> = items_req.iter().map(|i| i.dish_id).collect();
            let found = dishes
                .filter(id.eq_any(&requested))
                .filter(restaurant_id.eq(restaurant_id_val))
                .select((id, price))
                .load::<(i32, i32)>(conn.connection())
                .map_err(|e| {
                    error!(
                        "create_order: error loading dishes {:?} for restaurant {}: {}",
                        requested, restaurant_id_val, e
                    );
                    RepositoryError::DatabaseError(e)
                })?;
            for (dish_id_val, price_val) in found {
                price_by_dish.insert(dish_id_val, price_val);
            }
            if price_by_dish.len() != requested.len() {
                return Err(RepositoryError::ValidationError(format!(
                    "Order contains dishes outside restaurant {restaurant_id_val}'s catalog"
                )));
            }
        }

        let total: i64 = items_req
            .iter()
            .map(|item| i64::from(price_by_dish[&item.dish_id]) * i64::from(item.quantity))
            .sum();

        let order = conn
            .connection()
            .transaction::<Order, RepositoryError, _>(|conn| {
                let order: Order = {
                    use crate::db::schema::orders::dsl::*;
                    diesel::insert_into(orders)
                        .values(&NewOrder {
                            customer_id: customer_id_val,
                            restaurant_id: restaurant_id_val,
                            status: OrderStatus::New,
                            total_amount: total,
                        })
                        .get_result(conn)
                        .map_err(RepositoryError::DatabaseError)?
                };

                let new_items: Vec<NewOrderItem> = items_req
                    .iter()
                    .map(|item| NewOrderItem {
                        order_id: order.id,
                        dish_id: item.dish_id,
                        quantity: item.quantity,
                        price: price_by_dish[&item.dish_id],
                    })
                    .collect();

                {
                    use crate::db::schema::order_items::dsl::*;
                    diesel::insert_into(order_items)
                        .values(&new_items)
                        .execute(conn)
                        .map_err(RepositoryError::DatabaseError)?;
                }
                Ok(order)
            })?;

        debug!(
            "create_order: order {} created for customer {} at restaurant {} (total {})",
            order.id, customer_id_val, restaurant_id_val, total
        );

        let mut views = Self::compose_views(conn.connection(), vec![order])?;
        Ok(views.remove(0))
    }

    /// A customer's own orders, newest first.
    pub fn list_for_customer(
        &self,
        customer_id_val: i32,
    ) -> Result<Vec<OrderView>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "list_for_customer: failed to acquire DB connection for customer {}: {}",
                customer_id_val, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        let rows = orders
            .filter(customer_id.eq(customer_id_val))
            .order_by(created_at.desc())
            .load::<Order>(conn.connection())
            .map_err(|e| {
                error!(
                    "list_for_customer: error loading orders for customer {}: {}",
                    customer_id_val, e
                );
                RepositoryError::DatabaseError(e)
            })?;

        Self::compose_views(conn.connection(), rows)
    }

    /// A restaurant's own orders, newest first, optionally filtered to an
    /// exact status.
    pub fn list_for_restaurant(
        &self,
        restaurant_id_val: i32,
        status_filter: Option<OrderStatus>,
    ) -> Result<Vec<OrderView>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "list_for_restaurant: failed to acquire DB connection for restaurant {}: {}",
                restaurant_id_val, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        let mut query = orders
            .filter(restaurant_id.eq(restaurant_id_val))
            .into_boxed();
        if let Some(wanted) = status_filter {
            query = query.filter(status.eq(wanted));
        }

        let rows = query
            .order_by(created_at.desc())
            .load::<Order>(conn.connection())
            .map_err(|e| {
                error!(
                    "list_for_restaurant: error loading orders for restaurant {}: {}",
                    restaurant_id_val, e
                );
                RepositoryError::DatabaseError(e)
            })?;

        Self::compose_views(conn.connection(), rows)
    }

    /// Overwrites an order's status on behalf of the owning restaurant.
    /// An order owned by another restaurant is reported as `NotFound`.
    /// Transitions outside the workflow table are rejected and leave the
    /// stored status untouched. Last-writer-wins under concurrency; there
    /// is no version check.
    pub fn update_status(
        &self,
        order_id_val: i32,
        acting_restaurant_id: i32,
        new_status: OrderStatus,
    ) -> Result<OrderView, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_status: failed to acquire DB connection for order {}: {}",
                order_id_val, e
            );
            e
        })?;

        let updated = conn
            .connection()
            .transaction::<Order, RepositoryError, _>(|conn| {
                use crate::db::schema::orders::dsl::*;

                let current: Order = orders
                    .find(order_id_val)
                    .filter(restaurant_id.eq(acting_restaurant_id))
                    .first(conn)
                    .map_err(|e| match e {
                        Error::NotFound => {
                            RepositoryError::NotFound(format!("orders: {order_id_val}"))
                        }
                        other => {
                            error!(
                                "update_status: error fetching order {} for restaurant {}: {}",
                                order_id_val, acting_restaurant_id, other
                            );
                            RepositoryError::DatabaseError(other)
                        }
                    })?;

                if !current.status.can_transition_to(new_status) {
                    return Err(RepositoryError::ValidationError(format!(
                        "Illegal status transition: {} -> {}",
                        current.status, new_status
                    )));
                }

                diesel::update(orders.find(order_id_val))
                    .set((status.eq(new_status), updated_at.eq(diesel::dsl::now)))
                    .get_result::<Order>(conn)
                    .map_err(RepositoryError::DatabaseError)
            })?;

        debug!(
            "update_status: order {} moved to '{}' by restaurant {}",
            order_id_val, new_status, acting_restaurant_id
        );

        let mut views = Self::compose_views(conn.connection(), vec![updated])?;
        Ok(views.remove(0))
    }

    /// Joins items (with their possibly-deleted dishes) and participant
    /// names onto raw order rows, preserving the input ordering.
    fn compose_views(
        conn: &mut PgConnection,
        rows: Vec<Order>,
    ) -> Result<Vec<OrderView>, RepositoryError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = rows.iter().map(|o| o.id).collect();
        let mut participant_ids: HashSet<i32> = HashSet::new();
        for order in &rows {
            participant_ids.insert(order.customer_id);
            participant_ids.insert(order.restaurant_id);
        }

        let names: HashMap<i32, String> = {
            use crate::db::schema::users::dsl::*;
            users
                .filter(id.eq_any(&participant_ids))
                .select((id, name))
                .load::<(i32, String)>(conn)
                .map_err(|e| {
                    error!("compose_views: error loading participant names: {}", e);
                    RepositoryError::DatabaseError(e)
                })?
                .into_iter()
                .collect()
        };

        let item_rows: Vec<OrderItemRecord> = {
            use crate::db::schema::{dishes, order_items};
            order_items::table
                .left_join(dishes::table.on(order_items::dish_id.eq(dishes::id)))
                .filter(order_items::order_id.eq_any(&order_ids))
                .order_by(order_items::id.asc())
                .select((
                    order_items::id,
                    order_items::order_id,
                    order_items::dish_id,
                    order_items::quantity,
                    order_items::price,
                    dishes::name.nullable(),
                ))
                .load::<OrderItemRecord>(conn)
                .map_err(|e| {
                    error!(
                        "compose_views: error loading items for orders {:?}: {}",
                        order_ids, e
                    );
                    RepositoryError::DatabaseError(e)
                })?
        };

        let mut items_by_order: HashMap<i32, Vec<OrderItemView>> = HashMap::new();
        for record in item_rows {
            items_by_order
                .entry(record.order_id)
                .or_default()
                .push(OrderItemView {
                    id: record.id,
                    dish_id: record.dish_id,
                    dish_name: record.dish_name,
                    quantity: record.quantity,
                    price: record.price,
                });
        }

        Ok(rows
            .into_iter()
            .map(|order| OrderView {
                id: order.id,
                customer_id: order.customer_id,
                customer_name: names.get(&order.customer_id).cloned().unwrap_or_default(),
                restaurant_id: order.restaurant_id,
                restaurant_name: names.get(&order.restaurant_id).cloned().unwrap_or_default(),
                status: order.status,
                total_amount: order.total_amount,
                created_at: order.created_at,
                updated_at: order.updated_at,
                items: items_by_order.remove(&order.id).unwrap_or_default(),
            })
            .collect())
    }
}
