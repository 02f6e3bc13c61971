use crate::db::{DbConnection, RepositoryError};
use crate::models::dish::{Dish, NewDish, UpdateDish};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use diesel::PgConnection;
use log::error;

/// Menu management. Every mutating operation is scoped to the owning
/// restaurant; a dish belonging to another tenant is indistinguishable
/// from a missing one (`NotFound`, never `Forbidden`).
#[derive(Clone)]
pub struct DishOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl DishOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn add_dish(&self, new_dish: NewDish) -> Result<Dish, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("add_dish: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::dishes::dsl::*;

        diesel::insert_into(dishes)
            .values(&new_dish)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "add_dish: error inserting dish '{}' for restaurant {}: {}",
                    new_dish.name, new_dish.restaurant_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn update_dish(
        &self,
        dish_id: i32,
        owner_id: i32,
        changes: UpdateDish,
    ) -> Result<Dish, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_dish: failed to acquire DB connection for id {}: {}",
                dish_id, e
            );
            e
        })?;

        use crate::db::schema::dishes::dsl::*;

        if changes.is_empty() {
            return dishes
                .filter(id.eq(dish_id))
                .filter(restaurant_id.eq(owner_id))
                .first::<Dish>(conn.connection())
                .map_err(|e| match e {
                    Error::NotFound => RepositoryError::NotFound(format!("dishes: {dish_id}")),
                    other => RepositoryError::DatabaseError(other),
                });
        }

        diesel::update(
            dishes
                .filter(id.eq(dish_id))
                .filter(restaurant_id.eq(owner_id)),
        )
        .set(&changes)
        .get_result(conn.connection())
        .map_err(|e| {
            error!(
                "update_dish: error updating dish with id {} for restaurant {}: {}",
                dish_id, owner_id, e
            );
            match e {
                Error::NotFound => RepositoryError::NotFound(format!("dishes: {dish_id}")),
                other => RepositoryError::DatabaseError(other),
            }
        })
    }

    pub fn delete_dish(&self, dish_id: i32, owner_id: i32) -> Result<Dish, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "delete_dish: failed to acquire DB connection for id {}: {}",
                dish_id, e
            );
            e
        })?;

        use crate::db::schema::dishes::dsl::*;

        diesel::delete(
            dishes
                .filter(id.eq(dish_id))
                .filter(restaurant_id.eq(owner_id)),
        )
        .get_result(conn.connection())
        .map_err(|e| {
            error!(
                "delete_dish: error deleting dish with id {} for restaurant {}: {}",
                dish_id, owner_id, e
            );
            match e {
                Error::NotFound => RepositoryError::NotFound(format!("dishes: {dish_id}")),
                other => RepositoryError::DatabaseError(other),
            }
        })
    }

    pub fn list_dishes(&self, owner_id: i32) -> Result<Vec<Dish>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "list_dishes: failed to acquire DB connection for restaurant {}: {}",
                owner_id, e
            );
            e
        })?;

        use crate::db::schema::dishes::dsl::*;

        dishes
            .filter(restaurant_id.eq(owner_id))
            .order_by(id.asc())
            .load::<Dish>(conn.connection())
            .map_err(|e| {
                error!(
                    "list_dishes: error fetching dishes for restaurant {}: {}",
                    owner_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }
}

impl UpdateDish {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.category.is_none()
            && self.ingredients.is_none()
    }
}
