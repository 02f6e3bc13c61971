use crate::db::{DbConnection, RepositoryError};
use crate::models::favorite::{Favorite, NewFavorite};
use crate::models::user::{RestaurantSummary, Role};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error};
use diesel::PgConnection;
use log::error;

#[derive(Clone)]
pub struct FavoriteOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl FavoriteOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// Bookmarks a restaurant. A duplicate pair is rejected with
    /// `Conflict` rather than silently succeeding.
    pub fn add_favorite(
        &self,
        customer_id_val: i32,
        restaurant_id_val: i32,
    ) -> Result<Favorite, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("add_favorite: failed to acquire DB connection: {}", e);
            e
        })?;

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
                            "add_favorite: error checking restaurant {}: {}",
                            restaurant_id_val, other
                        );
                        RepositoryError::DatabaseError(other)
                    }
                })?;
        }

        use crate::db::schema::favorites::dsl::*;
        diesel::insert_into(favorites)
            .values(&NewFavorite {
                customer_id: customer_id_val,
                restaurant_id: restaurant_id_val,
            })
            .get_result(conn.connection())
            .map_err(|e| match e {
                Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    RepositoryError::Conflict("Restaurant already in favorites".to_string())
                }
                other => {
                    error!(
                        "add_favorite: error inserting favorite ({}, {}): {}",
                        customer_id_val, restaurant_id_val, other
                    );
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    pub fn remove_favorite(
        &self,
        customer_id_val: i32,
        restaurant_id_val: i32,
    ) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("remove_favorite: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::favorites::dsl::*;
        let deleted = diesel::delete(
            favorites
                .filter(customer_id.eq(customer_id_val))
                .filter(restaurant_id.eq(restaurant_id_val)),
        )
        .execute(conn.connection())
        .map_err(|e| {
            error!(
                "remove_favorite: error deleting favorite ({}, {}): {}",
                customer_id_val, restaurant_id_val, e
            );
            RepositoryError::DatabaseError(e)
        })?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound(format!(
                "favorites: ({customer_id_val}, {restaurant_id_val})"
            )));
        }
        Ok(())
    }

    /// Returns restaurant profiles for display, not the join rows.
    pub fn list_favorites(
        &self,
        customer_id_val: i32,
    ) -> Result<Vec<RestaurantSummary>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "list_favorites: failed to acquire DB connection for customer {}: {}",
                customer_id_val, e
            );
            e
        })?;

        use crate::db::schema::{favorites, users};
        favorites::table
            .inner_join(users::table.on(favorites::restaurant_id.eq(users::id)))
            .filter(favorites::customer_id.eq(customer_id_val))
            .order_by(favorites::id.asc())
            .select((
                users::id,
                users::name,
                users::description,
                users::location,
                users::profile_picture,
                users::timings,
                users::contact_info,
            ))
            .load::<RestaurantSummary>(conn.connection())
            .map_err(|e| {
                error!(
                    "list_favorites: error loading favorites for customer {}: {}",
                    customer_id_val, e
                );
                RepositoryError::DatabaseError(e)
            })
    }
}
