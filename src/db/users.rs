use crate::db::{DbConnection, RepositoryError};
use crate::models::dish::Dish;
use crate::models::user::{NewUser, RestaurantSummary, Role, UpdateUser, User};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error};
use diesel::PgConnection;
use log::error;
use std::collections::HashSet;

#[derive(Clone)]
pub struct UserOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl UserOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// Inserts a new account. The caller is responsible for hashing the
    /// password before it gets here.
    pub fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_user: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::users::dsl::*;

        diesel::insert_into(users)
            .values(&new_user)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_user: error inserting new user with email '{}': {}",
                    new_user.email, e
                );
                match e {
                    Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::Conflict("Email already registered".to_string())
                    }
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }

    /// Credential lookup. Role participates in the match, so a customer
    /// account cannot log in through the restaurant flow or vice versa.
    pub fn get_user_by_email_and_role(
        &self,
        email_addr: &str,
        role_val: Role,
    ) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::users::dsl::*;
        users
            .filter(email.eq(email_addr))
            .filter(role.eq(role_val))
            .first::<User>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(email_addr.to_string()),
                other => {
                    error!(
                        "get_user_by_email_and_role: error fetching user with email '{}': {}",
                        email_addr, other
                    );
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    pub fn get_user_by_id(&self, user_id: i32) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_user_by_id: failed to acquire DB connection for id {}: {}",
                user_id, e
            );
            e
        })?;

        use crate::db::schema::users::dsl::*;
        users
            .find(user_id)
            .first::<User>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("users: {user_id}")),
                other => RepositoryError::DatabaseError(other),
            })
    }

    pub fn update_profile(
        &self,
        user_id: i32,
        changes: UpdateUser,
    ) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_profile: failed to acquire DB connection for id {}: {}",
                user_id, e
            );
            e
        })?;

        // An all-None changeset would make diesel error out; a no-op update
        // just returns the current row.
        if changes.is_empty() {
            return self.get_user_by_id(user_id);
        }

        use crate::db::schema::users::dsl::*;
        diesel::update(users.find(user_id))
            .set((&changes, updated_at.eq(diesel::dsl::now)))
            .get_result::<User>(conn.connection())
            .map_err(|e| {
                error!(
                    "update_profile: error updating user with id {}: {}",
                    user_id, e
                );
                match e {
                    Error::NotFound => RepositoryError::NotFound(format!("users: {user_id}")),
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }

    /// Public restaurant browse. Optional case-insensitive substring match
    /// on name or description. Results are de-duplicated by name (first id
    /// wins) to match the behavior the clients rely on.
    pub fn list_restaurants(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<RestaurantSummary>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_restaurants: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::users::dsl::*;

        let mut query = users.filter(role.eq(Role::Restaurant)).into_boxed();
        if let Some(term) = search {
            let pattern = format!("%{term}%");
            query = query.filter(
                name.ilike(pattern.clone())
                    .or(description.ilike(pattern)),
            );
        }

        let rows = query
            .order_by(id.asc())
            .select((
                id,
                name,
                description,
                location,
                profile_picture,
                timings,
                contact_info,
            ))
            .load::<RestaurantSummary>(conn.connection())
            .map_err(|e| {
                error!("list_restaurants: error fetching restaurants: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        let mut seen_names: HashSet<String> = HashSet::new();
        Ok(rows
            .into_iter()
            .filter(|r| seen_names.insert(r.name.clone()))
            .collect())
    }

    /// Restaurant profile plus its full menu. Fails with `NotFound` when
    /// the id does not resolve to a restaurant-role user.
    pub fn get_restaurant_with_dishes(
        &self,
        restaurant_id_val: i32,
    ) -> Result<(User, Vec<Dish>), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_restaurant_with_dishes: failed to acquire DB connection for id {}: {}",
                restaurant_id_val, e
            );
            e
        })?;

        let restaurant: User;
        {
            use crate::db::schema::users::dsl::*;
            restaurant = users
                .find(restaurant_id_val)
                .filter(role.eq(Role::Restaurant))
                .first::<User>(conn.connection())
                .map_err(|e| match e {
                    Error::NotFound => {
                        RepositoryError::NotFound(format!("restaurants: {restaurant_id_val}"))
                    }
                    other => {
                        error!(
                            "get_restaurant_with_dishes: error fetching restaurant {}: {}",
                            restaurant_id_val, other
                        );
                        RepositoryError::DatabaseError(other)
                    }
                })?;
        }

        use crate::db::schema::dishes::dsl::*;
        let menu = dishes
            .filter(restaurant_id.eq(restaurant_id_val))
            .order_by(id.asc())
            .load::<Dish>(conn.connection())
            .map_err(|e| {
                error!(
                    "get_restaurant_with_dishes: error fetching dishes for restaurant {}: {}",
                    restaurant_id_val, e
                );
                RepositoryError::DatabaseError(e)
            })?;

        Ok((restaurant, menu))
    }
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.password_hash.is_none()
            && self.profile_picture.is_none()
            && self.country.is_none()
            && self.state.is_none()
            && self.location.is_none()
            && self.description.is_none()
            && self.contact_info.is_none()
            && self.timings.is_none()
    }
}
