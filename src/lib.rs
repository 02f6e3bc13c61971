#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod db;
pub mod enums;
pub mod models;
pub mod services;
pub mod test_utils;

use crate::auth::{SessionConfig, SessionStore};
use crate::db::{
    establish_connection_pool, run_db_migrations, DishOperations, FavoriteOperations,
    OrderOperations, UserOperations,
};

#[derive(Clone)]
pub struct AppState {
    pub user_ops: UserOperations,
    pub dish_ops: DishOperations,
    pub order_ops: OrderOperations,
    pub favorite_ops: FavoriteOperations,
    pub sessions: SessionStore,
    pub session_cfg: SessionConfig,
}

impl AppState {
    pub fn new(url: &str) -> Self {
        let db = establish_connection_pool(url);
        run_db_migrations(db.clone()).expect("Unable to run migrations");

        let session_cfg = SessionConfig::from_env();
        let sessions = SessionStore::new(session_cfg.ttl());

        AppState {
            user_ops: UserOperations::new(db.clone()),
            dish_ops: DishOperations::new(db.clone()),
            order_ops: OrderOperations::new(db.clone()),
            favorite_ops: FavoriteOperations::new(db),
            sessions,
            session_cfg,
        }
    }
}
