pub mod dish;
pub mod favorite;
pub mod order;
pub mod user;
