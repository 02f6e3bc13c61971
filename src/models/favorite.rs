use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};

/// A customer's bookmark of a restaurant. Pure join row, unique per
/// (customer, restaurant) pair.
#[derive(Queryable, Identifiable, Debug)]
#[diesel(table_name = crate::db::schema::favorites)]
pub struct Favorite {
    pub id: i32,
    pub customer_id: i32,
    pub restaurant_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::favorites)]
pub struct NewFavorite {
    pub customer_id: i32,
    pub restaurant_id: i32,
}
