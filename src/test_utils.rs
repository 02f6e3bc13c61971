use crate::auth::password;
use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, RepositoryError};
use crate::models::dish::{DishCategory, NewDish};
use crate::models::user::{NewUser, Role};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use std::sync::Once;

// Fixture strategy:
// - One customer, one restaurant, two dishes on that restaurant's menu.
// - Every seeded account shares TEST_PASSWORD so API tests can log in.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

static TEST_THREADS_GUARD: Once = Once::new();

fn ensure_single_threaded_tests() {
    TEST_THREADS_GUARD.call_once(|| {
        let threads = test_threads_from_args().or_else(|| std::env::var("RUST_TEST_THREADS").ok());
        if threads.as_deref() != Some("1") {
            panic!(
                "Tests must run with --test-threads=1 or RUST_TEST_THREADS=1 because init_test_env mutates environment variables."
            );
        }
    });
}

fn test_threads_from_args() -> Option<String> {
    let mut args = std::env::args();
    while let Some(arg) = args.next() {
        if arg == "--test-threads" {
            return args.next();
        }
        if let Some(value) = arg.strip_prefix("--test-threads=") {
            return Some(value.to_string());
        }
    }
    None
}

fn set_env_if_unset(key: &str, value: &str) {
    if std::env::var_os(key).is_none() {
        std::env::set_var(key, value);
    }
}

pub fn init_test_env() {
    ensure_single_threaded_tests();
    set_env_if_unset("SESSION_TTL_SECS", "86400");
    set_env_if_unset("SESSION_COOKIE_SECURE", "false");
}

pub fn build_test_pool(database_url: &str) -> Pool<ConnectionManager<PgConnection>> {
    let pool = establish_connection_pool(database_url);
    run_db_migrations(pool.clone()).expect("Unable to run migrations");
    pool
}

pub fn reset_db(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query(
        "TRUNCATE TABLE favorites, order_items, orders, dishes, users RESTART IDENTITY CASCADE",
    )
    .execute(conn.connection())
    .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

pub struct TestFixtures {
    pub customer_id: i32,
    pub restaurant_id: i32,
    pub dish_ids: Vec<i32>,
}

pub fn seed_basic_fixtures(
    pool: &Pool<ConnectionManager<PgConnection>>,
) -> Result<TestFixtures, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    let customer_id = insert_user(
        conn.connection(),
        "Casey Customer",
        "customer1@example.com",
        Role::Customer,
        None,
    )?;
    let restaurant_id = insert_user(
        conn.connection(),
        "Pizza Palace",
        "palace@example.com",
        Role::Restaurant,
        Some("Wood-fired pizza and more"),
    )?;
    let margherita_id = seed_dish(
        conn.connection(),
        restaurant_id,
        "Margherita",
        900,
        DishCategory::MainCourse,
        "Tomato, mozzarella, basil",
    )?;
    let tiramisu_id = seed_dish(
        conn.connection(),
        restaurant_id,
        "Tiramisu",
        450,
        DishCategory::Dessert,
        "Mascarpone, espresso, cocoa",
    )?;

    Ok(TestFixtures {
        customer_id,
        restaurant_id,
        dish_ids: vec![margherita_id, tiramisu_id],
    })
}

pub fn insert_user(
    conn: &mut PgConnection,
    name_val: &str,
    email_val: &str,
    role_val: Role,
    description_val: Option<&str>,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::users::dsl::*;

    let hash = password::hash_password(TEST_PASSWORD)
        .map_err(|e| RepositoryError::ValidationError(format!("bcrypt failure: {e}")))?;
    let new_user = NewUser {
        name: name_val.to_string(),
        email: email_val.to_string(),
        password_hash: hash,
        role: role_val,
        profile_picture: None,
        country: None,
        state: None,
        location: Some("12 Test Street".to_string()),
        description: description_val.map(|v| v.to_string()),
        contact_info: Some("555-0100".to_string()),
        timings: Some("9am-9pm".to_string()),
    };

    diesel::insert_into(users)
        .values(&new_user)
        .returning(id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn seed_dish(
    conn: &mut PgConnection,
    restaurant_id_val: i32,
    name_val: &str,
    price_val: i32,
    category_val: DishCategory,
    ingredients_val: &str,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::dishes::dsl::*;

    let new_dish = NewDish {
        restaurant_id: restaurant_id_val,
        name: name_val.to_string(),
        description: format!("{name_val} from the test kitchen"),
        price: price_val,
        image: None,
        category: category_val,
        ingredients: ingredients_val.to_string(),
    };

    diesel::insert_into(dishes)
        .values(&new_dish)
        .returning(id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}
