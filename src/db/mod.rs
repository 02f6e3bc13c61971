use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{r2d2, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

mod dishes;
mod errors;
mod favorites;
mod orders;
pub mod schema;
mod users;

pub use dishes::DishOperations;
pub use errors::RepositoryError;
pub use favorites::FavoriteOperations;
pub use orders::OrderOperations;
pub use users::UserOperations;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn establish_connection_pool(database_url: &str) -> Pool<ConnectionManager<PgConnection>> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder().max_size(20).build(manager).unwrap()
}

pub fn run_db_migrations(
    pool: Pool<ConnectionManager<PgConnection>>,
) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(&pool)?;
    conn.connection()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepositoryError::ValidationError(format!("migration failure: {e}")))?;
    Ok(())
}

// Connection Guard - Manages pool
pub struct DbConnection<'a> {
    conn: r2d2::PooledConnection<ConnectionManager<PgConnection>>,
    _lifetime: std::marker::PhantomData<&'a ()>,
}

impl DbConnection<'_> {
    pub fn new(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<Self, RepositoryError> {
        Ok(Self {
            conn: pool.get().map_err(RepositoryError::ConnectionPoolError)?,
            _lifetime: std::marker::PhantomData,
        })
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}
