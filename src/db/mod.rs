use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{r2d2, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

mod admin;
mod common;
mod errors;
pub mod schema;
pub mod scope;
pub mod users;

pub use admin::analytics::AnalyticsOperations;
pub use admin::campus::CampusOperations;
pub use admin::canteen::CanteenOperations;
pub use admin::menu::MenuOperations;
pub use admin::moderation::ModerationOperations;
pub use common::orders::{OrderActor, OrderLine, OrderOperations, PaymentDetails};
pub use errors::RepositoryError;
pub use users::user::UserOperations;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

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
        .map_err(|e| RepositoryError::MigrationError(e.to_string()))?;
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
