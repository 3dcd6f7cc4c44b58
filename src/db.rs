use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds the connection pool and checks that one connection can be opened.
pub fn init_pool(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    let pool = Pool::builder().max_size(max_size).build(manager)?;

    log::info!("Database pool ready with up to {} connections", max_size);

    Ok(pool)
}
