use sqlx::{pool::PoolConnection, PgPool, Postgres};

use crate::common::error::AppError;

/// Takes one connection from the pool for the duration of a request.
/// It goes back to the pool when the returned guard is dropped.
pub(crate) async fn get_connection(pool: &PgPool) -> Result<PoolConnection<Postgres>, AppError> {
    // '?' turns sqlx::Error (including PoolTimedOut) into AppError::DatabaseError
    let conn = pool.acquire().await?;
    Ok(conn)
}
