use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::warn;

use vigia_core::AppError;

/// Ceiling on any single store call made on the request path.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects the application pool.
///
/// # Panics
///
/// Panics when `DATABASE_URL` is unset or the database is unreachable;
/// there is nothing useful the server can do without its store.
pub async fn init_db_pool() -> PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Bounds a store call with [`STORE_TIMEOUT`].
///
/// An elapsed call is an infrastructure failure: the caller sees
/// `UpstreamUnavailable` (500), never a silent allow or deny.
pub async fn bounded<T, F>(operation: &'static str, query: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    bounded_by(STORE_TIMEOUT, operation, query).await
}

async fn bounded_by<T, F>(
    limit: Duration,
    operation: &'static str,
    query: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            warn!(operation, "Store call timed out");
            Err(AppError::upstream_unavailable(anyhow::anyhow!(
                "{operation} timed out"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_elapsed_store_call_is_upstream_unavailable() {
        // A lazy pool does not connect until first use, so a zero budget
        // elapses before the acquire can ever complete.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:5432/unreachable")
            .unwrap();

        let err = bounded_by(
            Duration::ZERO,
            "test read",
            sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(&pool),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
    }
}
