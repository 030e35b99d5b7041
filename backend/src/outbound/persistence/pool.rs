//! PostgreSQL connection pool shared by the tag and category repositories.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Checkout deadline for a single repository call.
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connections opened eagerly by [`DbPool::connect`]. At least one, so an
/// unreachable database fails startup instead of the first request.
const MIN_IDLE: u32 = 1;

/// Pool failures, mapped to repository connection errors by the adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// The pool could not open its initial connections.
    #[error("failed to open database pool: {message}")]
    Connect { message: String },

    /// No connection became free before the checkout deadline.
    #[error("no database connection available: {message}")]
    Checkout { message: String },
}

/// Shared handle to the PostgreSQL connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Open a pool of at most `max_connections` connections to
    /// `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Connect`] when the URL is malformed or the
    /// database cannot be reached.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let inner = Pool::builder()
            .max_size(max_connections)
            .min_idle(Some(MIN_IDLE.min(max_connections)))
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(manager)
            .await
            .map_err(|err| PoolError::Connect {
                message: err.to_string(),
            })?;
        Ok(Self { inner })
    }

    pub(crate) async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner.get().await.map_err(|err| PoolError::Checkout {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        PoolError::Connect { message: "invalid port".into() },
        "failed to open database pool: invalid port"
    )]
    #[case(
        PoolError::Checkout { message: "timed out".into() },
        "no database connection available: timed out"
    )]
    fn pool_errors_name_the_failing_stage(#[case] error: PoolError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
