//! Database connection management

use sqlx::{PgPool, Postgres, Transaction};

/// Shared handle over the connection pool.
///
/// The pool is the only process-wide shared resource; every multi-write
/// operation acquires one connection through [`Db::begin_transaction`] and
/// holds it for the lifetime of that transaction. A dropped
/// [`Transaction`] rolls back, so every exit path releases the connection.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction for a paired-write operation.
    ///
    /// # Errors
    ///
    /// Returns an error when acquiring a connection or starting the
    /// transaction fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Returns the underlying pool for single-statement reads and writes.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, draining in-flight connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}
