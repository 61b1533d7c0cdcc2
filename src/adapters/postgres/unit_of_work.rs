//! Transaction-scoped unit of work over a Postgres connection pool.

use sqlx::postgres::PgConnection;
use sqlx::{PgPool, Postgres, Transaction};

use crate::ports::StoreError;

/// Unit of work backed by a Postgres transaction.
///
/// Obtained from a store's `begin`; dropping it without `commit` rolls
/// the transaction back, which is what makes mid-operation failures
/// leave no partial position shifts behind.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl PgUnitOfWork {
    /// Opens a transaction on the pool.
    pub(crate) async fn begin(pool: &PgPool) -> Result<Self, StoreError> {
        let tx = pool
            .begin()
            .await
            .map_err(|e| StoreError::backend(format!("Failed to begin transaction: {}", e)))?;
        Ok(Self { tx })
    }

    /// Returns the transaction's connection for query execution.
    pub(crate) fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Commits the transaction.
    pub(crate) async fn commit(self) -> Result<(), StoreError> {
        self.tx
            .commit()
            .await
            .map_err(|e| StoreError::backend(format!("Failed to commit transaction: {}", e)))
    }
}
