//! PostgreSQL implementation of the list position store.
//!
//! Persists lists and their board-scoped ordering. Ordering mutations
//! are serialized per board by locking the board row at the start of
//! every unit of work that reads `max_position`; the deferred unique
//! constraint on `(board_id, position)` lets sibling shifts pass
//! through transient duplicates inside a transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::ops::RangeInclusive;

use crate::adapters::postgres::PgUnitOfWork;
use crate::domain::board::List;
use crate::domain::foundation::{BoardId, ListId, Position, Timestamp};
use crate::ports::{PositionStore, Shift, StoreError};

/// PostgreSQL implementation of `PositionStore` for lists.
#[derive(Clone)]
pub struct PgListStore {
    pool: PgPool,
}

impl PgListStore {
    /// Creates a new PgListStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PositionStore for PgListStore {
    type Item = List;
    type Uow = PgUnitOfWork;

    async fn begin(&self) -> Result<Self::Uow, StoreError> {
        PgUnitOfWork::begin(&self.pool).await
    }

    async fn commit(&self, uow: Self::Uow) -> Result<(), StoreError> {
        uow.commit().await
    }

    async fn find(
        &self,
        uow: &mut Self::Uow,
        id: &ListId,
    ) -> Result<Option<List>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, board_id, title, position, created_at, updated_at
            FROM lists
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(uow.conn())
        .await
        .map_err(|e| StoreError::backend(format!("Failed to fetch list: {}", e)))?;

        row.map(row_to_list).transpose()
    }

    async fn max_position(
        &self,
        uow: &mut Self::Uow,
        parent: &BoardId,
    ) -> Result<u32, StoreError> {
        // Lock the board row first. Every ordering operation reads
        // max_position before mutating, so this serializes ordering
        // mutations per board for the rest of the transaction.
        sqlx::query("SELECT id FROM boards WHERE id = $1 FOR UPDATE")
            .bind(parent.as_uuid())
            .fetch_optional(uow.conn())
            .await
            .map_err(|e| StoreError::backend(format!("Failed to lock board: {}", e)))?;

        let result: (i32,) =
            sqlx::query_as("SELECT COALESCE(MAX(position), 0) FROM lists WHERE board_id = $1")
                .bind(parent.as_uuid())
                .fetch_one(uow.conn())
                .await
                .map_err(|e| {
                    StoreError::backend(format!("Failed to read max list position: {}", e))
                })?;

        Ok(result.0 as u32)
    }

    async fn shift_range(
        &self,
        uow: &mut Self::Uow,
        parent: &BoardId,
        range: RangeInclusive<u32>,
        shift: Shift,
    ) -> Result<(), StoreError> {
        let sql = match shift {
            Shift::Up => {
                r#"
                UPDATE lists
                SET position = position + 1
                WHERE board_id = $1 AND position >= $2 AND position <= $3
                "#
            }
            Shift::Down => {
                r#"
                UPDATE lists
                SET position = position - 1
                WHERE board_id = $1 AND position >= $2 AND position <= $3
                "#
            }
        };

        sqlx::query(sql)
            .bind(parent.as_uuid())
            .bind(*range.start() as i32)
            .bind(*range.end() as i32)
            .execute(uow.conn())
            .await
            .map_err(|e| StoreError::backend(format!("Failed to shift list positions: {}", e)))?;

        Ok(())
    }

    async fn insert(&self, uow: &mut Self::Uow, item: &List) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO lists (id, board_id, title, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.board_id().as_uuid())
        .bind(item.title())
        .bind(item.position().get() as i32)
        .bind(item.created_at().as_datetime())
        .bind(item.updated_at().as_datetime())
        .execute(uow.conn())
        .await
        .map_err(|e| StoreError::backend(format!("Failed to insert list: {}", e)))?;

        Ok(())
    }

    async fn update(&self, uow: &mut Self::Uow, item: &List) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE lists SET
                board_id = $2,
                title = $3,
                position = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.board_id().as_uuid())
        .bind(item.title())
        .bind(item.position().get() as i32)
        .bind(item.updated_at().as_datetime())
        .execute(uow.conn())
        .await
        .map_err(|e| StoreError::backend(format!("Failed to update list: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::backend(format!("No list with id {}", item.id())));
        }

        Ok(())
    }

    async fn delete(&self, uow: &mut Self::Uow, id: &ListId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id.as_uuid())
            .execute(uow.conn())
            .await
            .map_err(|e| StoreError::backend(format!("Failed to delete list: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::backend(format!("No list with id {}", id)));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_list(row: sqlx::postgres::PgRow) -> Result<List, StoreError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| StoreError::backend(format!("Failed to get id: {}", e)))?;

    let board_id: uuid::Uuid = row
        .try_get("board_id")
        .map_err(|e| StoreError::backend(format!("Failed to get board_id: {}", e)))?;

    let title: String = row
        .try_get("title")
        .map_err(|e| StoreError::backend(format!("Failed to get title: {}", e)))?;

    let position: i32 = row
        .try_get("position")
        .map_err(|e| StoreError::backend(format!("Failed to get position: {}", e)))?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| StoreError::backend(format!("Failed to get created_at: {}", e)))?;

    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| StoreError::backend(format!("Failed to get updated_at: {}", e)))?;

    Ok(List::reconstitute(
        ListId::from_uuid(id),
        BoardId::from_uuid(board_id),
        title,
        Position::new(position as u32),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
