//! PostgreSQL implementation of the card position store.
//!
//! Persists cards and their list-scoped ordering. Ordering mutations
//! are serialized per list by locking the list row at the start of
//! every unit of work that reads `max_position`; a cross-list move
//! locks both list rows in the order the engine reads them.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::ops::RangeInclusive;

use crate::adapters::postgres::PgUnitOfWork;
use crate::domain::board::Card;
use crate::domain::foundation::{CardId, ListId, Position, Timestamp};
use crate::ports::{PositionStore, Shift, StoreError};

/// PostgreSQL implementation of `PositionStore` for cards.
#[derive(Clone)]
pub struct PgCardStore {
    pool: PgPool,
}

impl PgCardStore {
    /// Creates a new PgCardStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PositionStore for PgCardStore {
    type Item = Card;
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
        id: &CardId,
    ) -> Result<Option<Card>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, list_id, title, description, position, created_at, updated_at
            FROM cards
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(uow.conn())
        .await
        .map_err(|e| StoreError::backend(format!("Failed to fetch card: {}", e)))?;

        row.map(row_to_card).transpose()
    }

    async fn max_position(
        &self,
        uow: &mut Self::Uow,
        parent: &ListId,
    ) -> Result<u32, StoreError> {
        // Lock the list row first. Every ordering operation reads
        // max_position before mutating, so this serializes ordering
        // mutations per list for the rest of the transaction.
        sqlx::query("SELECT id FROM lists WHERE id = $1 FOR UPDATE")
            .bind(parent.as_uuid())
            .fetch_optional(uow.conn())
            .await
            .map_err(|e| StoreError::backend(format!("Failed to lock list: {}", e)))?;

        let result: (i32,) =
            sqlx::query_as("SELECT COALESCE(MAX(position), 0) FROM cards WHERE list_id = $1")
                .bind(parent.as_uuid())
                .fetch_one(uow.conn())
                .await
                .map_err(|e| {
                    StoreError::backend(format!("Failed to read max card position: {}", e))
                })?;

        Ok(result.0 as u32)
    }

    async fn shift_range(
        &self,
        uow: &mut Self::Uow,
        parent: &ListId,
        range: RangeInclusive<u32>,
        shift: Shift,
    ) -> Result<(), StoreError> {
        let sql = match shift {
            Shift::Up => {
                r#"
                UPDATE cards
                SET position = position + 1
                WHERE list_id = $1 AND position >= $2 AND position <= $3
                "#
            }
            Shift::Down => {
                r#"
                UPDATE cards
                SET position = position - 1
                WHERE list_id = $1 AND position >= $2 AND position <= $3
                "#
            }
        };

        sqlx::query(sql)
            .bind(parent.as_uuid())
            .bind(*range.start() as i32)
            .bind(*range.end() as i32)
            .execute(uow.conn())
            .await
            .map_err(|e| StoreError::backend(format!("Failed to shift card positions: {}", e)))?;

        Ok(())
    }

    async fn insert(&self, uow: &mut Self::Uow, item: &Card) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO cards (id, list_id, title, description, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.list_id().as_uuid())
        .bind(item.title())
        .bind(item.description())
        .bind(item.position().get() as i32)
        .bind(item.created_at().as_datetime())
        .bind(item.updated_at().as_datetime())
        .execute(uow.conn())
        .await
        .map_err(|e| StoreError::backend(format!("Failed to insert card: {}", e)))?;

        Ok(())
    }

    async fn update(&self, uow: &mut Self::Uow, item: &Card) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE cards SET
                list_id = $2,
                title = $3,
                description = $4,
                position = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.list_id().as_uuid())
        .bind(item.title())
        .bind(item.description())
        .bind(item.position().get() as i32)
        .bind(item.updated_at().as_datetime())
        .execute(uow.conn())
        .await
        .map_err(|e| StoreError::backend(format!("Failed to update card: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::backend(format!("No card with id {}", item.id())));
        }

        Ok(())
    }

    async fn delete(&self, uow: &mut Self::Uow, id: &CardId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id.as_uuid())
            .execute(uow.conn())
            .await
            .map_err(|e| StoreError::backend(format!("Failed to delete card: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::backend(format!("No card with id {}", id)));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_card(row: sqlx::postgres::PgRow) -> Result<Card, StoreError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| StoreError::backend(format!("Failed to get id: {}", e)))?;

    let list_id: uuid::Uuid = row
        .try_get("list_id")
        .map_err(|e| StoreError::backend(format!("Failed to get list_id: {}", e)))?;

    let title: String = row
        .try_get("title")
        .map_err(|e| StoreError::backend(format!("Failed to get title: {}", e)))?;

    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| StoreError::backend(format!("Failed to get description: {}", e)))?;

    let position: i32 = row
        .try_get("position")
        .map_err(|e| StoreError::backend(format!("Failed to get position: {}", e)))?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| StoreError::backend(format!("Failed to get created_at: {}", e)))?;

    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| StoreError::backend(format!("Failed to get updated_at: {}", e)))?;

    Ok(Card::reconstitute(
        CardId::from_uuid(id),
        ListId::from_uuid(list_id),
        title,
        description,
        Position::new(position as u32),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
