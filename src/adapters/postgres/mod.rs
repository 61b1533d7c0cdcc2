//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PgListStore` - Board-scoped list ordering
//! - `PgCardStore` - List-scoped card ordering
//!
//! Both stores share `PgUnitOfWork`, a thin wrapper over a sqlx
//! transaction. Dropping a unit of work without committing rolls the
//! transaction back, so a failed ordering operation never leaves a
//! half-shifted sequence behind.

mod card_store;
mod list_store;
mod unit_of_work;

pub use card_store::PgCardStore;
pub use list_store::PgListStore;
pub use unit_of_work::PgUnitOfWork;
