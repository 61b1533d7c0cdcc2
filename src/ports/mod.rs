//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `PositionStore` - Transactional persistence for ordered items
//! - `ListStore` / `CardStore` - Aliases fixing the item type

mod position_store;

pub use position_store::{
    CardStore, ItemId, ItemParent, ListStore, PositionStore, Shift, StoreError,
};
