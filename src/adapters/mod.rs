//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory stores for tests and local development
//! - `postgres` - PostgreSQL-backed stores
//! - `websocket` - Real-time event fan-out over WebSockets

pub mod memory;
pub mod postgres;
pub mod websocket;
