//! WebSocket adapters for real-time board updates.
//!
//! This module pushes committed board mutations to connected clients.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      EventBroadcaster                                │
//! │   Called by mutation handlers after commit; never fails them        │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ submits
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Hub (one task)                                │
//! │   Board: board-123     Board: board-456                             │
//! │   ├── connection-a     ├── connection-d                             │
//! │   ├── connection-b     └── connection-e                             │
//! │   └── connection-c                                                   │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ per-connection queues
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Session (per socket)                             │
//! │   send loop: queue → batched text frames, keepalive pings           │
//! │   recv loop: pong deadline, teardown on close/error/timeout         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`hub`] - Single-task connection registry and event fan-out
//! - [`connection`] - Per-connection handle and outbound queue
//! - [`session`] - Send/receive task pair behind one socket
//! - [`broadcaster`] - Best-effort publication after commits
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod broadcaster;
pub mod connection;
pub mod handler;
pub mod hub;
pub mod session;

pub use broadcaster::EventBroadcaster;
pub use connection::ConnectionHandle;
pub use handler::{live_router, ws_handler, ConnectIdentity, LiveState};
pub use hub::{Hub, HubClosed};
pub use session::{run_session, SessionTimeouts};
