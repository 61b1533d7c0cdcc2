//! WebSocket upgrade handler for live board connections.
//!
//! Handles the HTTP → WebSocket upgrade and launches the session:
//! 1. Require the identity the auth layer attached to the request
//! 2. Parse the board id from the path
//! 3. Upgrade with the inbound frame-size cap applied
//! 4. Run the session until disconnect

use axum::{
    extract::{
        ws::WebSocketUpgrade,
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension,
};

use crate::domain::foundation::{BoardId, UserId};

use super::hub::Hub;
use super::session::{run_session, SessionTimeouts};

/// Identity attached to the request before it reaches this handler.
///
/// Board CRUD, membership, and authentication live in a separate
/// service; whatever fronts this one is expected to verify the caller
/// and insert this extension. A request arriving without it was never
/// authenticated.
#[derive(Debug, Clone)]
pub struct ConnectIdentity {
    pub user_id: UserId,
}

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct LiveState {
    hub: Hub,
    queue_capacity: usize,
    max_frame_bytes: usize,
    timeouts: SessionTimeouts,
}

impl LiveState {
    /// Creates the handler state.
    ///
    /// # Arguments
    ///
    /// * `hub` - Running hub to register connections with
    /// * `queue_capacity` - Per-connection outbound queue depth
    /// * `max_frame_bytes` - Largest inbound frame accepted at upgrade
    /// * `timeouts` - Session keepalive and write deadlines
    pub fn new(
        hub: Hub,
        queue_capacity: usize,
        max_frame_bytes: usize,
        timeouts: SessionTimeouts,
    ) -> Self {
        Self {
            hub,
            queue_capacity,
            max_frame_bytes,
            timeouts,
        }
    }
}

/// Handle WebSocket upgrade requests for live board updates.
///
/// Route: `GET /api/boards/:board_id/live`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(board_id): Path<String>,
    identity: Option<Extension<ConnectIdentity>>,
    State(state): State<LiveState>,
) -> Response {
    let Some(Extension(identity)) = identity else {
        return (StatusCode::UNAUTHORIZED, "Missing identity").into_response();
    };

    let board_id: BoardId = match board_id.parse() {
        Ok(id) => id,
        Err(_) => {
            return (StatusCode::BAD_REQUEST, "Invalid board ID").into_response();
        }
    };

    ws.max_message_size(state.max_frame_bytes)
        .on_upgrade(move |socket| {
            run_session(
                socket,
                state.hub,
                board_id,
                identity.user_id,
                state.queue_capacity,
                state.timeouts,
            )
        })
}

/// Create axum router for the live updates endpoint.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api", live_router())
///     .with_state(live_state);
/// ```
pub fn live_router() -> axum::Router<LiveState> {
    use axum::routing::get;

    axum::Router::new().route("/boards/:board_id/live", get(ws_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn live_state_carries_the_configured_limits() {
        let state = LiveState::new(Hub::spawn(), 32, 1024, SessionTimeouts::default());

        assert_eq!(state.queue_capacity, 32);
        assert_eq!(state.max_frame_bytes, 1024);
    }

    #[test]
    fn live_router_creates_route() {
        let _router = live_router();
        // Basic smoke test - router should create without panic
    }
}
