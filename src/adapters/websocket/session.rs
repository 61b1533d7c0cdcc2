//! Connection session: the task pair behind one live WebSocket.
//!
//! Each accepted connection runs two cooperating tasks until either
//! side gives up:
//!
//! - The receive loop watches the client. Pongs extend its read
//!   deadline; a close frame, a read error, or a missed deadline ends
//!   the session. Leaving the receive loop is what unregisters the
//!   connection from the hub.
//! - The send loop drains the connection's outbound queue onto the
//!   socket, batching whatever is already queued into one text frame,
//!   and pings the client on a keepalive interval. Every write is
//!   bounded by a deadline.
//!
//! The parent waits for whichever task finishes first, aborts the
//! other, and repeats the unregister when the send loop lost the race.
//! Unregistering twice is harmless.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{interval, timeout, timeout_at, Instant};
use tracing::{debug, trace, warn};

use crate::domain::foundation::{BoardId, ConnectionId, UserId};

use super::connection::ConnectionHandle;
use super::hub::Hub;

/// Deadlines governing one session's two loops.
#[derive(Debug, Clone, Copy)]
pub struct SessionTimeouts {
    /// How often the send loop pings the client.
    pub ping_interval: Duration,
    /// How long the receive loop waits for a pong before closing.
    pub pong_timeout: Duration,
    /// Upper bound on any single socket write.
    pub write_timeout: Duration,
}

impl Default for SessionTimeouts {
    fn default() -> Self {
        Self {
            ping_interval: Duration::from_secs(45),
            pong_timeout: Duration::from_secs(60),
            write_timeout: Duration::from_secs(10),
        }
    }
}

/// Runs one connection's session until it ends.
///
/// Registers with the hub, runs the send/receive task pair, and
/// guarantees the connection is unregistered on every exit path.
pub async fn run_session(
    socket: WebSocket,
    hub: Hub,
    board_id: BoardId,
    user_id: UserId,
    queue_capacity: usize,
    timeouts: SessionTimeouts,
) {
    let (handle, outbound) = ConnectionHandle::new(board_id, user_id, queue_capacity);
    let connection_id = handle.connection_id();

    if hub.register(handle).is_err() {
        warn!(board_id = %board_id, "Hub is not running, refusing connection");
        return;
    }

    debug!(
        board_id = %board_id,
        connection_id = %connection_id,
        "Session started"
    );

    let (sink, stream) = socket.split();

    let mut send_task = tokio::spawn(send_loop(sink, outbound, timeouts));

    let mut recv_task = {
        let hub = hub.clone();
        tokio::spawn(async move {
            recv_loop(stream, connection_id, timeouts.pong_timeout).await;

            // Teardown starts here: the receive loop ending is the one
            // signal that this connection is gone.
            if hub.unregister(board_id, connection_id).is_err() {
                debug!(connection_id = %connection_id, "Hub already stopped during teardown");
            }
        })
    };

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
            // The aborted receive task may not have reached its
            // unregister; repeating it is a no-op.
            if hub.unregister(board_id, connection_id).is_err() {
                debug!(connection_id = %connection_id, "Hub already stopped during teardown");
            }
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    debug!(connection_id = %connection_id, "Session closed");
}

// ════════════════════════════════════════════════════════════════════════════
// Receive loop
// ════════════════════════════════════════════════════════════════════════════

/// Reads client frames until close, error, or a missed pong deadline.
async fn recv_loop(
    mut stream: SplitStream<WebSocket>,
    connection_id: ConnectionId,
    pong_timeout: Duration,
) {
    let mut deadline = Instant::now() + pong_timeout;

    loop {
        let frame = match timeout_at(deadline, stream.next()).await {
            Ok(Some(Ok(frame))) => frame,
            Ok(Some(Err(e))) => {
                debug!(connection_id = %connection_id, "Receive error: {}", e);
                return;
            }
            Ok(None) => {
                debug!(connection_id = %connection_id, "Client stream ended");
                return;
            }
            Err(_) => {
                debug!(
                    connection_id = %connection_id,
                    "No pong within deadline, closing connection"
                );
                return;
            }
        };

        match frame {
            Message::Pong(_) => {
                deadline = Instant::now() + pong_timeout;
            }
            Message::Close(_) => {
                debug!(connection_id = %connection_id, "Client sent close frame");
                return;
            }
            Message::Text(_) | Message::Binary(_) => {
                // Mutations arrive over HTTP today. Client frames are
                // read so the connection stays healthy, then dropped.
                trace!(connection_id = %connection_id, "Discarding inbound frame");
            }
            Message::Ping(_) => {
                // The protocol pong is answered by axum itself.
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Send loop
// ════════════════════════════════════════════════════════════════════════════

/// Drains the outbound queue onto the socket and keeps the client alive.
async fn send_loop(
    mut sink: SplitSink<WebSocket, Message>,
    mut outbound: mpsc::Receiver<Arc<str>>,
    timeouts: SessionTimeouts,
) {
    let mut keepalive = interval(timeouts.ping_interval);
    // The first tick completes immediately; skip it so the first ping
    // waits a full interval.
    keepalive.tick().await;

    loop {
        tokio::select! {
            frame = outbound.recv() => {
                let Some(frame) = frame else {
                    // Queue sender dropped: the hub has already let go
                    // of this connection.
                    break;
                };

                let text = batch_frames(&frame, &mut outbound);
                if write_frame(&mut sink, Message::Text(text), timeouts.write_timeout)
                    .await
                    .is_err()
                {
                    break;
                }
            }
            _ = keepalive.tick() => {
                if write_frame(&mut sink, Message::Ping(Vec::new()), timeouts.write_timeout)
                    .await
                    .is_err()
                {
                    break;
                }
            }
        }
    }

    let _ = sink.close().await;
}

/// Folds the first frame plus everything already queued into one
/// newline-separated text payload.
fn batch_frames(first: &str, outbound: &mut mpsc::Receiver<Arc<str>>) -> String {
    let mut text = String::from(first);
    while let Ok(next) = outbound.try_recv() {
        text.push('\n');
        text.push_str(&next);
    }
    text
}

/// Sends one frame, bounded by the write deadline.
async fn write_frame(
    sink: &mut SplitSink<WebSocket, Message>,
    message: Message,
    deadline: Duration,
) -> Result<(), axum::Error> {
    match timeout(deadline, sink.send(message)).await {
        Ok(result) => {
            if let Err(e) = &result {
                debug!("Write failed: {}", e);
            }
            result
        }
        Err(elapsed) => {
            debug!("Write timed out");
            Err(axum::Error::new(elapsed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeouts_keep_pong_deadline_beyond_ping_interval() {
        let timeouts = SessionTimeouts::default();
        assert!(timeouts.pong_timeout > timeouts.ping_interval);
    }

    #[tokio::test]
    async fn batch_frames_drains_everything_already_queued() {
        let (tx, mut rx) = mpsc::channel::<Arc<str>>(8);
        tx.send(Arc::from(r#"{"a":1}"#)).await.unwrap();
        tx.send(Arc::from(r#"{"b":2}"#)).await.unwrap();
        tx.send(Arc::from(r#"{"c":3}"#)).await.unwrap();

        let first = rx.recv().await.unwrap();
        let batched = batch_frames(&first, &mut rx);

        assert_eq!(batched, "{\"a\":1}\n{\"b\":2}\n{\"c\":3}");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn batch_frames_with_empty_queue_returns_single_frame() {
        let (_tx, mut rx) = mpsc::channel::<Arc<str>>(8);

        let batched = batch_frames(r#"{"only":true}"#, &mut rx);

        assert_eq!(batched, r#"{"only":true}"#);
    }
}
