//! WebSocket handler driving one reactive [`Session`] per connection.
//!
//! - Client sends control changes as they happen
//! - Each accepted change recomputes every view and pushes a `views` message
//! - Rejected or malformed messages produce an `error` message and leave the
//!   session untouched
//!
//! Views travel through a single-slot `watch` channel, so a client that reads
//! slowly only ever receives the newest revision. Everything else goes
//! through a bounded queue.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use runtime::{ClientMessage, Dashboard, ProtocolError, ServerMessage, Session, ViewObserver, Views};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Pending hello, pong and error messages per connection.
pub const OUTBOX_CAPACITY: usize = 64;

/// Replaces the connection's unsent views with the newest ones.
struct LatestViewsSlot(watch::Sender<Option<Views>>);

impl ViewObserver for LatestViewsSlot {
    fn on_views(&mut self, views: &Views) {
        self.0.send_replace(Some(views.clone()));
    }
}

fn enqueue(out: &mpsc::Sender<ServerMessage>, msg: ServerMessage) {
    if let Err(e) = out.try_send(msg) {
        debug!("outbound message dropped: {e}");
    }
}

pub async fn handle_ws_connection(socket: WebSocket, dashboard: Dashboard) {
    let session_id = Uuid::new_v4().to_string();
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (out_tx, mut out_rx) = mpsc::channel::<ServerMessage>(OUTBOX_CAPACITY);
    let (views_tx, mut views_rx) = watch::channel::<Option<Views>>(None);

    let mut session = Session::new(dashboard);
    session.subscribe(Box::new(LatestViewsSlot(views_tx)));

    enqueue(
        &out_tx,
        ServerMessage::Hello {
            session_id: session_id.clone(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            controls: session.control_spec().clone(),
        },
    );
    session.refresh();
    info!("WS session {session_id} connected");

    let sender_task = tokio::spawn(async move {
        loop {
            // Queued messages go first so the hello precedes the first views.
            let msg = tokio::select! {
                biased;
                queued = out_rx.recv() => match queued {
                    Some(msg) => msg,
                    None => break,
                },
                changed = views_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let latest = views_rx.borrow_and_update().clone();
                    match latest {
                        Some(views) => ServerMessage::views(views),
                        None => continue,
                    }
                }
            };
            let text = match msg.encode() {
                Ok(t) => t,
                Err(e) => {
                    error!("{e}");
                    continue;
                }
            };
            if let Err(e) = ws_tx.send(Message::Text(text)).await {
                warn!("Failed to send message: {e}");
                break;
            }
        }
    });

    while let Some(msg) = ws_rx.next().await {
        let msg = match msg {
            Ok(m) => m,
            Err(e) => {
                warn!("WS receive error: {e}");
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                if let Err(e) = handle_client_message(&mut session, &text, &out_tx) {
                    warn!("WS session {session_id}: {e}");
                    enqueue(&out_tx, ServerMessage::error(&e));
                }
            }
            Message::Close(_) => {
                info!("WS session {session_id} closed by client");
                break;
            }
            // Transport pings are answered by the socket layer.
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    // The session owns the views sender; the writer stops once both
    // channels are closed.
    drop(session);
    drop(out_tx);
    let _ = sender_task.await;
    info!("WS session {session_id} disconnected");
}

/// Applies one text frame to the session. View updates reach the client
/// through the session's observers.
pub fn handle_client_message(
    session: &mut Session,
    text: &str,
    out: &mpsc::Sender<ServerMessage>,
) -> Result<(), ProtocolError> {
    let msg = ClientMessage::decode(text)?;
    if let ClientMessage::Ping { seq } = msg {
        enqueue(out, ServerMessage::Pong { seq });
        return Ok(());
    }
    if let Some(event) = msg.into_event() {
        session.dispatch(event)?;
    }
    Ok(())
}
