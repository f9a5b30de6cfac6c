use actix_web::{Error, HttpRequest, HttpResponse, get, rt, web};
use actix_ws::{Message, MessageStream, Session};
use futures_util::StreamExt;
use log::{debug, info, warn};
use std::sync::Arc;

use super::models::{AppState, ClientMessage, ServerMessage};
use crate::error::MiningError;
use crate::hub::SessionId;
use crate::mining::{MiningCoordinator, MiningEvent};

/// Upgrade to a WebSocket; one connection is one mining session.
#[get("/ws")]
pub async fn ws_connect(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let (response, session, stream) = actix_ws::handle(&req, body)?;
    rt::spawn(run_session(Arc::clone(&state.coordinator), session, stream));
    Ok(response)
}

async fn run_session(
    coordinator: Arc<MiningCoordinator>,
    mut session: Session,
    mut stream: MessageStream,
) {
    let (id, mut outbound) = coordinator.join();
    info!("websocket session {id} connected");

    let mut close_reason = None;
    loop {
        tokio::select! {
            event = outbound.recv() => {
                let Some(event) = event else { break };
                let text = match serde_json::to_string(&ServerMessage::from(&event)) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("session {id}: cannot encode {event:?}: {e}");
                        continue;
                    }
                };
                if session.text(text).await.is_err() {
                    debug!("session {id}: transport closed while sending");
                    break;
                }
            }
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => handle_client_text(&coordinator, id, &text),
                Some(Ok(Message::Ping(bytes))) => {
                    if session.pong(&bytes).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(reason))) => {
                    close_reason = reason;
                    break;
                }
                Some(Ok(other)) => debug!("session {id}: ignoring frame {other:?}"),
                Some(Err(e)) => {
                    warn!("session {id}: protocol error: {e}");
                    break;
                }
                None => break,
            }
        }
    }

    coordinator.leave(id);
    let _ = session.close(close_reason).await;
    info!("websocket session {id} closed");
}

/// Decode one inbound envelope.
pub fn parse_client_message(text: &str) -> Result<ClientMessage, MiningError> {
    Ok(serde_json::from_str(text)?)
}

/// Apply one inbound text frame from `session`.
///
/// Malformed or rejected commands are logged and dropped. Only a well-formed
/// `setDifficulty` with the wrong secret is answered, and only to its sender.
pub fn handle_client_text(coordinator: &MiningCoordinator, session: SessionId, text: &str) {
    let message = match parse_client_message(text) {
        Ok(message) => message,
        Err(e) => {
            warn!("session {session}: {e}");
            return;
        }
    };

    match message {
        ClientMessage::BlockSolved { user, hash } => {
            if let Err(e) = coordinator.submit_solution(&user, &hash) {
                warn!("session {session}: rejected solution from {user:?}: {e}");
            }
        }
        ClientMessage::SetDifficulty {
            target_prefix,
            password,
        } => match coordinator.set_difficulty(&target_prefix, &password) {
            Ok(_) => {}
            Err(MiningError::Unauthorized) => {
                let reply = MiningEvent::AuthFailed {
                    reason: MiningError::Unauthorized.to_string(),
                };
                if let Err(e) = coordinator.hub().send_to(session, reply) {
                    debug!("session {session}: {e}");
                }
            }
            Err(e) => warn!("session {session}: {e}"),
        },
    }
}
