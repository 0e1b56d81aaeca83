//! One theme preview connection.
//!
//! Receive-only: the preview gets the stored document on connect, then every
//! document broadcast for its tenant, each as `THEME_UPDATE` followed by
//! `THEME_TOKENS`. A lagging preview skips straight to the newest document.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use storefront_core::theme::message::SurfaceMessage;
use storefront_core::theme::preview::PreviewUpdate;
use storefront_core::theme::PreviewSurface;
use storefront_core::types::DbId;
use storefront_db::repositories::StoreThemeRepo;
use tokio::sync::broadcast::error::RecvError;

use crate::state::AppState;
use crate::ws::manager::{Surface, WsSender};
use crate::ws::send;

pub(super) async fn run(socket: WebSocket, state: AppState, tenant_id: DbId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    let (tx, mut rx) = state
        .ws_manager
        .add(conn_id.clone(), tenant_id, Surface::Preview)
        .await;
    tracing::info!(conn_id = %conn_id, tenant_id, "Theme preview connected");

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Subscribe before loading so nothing published in between is missed.
    let mut themes = state.theme_channel.subscribe(tenant_id).await;

    let stored = match StoreThemeRepo::find(&state.pool, tenant_id).await {
        Ok(stored) => stored.map(|t| t.config).unwrap_or(Value::Null),
        Err(e) => {
            tracing::warn!(tenant_id, error = %e, "Theme load failed, previewing defaults");
            Value::Null
        }
    };

    let mut surface = PreviewSurface::new();
    let update = surface.apply(&stored);
    if !update.issues.is_empty() {
        tracing::debug!(tenant_id, issues = update.issues.len(), "Preview defaulted stored fields");
    }
    push(&tx, &surface, update);

    loop {
        tokio::select! {
            received = themes.recv() => match received {
                Ok(broadcast) => {
                    let update = surface.apply_config((*broadcast.config).clone());
                    push(&tx, &surface, update);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(conn_id = %conn_id, skipped, "Preview lagged, skipping to latest");
                }
                Err(RecvError::Closed) => break,
            },
            frame = stream.next() => match frame {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(Message::Text(_))) => {
                    send(&tx, &SurfaceMessage::error("Preview connections are receive-only"));
                }
                Some(Ok(Message::Pong(_))) => {
                    tracing::trace!(conn_id = %conn_id, "Pong received");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                    break;
                }
            },
        }
    }

    drop(themes);
    state.ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, tenant_id, "Theme preview disconnected");
}

/// Send the applied document, then the tokens derived from it.
fn push(tx: &WsSender, surface: &PreviewSurface, update: PreviewUpdate) {
    send(tx, &SurfaceMessage::Update(surface.config().clone()));
    send(tx, &SurfaceMessage::Tokens(update.into_payload()));
}
