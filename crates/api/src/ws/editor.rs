//! One theme editor connection.
//!
//! The session owns a [`ThemeEditor`]. Accepted edits are broadcast to the
//! tenant's previews as full documents; saves go to the store and their
//! outcome comes back as `SAVE_STATUS`. A successful save's revert to `idle`
//! is scheduled on a timer and fed back into the session loop, so all editor
//! state changes happen on this task.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use serde_json::json;
use storefront_core::event_types;
use storefront_core::theme::editor::{stale_save_warning, EditOutcome, EditRejected};
use storefront_core::theme::message::{parse_editor_message, EditorMessage, SurfaceMessage};
use storefront_core::theme::save_status::SaveTicket;
use storefront_core::theme::{SaveReceipt, ThemeEditor, SAVE_STATUS_RESET};
use storefront_core::types::DbId;
use storefront_db::repositories::StoreThemeRepo;
use storefront_events::PlatformEvent;
use tokio::sync::mpsc;

use crate::error::client_message;
use crate::state::AppState;
use crate::ws::manager::{Surface, WsSender};
use crate::ws::send;

pub(super) async fn run(socket: WebSocket, state: AppState, tenant_id: DbId, origin: String) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    let (tx, mut rx) = state
        .ws_manager
        .add(conn_id.clone(), tenant_id, Surface::Editor)
        .await;
    tracing::info!(conn_id = %conn_id, tenant_id, origin = %origin, "Theme editor connected");

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

    let mut session = EditorSession::load(state.clone(), tenant_id, origin, tx).await;
    let (revert_tx, mut revert_rx) = mpsc::unbounded_channel::<SaveTicket>();

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    session.handle_text(text.as_str(), &revert_tx).await;
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(Message::Pong(_))) => {
                    tracing::trace!(conn_id = %conn_id, "Pong received");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                    break;
                }
            },
            Some(ticket) = revert_rx.recv() => session.expire(ticket),
        }
    }

    state.ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, tenant_id, "Theme editor disconnected");
}

struct EditorSession {
    state: AppState,
    tenant_id: DbId,
    origin: String,
    editor: ThemeEditor,
    tx: WsSender,
}

impl EditorSession {
    /// Load the stored document (defaults on any failure) and send the
    /// initial snapshot and save status.
    async fn load(state: AppState, tenant_id: DbId, origin: String, tx: WsSender) -> Self {
        let stored = match StoreThemeRepo::find(&state.pool, tenant_id).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(tenant_id, error = %e, "Theme load failed, editing defaults");
                None
            }
        };

        let (editor, issues) = ThemeEditor::load(
            stored.as_ref().map(|t| &t.config),
            stored.as_ref().map(|t| t.version),
        );
        if !issues.is_empty() {
            tracing::warn!(tenant_id, issues = issues.len(), "Stored theme fields replaced by defaults");
        }

        let session = Self {
            state,
            tenant_id,
            origin,
            editor,
            tx,
        };
        session.send(&SurfaceMessage::Update((*session.editor.config()).clone()));
        session.send(&SurfaceMessage::SaveStatus(session.editor.idle_payload()));
        session
    }

    fn send(&self, message: &SurfaceMessage) {
        send(&self.tx, message);
    }

    async fn handle_text(&mut self, text: &str, revert_tx: &mpsc::UnboundedSender<SaveTicket>) {
        let message = match parse_editor_message(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(tenant_id = self.tenant_id, error = %e, "Rejected editor message");
                self.send(&SurfaceMessage::error(client_message(&e)));
                return;
            }
        };

        match message {
            EditorMessage::Update(payload) => {
                let result = self.editor.replace(&payload);
                self.accept(result).await;
            }
            EditorMessage::Edit(edit) => {
                let result = self.editor.edit(&edit);
                self.accept(result).await;
            }
            EditorMessage::Save => self.save(revert_tx).await,
        }
    }

    async fn accept(&mut self, result: Result<EditOutcome, EditRejected>) {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(rejected) => {
                tracing::debug!(
                    tenant_id = self.tenant_id,
                    issues = rejected.issues.len(),
                    "Rejected theme edit"
                );
                self.send(&SurfaceMessage::rejected(
                    client_message(&rejected.error),
                    rejected.issues,
                ));
                return;
            }
        };

        if outcome.status_reset {
            self.send(&SurfaceMessage::SaveStatus(self.editor.idle_payload()));
        }

        match self
            .state
            .theme_channel
            .publish(self.tenant_id, Some(self.origin.as_str()), outcome.config)
            .await
        {
            Ok(delivered) => {
                tracing::trace!(tenant_id = self.tenant_id, delivered, "Theme broadcast");
            }
            Err(e) => {
                tracing::warn!(tenant_id = self.tenant_id, error = %e, "Theme broadcast refused");
            }
        }
    }

    async fn save(&mut self, revert_tx: &mpsc::UnboundedSender<SaveTicket>) {
        let request = self.editor.begin_save();
        let tenant_id = self.tenant_id;

        let result =
            match StoreThemeRepo::save(&self.state.pool, tenant_id, &request.config.to_value()).await
            {
                Ok(saved) => {
                    let version = saved.theme.version;
                    let warning = stale_save_warning(request.base_version, saved.previous_version);
                    if let Some(warning) = &warning {
                        tracing::warn!(tenant_id, version, warning = %warning, "Stale theme save");
                    }
                    self.state.publish(
                        PlatformEvent::new(event_types::THEME_SAVED)
                            .with_tenant(tenant_id)
                            .with_source("store_theme", tenant_id)
                            .with_payload(json!({ "version": version, "source": "editor" })),
                    );
                    tracing::info!(tenant_id, version, "Theme saved from editor");
                    Ok(SaveReceipt { version, warning })
                }
                Err(e) => {
                    tracing::error!(tenant_id, error = %e, "Theme save failed");
                    Err(e.to_string())
                }
            };

        let (ticket, payload) = self.editor.finish_save(result);
        self.send(&SurfaceMessage::SaveStatus(payload));

        if ticket.auto_revert {
            let revert_tx = revert_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(SAVE_STATUS_RESET).await;
                let _ = revert_tx.send(ticket);
            });
        }
    }

    fn expire(&mut self, ticket: SaveTicket) {
        if let Some(payload) = self.editor.expire_status(ticket) {
            self.send(&SurfaceMessage::SaveStatus(payload));
        }
    }
}
