//! WebSocket infrastructure for the theme editor and preview surfaces.
//!
//! Provides connection management, heartbeat monitoring, the HTTP upgrade
//! handlers, and the per-connection editor and preview sessions.

mod editor;
mod handler;
mod heartbeat;
pub mod manager;
mod preview;

pub use handler::{theme_editor_ws, theme_preview_ws};
pub use heartbeat::start_heartbeat;
pub use manager::{Surface, WsManager};

use axum::extract::ws::Message;
use storefront_core::theme::message::SurfaceMessage;

use manager::WsSender;

/// Queue a surface message as a text frame. A closed channel means the
/// connection is going away; the message is dropped.
fn send(tx: &WsSender, message: &SurfaceMessage) {
    let _ = tx.send(Message::Text(message.to_json().into()));
}
