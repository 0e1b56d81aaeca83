//! Unit tests for `WsManager`.
//!
//! These tests exercise the WebSocket connection manager directly, without
//! performing any HTTP upgrades. They verify add/remove semantics, per-tenant
//! counts, heartbeat pings and graceful shutdown behaviour.

use assert_matches::assert_matches;
use axum::extract::ws::Message;
use storefront_api::ws::{Surface, WsManager};

// ---------------------------------------------------------------------------
// Test: new manager starts with zero connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: add() and remove() track the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();

    let _conn = manager.add("conn-1".to_string(), 1, Surface::Editor).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: remove() with unknown ID is a no-op
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_unknown_id_is_noop() {
    let manager = WsManager::new();

    let _conn = manager.add("conn-1".to_string(), 1, Surface::Preview).await;
    manager.remove("nonexistent").await;

    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: counts are per tenant and per surface
// ---------------------------------------------------------------------------

#[tokio::test]
async fn count_for_tenant_filters_by_surface() {
    let manager = WsManager::new();

    let _a = manager.add("a".to_string(), 1, Surface::Editor).await;
    let _b = manager.add("b".to_string(), 1, Surface::Preview).await;
    let _c = manager.add("c".to_string(), 1, Surface::Preview).await;
    let _d = manager.add("d".to_string(), 2, Surface::Preview).await;

    assert_eq!(manager.count_for_tenant(1, Surface::Editor).await, 1);
    assert_eq!(manager.count_for_tenant(1, Surface::Preview).await, 2);
    assert_eq!(manager.count_for_tenant(2, Surface::Editor).await, 0);
}

// ---------------------------------------------------------------------------
// Test: the returned sender feeds the returned receiver
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_sender_reaches_its_receiver() {
    let manager = WsManager::new();

    let (tx, mut rx) = manager.add("conn-1".to_string(), 1, Surface::Editor).await;
    tx.send(Message::Text("hello".into())).unwrap();

    match rx.recv().await.unwrap() {
        Message::Text(text) => assert_eq!(text.as_str(), "hello"),
        other => panic!("Expected Text message, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: ping_all sends a Ping to every connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ping_all_reaches_every_connection() {
    let manager = WsManager::new();

    let (_tx1, mut rx1) = manager.add("conn-1".to_string(), 1, Surface::Editor).await;
    let (_tx2, mut rx2) = manager.add("conn-2".to_string(), 2, Surface::Preview).await;

    manager.ping_all().await;

    for rx in [&mut rx1, &mut rx2] {
        assert_matches!(rx.recv().await, Some(Message::Ping(_)));
    }
}

// ---------------------------------------------------------------------------
// Test: shutdown_all sends Close and clears every connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_closes_and_clears() {
    let manager = WsManager::new();

    let (_tx1, mut rx1) = manager.add("conn-1".to_string(), 1, Surface::Editor).await;
    let (_tx2, mut rx2) = manager.add("conn-2".to_string(), 1, Surface::Preview).await;

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert_matches!(rx1.recv().await, Some(Message::Close(None)));
    assert_matches!(rx2.recv().await, Some(Message::Close(None)));
}
