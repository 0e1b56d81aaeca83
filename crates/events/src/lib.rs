//! Storefront event infrastructure.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the domain event envelope.
//! - [`EventPersistence`]: background service that durably writes every
//!   event to the `platform_events` table.
//! - [`ThemeChannel`]: per-tenant, origin-checked broadcast of theme
//!   documents from editor sessions to preview sessions.

pub mod bus;
pub mod persistence;
pub mod theme_channel;

pub use bus::{EventBus, PlatformEvent};
pub use persistence::EventPersistence;
pub use theme_channel::{ChannelError, ThemeBroadcast, ThemeChannel};
