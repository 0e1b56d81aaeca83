//! Request handlers.
//!
//! Each submodule provides the async handler functions for one area.
//! Handlers validate through `storefront_core`, delegate to the repositories
//! in `storefront_db`, publish domain events through [`AppState::publish`],
//! and map errors via [`AppError`].
//!
//! [`AppState::publish`]: crate::state::AppState::publish
//! [`AppError`]: crate::error::AppError

pub mod catalog;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod sellers;
pub mod theme;
