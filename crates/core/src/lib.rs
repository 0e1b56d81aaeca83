//! Storefront domain logic.
//!
//! Pure types and functions shared by the database, event, and API crates:
//! order validation and money math, the stock policy, seller validation, and
//! the theme configuration document with its editor/preview state machines.
//! Nothing in this crate performs I/O.

pub mod error;
pub mod event_types;
pub mod order;
pub mod pagination;
pub mod product;
pub mod stock;
pub mod theme;
pub mod tracking;
pub mod types;
pub mod user;
