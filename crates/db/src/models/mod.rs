//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where
//!   the entity is editable

pub mod catalog_event;
pub mod dashboard;
pub mod event;
pub mod order;
pub mod product;
pub mod tenant;
pub mod theme;
pub mod user;
