//! Request extractors.
//!
//! - [`tenant::TenantId`] -- the store a request acts on, from the
//!   `x-tenant-id` header.

pub mod tenant;
