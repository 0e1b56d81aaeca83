//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every tenant-owned query takes the
//! tenant id explicitly and filters on it.

pub mod catalog_event_repo;
pub mod dashboard_repo;
pub mod event_repo;
pub mod order_repo;
pub mod product_repo;
pub mod store_theme_repo;
pub mod tenant_repo;
pub mod user_repo;

pub use catalog_event_repo::CatalogEventRepo;
pub use dashboard_repo::DashboardRepo;
pub use event_repo::EventRepo;
pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;
pub use store_theme_repo::StoreThemeRepo;
pub use tenant_repo::TenantRepo;
pub use user_repo::UserRepo;
