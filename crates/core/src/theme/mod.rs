//! Theme configuration: the per-tenant document, the derived CSS, and the
//! state machines of the editor and preview surfaces that keep it in sync.

pub mod css;
pub mod document;
pub mod editor;
pub mod message;
pub mod preview;
pub mod save_status;

pub use document::{FieldIssue, MergedTheme, ThemeConfig};
pub use editor::{SaveReceipt, ThemeEditor};
pub use preview::PreviewSurface;
pub use save_status::{SaveStatus, SAVE_STATUS_RESET};
