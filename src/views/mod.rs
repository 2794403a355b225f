//! Page-level views and dialogs

pub mod connect_modal;
pub mod dashboard;
pub mod detail_modal;
pub mod export_modal;

pub use connect_modal::ConnectProjectModal;
pub use dashboard::{Dashboard, LoadingSkeleton};
pub use detail_modal::{RecommendationDetail, StoryDetail};
pub use export_modal::ExportModal;
