//! Shared State

use hana_config::SupportContent;
use hana_services::Backend;

/// State shared by every handler. Cheap to clone: the backend is a bundle
/// of `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub support: SupportContent,
}
