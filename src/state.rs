use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::BlogConfig;

pub type RefreshBroadcaster = broadcast::Sender<()>;

/// Immutable per-process state. Post content is read from disk on every
/// request, so nothing here changes after startup.
pub struct AppState {
    pub config: BlogConfig,
    pub is_development: bool,
}

#[derive(Clone)]
pub struct RouterState {
    pub app_state: Arc<AppState>,
    pub broadcaster: RefreshBroadcaster,
}

impl axum::extract::FromRef<RouterState> for Arc<AppState> {
    fn from_ref(state: &RouterState) -> Self {
        state.app_state.clone()
    }
}

impl axum::extract::FromRef<RouterState> for RefreshBroadcaster {
    fn from_ref(state: &RouterState) -> Self {
        state.broadcaster.clone()
    }
}
