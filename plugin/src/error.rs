use route_tabs::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TabsError>;

#[derive(Debug, Error)]
pub enum TabsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
