use crate::catalog::Category;

/// Domain failures surfaced to the operator. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CuratorError {
    #[error("no {category} target with id '{id}'")]
    NotFound { category: Category, id: String },

    #[error("{0}")]
    PreconditionFailed(String),

    #[error("a generation request is already in progress")]
    Busy,

    #[error(
        "{endpoint} failed{}: {message}",
        .status.map(|code| format!(" ({code})")).unwrap_or_default()
    )]
    Backend {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl CuratorError {
    pub fn no_target_selected() -> Self {
        Self::PreconditionFailed("no target selected".to_string())
    }

    pub fn not_found(category: Category, id: impl Into<String>) -> Self {
        Self::NotFound {
            category,
            id: id.into(),
        }
    }

    pub fn is_resolution_miss(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
