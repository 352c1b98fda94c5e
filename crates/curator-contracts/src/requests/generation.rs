use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{Category, ImageSize, TargetId, TargetResolver};
use crate::error::CuratorError;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub category: Category,
    pub target_id: TargetId,
    pub target_name: String,
    pub prompt: String,
    pub size: ImageSize,
}

/// Builds a request for the main selector's target.
///
/// Fails before any network call when the target does not resolve.
pub fn build_generation_request(
    resolver: &TargetResolver<'_>,
    category: Category,
    target_id: Option<&TargetId>,
    prompt: &str,
) -> Result<GenerationRequest, CuratorError> {
    let entity = target_id
        .and_then(|id| resolver.resolve(category, id))
        .ok_or_else(CuratorError::no_target_selected)?;
    Ok(GenerationRequest {
        category,
        target_id: entity.id().clone(),
        target_name: entity.display_name(),
        prompt: prompt.to_string(),
        size: category.image_size(),
    })
}

/// Success body of the generate endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub message: Option<String>,
    pub file: Option<String>,
}

impl GenerationOutcome {
    pub fn from_value(payload: &Value) -> Self {
        let text = |key: &str| {
            payload
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            message: text("message"),
            file: text("file"),
        }
    }
}
