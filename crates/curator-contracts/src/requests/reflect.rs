use serde::ser::Serializer;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::{Category, TargetId, TargetResolver};
use crate::error::CuratorError;
use crate::selection::ReflectSelection;

/// What the backend uses to locate the canonical asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectIdentifier {
    /// Portrait id; sent as a JSON number when numeric.
    Id(TargetId),
    /// Background filename as stored in the catalog.
    File(String),
}

impl Serialize for ReflectIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Id(id) => id.serialize(serializer),
            Self::File(file) => serializer.serialize_str(file),
        }
    }
}

/// Body of `POST /api/select-image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReflectCommand {
    pub file: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub id: ReflectIdentifier,
}

pub fn build_reflect_command(
    resolver: &TargetResolver<'_>,
    selection: &ReflectSelection,
) -> Result<ReflectCommand, CuratorError> {
    let file = selection.selected_file.trim();
    if file.is_empty() {
        return Err(CuratorError::PreconditionFailed(
            "no candidate selected".to_string(),
        ));
    }
    let category = selection.category;
    let Some(target_id) = selection.target_id.as_ref() else {
        return Err(CuratorError::no_target_selected());
    };
    let entity = resolver
        .resolve(category, target_id)
        .ok_or_else(|| CuratorError::not_found(category, target_id.as_str()))?;

    let id = if category.commits_by_file() {
        let stored = entity
            .file()
            .ok_or_else(|| CuratorError::not_found(category, target_id.as_str()))?;
        ReflectIdentifier::File(stored.to_string())
    } else {
        ReflectIdentifier::Id(entity.id().clone())
    };
    Ok(ReflectCommand {
        file: file.to_string(),
        category,
        id,
    })
}

/// Success body of the reflect endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflectOutcome {
    pub dest: Option<String>,
}

impl ReflectOutcome {
    pub fn from_value(payload: &Value) -> Self {
        Self {
            dest: payload
                .get("dest")
                .and_then(Value::as_str)
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::{build_reflect_command, ReflectIdentifier, ReflectOutcome};
    use crate::catalog::{Backdrop, CatalogSnapshot, Category, Portrait, TargetId, TargetResolver};
    use crate::error::CuratorError;
    use crate::selection::ReflectSelection;

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot {
            daimyo: Vec::new(),
            generals: vec![Portrait {
                id: TargetId::from(4),
                name: "勝家".to_string(),
                clan: None,
            }],
            backgrounds: vec![Backdrop {
                id: TargetId::from(2),
                name: "城".to_string(),
                file: "castle.png".to_string(),
            }],
        }
    }

    fn selection(category: Category, target: Option<u64>) -> ReflectSelection {
        ReflectSelection {
            selected_file: "gen_1.png".to_string(),
            category,
            target_id: target.map(TargetId::from),
            prompt: String::new(),
        }
    }

    #[test]
    fn background_commits_by_stored_filename() -> anyhow::Result<()> {
        let catalog = catalog();
        let resolver = TargetResolver::new(&catalog);
        let command = build_reflect_command(&resolver, &selection(Category::Background, Some(2)))?;
        assert_eq!(command.id, ReflectIdentifier::File("castle.png".to_string()));
        assert_eq!(
            serde_json::to_value(&command)?,
            json!({"file": "gen_1.png", "type": "background", "id": "castle.png"})
        );
        Ok(())
    }

    #[test]
    fn portrait_commits_by_numeric_id() -> anyhow::Result<()> {
        let catalog = catalog();
        let resolver = TargetResolver::new(&catalog);
        let command = build_reflect_command(&resolver, &selection(Category::General, Some(4)))?;
        assert_eq!(command.id, ReflectIdentifier::Id(TargetId::from(4)));
        assert_eq!(
            serde_json::to_value(&command)?,
            json!({"file": "gen_1.png", "type": "general", "id": 4})
        );
        Ok(())
    }

    #[test]
    fn unresolved_target_is_not_found() {
        let catalog = catalog();
        let resolver = TargetResolver::new(&catalog);
        assert_matches!(
            build_reflect_command(&resolver, &selection(Category::General, Some(2))),
            Err(CuratorError::NotFound { category: Category::General, .. })
        );
        assert_matches!(
            build_reflect_command(&resolver, &selection(Category::General, None)),
            Err(CuratorError::PreconditionFailed(_))
        );
        let mut blank = selection(Category::General, Some(4));
        blank.selected_file = "  ".to_string();
        assert_matches!(
            build_reflect_command(&resolver, &blank),
            Err(CuratorError::PreconditionFailed(_))
        );
    }

    #[test]
    fn outcome_reads_destination() {
        let outcome = ReflectOutcome::from_value(&json!({
            "status": "success",
            "dest": "/game/assets/backgrounds/castle.png"
        }));
        assert_eq!(outcome.dest.as_deref(), Some("/game/assets/backgrounds/castle.png"));
    }
}
