use serde::Serialize;

use super::{CatalogEntity, CatalogSnapshot, Category, TargetId};

/// Placeholder shown wherever a selection does not resolve.
pub const NO_SELECTION: &str = "-";

/// One entry of a category's target dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetOption {
    pub id: TargetId,
    pub label: String,
    pub dest_path: String,
}

/// Info panel for the main selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetInfo {
    pub category: Category,
    pub id_label: String,
    pub size_label: String,
    pub display_name: String,
    pub prompt: String,
    pub dest_path: String,
}

impl TargetInfo {
    pub fn is_resolved(&self) -> bool {
        self.id_label != NO_SELECTION
    }
}

/// Category-scoped lookups over a catalog snapshot.
///
/// Lookups never cross categories: the same id may name different records in
/// different collections.
#[derive(Debug, Clone, Copy)]
pub struct TargetResolver<'a> {
    catalog: &'a CatalogSnapshot,
}

impl<'a> TargetResolver<'a> {
    pub fn new(catalog: &'a CatalogSnapshot) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, category: Category, id: &TargetId) -> Option<CatalogEntity<'a>> {
        self.catalog
            .entities(category)
            .into_iter()
            .find(|entity| entity.id() == id)
    }

    /// Resolves raw selector text, normalizing it first.
    pub fn resolve_raw(&self, category: Category, raw: &str) -> Option<CatalogEntity<'a>> {
        let id = TargetId::new(raw)?;
        self.resolve(category, &id)
    }

    pub fn targets(&self, category: Category) -> Vec<TargetOption> {
        self.catalog
            .entities(category)
            .into_iter()
            .map(|entity| TargetOption {
                id: entity.id().clone(),
                label: entity.display_name(),
                dest_path: entity.canonical_path(),
            })
            .collect()
    }

    pub fn first_target(&self, category: Category) -> Option<TargetId> {
        self.catalog
            .entities(category)
            .first()
            .map(|entity| entity.id().clone())
    }

    /// Empty when the id is absent or does not resolve.
    pub fn display_name(&self, category: Category, id: Option<&TargetId>) -> String {
        id.and_then(|id| self.resolve(category, id))
            .map(|entity| entity.display_name())
            .unwrap_or_default()
    }

    /// Empty when the id is absent or does not resolve.
    pub fn canonical_path(&self, category: Category, id: Option<&TargetId>) -> String {
        id.and_then(|id| self.resolve(category, id))
            .map(|entity| entity.canonical_path())
            .unwrap_or_default()
    }

    pub fn target_info(&self, category: Category, id: Option<&TargetId>) -> TargetInfo {
        match id.and_then(|id| self.resolve(category, id)) {
            Some(entity) => {
                let display_name = entity.display_name();
                TargetInfo {
                    category,
                    id_label: entity.id().to_string(),
                    size_label: category.image_size().label(),
                    prompt: default_prompt(category, &display_name),
                    dest_path: entity.canonical_path(),
                    display_name,
                }
            }
            None => TargetInfo {
                category,
                id_label: NO_SELECTION.to_string(),
                size_label: NO_SELECTION.to_string(),
                display_name: String::new(),
                prompt: String::new(),
                dest_path: String::new(),
            },
        }
    }
}

/// Editable starting prompt for a target.
pub fn default_prompt(category: Category, display_name: &str) -> String {
    match category {
        Category::Background => format!("戦国時代の背景。{display_name}の風景。"),
        Category::Daimyo | Category::General => {
            let rank = if category == Category::Daimyo {
                "大名"
            } else {
                "武将"
            };
            format!(
                "戦国時代の{rank}である{display_name}の娘の美しい女子の将軍のポートレート。高精細な漫画調"
            )
        }
    }
}
