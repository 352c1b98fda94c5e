use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Category, TargetId};
use crate::error::CuratorError;

/// Daimyo or general record. Other fields of the stored record are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portrait {
    pub id: TargetId,
    pub name: String,
    #[serde(default)]
    pub clan: Option<String>,
}

/// Background record; `file` is the stored filename under `assets/backgrounds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backdrop {
    pub id: TargetId,
    pub name: String,
    pub file: String,
}

/// A catalog record viewed through the category it was resolved in.
///
/// The variant fixes which optional fields exist: portraits carry an optional
/// clan, backgrounds always carry a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntity<'a> {
    Daimyo(&'a Portrait),
    General(&'a Portrait),
    Background(&'a Backdrop),
}

impl<'a> CatalogEntity<'a> {
    pub fn category(&self) -> Category {
        match self {
            Self::Daimyo(_) => Category::Daimyo,
            Self::General(_) => Category::General,
            Self::Background(_) => Category::Background,
        }
    }

    pub fn id(&self) -> &'a TargetId {
        match *self {
            Self::Daimyo(row) | Self::General(row) => &row.id,
            Self::Background(row) => &row.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match *self {
            Self::Daimyo(row) | Self::General(row) => &row.name,
            Self::Background(row) => &row.name,
        }
    }

    pub fn file(&self) -> Option<&'a str> {
        match *self {
            Self::Background(row) => Some(&row.file),
            Self::Daimyo(_) | Self::General(_) => None,
        }
    }

    /// `"{clan} {name}"` for portraits, the bare name for backgrounds.
    pub fn display_name(&self) -> String {
        match self {
            Self::Background(row) => row.name.clone(),
            Self::Daimyo(row) | Self::General(row) => {
                format!("{} {}", row.clan.as_deref().unwrap_or(""), row.name)
                    .trim()
                    .to_string()
            }
        }
    }

    /// Path of the canonical asset a reflected candidate overwrites.
    ///
    /// Portrait ids are left-padded with zeros to two characters; longer ids
    /// are kept whole.
    pub fn canonical_path(&self) -> String {
        match self {
            Self::Daimyo(row) => {
                format!("assets/portraits/daimyo/daimyo_{:0>2}.png", row.id.as_str())
            }
            Self::General(row) => {
                format!("assets/portraits/generals/general_{:0>2}.png", row.id.as_str())
            }
            Self::Background(row) => format!("assets/backgrounds/{}", row.file),
        }
    }
}

/// Owned, re-fetchable copy of the catalog. Replaced wholesale on reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub daimyo: Vec<Portrait>,
    pub generals: Vec<Portrait>,
    pub backgrounds: Vec<Backdrop>,
}

impl CatalogSnapshot {
    /// Parses the `{daimyo, generals, backgrounds}` payload.
    ///
    /// Missing collections are empty. Rows that fail to parse are skipped
    /// with a warning so one bad record does not hide the rest.
    pub fn from_value(payload: &Value) -> Result<Self, CuratorError> {
        let Some(root) = payload.as_object() else {
            return Err(CuratorError::InvalidPayload(
                "catalog payload must be a JSON object".to_string(),
            ));
        };
        Ok(Self {
            daimyo: parse_rows(root.get(Category::Daimyo.collection_key()), Category::Daimyo),
            generals: parse_rows(root.get(Category::General.collection_key()), Category::General),
            backgrounds: parse_rows(
                root.get(Category::Background.collection_key()),
                Category::Background,
            ),
        })
    }

    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Daimyo => self.daimyo.len(),
            Category::General => self.generals.len(),
            Category::Background => self.backgrounds.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.into_iter().all(|category| self.len(category) == 0)
    }

    /// Entities of one collection, in catalog order.
    pub fn entities(&self, category: Category) -> Vec<CatalogEntity<'_>> {
        match category {
            Category::Daimyo => self.daimyo.iter().map(CatalogEntity::Daimyo).collect(),
            Category::General => self.generals.iter().map(CatalogEntity::General).collect(),
            Category::Background => self
                .backgrounds
                .iter()
                .map(CatalogEntity::Background)
                .collect(),
        }
    }
}

fn parse_rows<T: DeserializeOwned>(rows: Option<&Value>, category: Category) -> Vec<T> {
    let Some(rows) = rows else {
        return Vec::new();
    };
    let Some(rows) = rows.as_array() else {
        tracing::warn!(%category, "catalog collection is not an array; treating as empty");
        return Vec::new();
    };
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<T>(row.clone()) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(%category, index, error = %err, "skipping malformed catalog row");
                None
            }
        })
        .collect()
}
