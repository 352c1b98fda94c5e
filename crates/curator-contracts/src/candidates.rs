use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{Category, TargetId};
use crate::error::CuratorError;

pub const NO_PROMPT_LABEL: &str = "(No prompt)";

/// Generation metadata recorded next to a candidate. Untrusted: any field may
/// be missing or point at a target that no longer exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub prompt: Option<String>,
    pub category: Option<String>,
    pub target_name: Option<String>,
    /// Recorded id text, untrimmed. Only null, missing or `""` are absent;
    /// whitespace is a present id that matches nothing.
    pub target_id: Option<String>,
}

impl Provenance {
    fn from_object(row: &Map<String, Value>) -> Option<Self> {
        let provenance = Self {
            prompt: non_empty_string(row.get("prompt")),
            category: non_empty_string(row.get("category")),
            target_name: non_empty_string(row.get("target_name")),
            target_id: recorded_target_id(row.get("target_id")),
        };
        (!provenance.is_empty()).then_some(provenance)
    }

    pub fn is_empty(&self) -> bool {
        self.prompt.is_none()
            && self.category.is_none()
            && self.target_name.is_none()
            && self.target_id.is_none()
    }

    /// The recorded category when it names a real one.
    pub fn category_hint(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::from_hint)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub filename: String,
    pub provenance: Option<Provenance>,
}

impl Candidate {
    pub fn bare(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            provenance: None,
        }
    }

    /// Accepts a bare filename string or a `{filename, ...metadata}` object.
    pub fn from_value(row: &Value) -> Option<Self> {
        match row {
            Value::String(filename) => {
                let filename = filename.trim();
                (!filename.is_empty()).then(|| Self::bare(filename))
            }
            Value::Object(obj) => {
                let filename = non_empty_string(obj.get("filename"))?;
                Some(Self {
                    filename,
                    provenance: Provenance::from_object(obj),
                })
            }
            _ => None,
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        self.provenance.as_ref().and_then(|meta| meta.prompt.as_deref())
    }

    pub fn prompt_label(&self) -> &str {
        self.prompt().unwrap_or(NO_PROMPT_LABEL)
    }

    /// `[category] target name`, or empty when no target name was recorded.
    pub fn info_label(&self) -> String {
        let Some(meta) = self.provenance.as_ref() else {
            return String::new();
        };
        let Some(target_name) = meta.target_name.as_deref() else {
            return String::new();
        };
        format!("[{}] {}", meta.category.as_deref().unwrap_or(""), target_name)
    }

    /// Display URL under the static asset prefix. Never parsed back.
    pub fn asset_url(&self, prefix: &str) -> String {
        format!("{}/{}", prefix.trim_end_matches('/'), self.filename)
    }
}

/// Candidates in the order the backend listed them (newest first).
#[derive(Debug, Clone, Default)]
pub struct CandidateRegistry {
    entries: IndexMap<String, Candidate>,
}

impl CandidateRegistry {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let mut entries = IndexMap::new();
        for candidate in candidates {
            if entries.contains_key(&candidate.filename) {
                tracing::warn!(file = %candidate.filename, "duplicate candidate ignored");
                continue;
            }
            entries.insert(candidate.filename.clone(), candidate);
        }
        Self { entries }
    }

    pub fn from_value(payload: &Value) -> Result<Self, CuratorError> {
        let Some(rows) = payload.as_array() else {
            return Err(CuratorError::InvalidPayload(
                "candidate list must be a JSON array".to_string(),
            ));
        };
        let mut candidates = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            match Candidate::from_value(row) {
                Some(candidate) => candidates.push(candidate),
                None => tracing::warn!(index, "skipping candidate row without a filename"),
            }
        }
        Ok(Self::new(candidates))
    }

    pub fn get(&self, filename: &str) -> Option<&Candidate> {
        self.entries.get(filename.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn recorded_target_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => TargetId::from_value(other).map(|id| id.as_str().to_string()),
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
