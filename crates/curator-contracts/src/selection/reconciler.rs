use serde::Serialize;

use crate::candidates::Candidate;
use crate::catalog::{Category, TargetId, TargetOption, TargetResolver};
use crate::error::CuratorError;

/// State of the main (category, target) selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainSelection {
    pub category: Category,
    pub target_id: Option<TargetId>,
}

impl MainSelection {
    pub fn new(category: Category, target_id: Option<TargetId>) -> Self {
        Self {
            category,
            target_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    Provenance,
    MainSelector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSource {
    Provenance,
    MainSelector,
    /// The requested id was not listed; the first target was chosen instead.
    FirstAvailable,
    /// The category has no targets at all.
    Empty,
}

/// A requested id that did not match any listed target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileMiss {
    pub requested: String,
    pub available: Vec<String>,
}

/// Modal state for one candidate, alive between opening and confirm/cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReflectSelection {
    pub selected_file: String,
    pub category: Category,
    pub target_id: Option<TargetId>,
    pub prompt: String,
}

impl ReflectSelection {
    /// Destination preview. Empty when nothing resolves.
    pub fn dest_path(&self, resolver: &TargetResolver<'_>) -> String {
        resolver.canonical_path(self.category, self.target_id.as_ref())
    }

    /// Switches the modal category; the rebuilt list starts at its first target.
    pub fn set_category(&mut self, resolver: &TargetResolver<'_>, category: Category) {
        self.category = category;
        self.target_id = resolver.first_target(category);
    }

    /// Picks a target from the current list. Unlisted ids leave the
    /// selection unchanged.
    pub fn set_target(
        &mut self,
        resolver: &TargetResolver<'_>,
        raw: &str,
    ) -> Result<(), CuratorError> {
        let entity = resolver
            .resolve_raw(self.category, raw)
            .ok_or_else(|| CuratorError::not_found(self.category, raw.trim()))?;
        self.target_id = Some(entity.id().clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub selection: ReflectSelection,
    pub options: Vec<TargetOption>,
    pub dest_path: String,
    pub category_source: CategorySource,
    pub target_source: TargetSource,
    pub miss: Option<ReconcileMiss>,
}

/// Decides the reflect modal's initial category and target for `candidate`.
///
/// Provenance category wins when it names a real category; otherwise the
/// main selector's category is used. Provenance target id wins when present.
/// The main selector's target id is only borrowed when the chosen category is
/// the main selector's own, since ids are not comparable across categories.
/// An id that is not listed falls back to the first target and is reported
/// as a miss.
pub fn reconcile(
    resolver: &TargetResolver<'_>,
    candidate: &Candidate,
    main: &MainSelection,
) -> Reconciliation {
    let provenance = candidate.provenance.as_ref();

    let (category, category_source) = match provenance.and_then(|meta| meta.category_hint()) {
        Some(category) => (category, CategorySource::Provenance),
        None => {
            if let Some(raw) = provenance.and_then(|meta| meta.category.as_deref()) {
                if raw != "unknown" {
                    tracing::warn!(
                        file = %candidate.filename,
                        category = raw,
                        "ignoring unrecognized provenance category"
                    );
                }
            }
            (main.category, CategorySource::MainSelector)
        }
    };

    let options = resolver.targets(category);

    // No request at all when provenance has no id and the categories differ.
    let requested = match provenance.and_then(|meta| meta.target_id.as_deref()) {
        Some(raw) => Some((raw.trim().to_string(), TargetSource::Provenance)),
        None if category == main.category => main
            .target_id
            .as_ref()
            .map(|id| (id.as_str().to_string(), TargetSource::MainSelector)),
        None => None,
    };
    let requested_text = requested
        .as_ref()
        .map(|(text, _)| text.clone())
        .unwrap_or_default();

    let matched = requested.as_ref().and_then(|(text, source)| {
        options
            .iter()
            .find(|option| option.id.as_str() == text)
            .map(|option| (option.id.clone(), *source))
    });

    let (target_id, target_source, miss) = match matched {
        Some((id, source)) => (Some(id), source, None),
        None => {
            let available: Vec<String> = options
                .iter()
                .map(|option| option.id.to_string())
                .collect();
            tracing::warn!(
                file = %candidate.filename,
                %category,
                requested = %requested_text,
                available = ?available,
                "target id not found in modal options; selecting first available"
            );
            let fallback = options.first().map(|option| option.id.clone());
            let source = if fallback.is_some() {
                TargetSource::FirstAvailable
            } else {
                TargetSource::Empty
            };
            (
                fallback,
                source,
                Some(ReconcileMiss {
                    requested: requested_text,
                    available,
                }),
            )
        }
    };

    tracing::debug!(
        file = %candidate.filename,
        %category,
        ?category_source,
        target_id = target_id.as_ref().map(TargetId::as_str).unwrap_or(""),
        ?target_source,
        "reconciled reflect selection"
    );

    let selection = ReflectSelection {
        selected_file: candidate.filename.clone(),
        category,
        target_id,
        prompt: candidate.prompt().unwrap_or_default().to_string(),
    };
    let dest_path = selection.dest_path(resolver);

    Reconciliation {
        selection,
        options,
        dest_path,
        category_source,
        target_source,
        miss,
    }
}
