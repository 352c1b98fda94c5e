use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::catalog::{Category, ImageSize, TargetId};
use crate::requests::ReflectIdentifier;
use crate::selection::{CategorySource, TargetSource};

/// One curation step as it lands in the journal. The variant name becomes
/// the line's `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalEvent {
    CatalogLoaded {
        daimyo: usize,
        generals: usize,
        backgrounds: usize,
    },
    CandidatesLoaded {
        count: usize,
    },
    GenerationSubmitted {
        category: Category,
        target_id: TargetId,
        target_name: String,
        size: ImageSize,
        file: Option<String>,
    },
    GenerationFailed {
        category: Category,
        target_id: TargetId,
        target_name: String,
        size: ImageSize,
        error: String,
    },
    ReflectOpened {
        file: String,
        category: Category,
        target_id: Option<TargetId>,
        category_source: CategorySource,
        target_source: TargetSource,
        dest: String,
    },
    ReconcileMiss {
        file: String,
        category: Category,
        requested: String,
        available: Vec<String>,
    },
    ReflectCommitted {
        file: String,
        category: Category,
        id: ReflectIdentifier,
        dest: String,
    },
    ReflectFailed {
        file: String,
        category: Category,
        error: String,
    },
    ReflectCancelled {
        file: String,
    },
}

impl JournalEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CatalogLoaded { .. } => "catalog_loaded",
            Self::CandidatesLoaded { .. } => "candidates_loaded",
            Self::GenerationSubmitted { .. } => "generation_submitted",
            Self::GenerationFailed { .. } => "generation_failed",
            Self::ReflectOpened { .. } => "reflect_opened",
            Self::ReconcileMiss { .. } => "reconcile_miss",
            Self::ReflectCommitted { .. } => "reflect_committed",
            Self::ReflectFailed { .. } => "reflect_failed",
            Self::ReflectCancelled { .. } => "reflect_cancelled",
        }
    }
}

#[derive(Serialize)]
struct JournalLine<'a> {
    session_id: &'a str,
    ts: String,
    #[serde(flatten)]
    event: &'a JournalEvent,
}

/// Append-only curation journal for one operator session.
///
/// Each line is a compact JSON object: the event's fields plus `type`,
/// `session_id` and an RFC 3339 `ts`.
#[derive(Debug, Clone)]
pub struct SessionJournal {
    path: PathBuf,
    session_id: Arc<str>,
    lock: Arc<Mutex<()>>,
}

impl SessionJournal {
    pub fn new(path: impl Into<PathBuf>, session_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            session_id: Arc::from(session_id.into()),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn record(&self, event: &JournalEvent) -> anyhow::Result<()> {
        let line = serde_json::to_string(&JournalLine {
            session_id: &self.session_id,
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            event,
        })?;

        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("journal lock poisoned"))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
