use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use curator_contracts::candidates::{Candidate, CandidateRegistry};
use curator_contracts::catalog::{CatalogSnapshot, Category, TargetInfo, TargetResolver};
use curator_contracts::events::{JournalEvent, SessionJournal};
use curator_contracts::requests::{
    build_generation_request, build_reflect_command, GenerationOutcome, ReflectOutcome,
};
use curator_contracts::selection::{reconcile, MainSelection, Reconciliation, ReflectSelection};
use curator_contracts::CuratorError;
use uuid::Uuid;

use crate::backend::CurationBackend;

/// Advisory "generation in progress" flag.
///
/// Prevents a second submission from the same operator; the backend remains
/// the authority on serializing writes.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    inner: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }

    /// `None` while another guard is alive.
    pub fn try_begin(&self) -> Option<BusyGuard> {
        self.inner
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard {
                inner: Arc::clone(&self.inner),
            })
    }
}

/// Clears the busy flag when dropped, on success, error or unwind alike.
#[derive(Debug)]
pub struct BusyGuard {
    inner: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inner.store(false, Ordering::SeqCst);
    }
}

/// One operator's curation state: the catalog snapshot, the candidate
/// gallery, the main selector with its prompt, and the reflect modal.
pub struct CurationSession<B: CurationBackend> {
    backend: B,
    asset_prefix: String,
    catalog: CatalogSnapshot,
    candidates: CandidateRegistry,
    main: MainSelection,
    prompt: String,
    busy: BusyFlag,
    reflect: Option<ReflectSelection>,
    journal: Option<SessionJournal>,
}

impl<B: CurationBackend> CurationSession<B> {
    pub fn new(backend: B, asset_prefix: impl Into<String>) -> Self {
        Self {
            backend,
            asset_prefix: asset_prefix.into(),
            catalog: CatalogSnapshot::default(),
            candidates: CandidateRegistry::default(),
            main: MainSelection::new(Category::Daimyo, None),
            prompt: String::new(),
            busy: BusyFlag::default(),
            reflect: None,
            journal: None,
        }
    }

    pub fn with_journal(mut self, path: impl Into<PathBuf>) -> Self {
        self.journal = Some(SessionJournal::new(path, Uuid::new_v4().to_string()));
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetches the catalog, seeds the main selector, then fetches candidates.
    pub fn load(&mut self) -> Result<(), CuratorError> {
        self.refresh_catalog()?;
        self.refresh_candidates()
    }

    /// Replaces the snapshot wholesale. A main target that no longer resolves
    /// is reset to the category's first target.
    pub fn refresh_catalog(&mut self) -> Result<(), CuratorError> {
        let catalog = self.backend.fetch_catalog()?;
        tracing::info!(
            daimyo = catalog.daimyo.len(),
            generals = catalog.generals.len(),
            backgrounds = catalog.backgrounds.len(),
            "catalog loaded"
        );
        self.catalog = catalog;

        let still_resolves = self
            .main
            .target_id
            .as_ref()
            .is_some_and(|id| self.resolver().resolve(self.main.category, id).is_some());
        if !still_resolves {
            self.set_main_category(self.main.category);
        }

        self.record(JournalEvent::CatalogLoaded {
            daimyo: self.catalog.daimyo.len(),
            generals: self.catalog.generals.len(),
            backgrounds: self.catalog.backgrounds.len(),
        });
        Ok(())
    }

    pub fn refresh_candidates(&mut self) -> Result<(), CuratorError> {
        self.candidates = self.backend.fetch_candidates()?;
        tracing::info!(count = self.candidates.len(), "candidates loaded");
        self.record(JournalEvent::CandidatesLoaded {
            count: self.candidates.len(),
        });
        Ok(())
    }

    pub fn resolver(&self) -> TargetResolver<'_> {
        TargetResolver::new(&self.catalog)
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn candidates(&self) -> &CandidateRegistry {
        &self.candidates
    }

    pub fn asset_url(&self, candidate: &Candidate) -> String {
        candidate.asset_url(&self.asset_prefix)
    }

    pub fn main_selection(&self) -> &MainSelection {
        &self.main
    }

    /// Rebuilds the main target list: the first target is selected and the
    /// prompt is reseeded from it.
    pub fn set_main_category(&mut self, category: Category) {
        let first = self.resolver().first_target(category);
        self.main = MainSelection::new(category, first);
        self.reseed_prompt();
    }

    pub fn set_main_target(&mut self, raw: &str) -> Result<(), CuratorError> {
        let category = self.main.category;
        let id = self
            .resolver()
            .resolve_raw(category, raw)
            .map(|entity| entity.id().clone())
            .ok_or_else(|| CuratorError::not_found(category, raw.trim()))?;
        self.main.target_id = Some(id);
        self.reseed_prompt();
        Ok(())
    }

    pub fn target_info(&self) -> TargetInfo {
        self.resolver()
            .target_info(self.main.category, self.main.target_id.as_ref())
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Submits the main selector's target with the current prompt.
    ///
    /// Nothing is sent when the target does not resolve or a submission is
    /// already outstanding. On success the candidate list is re-fetched; a
    /// failed re-fetch is logged and does not fail the generation.
    pub fn submit_generation(&mut self) -> Result<GenerationOutcome, CuratorError> {
        let request = build_generation_request(
            &self.resolver(),
            self.main.category,
            self.main.target_id.as_ref(),
            &self.prompt,
        )?;
        let Some(guard) = self.busy.try_begin() else {
            return Err(CuratorError::Busy);
        };

        let result = self.backend.generate(&request);
        drop(guard);

        match result {
            Ok(outcome) => {
                tracing::info!(
                    category = %request.category,
                    target_id = %request.target_id,
                    file = outcome.file.as_deref().unwrap_or(""),
                    "generation completed"
                );
                self.record(JournalEvent::GenerationSubmitted {
                    category: request.category,
                    target_id: request.target_id,
                    target_name: request.target_name,
                    size: request.size,
                    file: outcome.file.clone(),
                });
                if let Err(err) = self.refresh_candidates() {
                    tracing::warn!(error = %err, "candidate refresh after generation failed");
                }
                Ok(outcome)
            }
            Err(err) => {
                self.record(JournalEvent::GenerationFailed {
                    category: request.category,
                    target_id: request.target_id,
                    target_name: request.target_name,
                    size: request.size,
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Opens the reflect modal for a listed candidate, replacing any modal
    /// already open.
    pub fn open_reflect(&mut self, filename: &str) -> Result<Reconciliation, CuratorError> {
        let candidate = self.candidates.get(filename).cloned().ok_or_else(|| {
            CuratorError::PreconditionFailed(format!("unknown candidate '{}'", filename.trim()))
        })?;
        let reconciliation = reconcile(&self.resolver(), &candidate, &self.main);

        if let Some(miss) = reconciliation.miss.as_ref() {
            self.record(JournalEvent::ReconcileMiss {
                file: candidate.filename.clone(),
                category: reconciliation.selection.category,
                requested: miss.requested.clone(),
                available: miss.available.clone(),
            });
        }
        self.record(JournalEvent::ReflectOpened {
            file: candidate.filename.clone(),
            category: reconciliation.selection.category,
            target_id: reconciliation.selection.target_id.clone(),
            category_source: reconciliation.category_source,
            target_source: reconciliation.target_source,
            dest: reconciliation.dest_path.clone(),
        });
        self.reflect = Some(reconciliation.selection.clone());
        Ok(reconciliation)
    }

    pub fn reflect_selection(&self) -> Option<&ReflectSelection> {
        self.reflect.as_ref()
    }

    /// Destination the open modal would overwrite; empty when it resolves to
    /// nothing.
    pub fn reflect_preview(&self) -> Option<String> {
        self.reflect
            .as_ref()
            .map(|selection| selection.dest_path(&self.resolver()))
    }

    pub fn set_modal_category(
        &mut self,
        category: Category,
    ) -> Result<&ReflectSelection, CuratorError> {
        let resolver = TargetResolver::new(&self.catalog);
        let selection = self.reflect.as_mut().ok_or_else(no_modal_open)?;
        selection.set_category(&resolver, category);
        Ok(selection)
    }

    pub fn set_modal_target(&mut self, raw: &str) -> Result<&ReflectSelection, CuratorError> {
        let resolver = TargetResolver::new(&self.catalog);
        let selection = self.reflect.as_mut().ok_or_else(no_modal_open)?;
        selection.set_target(&resolver, raw)?;
        Ok(selection)
    }

    /// Promotes the selected candidate. The modal closes only after the
    /// backend reports success; on any failure it stays open and unchanged.
    pub fn confirm_reflect(&mut self) -> Result<ReflectOutcome, CuratorError> {
        let selection = self.reflect.clone().ok_or_else(no_modal_open)?;
        let command = build_reflect_command(&self.resolver(), &selection)?;
        let dest_preview = selection.dest_path(&self.resolver());

        match self.backend.reflect(&command) {
            Ok(outcome) => {
                tracing::info!(
                    file = %command.file,
                    category = %command.category,
                    dest = outcome.dest.as_deref().unwrap_or(dest_preview.as_str()),
                    "candidate reflected"
                );
                self.record(JournalEvent::ReflectCommitted {
                    file: command.file,
                    category: command.category,
                    id: command.id,
                    dest: outcome.dest.clone().unwrap_or(dest_preview),
                });
                self.reflect = None;
                Ok(outcome)
            }
            Err(err) => {
                self.record(JournalEvent::ReflectFailed {
                    file: command.file,
                    category: command.category,
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Discards the open modal. Returns whether one was open.
    pub fn cancel_reflect(&mut self) -> bool {
        let Some(selection) = self.reflect.take() else {
            return false;
        };
        self.record(JournalEvent::ReflectCancelled {
            file: selection.selected_file,
        });
        true
    }

    fn reseed_prompt(&mut self) {
        self.prompt = self.target_info().prompt;
    }

    fn record(&self, event: JournalEvent) {
        let Some(journal) = self.journal.as_ref() else {
            return;
        };
        if let Err(err) = journal.record(&event) {
            tracing::warn!(event = event.kind(), error = %err, "failed writing session journal");
        }
    }
}

fn no_modal_open() -> CuratorError {
    CuratorError::PreconditionFailed("no reflect selection is open".to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use curator_contracts::candidates::CandidateRegistry;
    use curator_contracts::catalog::{CatalogSnapshot, Category, TargetId};
    use curator_contracts::requests::{
        GenerationOutcome, GenerationRequest, ReflectCommand, ReflectIdentifier, ReflectOutcome,
    };
    use curator_contracts::selection::TargetSource;
    use curator_contracts::CuratorError;
    use serde_json::{json, Value};

    use super::{BusyFlag, CurationSession};
    use crate::backend::CurationBackend;

    struct MemoryBackend {
        catalog: Mutex<Value>,
        candidates: Mutex<Value>,
        generate_error: Option<CuratorError>,
        reflect_error: Option<CuratorError>,
        generated: Mutex<Vec<GenerationRequest>>,
        reflected: Mutex<Vec<ReflectCommand>>,
        busy_seen: Mutex<Option<BusyFlag>>,
    }

    impl MemoryBackend {
        fn new() -> Self {
            Self {
                catalog: Mutex::new(json!({
                    "daimyo": [
                        {"id": 1, "name": "信長", "clan": "織田"},
                        {"id": 9, "name": "信玄", "clan": "武田"}
                    ],
                    "generals": [
                        {"id": 2, "name": "勝家", "clan": "柴田"},
                        {"id": 5, "name": "秀吉"}
                    ],
                    "backgrounds": [
                        {"id": "main", "name": "メイン画面", "file": "main_background.png"},
                        {
                            "id": "battle_vs",
                            "name": "戦闘開始",
                            "file": "battle_vs_background.png"
                        }
                    ]
                })),
                candidates: Mutex::new(json!([
                    {
                        "filename": "gen_3_general_5_ai.png",
                        "prompt": "p",
                        "target_name": "秀吉",
                        "category": "general",
                        "target_id": "5"
                    },
                    {
                        "filename": "gen_2_general_x.png",
                        "prompt": "",
                        "target_name": "",
                        "category": "general",
                        "target_id": ""
                    },
                    {"filename": "gen_1_unknown.png", "category": "unknown"},
                    "legacy.png"
                ])),
                generate_error: None,
                reflect_error: None,
                generated: Mutex::new(Vec::new()),
                reflected: Mutex::new(Vec::new()),
                busy_seen: Mutex::new(None),
            }
        }
    }

    impl CurationBackend for MemoryBackend {
        fn fetch_catalog(&self) -> Result<CatalogSnapshot, CuratorError> {
            let payload = self
                .catalog
                .lock()
                .map(|rows| rows.clone())
                .unwrap_or(Value::Null);
            CatalogSnapshot::from_value(&payload)
        }

        fn fetch_candidates(&self) -> Result<CandidateRegistry, CuratorError> {
            let payload = self
                .candidates
                .lock()
                .map(|rows| rows.clone())
                .unwrap_or(Value::Null);
            CandidateRegistry::from_value(&payload)
        }

        fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome, CuratorError> {
            if let Ok(mut seen) = self.busy_seen.lock() {
                if let Some(flag) = seen.as_ref() {
                    assert!(flag.is_busy(), "busy flag must be set during the round trip");
                }
                *seen = None;
            }
            if let Ok(mut generated) = self.generated.lock() {
                generated.push(request.clone());
            }
            if let Some(err) = self.generate_error.clone() {
                return Err(err);
            }
            if let Ok(mut rows) = self.candidates.lock() {
                if let Some(rows) = rows.as_array_mut() {
                    let row = json!({"filename": "gen_new.png", "category": request.category});
                    rows.insert(0, row);
                }
            }
            Ok(GenerationOutcome {
                message: Some("ok".to_string()),
                file: Some("gen_new.png".to_string()),
            })
        }

        fn reflect(&self, command: &ReflectCommand) -> Result<ReflectOutcome, CuratorError> {
            if let Ok(mut reflected) = self.reflected.lock() {
                reflected.push(command.clone());
            }
            if let Some(err) = self.reflect_error.clone() {
                return Err(err);
            }
            Ok(ReflectOutcome {
                dest: Some(format!("/game/{}", command.file)),
            })
        }
    }

    fn loaded(backend: MemoryBackend) -> anyhow::Result<CurationSession<MemoryBackend>> {
        let mut session = CurationSession::new(backend, "/assets-test");
        session.load()?;
        Ok(session)
    }

    fn backend_error(endpoint: &str) -> CuratorError {
        CuratorError::Backend {
            endpoint: endpoint.to_string(),
            status: Some(500),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn load_seeds_main_selector_with_first_target() -> anyhow::Result<()> {
        let session = loaded(MemoryBackend::new())?;
        assert_eq!(session.main_selection().category, Category::Daimyo);
        assert_eq!(session.main_selection().target_id, Some(TargetId::from(1)));
        assert!(session.prompt().contains("大名である織田 信長"));
        assert_eq!(session.candidates().len(), 4);

        let info = session.target_info();
        assert_eq!(info.id_label, "1");
        assert_eq!(info.size_label, "256 x 256");
        assert_eq!(info.dest_path, "assets/portraits/daimyo/daimyo_01.png");
        Ok(())
    }

    #[test]
    fn main_selector_changes_reseed_prompt() -> anyhow::Result<()> {
        let mut session = loaded(MemoryBackend::new())?;
        session.set_main_category(Category::Background);
        assert_eq!(session.main_selection().target_id, TargetId::new("main"));
        assert_eq!(session.prompt(), "戦国時代の背景。メイン画面の風景。");

        session.set_main_target("battle_vs")?;
        assert_eq!(session.target_info().dest_path, "assets/backgrounds/battle_vs_background.png");

        assert_matches!(session.set_main_target("nope"), Err(CuratorError::NotFound { .. }));
        assert_eq!(session.main_selection().target_id, TargetId::new("battle_vs"));
        Ok(())
    }

    #[test]
    fn catalog_refresh_resets_a_main_target_that_disappeared() -> anyhow::Result<()> {
        let mut session = loaded(MemoryBackend::new())?;
        session.set_main_target("9")?;
        session.set_prompt("hand edited");

        session.refresh_catalog()?;
        assert_eq!(session.main_selection().target_id, Some(TargetId::from(9)));
        assert_eq!(session.prompt(), "hand edited");

        if let Ok(mut catalog) = session.backend().catalog.lock() {
            *catalog = json!({
                "daimyo": [{"id": 3, "name": "元就", "clan": "毛利"}],
                "generals": [],
                "backgrounds": []
            });
        }
        session.refresh_catalog()?;
        assert_eq!(session.main_selection().category, Category::Daimyo);
        assert_eq!(session.main_selection().target_id, Some(TargetId::from(3)));
        assert!(session.prompt().contains("大名である毛利 元就"));
        assert_eq!(
            session.target_info().dest_path,
            "assets/portraits/daimyo/daimyo_03.png"
        );
        Ok(())
    }

    #[test]
    fn busy_guard_clears_when_the_holder_panics() {
        let flag = BusyFlag::default();
        let held = flag.clone();
        let outcome = std::panic::catch_unwind(move || {
            let _guard = held.try_begin();
            assert!(held.is_busy());
            panic!("generation aborted mid-flight");
        });
        assert!(outcome.is_err());
        assert!(!flag.is_busy());
        assert!(flag.try_begin().is_some());
    }

    #[test]
    fn generation_sends_resolved_request_and_refreshes_gallery() -> anyhow::Result<()> {
        let mut session = loaded(MemoryBackend::new())?;
        session.set_main_category(Category::General);
        session.set_main_target("5")?;
        session.set_prompt("custom prompt");
        if let Ok(mut seen) = session.backend().busy_seen.lock() {
            *seen = Some(session.busy_flag());
        }

        let outcome = session.submit_generation()?;
        assert_eq!(outcome.file.as_deref(), Some("gen_new.png"));
        assert!(!session.is_busy());
        assert_eq!(session.candidates().len(), 5);

        let generated = session
            .backend()
            .generated
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default();
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].target_name, "秀吉");
        assert_eq!(generated[0].prompt, "custom prompt");
        assert_eq!(generated[0].size.as_str(), "256x256");
        Ok(())
    }

    #[test]
    fn generation_without_target_never_reaches_backend() -> anyhow::Result<()> {
        let mut backend = MemoryBackend::new();
        backend.catalog = Mutex::new(json!({"daimyo": []}));
        let mut session = loaded(backend)?;

        assert_matches!(
            session.submit_generation(),
            Err(CuratorError::PreconditionFailed(message)) if message == "no target selected"
        );
        let sent = session.backend().generated.lock().map(|rows| rows.len()).unwrap_or(0);
        assert_eq!(sent, 0);
        Ok(())
    }

    #[test]
    fn generation_is_refused_while_busy_and_flag_clears_on_failure() -> anyhow::Result<()> {
        let mut backend = MemoryBackend::new();
        backend.generate_error = Some(backend_error("generate"));
        let mut session = loaded(backend)?;

        let flag = session.busy_flag();
        let held = flag.try_begin();
        assert!(held.is_some());
        assert_matches!(session.submit_generation(), Err(CuratorError::Busy));
        drop(held);

        assert_matches!(session.submit_generation(), Err(CuratorError::Backend { .. }));
        assert!(!session.is_busy());
        assert!(flag.try_begin().is_some());
        Ok(())
    }

    #[test]
    fn reflect_flow_uses_provenance_and_closes_on_success() -> anyhow::Result<()> {
        let mut session = loaded(MemoryBackend::new())?;
        let opened = session.open_reflect("gen_3_general_5_ai.png")?;
        assert_eq!(opened.selection.category, Category::General);
        assert_eq!(opened.dest_path, "assets/portraits/generals/general_05.png");

        let outcome = session.confirm_reflect()?;
        assert_eq!(outcome.dest.as_deref(), Some("/game/gen_3_general_5_ai.png"));
        assert!(session.reflect_selection().is_none());

        let sent = session.backend().reflected.lock().map(|rows| rows.clone()).unwrap_or_default();
        assert_eq!(sent[0].id, ReflectIdentifier::Id(TargetId::from(5)));
        Ok(())
    }

    #[test]
    fn background_reflect_sends_stored_filename() -> anyhow::Result<()> {
        let mut session = loaded(MemoryBackend::new())?;
        session.open_reflect("legacy.png")?;
        session.set_modal_category(Category::Background)?;
        session.set_modal_target("battle_vs")?;
        assert_eq!(
            session.reflect_preview().as_deref(),
            Some("assets/backgrounds/battle_vs_background.png")
        );

        session.confirm_reflect()?;
        let sent = session.backend().reflected.lock().map(|rows| rows.clone()).unwrap_or_default();
        assert_eq!(
            sent[0].id,
            ReflectIdentifier::File("battle_vs_background.png".to_string())
        );
        Ok(())
    }

    #[test]
    fn category_mismatch_blocks_main_target_fallback() -> anyhow::Result<()> {
        let mut session = loaded(MemoryBackend::new())?;
        session.set_main_target("9")?;

        let opened = session.open_reflect("gen_2_general_x.png")?;
        assert_eq!(opened.selection.category, Category::General);
        assert_eq!(opened.selection.target_id, Some(TargetId::from(2)));
        assert_eq!(opened.target_source, TargetSource::FirstAvailable);

        let fallback = session.open_reflect("gen_1_unknown.png")?;
        assert_eq!(fallback.selection.category, Category::Daimyo);
        assert_eq!(fallback.selection.target_id, Some(TargetId::from(9)));
        Ok(())
    }

    #[test]
    fn failed_reflect_keeps_modal_open() -> anyhow::Result<()> {
        let mut backend = MemoryBackend::new();
        backend.reflect_error = Some(backend_error("reflect"));
        let mut session = loaded(backend)?;
        session.open_reflect("gen_3_general_5_ai.png")?;

        assert_matches!(session.confirm_reflect(), Err(CuratorError::Backend { .. }));
        let still_open = session.reflect_selection().cloned();
        assert_eq!(still_open.map(|s| s.target_id), Some(Some(TargetId::from(5))));
        assert!(session.cancel_reflect());
        assert!(!session.cancel_reflect());
        Ok(())
    }

    #[test]
    fn modal_edits_require_an_open_selection() -> anyhow::Result<()> {
        let mut session = loaded(MemoryBackend::new())?;
        assert_matches!(
            session.set_modal_category(Category::General),
            Err(CuratorError::PreconditionFailed(_))
        );
        assert_matches!(session.confirm_reflect(), Err(CuratorError::PreconditionFailed(_)));
        assert_matches!(
            session.open_reflect("missing.png"),
            Err(CuratorError::PreconditionFailed(_))
        );
        assert_eq!(session.reflect_preview(), None);
        Ok(())
    }

    #[test]
    fn journal_records_session_events() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("journal.jsonl");
        let mut session =
            CurationSession::new(MemoryBackend::new(), "/assets-test").with_journal(&path);
        session.load()?;
        session.open_reflect("gen_2_general_x.png")?;
        session.confirm_reflect()?;

        let raw = std::fs::read_to_string(&path)?;
        let types: Vec<String> = raw
            .lines()
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .filter_map(|row| row.get("type").and_then(Value::as_str).map(str::to_string))
            .collect();
        assert_eq!(
            types,
            vec![
                "catalog_loaded",
                "candidates_loaded",
                "reconcile_miss",
                "reflect_opened",
                "reflect_committed"
            ]
        );
        Ok(())
    }

    #[test]
    fn asset_urls_use_configured_prefix() -> anyhow::Result<()> {
        let session = loaded(MemoryBackend::new())?;
        let urls: Vec<String> = session
            .candidates()
            .iter()
            .map(|candidate| session.asset_url(candidate))
            .collect();
        assert_eq!(urls[3], "/assets-test/legacy.png");
        Ok(())
    }
}
