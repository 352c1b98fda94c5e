//! Curation engine: talks to the generation backend and owns the operator's
//! session state (catalog snapshot, candidate gallery, main selector, busy
//! flag and the reflect modal).

mod backend;
mod config;
mod session;

pub use backend::{
    CurationBackend, HttpBackend, CANDIDATES_PATH, CATALOG_PATH, GENERATE_PATH, REFLECT_PATH,
};
pub use config::{
    BackendConfig, DEFAULT_ASSET_PREFIX, DEFAULT_BASE_URL, DEFAULT_GENERATE_TIMEOUT_SECS,
    DEFAULT_TIMEOUT_SECS,
};
pub use session::{BusyFlag, BusyGuard, CurationSession};
