//! In-memory storage. Entity lifetime is the process lifetime; nothing is
//! evicted, persisted, or deleted.

pub mod report;
pub mod session;

pub use report::ReportStore;
pub use session::SessionStore;

/// Storage facade grouping the per-entity stores
#[derive(Default)]
pub struct Storage {
    pub sessions: SessionStore,
    pub reports: ReportStore,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }
}
