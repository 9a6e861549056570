use crate::error::Result;
use crate::types::{DocId, HighlightRequest, Highlighting, HitsByTerm, QueryFilter};

/// The search backend as the navigator sees it. All three operations may
/// block on a backend round trip and fail with `Error::BackendUnavailable`
/// on transient backend errors.
pub trait SearchService: Send + Sync {
    /// Number of chunk records indexed for `doc`; 0 when the document was
    /// indexed unchunked.
    fn chunk_count(&self, doc: DocId) -> Result<u32>;

    /// Run an escaped query restricted by `filter`, returning matching
    /// records grouped by query term.
    fn search(&self, query: &str, filter: &QueryFilter) -> Result<HitsByTerm>;

    /// Run a highlight query. Keys absent from the result mean no match,
    /// not an error.
    fn highlight(&self, request: &HighlightRequest) -> Result<Highlighting>;
}
