//! Domain types shared by the navigator and the search backend.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type DocId = u64;

/// Index schema field names. The navigator builds query strings against
/// these, so they are part of the backend contract rather than an
/// implementation detail of any one backend.
pub const FIELD_ID: &str = "id";
pub const FIELD_DOC_ID: &str = "doc_id";
pub const FIELD_CHUNK: &str = "chunk";
pub const FIELD_TEXT: &str = "text";
pub const FIELD_TEXT_EXACT: &str = "text_exact";

/// One query match inside an indexed record.
///
/// - `doc_id`: owning document
/// - `chunk_id`: page within the document; 0 for an unchunked record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentHit {
    pub doc_id: DocId,
    pub chunk_id: u32,
}

/// Search results grouped by the query term (or query string) that
/// produced them; each group is ordered best-first.
pub type HitsByTerm = HashMap<String, Vec<ContentHit>>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryKind {
    Literal,
    Pattern,
}

/// The query a navigator instance is bound to. Built once, never mutated.
///
/// When `hits` is present, page discovery uses it directly; otherwise the
/// navigator re-queries the backend to learn which pages hold hits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitQuery {
    pub text: String,
    pub kind: QueryKind,
    /// Wrap pattern queries in grouping quotes.
    pub group: bool,
    pub hits: Option<HitsByTerm>,
}

impl HitQuery {
    pub fn literal(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: QueryKind::Literal, group: true, hits: None }
    }

    pub fn pattern(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: QueryKind::Pattern, group: true, hits: None }
    }

    pub fn with_hits(mut self, hits: HitsByTerm) -> Self {
        self.hits = Some(hits);
        self
    }

    pub fn with_group(mut self, group: bool) -> Self {
        self.group = group;
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FilterKind {
    /// Match any record of the document.
    Document,
    /// Match only chunk records (page slices) of the document.
    Chunk,
}

/// Restricts a search to one document's records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QueryFilter {
    pub kind: FilterKind,
    pub doc_id: DocId,
}

/// A highlight query against a single index record.
///
/// `fragment_size` 0 means the whole field value is one highlight
/// candidate; `max_analyzed_chars` None means the whole field is scanned
/// for matches, not a prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightRequest {
    pub query: String,
    pub field: String,
    pub document_key: String,
    pub pre_tag: String,
    pub post_tag: String,
    pub fragment_size: u32,
    pub max_analyzed_chars: Option<u32>,
}

/// Highlighting results: document key to field to highlighted fragments.
/// A key or field absent from the map means nothing matched there.
pub type Highlighting = HashMap<String, HashMap<String, Vec<String>>>;
