//! `SearchService` over a Tantivy chunk index.
//!
//! The highlight contract mirrors the classic server-side highlighter:
//! results come back as a per-key, per-field map of highlighted fragments
//! with caller-chosen pre/post tags, and a fragment size of 0 treats the
//! whole stored field as a single highlight candidate.

use std::ops::Range;
use std::path::PathBuf;

use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::snippet::SnippetGenerator;
use tantivy::{Index, TantivyDocument, Term};
use tracing::debug;

use hitnav_core::error::{Error, Result};
use hitnav_core::traits::SearchService;
use hitnav_core::types::{
    ContentHit, DocId, FilterKind, HighlightRequest, Highlighting, HitsByTerm, QueryFilter,
    FIELD_CHUNK, FIELD_DOC_ID, FIELD_ID, FIELD_TEXT, FIELD_TEXT_EXACT,
};

use crate::tantivy_utils::register_tokenizers;

/// Upper bound on records fetched per backend call. Documents are bounded
/// by chunk granularity, so this is far above anything a real document
/// produces.
const MAX_RECORDS: usize = 10_000;

pub struct TantivySearchService {
    index: Index,
    id_field: tantivy::schema::Field,
    doc_id_field: tantivy::schema::Field,
    chunk_field: tantivy::schema::Field,
    text_field: tantivy::schema::Field,
    text_exact_field: tantivy::schema::Field,
}

impl TantivySearchService {
    pub fn open(index_dir: PathBuf) -> Result<Self> {
        let index = Index::open_in_dir(&index_dir).map_err(backend)?;
        register_tokenizers(&index);
        let schema = index.schema();
        let id_field = schema.get_field(FIELD_ID).map_err(backend)?;
        let doc_id_field = schema.get_field(FIELD_DOC_ID).map_err(backend)?;
        let chunk_field = schema.get_field(FIELD_CHUNK).map_err(backend)?;
        let text_field = schema.get_field(FIELD_TEXT).map_err(backend)?;
        let text_exact_field = schema.get_field(FIELD_TEXT_EXACT).map_err(backend)?;
        Ok(Self { index, id_field, doc_id_field, chunk_field, text_field, text_exact_field })
    }

    fn searcher(&self) -> Result<tantivy::Searcher> {
        let reader = self.index.reader().map_err(backend)?;
        Ok(reader.searcher())
    }

    fn highlight_field(&self, name: &str) -> tantivy::schema::Field {
        if name == FIELD_TEXT_EXACT { self.text_exact_field } else { self.text_field }
    }
}

fn backend<E: std::fmt::Display>(err: E) -> Error {
    Error::BackendUnavailable(err.to_string())
}

impl SearchService for TantivySearchService {
    fn chunk_count(&self, doc: DocId) -> Result<u32> {
        let searcher = self.searcher()?;
        let term = Term::from_field_u64(self.doc_id_field, doc);
        let query = TermQuery::new(term, IndexRecordOption::Basic);
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(MAX_RECORDS))
            .map_err(backend)?;
        let mut count: u32 = 0;
        for (_score, addr) in top_docs {
            let record: TantivyDocument = searcher.doc(addr).map_err(backend)?;
            let chunk = record.get_first(self.chunk_field).and_then(|v| v.as_u64()).unwrap_or(0);
            if chunk != 0 {
                count += 1;
            }
        }
        Ok(count)
    }

    fn search(&self, query: &str, filter: &QueryFilter) -> Result<HitsByTerm> {
        let searcher = self.searcher()?;
        let parser = QueryParser::for_index(&self.index, vec![self.text_field]);
        let parsed = parser
            .parse_query(query)
            .map_err(|e| Error::Operation(format!("query parse: {}", e)))?;
        let doc_filter = TermQuery::new(
            Term::from_field_u64(self.doc_id_field, filter.doc_id),
            IndexRecordOption::Basic,
        );
        let restricted = BooleanQuery::new(vec![
            (Occur::Must, parsed),
            (Occur::Must, Box::new(doc_filter) as Box<dyn Query>),
        ]);
        let top_docs = searcher
            .search(&restricted, &TopDocs::with_limit(MAX_RECORDS))
            .map_err(backend)?;
        let mut matches = Vec::new();
        for (_score, addr) in top_docs {
            let record: TantivyDocument = searcher.doc(addr).map_err(backend)?;
            let doc_id = record.get_first(self.doc_id_field).and_then(|v| v.as_u64()).unwrap_or(0);
            let chunk = record.get_first(self.chunk_field).and_then(|v| v.as_u64()).unwrap_or(0) as u32;
            if filter.kind == FilterKind::Chunk && chunk == 0 {
                continue;
            }
            matches.push(ContentHit { doc_id, chunk_id: chunk });
        }
        debug!(query, hits = matches.len(), "doc-scoped search");
        let mut hits = HitsByTerm::new();
        hits.insert(query.to_string(), matches);
        Ok(hits)
    }

    fn highlight(&self, request: &HighlightRequest) -> Result<Highlighting> {
        let searcher = self.searcher()?;
        let mut highlighting = Highlighting::new();

        let id_query = TermQuery::new(
            Term::from_field_text(self.id_field, &request.document_key),
            IndexRecordOption::Basic,
        );
        let top_docs = searcher
            .search(&id_query, &TopDocs::with_limit(1))
            .map_err(backend)?;
        // unknown key: a legitimate no-match outcome, not an error
        let Some(&(_score, addr)) = top_docs.first() else {
            return Ok(highlighting);
        };
        let record: TantivyDocument = searcher.doc(addr).map_err(backend)?;
        let field = self.highlight_field(&request.field);
        let Some(text) = record.get_first(field).and_then(|v| v.as_str()) else {
            return Ok(highlighting);
        };

        // default field is `text`; pattern queries carry their own
        // `text_exact:` qualifier in the query string
        let parser = QueryParser::for_index(&self.index, vec![self.text_field]);
        let parsed = parser
            .parse_query(&request.query)
            .map_err(|e| Error::Operation(format!("query parse: {}", e)))?;
        let mut generator = SnippetGenerator::create(&searcher, &parsed, field).map_err(backend)?;
        let max_chars = match (request.fragment_size, request.max_analyzed_chars) {
            (0, None) => text.len().max(1),
            (0, Some(limit)) => (limit as usize).min(text.len().max(1)),
            (size, _) => size as usize,
        };
        generator.set_max_num_chars(max_chars);
        let snippet = generator.snippet(text);
        let ranges = snippet.highlighted();
        if ranges.is_empty() {
            return Ok(highlighting);
        }
        let fragment = wrap_ranges(snippet.fragment(), ranges, &request.pre_tag, &request.post_tag);
        highlighting
            .entry(request.document_key.clone())
            .or_default()
            .insert(request.field.clone(), vec![fragment]);
        Ok(highlighting)
    }
}

/// Wrap each highlighted range of `text` in `pre`/`post` tags. Ranges come
/// back sorted and merged; anything out of order is skipped rather than
/// producing overlapping tags.
fn wrap_ranges(text: &str, ranges: &[Range<usize>], pre: &str, post: &str) -> String {
    let mut out = String::with_capacity(text.len() + ranges.len() * (pre.len() + post.len()));
    let mut cursor = 0;
    for range in ranges {
        if range.start < cursor || range.end > text.len() {
            continue;
        }
        out.push_str(&text[cursor..range.start]);
        out.push_str(pre);
        out.push_str(&text[range.start..range.end]);
        out.push_str(post);
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    out
}
