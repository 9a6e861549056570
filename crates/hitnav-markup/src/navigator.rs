//! Navigator over the pages of one document that hold hits for one query.
//!
//! Page discovery is deferred until the first navigation or render call,
//! runs at most once, and either reuses a hit map supplied with the query
//! or re-queries the backend. Rendering a page is also what discovers that
//! page's true hit count: the anchor-insertion scan counts matches as a
//! side effect.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use hitnav_core::error::{Error, Result};
use hitnav_core::traits::SearchService;
use hitnav_core::types::{
    DocId, FilterKind, HighlightRequest, HitQuery, HitsByTerm, QueryFilter, QueryKind,
    FIELD_TEXT, FIELD_TEXT_EXACT,
};

use crate::anchors::{insert_anchors, ANCHOR_PREFIX, HIGHLIGHT_POST, HIGHLIGHT_PRE};
use crate::escape::escape_query;

/// Returned when the backend has no highlighted fragment for the current
/// page; distinguishable from any real rendered content.
pub const NO_MATCHES: &str = "<span style='background:red'>No matches in content.</span>";

/// One navigator instance serves exactly one document + query pairing and
/// is meant for a single logical caller; see the crate docs for the
/// navigation model.
pub struct MatchNavigator<S> {
    service: S,
    doc_id: DocId,
    query: HitQuery,
    /// Hit map from the query, or cached from the discovery requery.
    hits: Option<HitsByTerm>,
    number_pages: u32,
    current_page: u32,
    has_chunks: bool,
    inited: bool,
    /// Pages with hits, ascending. Doubles as the insertion order of the
    /// count map reported by `hits_pages`.
    pages: Vec<u32>,
    /// Page to hit count. 0 until the page has been rendered; a rendered
    /// page that produced no matches also reads 0, and the two states are
    /// deliberately not distinguished.
    page_hits: HashMap<u32, u32>,
    /// Page to current hit cursor, 1-based. 0 before the first render.
    page_cursors: HashMap<u32, u32>,
}

impl<S: SearchService> MatchNavigator<S> {
    pub fn new(service: S, doc_id: DocId, query: HitQuery) -> Self {
        let mut query = query;
        let hits = query.hits.take();
        Self {
            service,
            doc_id,
            query,
            hits,
            number_pages: 0,
            current_page: 0,
            has_chunks: false,
            inited: false,
            pages: Vec::new(),
            page_hits: HashMap::new(),
            page_cursors: HashMap::new(),
        }
    }

    /// Deferred one-time discovery. On backend failure the navigator is
    /// left usable but empty and the flag stays unset, so a later call
    /// runs discovery again; no call retries internally.
    fn ensure_init(&mut self) {
        if self.inited {
            return;
        }
        let number_pages = match self.service.chunk_count(self.doc_id) {
            Ok(n) => n,
            Err(err) => {
                warn!(doc = self.doc_id, %err, "could not get page count for document");
                return;
            }
        };
        self.number_pages = number_pages;
        self.has_chunks = number_pages != 0;

        if self.has_chunks {
            if self.hits.is_none() {
                // hit map not handed in; requery to learn which pages match
                let mut query_text = escape_query(&self.query.text, QueryKind::Literal);
                if self.query.kind == QueryKind::Pattern {
                    // whitespace-exact field gives exact matches only for pattern results
                    query_text = format!("{}:\"{}\"", FIELD_TEXT_EXACT, query_text);
                }
                let filter = QueryFilter { kind: FilterKind::Chunk, doc_id: self.doc_id };
                match self.service.search(&query_text, &filter) {
                    Ok(found) => self.hits = Some(found),
                    Err(err) => {
                        warn!(doc = self.doc_id, %err, "could not get page hits for document");
                        return;
                    }
                }
            }
            let mut pages_sorted = BTreeSet::new();
            if let Some(hits) = &self.hits {
                for hit in hits.values().flatten() {
                    if hit.chunk_id != 0 && hit.doc_id == self.doc_id {
                        pages_sorted.insert(hit.chunk_id);
                    }
                }
            }
            self.current_page = pages_sorted.iter().next().copied().unwrap_or(0);
            for page in pages_sorted {
                self.pages.push(page);
                self.page_hits.insert(page, 0); // hit count unknown until rendered
                self.page_cursors.insert(page, 0);
            }
        } else {
            // unchunked document: one page under the sentinel id 1
            self.number_pages = 1;
            self.current_page = 1;
            self.pages.push(1);
            self.page_hits.insert(1, 0);
            self.page_cursors.insert(1, 0);
        }
        debug!(doc = self.doc_id, pages = self.pages.len(), "discovered pages with hits");
        self.inited = true;
    }

    /// Position of the current page, looked up by value so the cursor
    /// stays correct even if the page list were reordered.
    fn page_position(&self) -> Option<usize> {
        self.pages.iter().position(|&p| p == self.current_page)
    }

    /// Total page count of the document: 1 if unchunked, 0 if discovery
    /// has not run or failed.
    pub fn number_pages(&self) -> u32 {
        self.number_pages
    }

    pub fn current_page(&mut self) -> u32 {
        self.ensure_init();
        self.current_page
    }

    pub fn has_next_page(&mut self) -> bool {
        self.ensure_init();
        match self.page_position() {
            Some(i) => i + 1 < self.pages.len(),
            None => false,
        }
    }

    pub fn has_previous_page(&mut self) -> bool {
        self.ensure_init();
        matches!(self.page_position(), Some(i) if i > 0)
    }

    pub fn next_page(&mut self) -> Result<u32> {
        self.ensure_init();
        match self.page_position() {
            Some(i) if i + 1 < self.pages.len() => {
                self.current_page = self.pages[i + 1];
                Ok(self.current_page)
            }
            _ => Err(Error::NoSuchTransition("no next page")),
        }
    }

    pub fn previous_page(&mut self) -> Result<u32> {
        self.ensure_init();
        match self.page_position() {
            Some(i) if i > 0 => {
                self.current_page = self.pages[i - 1];
                Ok(self.current_page)
            }
            _ => Err(Error::NoSuchTransition("no previous page")),
        }
    }

    /// Current hit cursor on the current page, 1-based; 0 when the page
    /// has not been rendered yet.
    pub fn current_item(&mut self) -> u32 {
        self.ensure_init();
        self.page_cursors.get(&self.current_page).copied().unwrap_or(0)
    }

    pub fn has_next_item(&mut self) -> bool {
        self.ensure_init();
        match (
            self.page_cursors.get(&self.current_page),
            self.page_hits.get(&self.current_page),
        ) {
            (Some(cursor), Some(count)) => cursor < count,
            _ => false,
        }
    }

    pub fn has_previous_item(&mut self) -> bool {
        self.ensure_init();
        self.page_cursors.get(&self.current_page).is_some_and(|&cursor| cursor > 1)
    }

    pub fn next_item(&mut self) -> Result<u32> {
        if !self.has_next_item() {
            return Err(Error::NoSuchTransition("no next item"));
        }
        let cursor = self.page_cursors.get(&self.current_page).copied().unwrap_or(0) + 1;
        self.page_cursors.insert(self.current_page, cursor);
        Ok(cursor)
    }

    pub fn previous_item(&mut self) -> Result<u32> {
        if !self.has_previous_item() {
            return Err(Error::NoSuchTransition("no previous item"));
        }
        let cursor = self.page_cursors.get(&self.current_page).copied().unwrap_or(0) - 1;
        self.page_cursors.insert(self.current_page, cursor);
        Ok(cursor)
    }

    /// Pages known to contain hits with their hit counts, in discovery
    /// order. A count of 0 can mean "not yet rendered" as well as
    /// "rendered, nothing found".
    pub fn hits_pages(&self) -> Vec<(u32, u32)> {
        self.pages
            .iter()
            .map(|&p| (p, self.page_hits.get(&p).copied().unwrap_or(0)))
            .collect()
    }

    /// Known hit count for the current page; 0 until it has been rendered.
    pub fn number_hits(&self) -> u32 {
        self.page_hits.get(&self.current_page).copied().unwrap_or(0)
    }

    pub fn anchor_prefix(&self) -> &'static str {
        ANCHOR_PREFIX
    }

    /// Render the current page: the highlighted text with a numbered
    /// anchor before every match, wrapped in a `<pre>` block. Never fails.
    /// A backend error degrades to an empty string and a missing highlight
    /// entry to the `NO_MATCHES` marker, leaving navigator state intact so
    /// a later render can try again.
    pub fn render(&mut self) -> String {
        self.ensure_init();

        let (field, query_text) = match self.query.kind {
            QueryKind::Pattern => {
                let escaped = escape_query(&self.query.text, QueryKind::Pattern);
                let mut q = String::new();
                q.push_str(FIELD_TEXT_EXACT);
                q.push(':');
                if self.query.group {
                    q.push('"');
                }
                q.push_str(&escaped);
                if self.query.group {
                    q.push('"');
                }
                (FIELD_TEXT_EXACT, q)
            }
            // default field keeps literal queries simple
            QueryKind::Literal => (FIELD_TEXT, escape_query(&self.query.text, QueryKind::Literal)),
        };

        let document_key = if self.has_chunks {
            format!("{}_{}", self.doc_id, self.current_page)
        } else {
            self.doc_id.to_string()
        };

        let request = HighlightRequest {
            query: query_text,
            field: field.to_string(),
            document_key: document_key.clone(),
            pre_tag: HIGHLIGHT_PRE.to_string(),
            post_tag: HIGHLIGHT_POST.to_string(),
            fragment_size: 0,         // whole field as one highlight candidate
            max_analyzed_chars: None, // scan the whole field, not a prefix
        };

        let highlighting = match self.service.highlight(&request) {
            Ok(response) => response,
            Err(err) => {
                warn!(page = self.current_page, %err, "could not query markup for page");
                return String::new();
            }
        };

        let Some(fragment) = highlighting
            .get(&document_key)
            .and_then(|by_field| by_field.get(field))
            .and_then(|fragments| fragments.first())
        else {
            return NO_MATCHES.to_string();
        };

        let (content, count) = insert_anchors(fragment.trim(), ANCHOR_PREFIX);
        // rendering is what discovers the page's true hit count
        self.page_hits.insert(self.current_page, count);
        if count > 0 && self.page_cursors.get(&self.current_page).copied().unwrap_or(0) == 0 {
            // first hit is pre-selected on first render
            self.page_cursors.insert(self.current_page, 1);
        }

        format!("<pre>{}</pre>", content)
    }
}
