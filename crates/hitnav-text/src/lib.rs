//! hitnav-text
//!
//! Tantivy-backed implementation of the search backend contract: a chunk
//! indexer that stores documents as fixed-granularity pages, and a
//! `SearchService` that answers chunk counts, doc-scoped searches and
//! whole-field highlight queries over that index.

pub mod index;
pub mod service;
pub mod tantivy_utils;

pub use index::{ChunkIndexer, IndexedDoc};
pub use service::TantivySearchService;
