use std::fs;
use tempfile::TempDir;

use hitnav_core::chunker::Chunker;
use hitnav_core::traits::SearchService;
use hitnav_core::types::{FilterKind, HitQuery, QueryFilter};
use hitnav_markup::{MatchNavigator, HIGHLIGHT_PRE};
use hitnav_text::{ChunkIndexer, TantivySearchService};

// ~100 filler words with "falcon" planted early and late so it lands on
// two different pages at 120 chars per page.
fn chunked_content() -> String {
    let mut words: Vec<String> = (0..100).map(|i| format!("meadow{:02}", i)).collect();
    words[0] = "falcon".to_string();
    words[60] = "falcon".to_string();
    words.join(" ")
}

#[test]
fn index_then_navigate_full_flow() {
    let tmp = TempDir::new().expect("tempdir");
    let data_dir = tmp.path().join("txt");
    let index_dir = tmp.path().join("index");
    fs::create_dir_all(&data_dir).expect("data dir");
    fs::write(data_dir.join("alpha.txt"), chunked_content()).expect("alpha");
    fs::write(data_dir.join("beta.txt"), "a falcon nests here").expect("beta");

    let indexer =
        ChunkIndexer::with_chunker(index_dir.clone(), Chunker::with_max_chars(120)).expect("indexer");
    let docs = indexer.index_files(&data_dir).expect("index files");
    assert_eq!(docs.len(), 2);
    let alpha = docs[0].clone();
    let beta = docs[1].clone();
    assert!(alpha.path.ends_with("alpha.txt"), "doc ids assigned in path order");
    assert!(alpha.chunks > 1, "alpha splits into pages");
    assert_eq!(beta.chunks, 0, "beta fits in one unchunked record");

    let service = TantivySearchService::open(index_dir.clone()).expect("service");
    assert_eq!(service.chunk_count(alpha.doc_id).expect("count"), alpha.chunks);
    assert_eq!(service.chunk_count(beta.doc_id).expect("count"), 0);

    let filter = QueryFilter { kind: FilterKind::Chunk, doc_id: alpha.doc_id };
    let found = service.search("falcon", &filter).expect("search");
    let chunks: Vec<u32> = found.values().flatten().map(|h| h.chunk_id).collect();
    assert!(!chunks.is_empty(), "falcon found in alpha's pages");
    assert!(chunks.iter().all(|&c| c != 0), "chunk filter drops unchunked records");

    let mut nav = MatchNavigator::new(service, alpha.doc_id, HitQuery::literal("falcon"));
    let pages: Vec<u32> = {
        nav.current_page();
        nav.hits_pages().iter().map(|&(p, _)| p).collect()
    };
    assert_eq!(pages.len(), 2, "falcon lands on two pages: {:?}", pages);
    assert_eq!(nav.current_page(), pages[0]);

    loop {
        let markup = nav.render();
        assert!(markup.contains(HIGHLIGHT_PRE), "hit page renders a highlight: {}", markup);
        assert!(markup.contains(nav.anchor_prefix()));
        assert_eq!(nav.number_hits(), 1);
        assert_eq!(nav.current_item(), 1, "first hit auto-selected");
        if !nav.has_next_page() {
            break;
        }
        nav.next_page().expect("next page");
    }
}

#[test]
fn unchunked_literal_and_pattern_queries() {
    let tmp = TempDir::new().expect("tempdir");
    let data_dir = tmp.path().join("txt");
    let index_dir = tmp.path().join("index");
    fs::create_dir_all(&data_dir).expect("data dir");
    fs::write(data_dir.join("note.txt"), "the falcon hunts at dusk").expect("note");

    let indexer = ChunkIndexer::new(index_dir.clone()).expect("indexer");
    let docs = indexer.index_files(&data_dir).expect("index files");
    let note = docs[0].clone();
    assert_eq!(note.chunks, 0);

    let service = TantivySearchService::open(index_dir.clone()).expect("service");
    let mut nav = MatchNavigator::new(service, note.doc_id, HitQuery::literal("falcon"));
    let markup = nav.render();
    assert_eq!(nav.number_pages(), 1);
    assert!(markup.contains(HIGHLIGHT_PRE), "literal hit highlighted: {}", markup);
    assert_eq!(nav.number_hits(), 1);

    // pattern path goes through the whitespace-exact field
    let service = TantivySearchService::open(index_dir).expect("service");
    let mut nav = MatchNavigator::new(service, note.doc_id, HitQuery::pattern("falcon"));
    let markup = nav.render();
    assert!(markup.contains(HIGHLIGHT_PRE), "pattern hit highlighted: {}", markup);
    assert_eq!(nav.current_item(), 1);
}
