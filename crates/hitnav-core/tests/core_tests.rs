use std::path::Path;

use hitnav_core::chunker::Chunker;
use hitnav_core::config::{expand_path, resolve_with_base};

#[test]
fn short_text_single_page() {
    let chunker = Chunker::new();
    let pages = chunker.split("Short text");
    assert_eq!(pages.len(), 1, "one small paragraph becomes one page");
    assert_eq!(pages[0], "Short text");
}

#[test]
fn pages_partition_words_in_order() {
    let words: Vec<String> = (0..200).map(|i| format!("word{:03}", i)).collect();
    let content = words.join(" ");
    let chunker = Chunker::with_max_chars(80);
    let pages = chunker.split(&content);

    assert!(pages.len() > 1, "long text splits into multiple pages");
    for page in &pages {
        assert!(page.len() <= 80, "page exceeds max_chars: {}", page.len());
    }
    // No overlap, nothing dropped: rejoining pages gives the original words
    let rejoined: Vec<&str> = pages.iter().flat_map(|p| p.split_whitespace()).collect();
    let original: Vec<&str> = words.iter().map(String::as_str).collect();
    assert_eq!(rejoined, original);
}

#[test]
fn oversized_word_gets_its_own_page() {
    let chunker = Chunker::with_max_chars(10);
    let pages = chunker.split("tiny enormousunbreakableword tail");
    assert!(pages.iter().any(|p| p == "enormousunbreakableword"));
}

#[test]
fn whitespace_only_yields_no_pages() {
    assert!(Chunker::new().split("  \n\t ").is_empty());
}

#[test]
fn resolve_with_base_keeps_absolute_paths() {
    let base = Path::new("/srv/hitnav");
    assert_eq!(resolve_with_base(base, "/var/data"), Path::new("/var/data"));
    assert_eq!(resolve_with_base(base, "indexes"), Path::new("/srv/hitnav/indexes"));
}

#[test]
fn expand_path_passes_plain_paths_through() {
    assert_eq!(expand_path("dev_data/index"), Path::new("dev_data/index"));
}
