use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    pub max_chars: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self { max_chars: 4000 }
    }
}

/// Splits document text into fixed-granularity pages for indexing.
///
/// Packing is on word boundaries up to `max_chars` per page, with no
/// overlap: the pages partition the text, so every hit belongs to exactly
/// one page. A single word longer than `max_chars` becomes its own page.
#[derive(Debug, Default)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    pub fn new() -> Self { Self::default() }

    pub fn with_max_chars(max_chars: usize) -> Self {
        Self { config: ChunkerConfig { max_chars } }
    }

    pub fn max_chars(&self) -> usize { self.config.max_chars }

    pub fn split(&self, content: &str) -> Vec<String> {
        let max_chars = self.config.max_chars.max(1);
        let mut pages = Vec::new();
        let mut current = String::new();
        for word in content.split_whitespace() {
            if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
                pages.push(std::mem::take(&mut current));
            }
            if !current.is_empty() { current.push(' '); }
            current.push_str(word);
        }
        if !current.is_empty() { pages.push(current); }
        pages
    }
}
