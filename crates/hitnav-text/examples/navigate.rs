use std::env;
use std::path::{Path, PathBuf};

use hitnav_core::types::HitQuery;
use hitnav_markup::MatchNavigator;

// Walk the hit pages of one document in an existing chunk index.
// Usage:
//   cargo run -p hitnav-text --example navigate -- "your query" 1 \
//     [--index ../dev_data/index] [--pattern]

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run -p hitnav-text --example navigate -- <query> <doc_id> [--index DIR] [--pattern]");
        std::process::exit(1);
    }
    let mut positional: Vec<String> = Vec::new();
    let mut index_dir: Option<PathBuf> = None;
    let mut pattern = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--index" => {
                if i + 1 >= args.len() { eprintln!("--index requires a path"); std::process::exit(2); }
                index_dir = Some(PathBuf::from(&args[i + 1]));
                i += 2; continue;
            }
            "--pattern" => { pattern = true; i += 1; continue; }
            s if s.starts_with('-') => {
                eprintln!("Unknown flag: {}", s); std::process::exit(2);
            }
            s => { positional.push(s.to_string()); i += 1; continue; }
        }
    }
    let query_text = positional.first().cloned().unwrap_or_default();
    let doc_id: u64 = positional.get(1).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        eprintln!("<doc_id> must be a number");
        std::process::exit(1);
    });

    // Resolve index path precedence: flag > HITNAV_INDEX_DIR > workspace-relative fallback
    let index_dir = if let Some(dir) = index_dir {
        dir
    } else if let Ok(env_path) = env::var("HITNAV_INDEX_DIR") {
        PathBuf::from(env_path)
    } else {
        let base = Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap_or(Path::new("."));
        base.join("dev_data/index")
    };

    println!("Hit navigation\n==============");
    println!("Index: {}", index_dir.display());
    println!("Query: {} (doc {})\n", query_text, doc_id);

    let service = hitnav_text::TantivySearchService::open(index_dir)?;
    let query = if pattern { HitQuery::pattern(query_text) } else { HitQuery::literal(query_text) };
    let mut nav = MatchNavigator::new(service, doc_id, query);

    loop {
        let page = nav.current_page();
        let markup = nav.render();
        println!("--- page {} ({} hits) ---", page, nav.number_hits());
        println!("{}\n", markup);
        if !nav.has_next_page() { break; }
        nav.next_page()?;
    }
    println!("Pages with hits: {:?}", nav.hits_pages());
    Ok(())
}
