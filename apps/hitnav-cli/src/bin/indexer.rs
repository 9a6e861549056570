use std::env;
use std::path::PathBuf;

use hitnav_core::chunker::Chunker;
use hitnav_core::config::Config;
use hitnav_text::ChunkIndexer;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut data_dir = None;
    let mut index_dir = None;
    let mut max_chars = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--max-chars" => {
                if i + 1 < args.len() {
                    if let Ok(n) = args[i + 1].parse::<usize>() { max_chars = Some(n); i += 1; }
                    else { eprintln!("Error: --max-chars requires a number"); std::process::exit(1); }
                } else { eprintln!("Error: --max-chars requires a number"); std::process::exit(1); }
            }
            _ if !args[i].starts_with('-') => {
                if data_dir.is_none() { data_dir = Some(PathBuf::from(&args[i])); }
                else if index_dir.is_none() { index_dir = Some(PathBuf::from(&args[i])); }
            }
            _ => {}
        }
        i += 1;
    }
    let data_dir = data_dir.unwrap_or_else(|| {
        let dir: String = config.get("data.raw_txt_dir").unwrap_or_else(|_| "dev_data/txt".to_string());
        PathBuf::from(dir)
    });
    let index_dir = index_dir.unwrap_or_else(|| {
        let dir: String = config.get("data.index_dir").unwrap_or_else(|_| "dev_data/index".to_string());
        PathBuf::from(dir)
    });
    let max_chars = max_chars.unwrap_or_else(|| config.get("chunker.max_chars").unwrap_or(4000));

    println!("Chunk Indexer\n=============");
    println!("Data directory: {}", data_dir.display());
    println!("Index directory: {}", index_dir.display());
    println!("Page size: {} chars", max_chars);

    let indexer = ChunkIndexer::with_chunker(index_dir, Chunker::with_max_chars(max_chars))?;
    let docs = indexer.index_files(&data_dir)?;
    println!("\nIndexed {} documents:", docs.len());
    for d in &docs {
        if d.chunks == 0 {
            println!("  doc {} -> {} (unchunked)", d.doc_id, d.path.display());
        } else {
            println!("  doc {} -> {} ({} pages)", d.doc_id, d.path.display(), d.chunks);
        }
    }
    println!("\nTo browse hits: cargo run --bin hitnav-view -- '<query>' <doc_id>");
    Ok(())
}
