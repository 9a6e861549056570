use std::env;
use std::path::PathBuf;

use hitnav_core::config::Config;
use hitnav_core::types::HitQuery;
use hitnav_markup::MatchNavigator;
use hitnav_text::TantivySearchService;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <query> <doc_id> [index_dir] [--pattern] [--no-group] [--json]", args[0]);
        eprintln!("Example: {} 'incident report' 3 dev_data/index", args[0]);
        std::process::exit(1);
    }
    let mut positional: Vec<String> = Vec::new();
    let mut pattern = false;
    let mut group = true;
    let mut json = false;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--pattern" | "-p" => pattern = true,
            "--no-group" => group = false,
            "--json" => json = true,
            s if !s.starts_with('-') => positional.push(s.to_string()),
            s => { eprintln!("Unknown flag: {}", s); std::process::exit(1); }
        }
    }
    let query_text = positional.first().cloned().unwrap_or_default();
    let doc_id: u64 = match positional.get(1).map(|s| s.parse()) {
        Some(Ok(id)) => id,
        _ => { eprintln!("<doc_id> must be a number"); std::process::exit(1); }
    };
    let index_dir = positional.get(2).map(PathBuf::from).unwrap_or_else(|| {
        let config = Config::load().ok();
        let dir = config
            .and_then(|c| c.get::<String>("data.index_dir").ok())
            .unwrap_or_else(|| "dev_data/index".to_string());
        PathBuf::from(dir)
    });

    println!("hitnav-view\n===========");
    println!("Query: {} ({})", query_text, if pattern { "pattern" } else { "literal" });
    println!("Document: {}  Index: {}", doc_id, index_dir.display());

    let service = TantivySearchService::open(index_dir)?;
    let mut query = if pattern { HitQuery::pattern(query_text) } else { HitQuery::literal(query_text) };
    query = query.with_group(group);
    let mut nav = MatchNavigator::new(service, doc_id, query);

    nav.current_page(); // triggers page discovery
    println!("Document has {} page(s) with hits", nav.hits_pages().len());
    loop {
        let page = nav.current_page();
        let markup = nav.render();
        println!("\n--- page {} ({} hits, anchors {}1..{}{}) ---",
            page, nav.number_hits(), nav.anchor_prefix(), nav.anchor_prefix(), nav.number_hits());
        println!("{}", markup);
        if !nav.has_next_page() { break; }
        nav.next_page()?;
    }
    if json {
        println!("\n{}", serde_json::to_string_pretty(&nav.hits_pages())?);
    } else {
        println!("\nPages with hits: {:?}", nav.hits_pages());
    }
    Ok(())
}
