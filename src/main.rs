use tracing::info;
use tracing_subscriber::EnvFilter;
use xlsx_keywords::keywords::KEYWORDS;
use xlsx_keywords::rpc::server::KeywordServer;

fn main() {
    // stderr only: stdout carries one JSON-RPC response per line.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(keywords = KEYWORDS.len(), "serving keywords on stdio");
    if let Err(err) = KeywordServer::run_stdio() {
        eprintln!("keyword server error: {err}");
        std::process::exit(1);
    }
}
