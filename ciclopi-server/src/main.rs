use ciclopi_server::board::BoardService;
use ciclopi_server::domain::ChatId;
use ciclopi_server::feed::{CacheConfig, FeedCache, FeedClient, FeedConfig};
use ciclopi_server::store::Store;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let feed_config = match std::env::var("CICLOPI_FEED_URL") {
        Ok(url) => FeedConfig::default().with_url(url),
        Err(_) => FeedConfig::default(),
    };
    let db_path = std::env::var("CICLOPI_DB").unwrap_or_else(|_| "ciclopi.db".to_string());

    let store = Store::open(&db_path)
        .await
        .expect("failed to open the preference store");
    let client = FeedClient::new(feed_config).expect("failed to build the feed client");
    let cache = FeedCache::new(client, &CacheConfig::default());
    let service = BoardService::new(cache, store);

    // One-shot demo: the full-fleet board for the anonymous chat, as the
    // messaging layer would receive it.
    match service.get_board(ChatId::new(0), true).await {
        Ok(board) => {
            let json = serde_json::to_string_pretty(&board)
                .unwrap_or_else(|e| format!("serialization error: {e}"));
            println!("{json}");
        }
        Err(e) => {
            eprintln!("could not build the board: {e}");
            std::process::exit(1);
        }
    }
}
