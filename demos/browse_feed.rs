//! Browse the character feed from the terminal
//!
//! Loads the first two pages, then switches to the "alive" filter, printing every
//! snapshot the feed publishes along the way.
//!
//! An optional first argument names a JSON config file:
//!
//! ```bash
//! cargo run --example browse_feed -- feed.json
//! ```

use rickmorty_feed::{Config, FeedDependencies, FeedStateMachine, Filter, Phase, RickMortyClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    let client = RickMortyClient::from_config(&config)?;
    let feed = FeedStateMachine::new(FeedDependencies::new(Arc::new(client)), &config.feed);

    let mut snapshots = feed.subscribe();
    tokio::spawn(async move {
        while let Ok(state) = snapshots.recv().await {
            match state.phase() {
                Phase::Loading => println!("[feed] loading..."),
                Phase::LoadingMore => {
                    println!("[feed] loading more below {} items", state.items().len())
                }
                Phase::Loaded => println!(
                    "[feed] {} characters (page {:?}, more: {})",
                    state.items().len(),
                    state.current_page(),
                    state.has_more()
                ),
                Phase::Error => println!(
                    "[feed] error: {}",
                    state.error_message().unwrap_or_default()
                ),
                Phase::Idle => {}
            }
        }
    });

    feed.load_initial().await;
    feed.load_more().await;

    for character in feed.items().iter().take(5) {
        println!(
            "  #{} {} ({}, {})",
            character.id, character.name, character.status, character.species
        );
    }

    feed.apply_filter(Filter::Alive).await;
    println!("Alive filter: {} characters", feed.items().len());

    if feed.phase() == Phase::Error {
        feed.retry().await;
    }

    Ok(())
}
