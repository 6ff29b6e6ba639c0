//! # rickmorty-feed
//!
//! Core of a paginated, filterable character feed backed by the Rick and Morty API.
//!
//! ## Design Philosophy
//!
//! rickmorty-feed is designed to be:
//! - **UI-agnostic** - The feed is a state machine; any front end renders its snapshots
//! - **Port-driven** - Pages come through the [`CharacterFetcher`] trait, so tests and
//!   alternative back ends plug in without touching the feed
//! - **Event-driven** - Consumers subscribe to state snapshots, no polling required
//!
//! ## Quick Start
//!
//! ```no_run
//! use rickmorty_feed::{Config, FeedDependencies, FeedStateMachine, Filter, RickMortyClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = RickMortyClient::from_config(&config)?;
//!     let feed = FeedStateMachine::new(FeedDependencies::new(Arc::new(client)), &config.feed);
//!
//!     // Subscribe to snapshots
//!     let mut snapshots = feed.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(state) = snapshots.recv().await {
//!             println!("{:?}: {} characters", state.phase(), state.items().len());
//!         }
//!     });
//!
//!     feed.load_initial().await;
//!     feed.load_more().await;
//!     feed.apply_filter(Filter::Alive).await;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Mapping of fetch failures onto user-facing error kinds
pub mod classifier;
/// HTTP client for the Rick and Morty API
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Paginated feed state machine
pub mod feed;
/// Characters-fetch port
pub mod fetcher;
/// Status filters
pub mod filter;
/// Retry logic with exponential backoff
pub mod retry;
/// Core domain types
pub mod types;

// Re-export commonly used types
pub use classifier::{ErrorKind, FetchFailure, GENERIC_ERROR_MESSAGE, classify};
pub use client::RickMortyClient;
pub use config::{ApiConfig, Config, FeedConfig, RetryConfig};
pub use error::{Error, Result};
pub use feed::{FeedDependencies, FeedState, FeedStateMachine, Phase};
pub use fetcher::CharacterFetcher;
pub use filter::Filter;
pub use types::{Character, CharacterId, Gender, Page, PageInfo, Status};
