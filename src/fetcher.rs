//! The characters-fetch port consumed by the feed
//!
//! The feed state machine knows nothing about HTTP or JSON. It asks a
//! [`CharacterFetcher`] for one page at a time and classifies whatever error comes
//! back. [`RickMortyClient`](crate::client::RickMortyClient) is the production
//! implementation; tests plug in scripted fakes.

use crate::error::Result;
use crate::types::Page;
use async_trait::async_trait;

/// Capability to fetch one page of the character catalog
///
/// Implementations must be safe to call repeatedly and concurrently: the feed may
/// issue a new page-1 fetch while a superseded one is still running.
///
/// # Examples
///
/// ```no_run
/// use rickmorty_feed::{CharacterFetcher, RickMortyClient, config::Config};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RickMortyClient::from_config(&Config::default())?;
/// let page = client.fetch_characters(Some(2), Some("alive")).await?;
/// println!("{} characters, more: {}", page.results.len(), page.has_next());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CharacterFetcher: Send + Sync {
    /// Fetch a page of characters
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number; `None` means the first page
    /// * `status` - lowercase status name to filter by; `None` for all statuses
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error); the caller classifies it.
    async fn fetch_characters(&self, page: Option<u32>, status: Option<&str>) -> Result<Page>;
}
