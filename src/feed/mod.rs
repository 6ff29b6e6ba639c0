//! Paginated character feed
//!
//! [`FeedStateMachine`] owns a [`FeedState`] and drives it through the characters-fetch
//! port. Every trigger (`load_initial`, `refresh`, `load_more`, `apply_filter`,
//! `retry`) runs one fetch to completion before returning and publishes a snapshot to
//! subscribers each time the state changes. Triggers that do not apply in the current
//! state return immediately without fetching or publishing.
//!
//! Resets bump a generation token. A fetch that completes after a newer reset is
//! discarded, so slow responses from an abandoned sequence never leak into the
//! current one.

mod state;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;


pub use state::{FeedState, Phase};

use crate::classifier::{ErrorKind, classify};
use crate::config::FeedConfig;
use crate::fetcher::CharacterFetcher;
use crate::filter::Filter;
use crate::types::{Character, CharacterId};
use state::FetchTicket;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info, warn};

/// Collaborators the feed needs
#[derive(Clone)]
pub struct FeedDependencies {
    /// Source of character pages
    pub fetcher: Arc<dyn CharacterFetcher>,
}

impl FeedDependencies {
    /// Wrap a fetcher
    pub fn new(fetcher: Arc<dyn CharacterFetcher>) -> Self {
        Self { fetcher }
    }
}

/// State machine behind the character feed screen
///
/// Cheap to clone; clones share state and subscribers, so a clone can be handed to a
/// spawned task while the original keeps serving snapshots.
#[derive(Clone)]
pub struct FeedStateMachine {
    /// Characters-fetch port
    fetcher: Arc<dyn CharacterFetcher>,
    /// Current state; never locked across an await
    state: Arc<Mutex<FeedState>>,
    /// Snapshot publisher
    event_tx: broadcast::Sender<FeedState>,
}

impl FeedStateMachine {
    /// Create an idle feed
    pub fn new(deps: FeedDependencies, config: &FeedConfig) -> Self {
        let (event_tx, _rx) = broadcast::channel(config.event_buffer.max(1));
        Self {
            fetcher: deps.fetcher,
            state: Arc::new(Mutex::new(FeedState::default())),
            event_tx,
        }
    }

    /// Fetch the first page, once, from [`Phase::Idle`]
    pub async fn load_initial(&self) {
        self.run("load_initial", FeedState::begin_initial).await;
    }

    /// Drop loaded items and fetch page 1 again with the current filter
    ///
    /// Always applies, superseding any fetch in flight.
    pub async fn refresh(&self) {
        self.run("refresh", |state| Some(state.begin_refresh())).await;
    }

    /// Fetch the next page and append it
    ///
    /// No-op while a fetch is in flight, when no more pages exist, or before a page
    /// of the current sequence has loaded.
    pub async fn load_more(&self) {
        self.run("load_more", FeedState::begin_load_more).await;
    }

    /// Toggle `filter` and reload from page 1
    ///
    /// Tapping the selected filter clears it; tapping another one replaces it.
    pub async fn apply_filter(&self, filter: Filter) {
        self.run("apply_filter", move |state| Some(state.begin_filter(filter)))
            .await;
    }

    /// Reload after a first-page failure; no-op outside [`Phase::Error`]
    pub async fn retry(&self) {
        self.run("retry", FeedState::begin_retry).await;
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> FeedState {
        self.lock().clone()
    }

    /// Subscribe to state snapshots
    ///
    /// One snapshot is sent per applied transition: once when a fetch starts and once
    /// when its result lands. Receivers that fall more than the configured buffer
    /// behind see [`broadcast::error::RecvError::Lagged`] and should resync from
    /// [`snapshot`](Self::snapshot).
    pub fn subscribe(&self) -> broadcast::Receiver<FeedState> {
        self.event_tx.subscribe()
    }

    /// Snapshots as a [`Stream`](tokio_stream::Stream)
    pub fn updates(&self) -> BroadcastStream<FeedState> {
        BroadcastStream::new(self.event_tx.subscribe())
    }

    /// Characters loaded so far
    pub fn items(&self) -> Vec<Character> {
        self.lock().items().to_vec()
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    /// Classified error of the last first-page failure, while in [`Phase::Error`]
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.lock().last_error().cloned()
    }

    /// Message for the error view, while in [`Phase::Error`]
    pub fn error_message(&self) -> Option<String> {
        self.lock().error_message()
    }

    /// Whether another page can be requested
    pub fn has_more(&self) -> bool {
        self.lock().has_more()
    }

    /// Whether a later page is loading below the visible items
    pub fn is_loading_more(&self) -> bool {
        self.lock().is_loading_more()
    }

    /// Active status filter
    pub fn selected_filter(&self) -> Option<Filter> {
        self.lock().selected_filter()
    }

    /// Last loaded page of the current sequence
    pub fn current_page(&self) -> Option<u32> {
        self.lock().current_page()
    }

    /// Loaded character with the given id, for the detail view
    pub fn character(&self, id: CharacterId) -> Option<Character> {
        self.lock().character(id).cloned()
    }

    async fn run<F>(&self, trigger: &'static str, begin: F)
    where
        F: FnOnce(&mut FeedState) -> Option<FetchTicket>,
    {
        let ticket = {
            let mut state = self.lock();
            match begin(&mut state) {
                Some(ticket) => {
                    self.emit(&state);
                    ticket
                }
                None => {
                    debug!(
                        trigger,
                        phase = ?state.phase(),
                        in_flight = state.is_fetch_in_flight(),
                        has_more = state.has_more(),
                        "Trigger does not apply; ignoring"
                    );
                    return;
                }
            }
        };

        let status = ticket.status.map(|s| s.as_str());
        debug!(
            trigger,
            page = ticket.page,
            status,
            generation = ticket.generation,
            "Fetching characters"
        );
        let result = self
            .fetcher
            .fetch_characters(Some(ticket.page), status)
            .await;

        let mut state = self.lock();
        let applied = match result {
            Ok(page) => {
                let received = page.results.len();
                let applied = state.apply_page(ticket, page);
                if applied {
                    info!(
                        page = ticket.page,
                        received,
                        total_items = state.items().len(),
                        has_more = state.has_more(),
                        "Characters page loaded"
                    );
                }
                applied
            }
            Err(err) => {
                let kind = classify(&err);
                let applied = state.apply_failure(ticket, kind.clone());
                if applied {
                    if ticket.page == 1 {
                        warn!(error = %err, kind = %kind, "Failed to load characters");
                    } else {
                        warn!(
                            page = ticket.page,
                            error = %err,
                            "Failed to load next page; keeping loaded characters"
                        );
                    }
                }
                applied
            }
        };

        if applied {
            self.emit(&state);
        } else {
            debug!(
                trigger,
                page = ticket.page,
                generation = ticket.generation,
                current_generation = state.generation(),
                "Discarding result of superseded fetch"
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish a snapshot; dropped silently when nobody is subscribed
    fn emit(&self, state: &FeedState) {
        self.event_tx.send(state.clone()).ok();
    }
}
