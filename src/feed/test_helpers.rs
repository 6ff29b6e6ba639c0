//! Shared test helpers: a scripted characters fetcher and page builders.

use crate::config::FeedConfig;
use crate::error::{Error, Result};
use crate::feed::{FeedDependencies, FeedStateMachine};
use crate::fetcher::CharacterFetcher;
use crate::types::{Character, CharacterId, Gender, Page, PageInfo, Status};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use url::Url;

/// `(page, status)` as the fetcher was asked for it
pub(crate) type CallKey = (u32, Option<String>);

type Outcome = Arc<dyn Fn() -> Result<Page> + Send + Sync>;

/// Fetcher answering from a script keyed by `(page, status)`
///
/// Unscripted calls fail with [`Error::Other`]. A held key parks its fetches until
/// [`release`](Self::release) is called.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    outcomes: Mutex<HashMap<CallKey, Outcome>>,
    gates: Mutex<HashMap<CallKey, Arc<Notify>>>,
    calls: Mutex<Vec<CallKey>>,
}

fn key(page: u32, status: Option<&str>) -> CallKey {
    (page, status.map(str::to_string))
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer `(page, status)` with `result`, replacing any earlier script
    pub(crate) fn page(&self, page: u32, status: Option<&str>, result: Page) {
        let outcome: Outcome = Arc::new(move || Ok(result.clone()));
        self.outcomes.lock().unwrap().insert(key(page, status), outcome);
    }

    /// Answer `(page, status)` with a fresh error from `make`
    pub(crate) fn fail<F>(&self, page: u32, status: Option<&str>, make: F)
    where
        F: Fn() -> Error + Send + Sync + 'static,
    {
        let outcome: Outcome = Arc::new(move || Err(make()));
        self.outcomes.lock().unwrap().insert(key(page, status), outcome);
    }

    /// Park fetches of `(page, status)` until released
    pub(crate) fn hold(&self, page: u32, status: Option<&str>) {
        self.gates
            .lock()
            .unwrap()
            .insert(key(page, status), Arc::new(Notify::new()));
    }

    /// Let one parked fetch of `(page, status)` through and remove the hold
    pub(crate) fn release(&self, page: u32, status: Option<&str>) {
        if let Some(gate) = self.gates.lock().unwrap().remove(&key(page, status)) {
            gate.notify_one();
        }
    }

    /// Every call received so far, in order
    pub(crate) fn calls(&self) -> Vec<CallKey> {
        self.calls.lock().unwrap().clone()
    }

    /// Yield until at least `n` calls have arrived
    pub(crate) async fn wait_for_calls(&self, n: usize) {
        while self.calls.lock().unwrap().len() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl CharacterFetcher for ScriptedFetcher {
    async fn fetch_characters(&self, page: Option<u32>, status: Option<&str>) -> Result<Page> {
        let call = key(page.unwrap_or(1), status);
        self.calls.lock().unwrap().push(call.clone());

        let gate = self.gates.lock().unwrap().get(&call).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let outcome = self.outcomes.lock().unwrap().get(&call).cloned();
        match outcome {
            Some(outcome) => outcome(),
            None => Err(Error::Other(format!(
                "no outcome scripted for page {} status {:?}",
                call.0, call.1
            ))),
        }
    }
}

/// Feed over `fetcher` with default settings
pub(crate) fn feed_with(fetcher: &Arc<ScriptedFetcher>) -> FeedStateMachine {
    FeedStateMachine::new(
        FeedDependencies::new(fetcher.clone()),
        &FeedConfig::default(),
    )
}

/// Character with the given id, named `Rick {id}`
pub(crate) fn character(id: u32) -> Character {
    character_with_status(id, Status::Alive)
}

pub(crate) fn character_with_status(id: u32, status: Status) -> Character {
    Character {
        id: CharacterId(id),
        name: format!("Rick {id}"),
        status,
        species: "Human".to_string(),
        gender: Gender::Male,
        image: None,
        location: Some("Earth".to_string()),
        origin: None,
        created: None,
    }
}

/// Page holding `ids` in order; `has_next` controls the `next` link
pub(crate) fn page(ids: &[u32], has_next: bool) -> Page {
    page_of(ids.iter().copied().map(character).collect(), has_next)
}

pub(crate) fn page_of(results: Vec<Character>, has_next: bool) -> Page {
    let next = if has_next {
        Url::parse("https://rickandmortyapi.com/api/character?page=next").ok()
    } else {
        None
    };
    Page {
        info: PageInfo {
            count: results.len() as u32,
            pages: 1,
            next,
            prev: None,
        },
        results,
    }
}
