//! Feed state and its transition functions
//!
//! [`FeedState`] is plain data. The `begin_*` functions move it into a loading phase
//! and hand back a [`FetchTicket`] describing the fetch to issue; `apply_*` fold a
//! completed fetch back in, unless a newer generation has started since the ticket
//! was issued.

use crate::classifier::ErrorKind;
use crate::filter::{self, Filter};
use crate::types::{Character, CharacterId, Page, Status};
use serde::{Deserialize, Serialize};

/// Discrete phase of the feed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing fetched yet
    Idle,
    /// First page of a fresh sequence in flight
    Loading,
    /// A later page in flight; loaded items stay visible
    LoadingMore,
    /// At least one page loaded, nothing in flight
    Loaded,
    /// The first page failed; see [`FeedState::last_error`]
    Error,
}

/// Snapshot of everything the feed screen renders
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeedState {
    items: Vec<Character>,
    current_page: Option<u32>,
    has_more: bool,
    selected_filter: Option<Filter>,
    phase: Phase,
    last_error: Option<ErrorKind>,
    is_fetch_in_flight: bool,
    generation: u64,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: None,
            has_more: true,
            selected_filter: None,
            phase: Phase::Idle,
            last_error: None,
            is_fetch_in_flight: false,
            generation: 0,
        }
    }
}

/// Identifies one issued fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FetchTicket {
    /// Generation current when the fetch was issued
    pub(crate) generation: u64,
    /// Page requested
    pub(crate) page: u32,
    /// Status filter requested
    pub(crate) status: Option<Status>,
}

impl FeedState {
    /// Characters loaded so far, in page order
    pub fn items(&self) -> &[Character] {
        &self.items
    }

    /// Last successfully loaded page of the current sequence
    pub fn current_page(&self) -> Option<u32> {
        self.current_page
    }

    /// Whether another page can be requested
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Active status filter; `None` shows every status
    pub fn selected_filter(&self) -> Option<Filter> {
        self.selected_filter
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Classified error, present only in [`Phase::Error`]
    pub fn last_error(&self) -> Option<&ErrorKind> {
        self.last_error.as_ref()
    }

    /// Message for the error view, present only in [`Phase::Error`]
    pub fn error_message(&self) -> Option<String> {
        match self.phase {
            Phase::Error => self.last_error.as_ref().map(ErrorKind::user_message),
            _ => None,
        }
    }

    /// Whether a fetch is outstanding
    pub fn is_fetch_in_flight(&self) -> bool {
        self.is_fetch_in_flight
    }

    /// Whether the first page of a sequence is loading
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Whether a later page is loading below the visible items
    pub fn is_loading_more(&self) -> bool {
        self.phase == Phase::LoadingMore
    }

    /// Token bumped by every reset; results tagged with an older one are dropped
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// First loaded character with the given id
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.items.iter().find(|c| c.id == id)
    }

    fn status(&self) -> Option<Status> {
        self.selected_filter.map(Filter::to_status)
    }

    fn issue_first_page(&mut self) -> FetchTicket {
        self.generation += 1;
        self.is_fetch_in_flight = true;
        FetchTicket {
            generation: self.generation,
            page: 1,
            status: self.status(),
        }
    }

    /// Start the very first load; only valid from [`Phase::Idle`]
    pub(crate) fn begin_initial(&mut self) -> Option<FetchTicket> {
        if self.phase != Phase::Idle {
            return None;
        }
        self.phase = Phase::Loading;
        Some(self.issue_first_page())
    }

    /// Drop everything loaded and start again from page 1
    pub(crate) fn begin_refresh(&mut self) -> FetchTicket {
        self.items.clear();
        self.current_page = None;
        self.has_more = true;
        self.phase = Phase::Loading;
        self.last_error = None;
        self.issue_first_page()
    }

    /// Toggle `tapped` and start again from page 1 with the new selection
    pub(crate) fn begin_filter(&mut self, tapped: Filter) -> FetchTicket {
        self.selected_filter = filter::toggle(self.selected_filter, tapped);
        self.begin_refresh()
    }

    /// Refresh, but only out of [`Phase::Error`]
    pub(crate) fn begin_retry(&mut self) -> Option<FetchTicket> {
        if self.phase != Phase::Error {
            return None;
        }
        Some(self.begin_refresh())
    }

    /// Request the page after the current one
    ///
    /// Not possible while a fetch is in flight, once the last page is reached, or
    /// before any page of the current sequence has loaded.
    pub(crate) fn begin_load_more(&mut self) -> Option<FetchTicket> {
        if !self.has_more || self.is_fetch_in_flight {
            return None;
        }
        let next_page = self.current_page?.checked_add(1)?;
        self.phase = Phase::LoadingMore;
        self.is_fetch_in_flight = true;
        Some(FetchTicket {
            generation: self.generation,
            page: next_page,
            status: self.status(),
        })
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Fold in a successful fetch; returns false if the ticket is stale
    pub(crate) fn apply_page(&mut self, ticket: FetchTicket, page: Page) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        self.has_more = page.has_next();
        if ticket.page == 1 {
            self.items = page.results;
        } else {
            // No dedup by id: overlapping server pages show up twice
            self.items.extend(page.results);
        }
        self.current_page = Some(ticket.page);
        self.phase = Phase::Loaded;
        self.last_error = None;
        self.is_fetch_in_flight = false;
        true
    }

    /// Fold in a failed fetch; returns false if the ticket is stale
    ///
    /// Page 1 failures surface as [`Phase::Error`]. Later pages fall back to
    /// [`Phase::Loaded`] with items and `has_more` untouched.
    pub(crate) fn apply_failure(&mut self, ticket: FetchTicket, kind: ErrorKind) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        if ticket.page == 1 {
            self.phase = Phase::Error;
            self.last_error = Some(kind);
        } else {
            self.phase = Phase::Loaded;
        }
        self.is_fetch_in_flight = false;
        true
    }
}
