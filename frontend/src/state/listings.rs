//! Listing query controller.
//!
//! Owns the filter criteria plus the pagination cursor and re-resolves the
//! displayed page whenever either changes. Overlapping fetches follow a
//! last-request-wins rule: every fetch takes a ticket, and a completion is
//! applied only while its ticket is still the newest one issued.

use std::cell::Cell;
use std::rc::Rc;

use leptos::*;

use crate::api::{Apartment, ApartmentFilter, ApiClient, ApiError};

/// Matches the original marketplace grid: 3 columns by 3 rows.
pub const PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub filter: ApartmentFilter,
    /// 1-based page index.
    pub page: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            filter: ApartmentFilter::default(),
            page: 1,
        }
    }
}

impl ListingQuery {
    /// Replacing the filter always rewinds to the first page, even when the
    /// effective constraints did not change.
    pub fn with_filter(&self, filter: ApartmentFilter) -> Self {
        Self { filter, page: 1 }
    }

    pub fn with_page(&self, page: usize) -> Self {
        Self {
            filter: self.filter.clone(),
            page: page.max(1),
        }
    }

    pub fn skip(&self) -> usize {
        (self.page - 1) * PAGE_SIZE
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingsState {
    pub items: Vec<Apartment>,
    pub page: usize,
    /// Set when the server returned fewer rows than a full page. The backend
    /// reports no authoritative total count, so a short page is the only
    /// reliable end-of-results signal.
    pub last_page: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Clone)]
pub struct ListingsController {
    pub query: RwSignal<ListingQuery>,
    pub state: (ReadSignal<ListingsState>, WriteSignal<ListingsState>),
    latest: Rc<Cell<u64>>,
}

impl Default for ListingsController {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingsController {
    pub fn new() -> Self {
        Self {
            query: create_rw_signal(ListingQuery::default()),
            state: create_signal(ListingsState::default()),
            latest: Rc::new(Cell::new(0)),
        }
    }

    /// Merges a freshly parsed filter and rewinds to page 1.
    pub fn set_filters(&self, filter: ApartmentFilter) {
        self.query.update(|query| *query = query.with_filter(filter));
    }

    /// Moves the cursor. Clamped below to 1; refuses to advance past a page
    /// already known to be the last one.
    pub fn set_page(&self, page: usize) {
        let snapshot = self.state.0.get_untracked();
        if snapshot.last_page && page.max(1) > snapshot.page && snapshot.page != 0 {
            return;
        }
        self.query.update(|query| *query = query.with_page(page));
    }

    pub fn issue_ticket(&self) -> FetchTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        FetchTicket(next)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.get() == ticket.0
    }

    /// Resolves the current query into a page of listings. Stale completions
    /// (a newer fetch was issued meanwhile) are discarded, not applied.
    pub async fn fetch(&self, api: &ApiClient) -> Result<(), ApiError> {
        let query = self.query.get_untracked();
        let ticket = self.issue_ticket();
        self.state.1.update(|state| {
            state.loading = true;
            state.error = None;
        });

        let result = api
            .list_apartments(&query.filter, query.skip(), PAGE_SIZE)
            .await;
        self.apply(ticket, &query, result)
    }

    fn apply(
        &self,
        ticket: FetchTicket,
        query: &ListingQuery,
        result: Result<Vec<Apartment>, ApiError>,
    ) -> Result<(), ApiError> {
        if !self.is_current(ticket) {
            // A newer query is already in flight (or applied).
            return Ok(());
        }
        match result {
            Ok(items) => {
                let last_page = items.len() < PAGE_SIZE;
                self.state.1.set(ListingsState {
                    items,
                    page: query.page,
                    last_page,
                    loading: false,
                    error: None,
                });
                Ok(())
            }
            Err(error) => {
                self.state.1.set(ListingsState {
                    items: Vec::new(),
                    page: query.page,
                    last_page: true,
                    loading: false,
                    error: Some(error.to_string()),
                });
                Err(error)
            }
        }
    }
}
