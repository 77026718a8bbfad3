use serde::Serialize;
use tracing::debug;

use crate::models::{FactRecord, RefinementState};

use super::codec::{
    FACT_ID_PARAM, fact_id, fill_absent_filters, has_filter_params, parse_route, to_route_state,
    write_route,
};
use super::query::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    /// New back-navigable entry.
    Push,
    /// Overwrites the current entry.
    Replace,
}

/// Navigable browser history.
pub trait History {
    fn location(&self) -> Location;
    fn push(&mut self, href: &str);
    fn replace(&mut self, href: &str);
}

/// History stack kept in memory, with back/forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![Location::parse(initial).href()],
            cursor: 0,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn current_href(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        Location::parse(self.current_href())
    }

    fn push(&mut self, href: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(href.to_string());
        self.cursor = self.entries.len() - 1;
    }

    fn replace(&mut self, href: &str) {
        self.entries[self.cursor] = href.to_string();
    }
}

/// Commits state transitions to history.
///
/// Refinement, query and page changes replace the current entry so rapid
/// filtering does not pile up back-stack entries. Opening a detail view pushes
/// so the back button closes it; closing replaces.
#[derive(Debug, Clone)]
pub struct UrlWriter<H> {
    history: H,
}

impl<H: History> UrlWriter<H> {
    pub fn new(history: H) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn into_inner(self) -> H {
        self.history
    }

    pub fn location(&self) -> Location {
        self.history.location()
    }

    /// Writes the route parameters for `state`. Returns `None` when the URL
    /// already encodes the same route, whatever its parameter order or
    /// percent-encoding.
    pub fn commit_route(&mut self, state: &RefinementState) -> Option<HistoryMode> {
        let current = self.history.location();
        let route = to_route_state(state);
        if parse_route(&current.search) == route {
            return None;
        }
        let mut search = current.search.clone();
        write_route(&route, &mut search);
        self.commit(&current, &current.with_search(search), HistoryMode::Replace)
    }

    /// Opens the detail view for `record`: sets `factId` and fills filter
    /// parameters the URL lacks from the record's facets.
    pub fn open_overlay(&mut self, record: &FactRecord) -> Option<HistoryMode> {
        let current = self.history.location();
        let mut search = current.search.clone();
        search.set(FACT_ID_PARAM, &record.object_id);
        fill_absent_filters(&mut search, record);
        self.commit(&current, &current.with_search(search), HistoryMode::Push)
    }

    /// Removes only `factId`.
    pub fn close_overlay(&mut self) -> Option<HistoryMode> {
        let current = self.history.location();
        if !current.search.contains_key(FACT_ID_PARAM) {
            return None;
        }
        let mut search = current.search.clone();
        search.remove(FACT_ID_PARAM);
        self.commit(&current, &current.with_search(search), HistoryMode::Replace)
    }

    /// For a deep link that arrived without any filters, narrows the result
    /// list to the linked record's facets. No-op unless the URL still points
    /// at `record` and carries no filter parameters.
    pub fn apply_fallback_filters(&mut self, record: &FactRecord) -> Option<HistoryMode> {
        let current = self.history.location();
        if fact_id(&current.search) != Some(record.object_id.as_str())
            || has_filter_params(&current.search)
        {
            return None;
        }
        let mut search = current.search.clone();
        fill_absent_filters(&mut search, record);
        self.commit(&current, &current.with_search(search), HistoryMode::Replace)
    }

    fn commit(
        &mut self,
        current: &Location,
        next: &Location,
        mode: HistoryMode,
    ) -> Option<HistoryMode> {
        let href = next.href();
        if href == current.href() {
            return None;
        }
        debug!(href = %href, ?mode, "history write");
        match mode {
            HistoryMode::Push => self.history.push(&href),
            HistoryMode::Replace => self.history.replace(&href),
        }
        Some(mode)
    }
}
