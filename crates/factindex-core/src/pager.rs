use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::routing::{PAGE_PARAM, QueryString, parse_page_param};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PagerAction {
    RequestNextPage,
    Wait,
}

/// Sentinel-driven infinite scroll.
///
/// A visible sentinel requests the next page once; the pager then stays
/// latched until the sentinel leaves the viewport and comes back, and never
/// fires while a page is loading or after teardown.
#[derive(Debug, Clone)]
pub struct InfinitePager {
    connected: bool,
    armed: bool,
    in_flight: bool,
    seen: HashSet<String>,
}

impl Default for InfinitePager {
    fn default() -> Self {
        Self {
            connected: true,
            armed: true,
            in_flight: false,
            seen: HashSet::new(),
        }
    }
}

impl InfinitePager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn on_visibility(&mut self, is_visible: bool, is_last_page: bool) -> PagerAction {
        if !self.connected {
            return PagerAction::Wait;
        }
        if !is_visible {
            self.armed = true;
            return PagerAction::Wait;
        }
        if !self.armed || self.in_flight || is_last_page {
            return PagerAction::Wait;
        }
        self.armed = false;
        self.in_flight = true;
        debug!("requesting next result page");
        PagerAction::RequestNextPage
    }

    pub fn page_loaded(&mut self) {
        self.in_flight = false;
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
        self.in_flight = false;
    }

    /// Ids not reported before, in input order.
    pub fn track_viewed<'a, I>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .filter(|id| self.seen.insert((*id).to_string()))
            .map(ToString::to_string)
            .collect()
    }
}

/// No-script link to the next page: the current parameters with `page`
/// advanced by one.
#[must_use]
pub fn next_page_href(search: &QueryString) -> String {
    let next = parse_page_param(search.get(PAGE_PARAM)).map_or(2, |page| page.saturating_add(1));
    let mut search = search.clone();
    search.set(PAGE_PARAM, &next.to_string());
    format!("?{search}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_sentinel_fires_once_until_it_leaves_and_returns() {
        let mut pager = InfinitePager::new();
        assert_eq!(pager.on_visibility(true, false), PagerAction::RequestNextPage);
        pager.page_loaded();
        assert_eq!(pager.on_visibility(true, false), PagerAction::Wait);
        assert_eq!(pager.on_visibility(false, false), PagerAction::Wait);
        assert_eq!(pager.on_visibility(true, false), PagerAction::RequestNextPage);
    }

    #[test]
    fn no_request_while_page_in_flight() {
        let mut pager = InfinitePager::new();
        assert_eq!(pager.on_visibility(true, false), PagerAction::RequestNextPage);
        assert!(pager.is_loading());
        pager.on_visibility(false, false);
        assert_eq!(pager.on_visibility(true, false), PagerAction::Wait);
        pager.page_loaded();
        pager.on_visibility(false, false);
        assert_eq!(pager.on_visibility(true, false), PagerAction::RequestNextPage);
    }

    #[test]
    fn last_page_never_requests() {
        let mut pager = InfinitePager::new();
        for visible in [true, false, true, true] {
            assert_eq!(pager.on_visibility(visible, true), PagerAction::Wait);
        }
    }

    #[test]
    fn disconnect_stops_everything() {
        let mut pager = InfinitePager::new();
        pager.disconnect();
        assert!(!pager.is_connected());
        assert_eq!(pager.on_visibility(true, false), PagerAction::Wait);
    }

    #[test]
    fn viewed_ids_are_reported_once() {
        let mut pager = InfinitePager::new();
        assert_eq!(pager.track_viewed(["a", "b", "a"]), vec!["a", "b"]);
        assert_eq!(pager.track_viewed(["b", "c"]), vec!["c"]);
        assert!(pager.track_viewed(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn next_page_href_advances_page_and_keeps_other_params() {
        assert_eq!(
            next_page_href(&QueryString::parse("query=rust&page=2&utm=x")),
            "?query=rust&page=3&utm=x"
        );
        assert_eq!(next_page_href(&QueryString::parse("query=rust")), "?query=rust&page=2");
        assert_eq!(next_page_href(&QueryString::parse("page=abc")), "?page=2");
        assert_eq!(next_page_href(&QueryString::parse("page=1")), "?page=2");
        assert_eq!(next_page_href(&QueryString::parse("page=%2B4")), "?page=2");
        assert_eq!(next_page_href(&QueryString::default()), "?page=2");
    }
}
