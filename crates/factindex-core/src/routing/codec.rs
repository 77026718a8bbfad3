use std::collections::{BTreeMap, BTreeSet};

use crate::models::{FactRecord, RefinementAttribute, RefinementState, RouteState};

use super::query::QueryString;

pub const QUERY_PARAM: &str = "query";
pub const PAGE_PARAM: &str = "page";
/// Deep-link id. Owned by the overlay, never touched by route writes.
pub const FACT_ID_PARAM: &str = "factId";

const WINDOW_TITLE: &str = "Fact Index";

#[must_use]
pub fn to_route_state(state: &RefinementState) -> RouteState {
    let mut route = RouteState {
        query: state.query().map(ToString::to_string),
        page: state.page().filter(|page| *page > 1),
        ..RouteState::default()
    };
    for attribute in RefinementAttribute::ALL {
        let values = state
            .values(attribute)
            .map(|values| values.iter().cloned().collect::<Vec<_>>());
        route.set_values(attribute, values);
    }
    route
}

#[must_use]
pub fn to_ui_state(route: &RouteState) -> RefinementState {
    let refinements = RefinementAttribute::ALL
        .into_iter()
        .filter_map(|attribute| {
            let values = route
                .values(attribute)?
                .iter()
                .filter(|value| !value.is_empty())
                .cloned()
                .collect::<BTreeSet<_>>();
            Some((attribute, values))
        })
        .collect::<BTreeMap<_, _>>();
    RefinementState::from_parts(route.query.clone(), route.page, refinements)
}

/// Reads the route-owned parameters. Unknown keys and `factId` are ignored;
/// malformed values degrade to "absent".
#[must_use]
pub fn parse_route(search: &QueryString) -> RouteState {
    let mut route = RouteState {
        query: search
            .get(QUERY_PARAM)
            .filter(|query| !query.is_empty())
            .map(ToString::to_string),
        page: parse_page_param(search.get(PAGE_PARAM)),
        ..RouteState::default()
    };
    for attribute in RefinementAttribute::ALL {
        let values = search
            .get_all(attribute.route_param())
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        route.set_values(attribute, Some(values));
    }
    route
}

/// Rewrites the route-owned parameters of `search`, leaving every other
/// parameter where it was. Owned parameters are appended in fixed order.
pub fn write_route(route: &RouteState, search: &mut QueryString) {
    search.remove(QUERY_PARAM);
    search.remove(PAGE_PARAM);
    for attribute in RefinementAttribute::ALL {
        search.remove(attribute.route_param());
    }

    if let Some(query) = route.query.as_deref().filter(|query| !query.is_empty()) {
        search.append(QUERY_PARAM, query);
    }
    if let Some(page) = route.page.filter(|page| *page > 1) {
        search.append(PAGE_PARAM, &page.to_string());
    }
    for attribute in RefinementAttribute::ALL {
        for value in route.values(attribute).unwrap_or_default() {
            search.append(attribute.route_param(), value);
        }
    }
}

/// Only bare decimal integers greater than one count; everything else
/// (signs, whitespace, overflow) means page one.
#[must_use]
pub fn parse_page_param(raw: Option<&str>) -> Option<u32> {
    let raw = raw?;
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u32>().ok().filter(|page| *page > 1)
}

#[must_use]
pub fn build_shareable_url(state: &RefinementState, base_path: &str) -> String {
    let mut search = QueryString::default();
    write_route(&to_route_state(state), &mut search);
    if search.is_empty() {
        base_path.to_string()
    } else {
        format!("{base_path}?{search}")
    }
}

#[must_use]
pub fn window_title(route: &RouteState) -> String {
    match route.query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => format!("{WINDOW_TITLE}: {query}"),
        _ => WINDOW_TITLE.to_string(),
    }
}

/// Current deep-link id, trimmed; blank ids count as absent.
#[must_use]
pub fn fact_id(search: &QueryString) -> Option<&str> {
    search
        .get(FACT_ID_PARAM)
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// True when the URL already narrows the result set.
#[must_use]
pub fn has_filter_params(search: &QueryString) -> bool {
    std::iter::once(QUERY_PARAM)
        .chain(RefinementAttribute::ALL.map(RefinementAttribute::route_param))
        .any(|key| search.get(key).is_some_and(|value| !value.is_empty()))
}

/// Adds the record's facet values for every filter parameter the URL does
/// not carry yet. Parameters already present are left alone.
pub fn fill_absent_filters(search: &mut QueryString, record: &FactRecord) {
    for attribute in RefinementAttribute::ALL {
        let key = attribute.route_param();
        if search.contains_key(key) {
            continue;
        }
        for value in record.facet_values(attribute) {
            if !value.is_empty() {
                search.append(key, value);
            }
        }
    }
}

/// Standalone link that opens `record` with its own facets selected.
#[must_use]
pub fn record_share_url(record: &FactRecord, base_path: &str) -> String {
    let mut search = QueryString::default();
    search.append(FACT_ID_PARAM, &record.object_id);
    fill_absent_filters(&mut search, record);
    format!("{base_path}?{search}")
}
