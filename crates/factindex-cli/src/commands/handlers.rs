use anyhow::Result;
use factindex_core::facets::{TagCoordinator, TagGroups};
use factindex_core::models::{FactRecord, RefinementState, RouteState};
use factindex_core::overlay::OverlayPhase;
use factindex_core::pager::{InfinitePager, PagerAction, next_page_href};
use factindex_core::suggest::apply_suggestion;
use factindex_core::routing::{
    FACT_ID_PARAM, MemoryHistory, QueryString, UrlWriter, build_shareable_url,
    parse_route, to_ui_state,
};
use factindex_core::{AppConfig, FactIndex, SearchOutcome};
use serde::Serialize;

use crate::cli::{ShareArgs, SnapshotArgs, SuggestArgs, ToggleTarget};

use super::support::read_snapshot;

pub(super) fn handle_share(config: &AppConfig, args: ShareArgs) -> String {
    let non_empty = |values: Vec<String>| (!values.is_empty()).then_some(values);
    let route = RouteState {
        query: args.query,
        page: args.page,
        category: non_empty(args.category),
        projects: non_empty(args.project),
        tag0: non_empty(args.tag0),
        tag1: non_empty(args.tag1),
    };
    let base_path = args.base.as_deref().unwrap_or(&config.base_path);
    build_shareable_url(&to_ui_state(&route), base_path)
}

#[derive(Debug, Serialize)]
pub(super) struct TagsReport {
    pub(super) url: String,
    pub(super) state: RefinementState,
    pub(super) groups: TagGroups,
}

/// Loads state from the URL, reconciles it against the snapshot the way a
/// fresh page load would, then applies `target` if given.
pub(super) fn handle_tags(args: &SnapshotArgs, target: Option<&ToggleTarget>) -> Result<TagsReport> {
    let snapshot = read_snapshot(&args.snapshot)?;
    let mut writer = UrlWriter::new(MemoryHistory::new(&args.url));
    let mut state = to_ui_state(&parse_route(&writer.location().search));
    let groups = TagGroups::build(&snapshot.parents, &snapshot.children);

    let mut coordinator = TagCoordinator::new();
    if let Some(reconciled) = coordinator.reconcile(&state, &groups.with_state(&state)) {
        state = reconciled;
    }
    match target {
        Some(ToggleTarget {
            parent: Some(parent),
            ..
        }) => state = coordinator.toggle_parent(&state, &groups.with_state(&state), parent),
        Some(ToggleTarget {
            child: Some(child), ..
        }) => state = coordinator.toggle_child(&state, child),
        _ => {}
    }

    writer.commit_route(&state);
    Ok(TagsReport {
        url: writer.history().current_href().to_string(),
        groups: groups.with_state(&state),
        state,
    })
}

#[derive(Debug, Serialize)]
pub(super) struct SearchReport {
    pub(super) url: String,
    pub(super) pages: Vec<SearchOutcome>,
    pub(super) viewed: Vec<String>,
    pub(super) next_page_href: Option<String>,
}

/// Pulls up to `pages` result pages, scrolling the sentinel into view after
/// each one.
pub(super) fn handle_search(index: &FactIndex, url: Option<&str>, pages: u32) -> SearchReport {
    let start = url.unwrap_or(&index.config().base_path);
    let mut writer = UrlWriter::new(MemoryHistory::new(start));
    let mut state = to_ui_state(&parse_route(&writer.location().search));
    let mut pager = InfinitePager::new();
    let mut report = SearchReport {
        url: String::new(),
        pages: Vec::new(),
        viewed: Vec::new(),
        next_page_href: None,
    };

    loop {
        let outcome = index.search(&state);
        pager.page_loaded();
        let next = match outcome.results() {
            Some(results) => {
                report.viewed.extend(
                    pager.track_viewed(results.hits.iter().map(|hit| hit.object_id.as_str())),
                );
                // Fresh hits push the sentinel below the fold; scrolling brings it back.
                pager.on_visibility(false, results.is_last_page);
                let wanted = report.pages.len() + 1 < pages as usize;
                let action = pager.on_visibility(wanted, results.is_last_page);
                (action == PagerAction::RequestNextPage).then(|| results.page.saturating_add(1))
            }
            None => None,
        };
        report.pages.push(outcome);
        let Some(page) = next else {
            break;
        };
        state = state.with_page(Some(page));
        writer.commit_route(&state);
    }
    pager.disconnect();

    let location = writer.location();
    if report
        .pages
        .last()
        .and_then(SearchOutcome::results)
        .is_some_and(|results| !results.is_last_page)
    {
        report.next_page_href = Some(next_page_href(&location.search));
    }
    report.url = location.href();
    report
}

#[derive(Debug, Serialize)]
pub(super) struct ResolveReport {
    pub(super) url: String,
    pub(super) record: Option<FactRecord>,
    pub(super) phase: OverlayPhase,
}

pub(super) fn handle_resolve(index: &FactIndex, target: &str) -> ResolveReport {
    let start = if looks_like_url(target) {
        target.to_string()
    } else {
        let mut search = QueryString::default();
        search.append(FACT_ID_PARAM, target);
        format!("{}?{search}", index.config().base_path)
    };
    let mut writer = UrlWriter::new(MemoryHistory::new(&start));
    let mut resolver = index.deep_link_resolver();
    let record = index.sync_overlay(&mut resolver, &mut writer);
    ResolveReport {
        url: writer.history().current_href().to_string(),
        record,
        phase: resolver.phase().clone(),
    }
}

fn looks_like_url(target: &str) -> bool {
    target.starts_with('/')
        || target.starts_with('?')
        || target.starts_with("http://")
        || target.starts_with("https://")
}

#[derive(Debug, Serialize)]
pub(super) struct SuggestionLink {
    pub(super) query: String,
    pub(super) url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SuggestReport {
    pub(super) prefix: String,
    pub(super) suggestions: Vec<SuggestionLink>,
}

/// Each suggestion with the URL that picking it would commit.
pub(super) fn handle_suggest(index: &FactIndex, args: &SuggestArgs) -> SuggestReport {
    let start = args.url.as_deref().unwrap_or(&index.config().base_path);
    let suggestions = index
        .suggestions(&args.prefix, args.limit)
        .into_iter()
        .map(|query| {
            let mut writer = UrlWriter::new(MemoryHistory::new(start));
            let state = to_ui_state(&parse_route(&writer.location().search));
            writer.commit_route(&apply_suggestion(&state, &query));
            SuggestionLink {
                url: writer.history().current_href().to_string(),
                query,
            }
        })
        .collect();
    SuggestReport {
        prefix: args.prefix.clone(),
        suggestions,
    }
}
