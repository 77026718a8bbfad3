use serde::Serialize;
use tracing::warn;

use crate::backend::SearchResults;
use crate::facets::TagGroups;
use crate::models::{FactRecord, RefinementAttribute, RefinementState};
use crate::recommend::RecommendQuery;
use crate::suggest::DEFAULT_SUGGESTION_LIMIT;

use super::FactIndex;

/// What the result list renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Credential gate failed; static "search unavailable" view.
    Unavailable,
    /// Backend call failed; empty results, no retry.
    Failed { code: String },
    Results(SearchResults),
}

impl SearchOutcome {
    #[must_use]
    pub fn results(&self) -> Option<&SearchResults> {
        match self {
            Self::Results(results) => Some(results),
            _ => None,
        }
    }
}

impl FactIndex {
    pub fn search(&self, state: &RefinementState) -> SearchOutcome {
        let Some(backend) = &self.backend else {
            return SearchOutcome::Unavailable;
        };
        match backend.search(state) {
            Ok(results) => SearchOutcome::Results(results),
            Err(err) => {
                warn!(code = err.code(), error = %err, "search request failed");
                SearchOutcome::Failed {
                    code: err.code().to_string(),
                }
            }
        }
    }

    /// Tag hierarchy for the current results, with refinement flags taken
    /// from `state`.
    #[must_use]
    pub fn tag_groups(results: &SearchResults, state: &RefinementState) -> TagGroups {
        TagGroups::build(
            results.facet(RefinementAttribute::TagLevel0),
            results.facet(RefinementAttribute::TagLevel1),
        )
        .with_state(state)
    }

    #[must_use]
    pub fn recommendations(&self, query: &RecommendQuery) -> Vec<FactRecord> {
        self.backend
            .as_ref()
            .map(|backend| backend.recommendations(query))
            .unwrap_or_default()
    }

    /// Query suggestions for `prefix`; empty while search is unavailable.
    #[must_use]
    pub fn suggestions(&self, prefix: &str, limit: Option<usize>) -> Vec<String> {
        let limit = limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT);
        self.backend
            .as_ref()
            .map(|backend| backend.suggestions(prefix, limit))
            .unwrap_or_default()
    }
}
