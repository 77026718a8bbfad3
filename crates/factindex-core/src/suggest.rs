//! Query suggestions for the search box, read from the separate
//! suggestions index (`SearchConfig::suggestions_index`).

use serde_json::{Value, json};
use tracing::warn;

use crate::backend::{HostedSearchClient, QUERIES_PATH};
use crate::error::{FactIndexError, Result};
use crate::models::RefinementState;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

#[must_use]
pub fn build_suggestion_request(index_name: &str, prefix: &str, limit: usize) -> Value {
    json!({
        "requests": [{
            "indexName": index_name,
            "query": prefix.trim(),
            "hitsPerPage": limit.max(1),
            "attributesToRetrieve": ["query"],
        }]
    })
}

/// Suggested query strings in rank order; blanks and repeats are dropped.
pub fn parse_suggestion_response(value: &Value) -> Result<Vec<String>> {
    let Some(result) = value
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
    else {
        return Ok(Vec::new());
    };
    let hits = result
        .get("hits")
        .and_then(Value::as_array)
        .ok_or_else(|| FactIndexError::MalformedResponse("missing hits".to_string()))?;

    let mut suggestions = Vec::<String>::new();
    for query in hits
        .iter()
        .filter_map(|hit| hit.get("query").and_then(Value::as_str))
        .map(str::trim)
        .filter(|query| !query.is_empty())
    {
        if !suggestions.iter().any(|seen| seen == query) {
            suggestions.push(query.to_string());
        }
    }
    Ok(suggestions)
}

/// State after picking a suggestion: the query is replaced, refinements
/// stay, paging starts over.
#[must_use]
pub fn apply_suggestion(state: &RefinementState, suggestion: &str) -> RefinementState {
    state.with_query(suggestion.trim())
}

impl HostedSearchClient {
    /// Never fails: any error is logged and yields no suggestions.
    #[must_use]
    pub fn fetch_suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        let body = build_suggestion_request(&self.config().suggestions_index, prefix, limit);
        let fetched = self
            .post_json(QUERIES_PATH, &body)
            .and_then(|value| parse_suggestion_response(&value));
        match fetched {
            Ok(suggestions) => suggestions,
            Err(err) => {
                warn!(code = err.code(), error = %err, "query suggestions unavailable");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::RefinementAttribute;

    #[test]
    fn request_targets_suggestions_index_with_trimmed_prefix() {
        let body = build_suggestion_request("system-notes_query_suggestions", "  ship ", 0);
        assert_eq!(
            body,
            json!({
                "requests": [{
                    "indexName": "system-notes_query_suggestions",
                    "query": "ship",
                    "hitsPerPage": 1,
                    "attributesToRetrieve": ["query"]
                }]
            })
        );
    }

    #[test]
    fn response_keeps_rank_order_and_drops_blanks_and_repeats() {
        let value = json!({
            "results": [{"hits": [
                {"query": "ship small"},
                {"query": "  "},
                {"objectID": "no-query"},
                {"query": "shipping cadence"},
                {"query": "ship small "}
            ]}]
        });
        assert_eq!(
            parse_suggestion_response(&value).expect("parse"),
            vec!["ship small", "shipping cadence"]
        );
        assert!(parse_suggestion_response(&json!({})).expect("parse").is_empty());
        assert_eq!(
            parse_suggestion_response(&json!({"results": [{}]}))
                .expect_err("no hits")
                .code(),
            "MALFORMED_RESPONSE"
        );
    }

    #[test]
    fn picking_a_suggestion_resets_page_and_keeps_refinements() {
        let state = RefinementState::new()
            .with_query("shi")
            .with_page(Some(3))
            .with_values(RefinementAttribute::Category, ["Work Style"]);
        let next = apply_suggestion(&state, " ship small ");
        assert_eq!(next.query(), Some("ship small"));
        assert_eq!(next.page(), None);
        assert!(next.is_refined(RefinementAttribute::Category, "Work Style"));
    }
}
