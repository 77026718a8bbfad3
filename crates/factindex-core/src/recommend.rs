use serde::Serialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::backend::HostedSearchClient;
use crate::error::{FactIndexError, Result};
use crate::models::FactRecord;

const RECOMMENDATIONS_PATH: &str = "/1/indexes/*/recommendations";

/// Lean projection; recommendations render as compact cards.
const RECOMMEND_ATTRIBUTES: [&str; 6] = [
    "objectID",
    "title",
    "blurb",
    "category",
    "tags.lvl1",
    "projects",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendModel {
    RelatedProducts,
    TrendingItems,
}

impl RecommendModel {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RelatedProducts => "related-products",
            Self::TrendingItems => "trending-items",
        }
    }

    /// Minimum confidence score (0-100).
    #[must_use]
    pub const fn threshold(self) -> u8 {
        match self {
            Self::RelatedProducts => 50,
            Self::TrendingItems => 0,
        }
    }

    #[must_use]
    pub const fn default_max(self) -> usize {
        match self {
            Self::RelatedProducts => 5,
            Self::TrendingItems => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendQuery {
    pub model: RecommendModel,
    /// Required for related items, ignored for trending.
    pub object_id: Option<String>,
    pub max_recommendations: Option<usize>,
    pub filters: Option<String>,
}

impl RecommendQuery {
    #[must_use]
    pub fn related(object_id: impl Into<String>) -> Self {
        Self {
            model: RecommendModel::RelatedProducts,
            object_id: Some(object_id.into()),
            max_recommendations: None,
            filters: None,
        }
    }

    #[must_use]
    pub const fn trending() -> Self {
        Self {
            model: RecommendModel::TrendingItems,
            object_id: None,
            max_recommendations: None,
            filters: None,
        }
    }

    #[must_use]
    pub fn with_max(mut self, max: Option<usize>) -> Self {
        self.max_recommendations = max;
        self
    }
}

pub fn build_recommend_request(index_name: &str, query: &RecommendQuery) -> Result<Value> {
    let object_id = query
        .object_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());
    if query.model == RecommendModel::RelatedProducts && object_id.is_none() {
        return Err(FactIndexError::Validation(
            "objectID is required for related items".to_string(),
        ));
    }

    let mut request = json!({
        "indexName": index_name,
        "model": query.model.name(),
        "threshold": query.model.threshold(),
        "maxRecommendations": query
            .max_recommendations
            .filter(|max| *max > 0)
            .unwrap_or_else(|| query.model.default_max()),
        "queryParameters": {
            "attributesToRetrieve": RECOMMEND_ATTRIBUTES,
            "filters": query.filters.as_deref().unwrap_or_default(),
        },
    });
    if let (Some(id), RecommendModel::RelatedProducts) = (object_id, query.model) {
        request["objectID"] = Value::String(id.to_string());
    }
    Ok(json!({ "requests": [request] }))
}

/// Hits of the first result; an absent or empty result list means none.
pub fn parse_recommend_response(value: &Value) -> Result<Vec<FactRecord>> {
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
    Ok(hits
        .iter()
        .filter_map(|hit| serde_json::from_value(hit.clone()).ok())
        .collect())
}

impl HostedSearchClient {
    /// Never fails: any error is logged and yields no recommendations.
    #[must_use]
    pub fn fetch_recommendations(&self, query: &RecommendQuery) -> Vec<FactRecord> {
        let fetched = build_recommend_request(&self.config().index_name, query)
            .and_then(|body| self.post_json(RECOMMENDATIONS_PATH, &body))
            .and_then(|value| parse_recommend_response(&value));
        match fetched {
            Ok(hits) => hits,
            Err(err) => {
                warn!(model = query.model.name(), code = err.code(), error = %err, "recommendations unavailable");
                Vec::new()
            }
        }
    }
}
