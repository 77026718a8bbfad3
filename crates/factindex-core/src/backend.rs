use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::{FactIndexError, Result};
use crate::models::{FactRecord, RefinementAttribute, RefinementState, TagFacetItem};
use crate::overlay::RecordSource;
use crate::recommend::RecommendQuery;

pub(crate) const APP_ID_HEADER: &str = "x-algolia-application-id";
pub(crate) const API_KEY_HEADER: &str = "x-algolia-api-key";

/// Fields every hit and overlay record needs.
pub const ATTRIBUTES_TO_RETRIEVE: [&str; 11] = [
    "objectID",
    "title",
    "blurb",
    "fact",
    "content",
    "category",
    "projects",
    "tags.lvl0",
    "tags.lvl1",
    "url",
    "signal",
];

/// One page of results plus facet counts for the whole result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub hits: Vec<FactRecord>,
    pub nb_hits: u64,
    /// 1-based.
    pub page: u32,
    pub nb_pages: u32,
    pub is_last_page: bool,
    pub facets: BTreeMap<RefinementAttribute, Vec<TagFacetItem>>,
}

impl SearchResults {
    /// Facet values for one attribute, sorted by name.
    #[must_use]
    pub fn facet(&self, attribute: RefinementAttribute) -> &[TagFacetItem] {
        self.facets.get(&attribute).map_or(&[], Vec::as_slice)
    }
}

pub trait SearchBackend: RecordSource {
    fn search(&self, state: &RefinementState) -> Result<SearchResults>;

    /// Empty on any failure.
    fn recommendations(&self, query: &RecommendQuery) -> Vec<FactRecord>;

    /// Empty on any failure.
    fn suggestions(&self, prefix: &str, limit: usize) -> Vec<String>;
}

#[derive(Clone)]
pub struct HostedSearchClient {
    config: SearchConfig,
    base_url: String,
    user_token: String,
    http: Client,
}

impl std::fmt::Debug for HostedSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedSearchClient")
            .field("base_url", &self.base_url)
            .field("index_name", &self.config.index_name)
            .finish_non_exhaustive()
    }
}

impl HostedSearchClient {
    /// Callers gate on credentials first; this only fails on values that
    /// cannot be sent as headers.
    pub fn new(config: SearchConfig, user_token: impl Into<String>) -> Result<Self> {
        let (Some(app_id), Some(api_key)) = (config.app_id.as_deref(), config.api_key.as_deref())
        else {
            return Err(FactIndexError::Unavailable(
                "search credentials are not configured".to_string(),
            ));
        };
        let base_url = config
            .base_url()
            .ok_or_else(|| FactIndexError::Config("search endpoint is not configured".to_string()))?;
        let http = build_http_client(app_id, api_key, config.timeout_ms)?;
        Ok(Self {
            config,
            base_url,
            user_token: user_token.into(),
            http,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub(crate) fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "search backend request");
        let resp = self.http.post(url).json(body).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FactIndexError::Backend(format!(
                "{path} failed with status {status}"
            )));
        }
        Ok(resp.json::<Value>()?)
    }
}

impl SearchBackend for HostedSearchClient {
    fn search(&self, state: &RefinementState) -> Result<SearchResults> {
        let body = build_search_request(&self.config, state, &self.user_token);
        let value = self.post_json(QUERIES_PATH, &body)?;
        parse_search_response(&value, state)
    }

    fn recommendations(&self, query: &RecommendQuery) -> Vec<FactRecord> {
        self.fetch_recommendations(query)
    }

    fn suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.fetch_suggestions(prefix, limit)
    }
}

impl RecordSource for HostedSearchClient {
    fn fetch_record(&self, object_id: &str) -> Result<Option<FactRecord>> {
        let body = build_record_request(&self.config.index_name, object_id);
        let value = self.post_json(QUERIES_PATH, &body)?;
        parse_record_response(&value, object_id)
    }
}

pub(crate) const QUERIES_PATH: &str = "/1/indexes/*/queries";

pub(crate) fn build_http_client(app_id: &str, api_key: &str, timeout_ms: u64) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(APP_ID_HEADER, header_value(app_id, "app id")?);
    headers.insert(API_KEY_HEADER, header_value(api_key, "api key")?);
    Ok(Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_millis(timeout_ms))
        .build()?)
}

fn header_value(raw: &str, what: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(raw)
        .map_err(|e| FactIndexError::Config(format!("invalid search {what}: {e}")))
}

#[must_use]
pub fn build_search_request(config: &SearchConfig, state: &RefinementState, user_token: &str) -> Value {
    let facets = RefinementAttribute::ALL
        .iter()
        .map(|attribute| attribute.index_attribute())
        .collect::<Vec<_>>();
    json!({
        "requests": [{
            "indexName": config.index_name,
            "query": state.query().unwrap_or_default(),
            "hitsPerPage": config.hits_per_page,
            "page": state.page().map_or(0, |page| page.saturating_sub(1)),
            "facets": facets,
            "facetFilters": facet_filters(state),
            "maxValuesPerFacet": config.facet_limit,
            "userToken": user_token,
            "clickAnalytics": true,
            "attributesToRetrieve": ATTRIBUTES_TO_RETRIEVE,
        }]
    })
}

/// OR within one attribute, AND across attributes.
fn facet_filters(state: &RefinementState) -> Vec<Vec<String>> {
    state
        .refinements()
        .iter()
        .map(|(attribute, values)| {
            values
                .iter()
                .map(|value| {
                    format!(
                        "{}:{}",
                        attribute.index_attribute(),
                        escape_facet_value(value)
                    )
                })
                .collect()
        })
        .collect()
}

/// A leading `-` would negate the filter.
fn escape_facet_value(value: &str) -> String {
    if value.starts_with('-') {
        format!("\\{value}")
    } else {
        value.to_string()
    }
}

#[must_use]
pub fn build_record_request(index_name: &str, object_id: &str) -> Value {
    let escaped = object_id.replace('\\', "\\\\").replace('"', "\\\"");
    json!({
        "requests": [{
            "indexName": index_name,
            "query": "",
            "filters": format!("objectID:\"{escaped}\""),
            "hitsPerPage": 1,
            "attributesToRetrieve": ATTRIBUTES_TO_RETRIEVE,
        }]
    })
}

fn first_result(value: &Value) -> Result<&Value> {
    value
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
        .ok_or_else(|| FactIndexError::MalformedResponse("missing results[0]".to_string()))
}

fn parse_hits(result: &Value) -> Result<Vec<FactRecord>> {
    let hits = result
        .get("hits")
        .and_then(Value::as_array)
        .ok_or_else(|| FactIndexError::MalformedResponse("missing hits".to_string()))?;
    Ok(hits
        .iter()
        .filter_map(|hit| match serde_json::from_value::<FactRecord>(hit.clone()) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!(error = %err, "skipping unreadable hit");
                None
            }
        })
        .collect())
}

fn read_u32(result: &Value, key: &str) -> u32 {
    result
        .get(key)
        .and_then(Value::as_u64)
        .map_or(0, |raw| u32::try_from(raw).unwrap_or(u32::MAX))
}

pub fn parse_search_response(value: &Value, state: &RefinementState) -> Result<SearchResults> {
    let result = first_result(value)?;
    let hits = parse_hits(result)?;
    let nb_hits = result
        .get("nbHits")
        .and_then(Value::as_u64)
        .unwrap_or(hits.len() as u64);
    let page = read_u32(result, "page").saturating_add(1);
    let nb_pages = read_u32(result, "nbPages");

    let mut facets = BTreeMap::new();
    if let Some(raw) = result.get("facets").and_then(Value::as_object) {
        for attribute in RefinementAttribute::ALL {
            let Some(counts) = raw
                .get(attribute.index_attribute())
                .and_then(Value::as_object)
            else {
                continue;
            };
            let mut items = counts
                .iter()
                .map(|(name, count)| {
                    let count = count
                        .as_u64()
                        .map_or(0, |raw| u32::try_from(raw).unwrap_or(u32::MAX));
                    TagFacetItem::new(name.as_str(), count, state.is_refined(attribute, name))
                })
                .collect::<Vec<_>>();
            items.sort_by(|a, b| a.value.cmp(&b.value));
            facets.insert(attribute, items);
        }
    }

    Ok(SearchResults {
        hits,
        nb_hits,
        page,
        nb_pages,
        is_last_page: page >= nb_pages,
        facets,
    })
}

/// First hit whose id matches; anything else is "not found".
pub fn parse_record_response(value: &Value, object_id: &str) -> Result<Option<FactRecord>> {
    let result = first_result(value)?;
    Ok(parse_hits(result)?
        .into_iter()
        .find(|record| record.object_id == object_id))
}
