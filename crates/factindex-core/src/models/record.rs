use serde::{Deserialize, Serialize};

use super::refinement::RefinementAttribute;

/// A fact card as stored in the search index. Used for result hits and for
/// the deep-link overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    #[serde(rename = "tags.lvl0", default, skip_serializing_if = "Vec::is_empty")]
    pub tags_lvl0: Vec<String>,
    #[serde(rename = "tags.lvl1", default, skip_serializing_if = "Vec::is_empty")]
    pub tags_lvl1: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<i64>,
}

impl FactRecord {
    #[must_use]
    pub fn new(object_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            title: title.into(),
            blurb: None,
            fact: None,
            content: None,
            category: None,
            projects: Vec::new(),
            tags_lvl0: Vec::new(),
            tags_lvl1: Vec::new(),
            url: None,
            signal: None,
        }
    }

    /// Longest available body: content, then fact, then blurb.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        [&self.content, &self.fact, &self.blurb]
            .into_iter()
            .filter_map(|text| text.as_deref())
            .find(|text| !text.is_empty())
    }

    /// Facet values this record carries for one attribute.
    #[must_use]
    pub fn facet_values(&self, attribute: RefinementAttribute) -> Vec<&str> {
        match attribute {
            RefinementAttribute::Category => self.category.as_deref().into_iter().collect(),
            RefinementAttribute::Projects => self.projects.iter().map(String::as_str).collect(),
            RefinementAttribute::TagLevel0 => self.tags_lvl0.iter().map(String::as_str).collect(),
            RefinementAttribute::TagLevel1 => self.tags_lvl1.iter().map(String::as_str).collect(),
        }
    }
}
