use serde::{Deserialize, Serialize};

use super::refinement::RefinementAttribute;

/// URL-facing projection of [`RefinementState`](super::RefinementState).
///
/// Lists are `None` rather than empty; `page` is `None` for the first page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag0: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag1: Option<Vec<String>>,
}

impl RouteState {
    #[must_use]
    pub fn values(&self, attribute: RefinementAttribute) -> Option<&[String]> {
        let values = match attribute {
            RefinementAttribute::Category => &self.category,
            RefinementAttribute::Projects => &self.projects,
            RefinementAttribute::TagLevel0 => &self.tag0,
            RefinementAttribute::TagLevel1 => &self.tag1,
        };
        values.as_deref()
    }

    pub(crate) fn set_values(&mut self, attribute: RefinementAttribute, values: Option<Vec<String>>) {
        let slot = match attribute {
            RefinementAttribute::Category => &mut self.category,
            RefinementAttribute::Projects => &mut self.projects,
            RefinementAttribute::TagLevel0 => &mut self.tag0,
            RefinementAttribute::TagLevel1 => &mut self.tag1,
        };
        *slot = values.filter(|values| !values.is_empty());
    }

    /// True when any refinement list is present.
    #[must_use]
    pub fn has_refinements(&self) -> bool {
        RefinementAttribute::ALL
            .into_iter()
            .any(|attribute| self.values(attribute).is_some_and(|values| !values.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lists_are_stored_as_absent() {
        let mut route = RouteState::default();
        route.set_values(RefinementAttribute::TagLevel0, Some(Vec::new()));
        assert_eq!(route.tag0, None);
        route.set_values(RefinementAttribute::Projects, Some(vec!["Alpha".to_string()]));
        assert_eq!(route.values(RefinementAttribute::Projects), Some(&["Alpha".to_string()][..]));
        assert!(route.has_refinements());
    }

    #[test]
    fn serializes_without_absent_fields() {
        let route = RouteState {
            query: Some("rust".to_string()),
            category: Some(vec!["Work Style".to_string()]),
            ..RouteState::default()
        };
        let json = serde_json::to_value(&route).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"query": "rust", "category": ["Work Style"]})
        );
    }
}
