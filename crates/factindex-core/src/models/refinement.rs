use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FactIndexError;

/// Facet attributes the search page can refine on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RefinementAttribute {
    #[serde(rename = "category")]
    Category,
    #[serde(rename = "projects")]
    Projects,
    #[serde(rename = "tags.lvl0")]
    TagLevel0,
    #[serde(rename = "tags.lvl1")]
    TagLevel1,
}

impl RefinementAttribute {
    /// URL parameter order.
    pub const ALL: [Self; 4] = [
        Self::Category,
        Self::Projects,
        Self::TagLevel0,
        Self::TagLevel1,
    ];

    /// Attribute name in the search index.
    #[must_use]
    pub const fn index_attribute(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Projects => "projects",
            Self::TagLevel0 => "tags.lvl0",
            Self::TagLevel1 => "tags.lvl1",
        }
    }

    /// Query-string key. Note `projects` is singular on the wire.
    #[must_use]
    pub const fn route_param(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Projects => "project",
            Self::TagLevel0 => "tag0",
            Self::TagLevel1 => "tag1",
        }
    }

    #[must_use]
    pub fn from_route_param(param: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.route_param() == param)
    }
}

impl Display for RefinementAttribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.index_attribute())
    }
}

impl FromStr for RefinementAttribute {
    type Err = FactIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.index_attribute() == s)
            .ok_or_else(|| FactIndexError::Validation(format!("unknown attribute: {s}")))
    }
}

/// Canonical filter state of the search page.
///
/// Every transition returns a new snapshot. Empty refinement sets, an empty
/// query and page 1 are never stored, so two states that mean the same thing
/// compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefinementState {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    refinements: BTreeMap<RefinementAttribute, BTreeSet<String>>,
}

impl RefinementState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// 1-based page; `None` means the first page.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        self.page
    }

    #[must_use]
    pub fn refinements(&self) -> &BTreeMap<RefinementAttribute, BTreeSet<String>> {
        &self.refinements
    }

    #[must_use]
    pub fn values(&self, attribute: RefinementAttribute) -> Option<&BTreeSet<String>> {
        self.refinements.get(&attribute)
    }

    #[must_use]
    pub fn is_refined(&self, attribute: RefinementAttribute, value: &str) -> bool {
        self.refinements
            .get(&attribute)
            .is_some_and(|values| values.contains(value))
    }

    #[must_use]
    pub fn has_refinements(&self) -> bool {
        !self.refinements.is_empty()
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.query.is_none() && self.page.is_none() && self.refinements.is_empty()
    }

    /// New query; paging starts over.
    #[must_use]
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            query: (!query.is_empty()).then_some(query),
            page: None,
            refinements: self.refinements.clone(),
        }
    }

    #[must_use]
    pub fn with_page(&self, page: Option<u32>) -> Self {
        Self {
            page: page.filter(|page| *page > 1),
            ..self.clone()
        }
    }

    /// Replaces the whole value set of one attribute; blank values are dropped.
    #[must_use]
    pub fn with_values<I, S>(&self, attribute: RefinementAttribute, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.clone();
        let values = values
            .into_iter()
            .map(Into::into)
            .filter(|value| !value.is_empty())
            .collect::<BTreeSet<_>>();
        if values.is_empty() {
            next.refinements.remove(&attribute);
        } else {
            next.refinements.insert(attribute, values);
        }
        next
    }

    /// Flips one value. Any refinement change returns to the first page.
    #[must_use]
    pub fn toggled(&self, attribute: RefinementAttribute, value: &str) -> Self {
        let refined = self.is_refined(attribute, value);
        self.with_refined(attribute, [value], !refined)
    }

    /// Adds (or removes) every given value of one attribute at once.
    #[must_use]
    pub fn with_refined<'a, I>(&self, attribute: RefinementAttribute, values: I, refined: bool) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut next = self.clone();
        let set = next.refinements.entry(attribute).or_default();
        for value in values {
            if value.is_empty() {
                continue;
            }
            if refined {
                set.insert(value.to_string());
            } else {
                set.remove(value);
            }
        }
        if set.is_empty() {
            next.refinements.remove(&attribute);
        }
        next.page = None;
        next
    }

    /// Drops every refinement but keeps the query.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            query: self.query.clone(),
            page: None,
            refinements: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(
        query: Option<String>,
        page: Option<u32>,
        refinements: BTreeMap<RefinementAttribute, BTreeSet<String>>,
    ) -> Self {
        Self {
            query: query.filter(|query| !query.is_empty()),
            page: page.filter(|page| *page > 1),
            refinements: refinements
                .into_iter()
                .filter(|(_, values)| !values.is_empty())
                .collect(),
        }
    }
}
