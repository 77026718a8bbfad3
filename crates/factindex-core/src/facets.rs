//! Two-level tag facets (`tags.lvl0` parents, `tags.lvl1` children).
//!
//! Display state (indeterminate, fully selected) is always derived from the
//! current facet snapshot; only the reconciliation bookkeeping is stored.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::models::{RefinementAttribute, RefinementState, TagFacetItem, split_tag};

const PARENT: RefinementAttribute = RefinementAttribute::TagLevel0;
const CHILD: RefinementAttribute = RefinementAttribute::TagLevel1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSelection {
    Unrefined,
    Partial,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagGroup {
    pub parent: TagFacetItem,
    pub children: Vec<TagFacetItem>,
}

impl TagGroup {
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[must_use]
    pub fn refined_child_count(&self) -> usize {
        self.children.iter().filter(|child| child.is_refined).count()
    }

    /// Some but not all children refined.
    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        let refined = self.refined_child_count();
        refined > 0 && refined < self.children.len()
    }

    #[must_use]
    pub fn is_fully_selected(&self) -> bool {
        self.parent.is_refined && self.children.iter().all(|child| child.is_refined)
    }

    #[must_use]
    pub fn selection(&self) -> GroupSelection {
        if self.is_fully_selected() {
            GroupSelection::Full
        } else if self.parent.is_refined || self.refined_child_count() > 0 {
            GroupSelection::Partial
        } else {
            GroupSelection::Unrefined
        }
    }
}

/// Child label shown under its parent: the part after the first delimiter.
#[must_use]
pub fn child_label(child: &TagFacetItem) -> &str {
    split_tag(&child.label).map_or(child.label.as_str(), |(_, label)| label)
}

/// Facet snapshot arranged as parent groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagGroups {
    pub groups: Vec<TagGroup>,
    /// Children with no delimiter or whose parent is not in the level-0
    /// snapshot. Not displayed under any parent.
    pub orphans: Vec<TagFacetItem>,
}

impl TagGroups {
    /// Groups children under the parent whose label equals the text before
    /// the first `" > "`. Parent order follows `parents`.
    #[must_use]
    pub fn build(parents: &[TagFacetItem], children: &[TagFacetItem]) -> Self {
        let known = parents
            .iter()
            .map(|parent| parent.label.as_str())
            .collect::<BTreeSet<_>>();
        let mut by_parent = BTreeMap::<&str, Vec<TagFacetItem>>::new();
        let mut orphans = Vec::new();
        for child in children {
            match split_tag(&child.value) {
                Some((parent, _)) if known.contains(parent) => {
                    by_parent.entry(parent).or_default().push(child.clone());
                }
                _ => orphans.push(child.clone()),
            }
        }
        if !orphans.is_empty() {
            debug!(count = orphans.len(), "tag children without a parent group");
        }

        let groups = parents
            .iter()
            .map(|parent| TagGroup {
                parent: parent.clone(),
                children: by_parent.remove(parent.label.as_str()).unwrap_or_default(),
            })
            .collect();
        Self { groups, orphans }
    }

    #[must_use]
    pub fn group(&self, parent_label: &str) -> Option<&TagGroup> {
        self.groups
            .iter()
            .find(|group| group.parent.label == parent_label)
    }

    /// Re-derives every `is_refined` flag from `state`.
    #[must_use]
    pub fn with_state(&self, state: &RefinementState) -> Self {
        let refresh = |item: &TagFacetItem, attribute| TagFacetItem {
            is_refined: state.is_refined(attribute, &item.value),
            ..item.clone()
        };
        Self {
            groups: self
                .groups
                .iter()
                .map(|group| TagGroup {
                    parent: refresh(&group.parent, PARENT),
                    children: group
                        .children
                        .iter()
                        .map(|child| refresh(child, CHILD))
                        .collect(),
                })
                .collect(),
            orphans: self
                .orphans
                .iter()
                .map(|child| refresh(child, CHILD))
                .collect(),
        }
    }
}

/// Applies tag toggles and reconciles URL-loaded parent selections.
#[derive(Debug, Clone, Default)]
pub struct TagCoordinator {
    /// Parents whose children were already cascaded while refined.
    reconciled: BTreeSet<String>,
}

impl TagCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips a parent. With children, the children follow the parent's new
    /// state; without children this is a plain toggle.
    pub fn toggle_parent(
        &mut self,
        state: &RefinementState,
        groups: &TagGroups,
        parent_value: &str,
    ) -> RefinementState {
        let refine = !state.is_refined(PARENT, parent_value);
        let mut next = state.with_refined(PARENT, [parent_value], refine);

        let Some(group) = groups
            .groups
            .iter()
            .find(|group| group.parent.value == parent_value)
            .filter(|group| group.has_children())
        else {
            return next;
        };

        let children = group
            .children
            .iter()
            .map(|child| child.value.as_str())
            .filter(|value| state.is_refined(CHILD, value) != refine)
            .collect::<Vec<_>>();
        next = next.with_refined(CHILD, children, refine);

        // The cascade above is this transition's reconciliation.
        if refine {
            self.reconciled.insert(group.parent.value.clone());
        } else {
            self.reconciled.remove(&group.parent.value);
        }
        next
    }

    /// Flips one child; the parent flag is left alone.
    pub fn toggle_child(&self, state: &RefinementState, child_value: &str) -> RefinementState {
        state.toggled(CHILD, child_value)
    }

    /// Refines every unrefined child of each parent that became refined
    /// without a cascade (for example when loaded from a URL). Runs once per
    /// become-refined transition; returns `None` when nothing changes.
    pub fn reconcile(
        &mut self,
        state: &RefinementState,
        groups: &TagGroups,
    ) -> Option<RefinementState> {
        // Unrefined parents re-arm even when the snapshot no longer lists them.
        self.reconciled
            .retain(|parent| state.is_refined(PARENT, parent));

        let mut to_refine = Vec::<&str>::new();
        for group in &groups.groups {
            let parent = &group.parent.value;
            if !state.is_refined(PARENT, parent)
                || !group.has_children()
                || self.reconciled.contains(parent)
            {
                continue;
            }
            self.reconciled.insert(parent.clone());
            to_refine.extend(
                group
                    .children
                    .iter()
                    .map(|child| child.value.as_str())
                    .filter(|value| !state.is_refined(CHILD, value)),
            );
        }

        if to_refine.is_empty() {
            return None;
        }
        debug!(children = to_refine.len(), "reconciled refined tag parents");
        Some(
            state
                .with_refined(CHILD, to_refine, true)
                .with_page(state.page()),
        )
    }

    #[must_use]
    pub fn is_reconciled(&self, parent_value: &str) -> bool {
        self.reconciled.contains(parent_value)
    }
}

#[cfg(test)]
mod tests;
