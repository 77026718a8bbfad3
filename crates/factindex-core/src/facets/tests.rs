use pretty_assertions::assert_eq;

use super::*;

fn item(value: &str, is_refined: bool) -> TagFacetItem {
    TagFacetItem::new(value, 3, is_refined)
}

fn snapshot(state: &RefinementState) -> TagGroups {
    let parents = ["Approach", "Events", "Solo"]
        .map(|value| item(value, false))
        .to_vec();
    let children = [
        "Events > Conference",
        "Events > Meetup",
        "Approach > Iterative",
        "Approach > Pairing",
        "Approach > Spikes",
    ]
    .map(|value| item(value, false))
    .to_vec();
    TagGroups::build(&parents, &children).with_state(state)
}

fn tag_state(parents: &[&str], children: &[&str]) -> RefinementState {
    RefinementState::new()
        .with_values(RefinementAttribute::TagLevel0, parents.iter().copied())
        .with_values(RefinementAttribute::TagLevel1, children.iter().copied())
}

#[test]
fn children_group_under_matching_parent_label() {
    let groups = snapshot(&RefinementState::new());
    let events = groups.group("Events").expect("events group");
    assert_eq!(
        events
            .children
            .iter()
            .map(|child| child.value.as_str())
            .collect::<Vec<_>>(),
        vec!["Events > Conference", "Events > Meetup"]
    );
    assert!(!groups.group("Solo").expect("solo").has_children());
    assert!(groups.orphans.is_empty());
}

#[test]
fn orphans_are_collected_not_grouped() {
    let parents = vec![item("Events", false)];
    let children = vec![
        item("Events > Meetup", false),
        item("Tooling > Rust", false),
        item("NoDelimiter", false),
    ];
    let groups = TagGroups::build(&parents, &children);
    assert_eq!(groups.groups.len(), 1);
    assert_eq!(groups.groups[0].children.len(), 1);
    assert_eq!(
        groups
            .orphans
            .iter()
            .map(|child| child.value.as_str())
            .collect::<Vec<_>>(),
        vec!["Tooling > Rust", "NoDelimiter"]
    );
}

#[test]
fn partial_children_make_group_indeterminate() {
    let groups = snapshot(&tag_state(&["Events"], &["Events > Conference"]));
    let events = groups.group("Events").expect("events");
    assert!(events.is_indeterminate());
    assert!(!events.is_fully_selected());
    assert_eq!(events.selection(), GroupSelection::Partial);
}

#[test]
fn full_and_empty_groups_are_not_indeterminate() {
    let groups = snapshot(&tag_state(
        &["Events"],
        &["Events > Conference", "Events > Meetup"],
    ));
    let events = groups.group("Events").expect("events");
    assert!(!events.is_indeterminate());
    assert!(events.is_fully_selected());
    assert_eq!(events.selection(), GroupSelection::Full);

    let approach = groups.group("Approach").expect("approach");
    assert!(!approach.is_indeterminate());
    assert_eq!(approach.selection(), GroupSelection::Unrefined);
}

#[test]
fn toggling_parent_cascades_to_children_both_ways() {
    let mut coordinator = TagCoordinator::new();
    let state = RefinementState::new();
    let refined = coordinator.toggle_parent(&state, &snapshot(&state), "Events");
    assert_eq!(
        refined,
        tag_state(&["Events"], &["Events > Conference", "Events > Meetup"])
    );

    let unrefined = coordinator.toggle_parent(&refined, &snapshot(&refined), "Events");
    assert_eq!(unrefined, RefinementState::new());
}

#[test]
fn cascade_leaves_other_groups_alone() {
    let mut coordinator = TagCoordinator::new();
    let state = tag_state(&[], &["Approach > Pairing"]);
    let next = coordinator.toggle_parent(&state, &snapshot(&state), "Events");
    assert!(next.is_refined(RefinementAttribute::TagLevel1, "Approach > Pairing"));
    let next = coordinator.toggle_parent(&next, &snapshot(&next), "Events");
    assert_eq!(next, state);
}

#[test]
fn parent_without_children_is_plain_toggle() {
    let mut coordinator = TagCoordinator::new();
    let state = RefinementState::new();
    let next = coordinator.toggle_parent(&state, &snapshot(&state), "Solo");
    assert_eq!(next, tag_state(&["Solo"], &[]));
    assert!(!coordinator.is_reconciled("Solo"));
}

#[test]
fn toggling_child_never_touches_parent() {
    let coordinator = TagCoordinator::new();
    let state = tag_state(&["Events"], &["Events > Conference", "Events > Meetup"]);
    let next = coordinator.toggle_child(&state, "Events > Meetup");
    assert!(next.is_refined(RefinementAttribute::TagLevel0, "Events"));
    assert!(!next.is_refined(RefinementAttribute::TagLevel1, "Events > Meetup"));
    assert!(snapshot(&next).group("Events").expect("events").is_indeterminate());
}

#[test]
fn reconcile_refines_children_of_url_loaded_parent_once() {
    let mut coordinator = TagCoordinator::new();
    let loaded = tag_state(&["Events"], &[]).with_page(Some(3));
    let reconciled = coordinator
        .reconcile(&loaded, &snapshot(&loaded))
        .expect("first reconcile changes state");
    assert_eq!(
        reconciled,
        tag_state(&["Events"], &["Events > Conference", "Events > Meetup"]).with_page(Some(3))
    );
    assert!(coordinator.is_reconciled("Events"));

    assert_eq!(coordinator.reconcile(&reconciled, &snapshot(&reconciled)), None);
}

#[test]
fn reconcile_does_not_undo_user_child_deselection() {
    let mut coordinator = TagCoordinator::new();
    let loaded = tag_state(&["Events"], &[]);
    let reconciled = coordinator
        .reconcile(&loaded, &snapshot(&loaded))
        .expect("reconciled");
    let user = coordinator.toggle_child(&reconciled, "Events > Meetup");
    assert_eq!(coordinator.reconcile(&user, &snapshot(&user)), None);
}

#[test]
fn reconcile_retriggers_after_parent_is_unrefined() {
    let mut coordinator = TagCoordinator::new();
    let loaded = tag_state(&["Events"], &["Events > Conference"]);
    let first = coordinator
        .reconcile(&loaded, &snapshot(&loaded))
        .expect("reconciled");

    let cleared = first.cleared();
    assert_eq!(coordinator.reconcile(&cleared, &snapshot(&cleared)), None);
    assert!(!coordinator.is_reconciled("Events"));

    let again = tag_state(&["Events"], &[]);
    assert!(coordinator.reconcile(&again, &snapshot(&again)).is_some());
}

#[test]
fn unrefine_rearms_parent_missing_from_snapshot() {
    let mut coordinator = TagCoordinator::new();
    let loaded = tag_state(&["Events"], &[]);
    assert!(coordinator.reconcile(&loaded, &snapshot(&loaded)).is_some());

    // Other filters can drop the parent from the level-0 facet list.
    let unfiltered = RefinementState::new();
    assert_eq!(
        coordinator.reconcile(&unfiltered, &TagGroups::build(&[], &[])),
        None
    );
    assert!(!coordinator.is_reconciled("Events"));

    let reloaded = coordinator
        .reconcile(&loaded, &snapshot(&loaded))
        .expect("reconciled again");
    assert_eq!(
        reloaded
            .values(RefinementAttribute::TagLevel1)
            .map(|values| values.iter().map(String::as_str).collect::<Vec<_>>()),
        Some(vec!["Events > Conference", "Events > Meetup"])
    );
}

#[test]
fn reconcile_waits_for_children_to_arrive() {
    let mut coordinator = TagCoordinator::new();
    let loaded = tag_state(&["Events"], &[]);
    let parents_only = TagGroups::build(&[item("Events", true)], &[]);
    assert_eq!(coordinator.reconcile(&loaded, &parents_only), None);
    assert!(!coordinator.is_reconciled("Events"));
    assert!(coordinator.reconcile(&loaded, &snapshot(&loaded)).is_some());
}

#[test]
fn parent_toggle_counts_as_reconciliation() {
    let mut coordinator = TagCoordinator::new();
    let state = RefinementState::new();
    let refined = coordinator.toggle_parent(&state, &snapshot(&state), "Approach");
    let user = coordinator.toggle_child(&refined, "Approach > Spikes");
    assert_eq!(coordinator.reconcile(&user, &snapshot(&user)), None);
}

#[test]
fn indeterminate_matches_child_counts_after_every_toggle() {
    let mut coordinator = TagCoordinator::new();
    let mut state = RefinementState::new();
    let steps: [(&str, bool); 8] = [
        ("Approach", true),
        ("Approach > Pairing", false),
        ("Approach > Spikes", false),
        ("Approach", true),
        ("Approach > Iterative", false),
        ("Approach", true),
        ("Approach", true),
        ("Approach > Pairing", false),
    ];
    for (value, is_parent) in steps {
        state = if is_parent {
            coordinator.toggle_parent(&state, &snapshot(&state), value)
        } else {
            coordinator.toggle_child(&state, value)
        };
        for group in snapshot(&state).groups {
            let refined = group.refined_child_count();
            assert_eq!(
                group.is_indeterminate(),
                refined > 0 && refined < group.children.len(),
                "{} after toggling {value}",
                group.parent.label
            );
        }
    }
}

#[test]
fn child_label_strips_parent_prefix() {
    assert_eq!(child_label(&item("Events > Meetup", false)), "Meetup");
    assert_eq!(child_label(&item("Loose", false)), "Loose");
}
