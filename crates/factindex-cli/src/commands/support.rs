use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use factindex_core::models::TagFacetItem;
use serde::Deserialize;

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotItem {
    value: String,
    #[serde(default)]
    count: u32,
}

/// Facet values as a search response would report them.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotFile {
    #[serde(rename = "tags.lvl0", default)]
    parents: Vec<SnapshotItem>,
    #[serde(rename = "tags.lvl1", default)]
    children: Vec<SnapshotItem>,
}

pub(super) struct FacetSnapshot {
    pub(super) parents: Vec<TagFacetItem>,
    pub(super) children: Vec<TagFacetItem>,
}

pub(super) fn read_snapshot(path: &Path) -> Result<FacetSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    parse_snapshot(&raw).with_context(|| format!("invalid snapshot {}", path.display()))
}

pub(super) fn parse_snapshot(raw: &str) -> Result<FacetSnapshot> {
    let file: SnapshotFile = serde_json::from_str(raw)?;
    let convert = |items: Vec<SnapshotItem>| {
        items
            .into_iter()
            .filter(|item| !item.value.is_empty())
            .map(|item| TagFacetItem::new(item.value, item.count, false))
            .collect()
    };
    Ok(FacetSnapshot {
        parents: convert(file.parents),
        children: convert(file.children),
    })
}
