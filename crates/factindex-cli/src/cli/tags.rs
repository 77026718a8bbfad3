use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TagsCommand {
    /// Apply one parent or child toggle and print the new URL.
    Toggle {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        #[command(flatten)]
        target: ToggleTarget,
    },
    /// Print the tag hierarchy for a URL against a facet snapshot.
    Groups {
        #[command(flatten)]
        snapshot: SnapshotArgs,
    },
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// JSON file with `tags.lvl0` and `tags.lvl1` facet values.
    #[arg(long)]
    pub snapshot: PathBuf,
    #[arg(long, default_value = "/")]
    pub url: String,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct ToggleTarget {
    #[arg(long)]
    pub parent: Option<String>,
    #[arg(long)]
    pub child: Option<String>,
}
