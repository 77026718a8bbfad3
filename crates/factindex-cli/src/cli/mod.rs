use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;
mod route;
mod tags;

#[cfg(test)]
mod tests;

pub use args::{RelatedArgs, ResolveArgs, SearchArgs, SuggestArgs, TrendingArgs};
pub use route::{RouteArgs, RouteCommand, ShareArgs};
pub use tags::{SnapshotArgs, TagsArgs, TagsCommand, ToggleTarget};

#[derive(Debug, Parser)]
#[command(name = "factindex")]
#[command(about = "Fact Index search routing and deep-link tools", version)]
pub struct Cli {
    /// Optional TOML config; environment variables take precedence.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Route(RouteArgs),
    Tags(TagsArgs),
    Credentials,
    Session,
    Search(SearchArgs),
    Resolve(ResolveArgs),
    Related(RelatedArgs),
    Trending(TrendingArgs),
    Suggest(SuggestArgs),
}
