use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct RouteArgs {
    #[command(subcommand)]
    pub command: RouteCommand,
}

#[derive(Debug, Subcommand)]
pub enum RouteCommand {
    /// Decode a page URL into route and refinement state.
    Parse { url: String },
    /// Build the shareable URL for a filter state.
    Share(ShareArgs),
}

#[derive(Debug, Default, Args)]
pub struct ShareArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub query: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub category: Vec<String>,
    #[arg(long)]
    pub project: Vec<String>,
    #[arg(long)]
    pub tag0: Vec<String>,
    #[arg(long)]
    pub tag1: Vec<String>,
    /// Overrides the configured base path.
    #[arg(long)]
    pub base: Option<String>,
}
