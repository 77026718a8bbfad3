use clap::Args;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Page URL or query string to start from. Defaults to the base path.
    pub url: Option<String>,
    /// How many result pages to pull through the pager.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub pages: u32,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Page URL carrying `factId`, or a bare objectID.
    pub target: String,
}

#[derive(Debug, Args)]
pub struct RelatedArgs {
    pub object_id: String,
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct TrendingArgs {
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// What has been typed into the search box so far.
    pub prefix: String,
    /// Page URL the suggestion would be applied to. Defaults to the base path.
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub limit: Option<usize>,
}
