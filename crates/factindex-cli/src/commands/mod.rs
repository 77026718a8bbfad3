use std::path::Path;

use anyhow::{Context, Result};
use factindex_core::credentials::CredentialReport;
use factindex_core::recommend::RecommendQuery;
use factindex_core::routing::{
    Location, build_shareable_url, fact_id, parse_route, to_ui_state, window_title,
};
use factindex_core::{AppConfig, FactIndex, create_session};
use serde::Serialize;

use crate::cli::{Commands, RouteCommand, TagsCommand};

mod handlers;
mod support;

use self::handlers::{handle_resolve, handle_search, handle_share, handle_suggest, handle_tags};
use self::support::print_json;

#[derive(Debug, Serialize)]
struct ParsedRoute {
    route: factindex_core::RouteState,
    state: factindex_core::RefinementState,
    fact_id: Option<String>,
    title: String,
    canonical_url: String,
}

pub(crate) fn run(config_path: Option<&Path>, command: Commands) -> Result<()> {
    let config = AppConfig::load(config_path).context("failed to load configuration")?;
    run_with_config(&config, command)
}

fn run_with_config(config: &AppConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Route(args) => match args.command {
            RouteCommand::Parse { url } => print_json(&parse_url(&url))?,
            RouteCommand::Share(args) => println!("{}", handle_share(config, args)),
        },
        Commands::Tags(args) => match args.command {
            TagsCommand::Toggle { snapshot, target } => {
                print_json(&handle_tags(&snapshot, Some(&target))?)?;
            }
            TagsCommand::Groups { snapshot } => print_json(&handle_tags(&snapshot, None)?)?,
        },
        Commands::Credentials => {
            let report: CredentialReport = config.search.credential_report();
            print_json(&report)?;
        }
        Commands::Session => print_json(&create_session())?,
        Commands::Search(args) => {
            let index = open_index(config)?;
            print_json(&handle_search(&index, args.url.as_deref(), args.pages))?;
        }
        Commands::Resolve(args) => {
            let index = open_index(config)?;
            print_json(&handle_resolve(&index, &args.target))?;
        }
        Commands::Related(args) => {
            let index = open_index(config)?;
            let query = RecommendQuery::related(args.object_id).with_max(args.limit);
            print_json(&index.recommendations(&query))?;
        }
        Commands::Trending(args) => {
            let index = open_index(config)?;
            let query = RecommendQuery::trending().with_max(args.limit);
            print_json(&index.recommendations(&query))?;
        }
        Commands::Suggest(args) => {
            let index = open_index(config)?;
            print_json(&handle_suggest(&index, &args))?;
        }
    }
    Ok(())
}

fn open_index(config: &AppConfig) -> Result<FactIndex> {
    FactIndex::new(config.clone(), create_session()).context("failed to create search client")
}

fn parse_url(url: &str) -> ParsedRoute {
    let location = Location::parse(url);
    let route = parse_route(&location.search);
    let state = to_ui_state(&route);
    ParsedRoute {
        fact_id: fact_id(&location.search).map(ToString::to_string),
        title: window_title(&route),
        canonical_url: build_shareable_url(&state, &location.pathname),
        route,
        state,
    }
}
