use super::*;
use clap::Parser;

#[test]
fn route_share_collects_repeated_filters() {
    let cli = Cli::try_parse_from([
        "factindex",
        "route",
        "share",
        "--query",
        "ai workflows",
        "--category",
        "Work Style",
        "--project",
        "Alpha",
        "--project",
        "Beta",
    ])
    .expect("parse");
    match cli.command {
        Commands::Route(RouteArgs {
            command: RouteCommand::Share(args),
        }) => {
            assert_eq!(args.query.as_deref(), Some("ai workflows"));
            assert_eq!(args.project, vec!["Alpha", "Beta"]);
            assert!(args.tag1.is_empty());
        }
        _ => panic!("expected route share command"),
    }
}

#[test]
fn tags_toggle_requires_exactly_one_target() {
    let base = ["factindex", "tags", "toggle", "--snapshot", "facets.json"];
    assert!(Cli::try_parse_from(base).is_err());
    assert!(
        Cli::try_parse_from(base.into_iter().chain(["--parent", "Events", "--child", "Events > Meetup"]))
            .is_err()
    );

    let cli = Cli::try_parse_from(base.into_iter().chain(["--parent", "Events"])).expect("parse");
    match cli.command {
        Commands::Tags(TagsArgs {
            command: TagsCommand::Toggle { snapshot, target },
        }) => {
            assert_eq!(snapshot.url, "/");
            assert_eq!(target.parent.as_deref(), Some("Events"));
            assert_eq!(target.child, None);
        }
        _ => panic!("expected tags toggle command"),
    }
}

#[test]
fn search_pages_are_bounded() {
    assert!(Cli::try_parse_from(["factindex", "search", "--pages", "0"]).is_err());
    let cli = Cli::try_parse_from(["factindex", "search", "?query=rust", "--pages", "3"])
        .expect("parse");
    match cli.command {
        Commands::Search(args) => {
            assert_eq!(args.url.as_deref(), Some("?query=rust"));
            assert_eq!(args.pages, 3);
        }
        _ => panic!("expected search command"),
    }
}

#[test]
fn config_flag_is_global() {
    let cli = Cli::try_parse_from(["factindex", "credentials", "--config", "factindex.toml"])
        .expect("parse");
    assert_eq!(
        cli.config.as_deref().and_then(|path| path.to_str()),
        Some("factindex.toml")
    );
    assert!(matches!(cli.command, Commands::Credentials));
}

#[test]
fn suggest_and_trending_parse_limits() {
    let cli = Cli::try_parse_from(["factindex", "suggest", "ship", "--limit", "3", "--url", "/?tag0=Events"])
        .expect("parse");
    match cli.command {
        Commands::Suggest(args) => {
            assert_eq!(args.prefix, "ship");
            assert_eq!(args.limit, Some(3));
            assert_eq!(args.url.as_deref(), Some("/?tag0=Events"));
        }
        _ => panic!("expected suggest command"),
    }

    let cli = Cli::try_parse_from(["factindex", "trending"]).expect("parse");
    assert!(matches!(cli.command, Commands::Trending(TrendingArgs { limit: None })));
    assert!(Cli::try_parse_from(["factindex", "suggest"]).is_err());
}
