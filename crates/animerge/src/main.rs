// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! animerge - query anime metadata and streams across pluggable addons.
//!
//! This is the binary entry point. Results are printed to stdout as JSON;
//! logs go to stderr.

mod load;
mod query;

use std::path::PathBuf;

use animerge_core::types::{Rating, SearchOrder, SearchStatus, TopFilter};
use animerge_core::AnimeType;
use animerge_engine::AggregationEngine;
use clap::{Args, Parser, Subcommand};

/// animerge - query anime metadata and streams across pluggable addons.
#[derive(Parser, Debug)]
#[command(name = "animerge", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Load an addon source file, in addition to `addons.sources`.
    #[arg(long = "addon", value_name = "PATH", global = true)]
    addons: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List loaded addons and the operations they serve.
    Addons,
    /// Ranked list of titles from every addon.
    Top {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long = "type")]
        anime_type: Option<AnimeType>,
        #[arg(long)]
        filter: Option<TopFilter>,
    },
    /// Merged record for a MyAnimeList and/or AniList id.
    Get {
        #[arg(long)]
        mal_id: Option<u64>,
        #[arg(long)]
        anilist_id: Option<u64>,
    },
    /// Merged record for a title.
    Title(TitleArgs),
    /// Free-text search across every addon.
    Search(SearchArgs),
    /// Streaming availability for one episode.
    Stream {
        #[command(flatten)]
        title: TitleArgs,
        #[arg(long)]
        mal_id: Option<u64>,
        #[arg(long)]
        anilist_id: Option<u64>,
        #[arg(long)]
        season: Option<String>,
        #[arg(long)]
        episode: Option<u32>,
    },
}

/// Filters of the `search` subcommand.
#[derive(Args, Debug, Clone, Default)]
struct SearchArgs {
    /// Text to look for in titles.
    q: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long = "type")]
    anime_type: Option<AnimeType>,
    /// Exact score to match; used as a lower bound by the built-in catalog.
    #[arg(long)]
    score: Option<f64>,
    #[arg(long)]
    min_score: Option<f64>,
    #[arg(long)]
    max_score: Option<f64>,
    /// Comma-separated genres that must all be present.
    #[arg(long)]
    genres: Option<String>,
    /// Comma-separated genres that must not be present.
    #[arg(long)]
    genres_exclude: Option<String>,
    /// Comma-separated producer ids.
    #[arg(long)]
    producers: Option<String>,
    /// Earliest start date, `YYYY-MM-DD`.
    #[arg(long)]
    start_date: Option<String>,
    /// Latest end date, `YYYY-MM-DD`.
    #[arg(long)]
    end_date: Option<String>,
    #[arg(long)]
    status: Option<SearchStatus>,
    #[arg(long)]
    rating: Option<Rating>,
    #[arg(long)]
    order_by: Option<SearchOrder>,
    /// Exclude adult titles.
    #[arg(long)]
    sfw: bool,
    /// Include entries not yet approved upstream.
    #[arg(long)]
    unapproved: bool,
}

/// Title variants accepted on the command line.
#[derive(Args, Debug, Clone, Default)]
struct TitleArgs {
    #[arg(long)]
    romaji: Option<String>,
    #[arg(long)]
    english: Option<String>,
    #[arg(long)]
    native: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => animerge_config::load_and_validate_path(path),
        None => animerge_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            animerge_config::render_errors(errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.engine.log_level);

    let engine = AggregationEngine::new().with_addon_timeout(config.dispatch.addon_timeout());

    let sources: Vec<PathBuf> = config
        .addons
        .sources
        .iter()
        .chain(cli.addons.iter())
        .cloned()
        .collect();
    match load::load_sources(&engine, &sources, config.addons.strict).await {
        Ok(summary) => {
            tracing::debug!(
                loaded = summary.loaded,
                rejected = summary.rejected.len(),
                "addon sources processed"
            );
        }
        Err(e) => {
            eprintln!("animerge: {e}");
            std::process::exit(1);
        }
    }

    match query::run(&engine, cli.command).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("animerge: {e}");
            std::process::exit(1);
        }
    }
}

/// Initialize the tracing subscriber. Logs go to stderr so stdout stays JSON.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "animerge={log_level},animerge_addon={log_level},animerge_engine={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_addon_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "animerge",
            "get",
            "--mal-id",
            "5114",
            "--addon",
            "a.toml",
            "--addon",
            "b.toml",
        ])
        .unwrap();
        assert_eq!(cli.addons, vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]);
        assert!(matches!(
            cli.command,
            Commands::Get {
                mal_id: Some(5114),
                anilist_id: None
            }
        ));
    }

    #[test]
    fn parses_enums_case_insensitively() {
        let cli = Cli::try_parse_from(["animerge", "top", "--type", "movie", "--filter", "airing"])
            .unwrap();
        match cli.command {
            Commands::Top {
                anime_type, filter, ..
            } => {
                assert_eq!(anime_type, Some(AnimeType::Movie));
                assert_eq!(filter, Some(TopFilter::Airing));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn search_accepts_every_filter() {
        let cli = Cli::try_parse_from([
            "animerge",
            "search",
            "frieren",
            "--score",
            "8",
            "--producers",
            "17,44",
            "--start-date",
            "2023-01-01",
            "--end-date",
            "2024-12-31",
            "--unapproved",
            "--order-by",
            "scored_by",
        ])
        .unwrap();
        let args = match cli.command {
            Commands::Search(args) => args,
            other => panic!("unexpected command {other:?}"),
        };
        assert_eq!(args.q.as_deref(), Some("frieren"));
        assert_eq!(args.score, Some(8.0));
        assert_eq!(args.producers.as_deref(), Some("17,44"));
        assert_eq!(args.start_date.as_deref(), Some("2023-01-01"));
        assert_eq!(args.end_date.as_deref(), Some("2024-12-31"));
        assert!(args.unapproved);
        assert!(!args.sfw);
        assert_eq!(args.order_by, Some(SearchOrder::ScoredBy));
    }
}
