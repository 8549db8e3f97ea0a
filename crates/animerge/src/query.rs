// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand execution against the engine.

use animerge_core::{
    AnimeTitle, AnimergeError, Operation, SearchParams, StreamingQuery, TopParams,
};
use animerge_engine::AggregationEngine;
use serde::Serialize;

use crate::{Commands, SearchArgs, TitleArgs};

/// One row of `animerge addons`.
#[derive(Debug, Serialize)]
struct AddonListing {
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    operations: Vec<Operation>,
}

impl From<TitleArgs> for AnimeTitle {
    fn from(args: TitleArgs) -> Self {
        AnimeTitle {
            romaji: args.romaji,
            english: args.english,
            native: args.native,
        }
    }
}

impl From<SearchArgs> for SearchParams {
    fn from(args: SearchArgs) -> Self {
        SearchParams {
            q: args.q,
            page: args.page,
            limit: args.limit,
            score: args.score,
            min_score: args.min_score,
            max_score: args.max_score,
            sfw: args.sfw.then_some(true),
            genres: args.genres,
            genres_exclude: args.genres_exclude,
            producers: args.producers,
            start_date: args.start_date,
            end_date: args.end_date,
            unapproved: args.unapproved.then_some(true),
            anime_type: args.anime_type,
            status: args.status,
            rating: args.rating,
            order_by: args.order_by,
        }
    }
}

/// Run one subcommand and render its result as pretty JSON.
pub async fn run(engine: &AggregationEngine, command: Commands) -> Result<String, AnimergeError> {
    match command {
        Commands::Addons => {
            let listing: Vec<AddonListing> = engine
                .registry()
                .snapshot()
                .iter()
                .map(|addon| {
                    let manifest = addon.manifest();
                    AddonListing {
                        name: manifest.name.clone(),
                        version: manifest.version.clone(),
                        description: manifest.description.clone(),
                        author: manifest.author.clone(),
                        operations: addon.operations().collect(),
                    }
                })
                .collect();
            to_json(&listing)
        }
        Commands::Top {
            page,
            limit,
            anime_type,
            filter,
        } => {
            let params = TopParams {
                page,
                limit,
                anime_type,
                filter,
            };
            to_json(&engine.get_top(&params).await)
        }
        Commands::Get { mal_id, anilist_id } => {
            to_json(&engine.get_anime_by_id(mal_id, anilist_id).await?)
        }
        Commands::Title(title) => to_json(&engine.get_anime_by_name(&title.into()).await?),
        Commands::Search(args) => to_json(&engine.search_anime(&args.into()).await),
        Commands::Stream {
            title,
            mal_id,
            anilist_id,
            season,
            episode,
        } => {
            let query = StreamingQuery {
                title: title.into(),
                anilist_id,
                mal_id,
                season,
                episode,
            };
            to_json(&engine.get_streaming_info(&query).await?)
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AnimergeError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AnimergeError::Internal(format!("failed to render JSON: {e}")))
}
