// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by addons, the dispatcher, and the merge engine.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Language code for subtitle and audio tracks ("en", "jp", "fr", ...).
pub type LanguageCode = String;

/// Localized name variants of a title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeTitle {
    /// Romanized title, the primary variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romaji: Option<String>,
    /// English title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    /// Title in the original script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,
}

impl AnimeTitle {
    /// Title with only the romaji variant set.
    pub fn romaji(value: impl Into<String>) -> Self {
        Self {
            romaji: Some(value.into()),
            ..Self::default()
        }
    }

    /// Iterates over the populated, non-blank variants.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        [&self.romaji, &self.english, &self.native]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .filter(|v| !v.trim().is_empty())
    }

    /// True if no variant carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        self.variants().next().is_none()
    }
}

/// Classification of a title.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum AnimeType {
    #[serde(rename = "TV")]
    #[strum(serialize = "TV")]
    Tv,
    Movie,
    #[serde(alias = "OVA")]
    Ova,
    Special,
    #[serde(alias = "ONA")]
    Ona,
    Music,
}

/// Canonical media-metadata record.
///
/// Addons answer identity lookups with a partial `Anime` where any field may
/// be missing; the merge engine folds those partials into one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mal_id: Option<u64>,
    #[serde(rename = "aniListId", default, skip_serializing_if = "Option::is_none")]
    pub anilist_id: Option<u64>,
    #[serde(default)]
    pub title: AnimeTitle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_large: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub anime_type: Option<AnimeType>,
}

/// Streaming availability for one (title, season, episode) from one addon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingInfo {
    /// Subtitle languages available.
    #[serde(default)]
    pub subs: Vec<LanguageCode>,
    /// Audio languages available.
    #[serde(default)]
    pub sound_langs: Vec<LanguageCode>,
    /// Quality indicator, usually the pixel height (720, 1080).
    #[serde(default)]
    pub quality: u32,
    /// Raw HTML used to embed the player.
    #[serde(default)]
    pub player_html: String,
}

/// Ranking filter for top lists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TopFilter {
    Airing,
    Upcoming,
    ByPopularity,
    Favorite,
}

/// Parameters for a top-list query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "type")]
    pub anime_type: Option<AnimeType>,
    pub filter: Option<TopFilter>,
}

/// Airing status filter for searches.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SearchStatus {
    Airing,
    Complete,
    Upcoming,
}

/// Audience rating filter for searches.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Rating {
    G,
    Pg,
    Pg13,
    R17,
    R,
    Rx,
}

/// Sort field for searches.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SearchOrder {
    MalId,
    Title,
    StartDate,
    EndDate,
    Score,
    ScoredBy,
    Rank,
    Popularity,
    Members,
    Favorites,
    Type,
    Rating,
    Episodes,
}

/// Parameters for a free-text search.
///
/// `genres`, `genres_exclude` and `producers` are comma-separated lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub score: Option<f64>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub sfw: Option<bool>,
    pub genres: Option<String>,
    pub genres_exclude: Option<String>,
    pub producers: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub unapproved: Option<bool>,
    #[serde(rename = "type")]
    pub anime_type: Option<AnimeType>,
    pub status: Option<SearchStatus>,
    pub rating: Option<Rating>,
    pub order_by: Option<SearchOrder>,
}

impl SearchParams {
    /// Search for the given text with no other filters.
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Self::default()
        }
    }
}

/// Parameters for a streaming-info lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamingQuery {
    pub title: AnimeTitle,
    #[serde(rename = "aniListId")]
    pub anilist_id: Option<u64>,
    pub mal_id: Option<u64>,
    pub season: Option<String>,
    pub episode: Option<u32>,
}

/// Splits a comma-separated filter list into trimmed, non-empty entries.
pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Capability group an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CapabilityGroup {
    DataProvider,
    StreamingProvider,
}

/// A single dispatchable operation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum Operation {
    #[serde(rename = "get_top")]
    #[strum(serialize = "get_top")]
    GetTop,
    #[serde(rename = "get_by_id")]
    #[strum(serialize = "get_by_id")]
    GetById,
    #[serde(rename = "get_by_name")]
    #[strum(serialize = "get_by_name")]
    GetByName,
    #[serde(rename = "search")]
    #[strum(serialize = "search")]
    Search,
    #[serde(rename = "get_streaming_info")]
    #[strum(serialize = "get_streaming_info")]
    GetStreamingInfo,
}

impl Operation {
    /// Every operation of the data-provider group.
    pub const DATA: [Operation; 4] = [
        Operation::GetTop,
        Operation::GetById,
        Operation::GetByName,
        Operation::Search,
    ];

    /// Every operation of the streaming-provider group.
    pub const STREAMING: [Operation; 1] = [Operation::GetStreamingInfo];

    /// The capability group this operation belongs to.
    pub fn group(&self) -> CapabilityGroup {
        match self {
            Self::GetStreamingInfo => CapabilityGroup::StreamingProvider,
            _ => CapabilityGroup::DataProvider,
        }
    }
}
