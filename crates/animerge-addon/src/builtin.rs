// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in addon kinds.
//!
//! `static-catalog` serves a fixed set of records and streams declared
//! directly in the addon source:
//!
//! ```toml
//! [addon]
//! kind = "static-catalog"
//!
//! [config]
//! operations = ["get_by_id", "get_streaming_info"]   # optional, default all
//!
//! [[config.anime]]
//! malId = 5114
//! title = { romaji = "Hagane no Renkinjutsushi: Fullmetal Alchemist" }
//! genres = ["Action", "Drama"]
//!
//! [[config.streams]]
//! malId = 5114
//! episode = 1
//! subs = ["en"]
//! soundLangs = ["jp"]
//! quality = 1080
//! playerHtml = "<iframe src=\"https://player.example/fma/1\"></iframe>"
//! ```

use std::sync::Arc;

use animerge_core::types::{split_list, LanguageCode};
use animerge_core::{
    Anime, AnimeDataProvider, AnimeTitle, AnimeType, AnimergeError, CapabilityGroup,
    Operation, SearchParams, StreamingInfo, StreamingProvider, StreamingQuery, TopParams,
};
use async_trait::async_trait;
use serde::Deserialize;

use crate::addon::Addon;
use crate::loader::AddonFactory;
use crate::manifest::AddonManifest;

/// Kind string of the static catalog addon.
pub const STATIC_CATALOG_KIND: &str = "static-catalog";

/// Page size used when a query does not set `limit`.
pub const DEFAULT_PAGE_LIMIT: u32 = 25;

/// `[config]` table of a static-catalog source.
///
/// Every table in it rejects unknown keys, so a misspelled field fails the
/// load instead of leaving a record without ids.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticCatalogConfig {
    /// Operations to declare. All five when absent.
    #[serde(default)]
    pub operations: Option<Vec<Operation>>,
    #[serde(default)]
    pub anime: Vec<CatalogAnime>,
    #[serde(default)]
    pub streams: Vec<StaticStream>,
}

/// Title variants of a catalog entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogTitle {
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
}

impl From<CatalogTitle> for AnimeTitle {
    fn from(title: CatalogTitle) -> Self {
        AnimeTitle {
            romaji: title.romaji,
            english: title.english,
            native: title.native,
        }
    }
}

/// One `[[config.anime]]` record, in the addon wire field names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CatalogAnime {
    #[serde(default)]
    pub mal_id: Option<u64>,
    #[serde(rename = "aniListId", default)]
    pub anilist_id: Option<u64>,
    #[serde(default)]
    pub title: CatalogTitle,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub cover_image_large: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(rename = "type", default)]
    pub anime_type: Option<AnimeType>,
}

impl From<CatalogAnime> for Anime {
    fn from(entry: CatalogAnime) -> Self {
        Anime {
            mal_id: entry.mal_id,
            anilist_id: entry.anilist_id,
            title: entry.title.into(),
            description: entry.description,
            episodes: entry.episodes,
            average_score: entry.average_score,
            cover_image_large: entry.cover_image_large,
            genres: entry.genres,
            anime_type: entry.anime_type,
        }
    }
}

/// One `[[config.streams]]` entry of a static catalog.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StaticStream {
    #[serde(default)]
    pub title: CatalogTitle,
    #[serde(default)]
    pub mal_id: Option<u64>,
    #[serde(rename = "aniListId", default)]
    pub anilist_id: Option<u64>,
    /// Season this entry is for; matches any season when unset.
    #[serde(default)]
    pub season: Option<String>,
    /// Episode this entry is for; matches any episode when unset.
    #[serde(default)]
    pub episode: Option<u32>,
    #[serde(default)]
    pub subs: Vec<LanguageCode>,
    #[serde(default)]
    pub sound_langs: Vec<LanguageCode>,
    #[serde(default)]
    pub quality: u32,
    #[serde(default)]
    pub player_html: String,
}

/// A stream entry resolved for lookup.
#[derive(Debug, Clone)]
struct CatalogStream {
    title: AnimeTitle,
    mal_id: Option<u64>,
    anilist_id: Option<u64>,
    season: Option<String>,
    episode: Option<u32>,
    info: StreamingInfo,
}

impl From<StaticStream> for CatalogStream {
    fn from(stream: StaticStream) -> Self {
        CatalogStream {
            title: stream.title.into(),
            mal_id: stream.mal_id,
            anilist_id: stream.anilist_id,
            season: stream.season,
            episode: stream.episode,
            info: StreamingInfo {
                subs: stream.subs,
                sound_langs: stream.sound_langs,
                quality: stream.quality,
                player_html: stream.player_html,
            },
        }
    }
}

/// Factory for [`STATIC_CATALOG_KIND`] addons.
#[derive(Debug, Default)]
pub struct StaticCatalogFactory;

impl AddonFactory for StaticCatalogFactory {
    fn kind(&self) -> &str {
        STATIC_CATALOG_KIND
    }

    fn create(
        &self,
        manifest: AddonManifest,
        config: &toml::Table,
    ) -> Result<Addon, AnimergeError> {
        let config: StaticCatalogConfig = toml::Value::Table(config.clone())
            .try_into()
            .map_err(|e| {
                AnimergeError::InvalidSource(format!(
                    "addon '{}': invalid {STATIC_CATALOG_KIND} config: {e}",
                    manifest.name
                ))
            })?;

        Ok(StaticCatalog::new(config).into_addon(manifest))
    }
}

/// In-memory catalog implementing both capability groups.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    operations: Vec<Operation>,
    anime: Vec<Anime>,
    streams: Vec<CatalogStream>,
}

impl StaticCatalog {
    pub fn new(config: StaticCatalogConfig) -> Self {
        let operations = config.operations.unwrap_or_else(|| {
            Operation::DATA
                .into_iter()
                .chain(Operation::STREAMING)
                .collect()
        });
        Self {
            operations,
            anime: config.anime.into_iter().map(Anime::from).collect(),
            streams: config.streams.into_iter().map(CatalogStream::from).collect(),
        }
    }

    /// Wrap the catalog in an addon, attaching only the groups it declares
    /// operations for.
    pub fn into_addon(self, manifest: AddonManifest) -> Addon {
        let has_data = self.declares(CapabilityGroup::DataProvider);
        let has_streaming = self.declares(CapabilityGroup::StreamingProvider);
        let catalog = Arc::new(self);

        let mut addon = Addon::new(manifest);
        if has_data {
            addon = addon.with_data_provider(Arc::clone(&catalog) as Arc<dyn AnimeDataProvider>);
        }
        if has_streaming {
            addon = addon.with_streaming_provider(catalog as Arc<dyn StreamingProvider>);
        }
        addon
    }

    fn declares(&self, group: CapabilityGroup) -> bool {
        self.operations.iter().any(|op| op.group() == group)
    }

    fn declared_in(&self, group: CapabilityGroup) -> Vec<Operation> {
        self.operations
            .iter()
            .copied()
            .filter(|op| op.group() == group)
            .collect()
    }
}

#[async_trait]
impl AnimeDataProvider for StaticCatalog {
    fn operations(&self) -> Vec<Operation> {
        self.declared_in(CapabilityGroup::DataProvider)
    }

    async fn get_top(&self, params: &TopParams) -> Result<Vec<Anime>, AnimergeError> {
        let matching = self
            .anime
            .iter()
            .filter(|a| params.anime_type.is_none() || a.anime_type == params.anime_type);
        Ok(page(matching, params.page, params.limit))
    }

    async fn get_anime_by_id(
        &self,
        mal_id: Option<u64>,
        anilist_id: Option<u64>,
    ) -> Result<Option<Anime>, AnimergeError> {
        Ok(self
            .anime
            .iter()
            .find(|a| ids_match(a.mal_id, a.anilist_id, mal_id, anilist_id))
            .cloned())
    }

    async fn get_anime_by_name(
        &self,
        title: &AnimeTitle,
    ) -> Result<Option<Anime>, AnimergeError> {
        Ok(self
            .anime
            .iter()
            .find(|a| titles_match(&a.title, title))
            .cloned())
    }

    async fn search_anime(&self, params: &SearchParams) -> Result<Vec<Anime>, AnimergeError> {
        let needle = params
            .q
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        let min_score = params.min_score.or(params.score);
        let include = split_list(params.genres.as_deref());
        let exclude = split_list(params.genres_exclude.as_deref());

        let matching = self.anime.iter().filter(|a| {
            if let Some(needle) = &needle {
                if !a
                    .title
                    .variants()
                    .any(|v| v.to_lowercase().contains(needle.as_str()))
                {
                    return false;
                }
            }
            if params.anime_type.is_some() && a.anime_type != params.anime_type {
                return false;
            }
            if let Some(min) = min_score {
                if a.average_score.is_none_or(|s| s < min) {
                    return false;
                }
            }
            if let Some(max) = params.max_score {
                if a.average_score.is_none_or(|s| s > max) {
                    return false;
                }
            }
            include.iter().all(|g| has_genre(a, g)) && !exclude.iter().any(|g| has_genre(a, g))
        });

        Ok(page(matching, params.page, params.limit))
    }
}

#[async_trait]
impl StreamingProvider for StaticCatalog {
    fn operations(&self) -> Vec<Operation> {
        self.declared_in(CapabilityGroup::StreamingProvider)
    }

    async fn get_streaming_info(
        &self,
        query: &StreamingQuery,
    ) -> Result<Option<StreamingInfo>, AnimergeError> {
        let found = self.streams.iter().find(|s| {
            let identified = ids_match(s.mal_id, s.anilist_id, query.mal_id, query.anilist_id)
                || titles_match(&s.title, &query.title);
            let season_ok = match (&s.season, &query.season) {
                (None, _) => true,
                (Some(declared), Some(asked)) => declared.trim().eq_ignore_ascii_case(asked.trim()),
                (Some(_), None) => false,
            };
            let episode_ok = s.episode.is_none() || s.episode == query.episode;
            identified && season_ok && episode_ok
        });
        Ok(found.map(|s| s.info.clone()))
    }
}

fn ids_match(
    mal_id: Option<u64>,
    anilist_id: Option<u64>,
    want_mal: Option<u64>,
    want_anilist: Option<u64>,
) -> bool {
    (want_mal.is_some() && mal_id == want_mal)
        || (want_anilist.is_some() && anilist_id == want_anilist)
}

fn titles_match(have: &AnimeTitle, want: &AnimeTitle) -> bool {
    have.variants().any(|h| {
        want.variants()
            .any(|w| h.trim().to_lowercase() == w.trim().to_lowercase())
    })
}

fn has_genre(anime: &Anime, genre: &str) -> bool {
    anime.genres.iter().any(|g| g.eq_ignore_ascii_case(genre))
}

/// 1-based paging; zero page or limit fall back to the defaults.
fn page<'a>(
    records: impl Iterator<Item = &'a Anime>,
    page: Option<u32>,
    limit: Option<u32>,
) -> Vec<Anime> {
    let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_LIMIT) as usize;
    let page = page.filter(|p| *p > 0).unwrap_or(1) as usize;
    records
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::LOADER_VERSION;

    const CATALOG: &str = r#"
[[anime]]
malId = 5114
aniListId = 5114
title = { romaji = "Hagane no Renkinjutsushi: Fullmetal Alchemist", english = "Fullmetal Alchemist: Brotherhood" }
averageScore = 9.1
genres = ["Action", "Drama", "Fantasy"]
type = "TV"

[[anime]]
malId = 52991
title = { romaji = "Sousou no Frieren", english = "Frieren: Beyond Journey's End" }
averageScore = 9.3
genres = ["Adventure", "Drama", "Fantasy"]
type = "TV"

[[anime]]
malId = 199
title = { romaji = "Sen to Chihiro no Kamikakushi", english = "Spirited Away" }
averageScore = 8.8
genres = ["Adventure", "Fantasy"]
type = "Movie"

[[streams]]
malId = 52991
season = "1"
episode = 1
subs = ["en", "fr"]
soundLangs = ["jp"]
quality = 1080
playerHtml = "<iframe src=\"https://player.example/frieren/1\"></iframe>"

[[streams]]
title = { english = "Spirited Away" }
subs = ["en"]
soundLangs = ["jp", "en"]
quality = 720
playerHtml = "<iframe></iframe>"
"#;

    fn catalog() -> StaticCatalog {
        let table: toml::Table = toml::from_str(CATALOG).unwrap();
        let config: StaticCatalogConfig = toml::Value::Table(table).try_into().unwrap();
        StaticCatalog::new(config)
    }

    fn manifest() -> AddonManifest {
        AddonManifest::new("local", "1.0.0", LOADER_VERSION)
    }

    #[test]
    fn factory_declares_every_operation_by_default() {
        let table: toml::Table = toml::from_str(CATALOG).unwrap();
        let addon = StaticCatalogFactory.create(manifest(), &table).unwrap();
        assert_eq!(addon.operations().count(), 5);
    }

    #[test]
    fn operations_list_restricts_groups() {
        let table: toml::Table = toml::from_str(r#"operations = ["get_by_id"]"#).unwrap();
        let addon = StaticCatalogFactory.create(manifest(), &table).unwrap();
        assert_eq!(addon.operations().collect::<Vec<_>>(), vec![Operation::GetById]);
        assert!(addon.streaming_provider().is_none());
        assert!(addon.data_provider().is_some());
    }

    #[test]
    fn unknown_config_key_is_rejected() {
        let table: toml::Table = toml::from_str("animes = []").unwrap();
        let err = StaticCatalogFactory.create(manifest(), &table).unwrap_err();
        assert!(matches!(err, AnimergeError::InvalidSource(_)));
        assert!(err.to_string().contains("local"));
    }

    #[test]
    fn misspelled_record_key_is_rejected() {
        let table: toml::Table = toml::from_str("[[anime]]\nmal_id = 5114\n").unwrap();
        let err = StaticCatalogFactory.create(manifest(), &table).unwrap_err();
        assert!(matches!(err, AnimergeError::InvalidSource(_)));
        assert!(err.to_string().contains("mal_id"));
    }

    #[test]
    fn misspelled_stream_and_title_keys_are_rejected() {
        for source in [
            "[[streams]]\nmalId = 1\nsound_langs = [\"jp\"]\n",
            "[[anime]]\ntitle = { romanji = \"Frieren\" }\n",
        ] {
            let table: toml::Table = toml::from_str(source).unwrap();
            let err = StaticCatalogFactory.create(manifest(), &table).unwrap_err();
            assert!(matches!(err, AnimergeError::InvalidSource(_)), "{source}");
        }
    }

    #[tokio::test]
    async fn top_filters_by_type_and_pages() {
        let catalog = catalog();
        let tv = catalog
            .get_top(&TopParams {
                anime_type: Some(AnimeType::Tv),
                ..TopParams::default()
            })
            .await
            .unwrap();
        assert_eq!(tv.len(), 2);

        let second = catalog
            .get_top(&TopParams {
                page: Some(2),
                limit: Some(2),
                ..TopParams::default()
            })
            .await
            .unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].mal_id, Some(199));
    }

    #[tokio::test]
    async fn by_id_matches_either_identifier() {
        let catalog = catalog();
        let by_mal = catalog.get_anime_by_id(Some(52991), None).await.unwrap();
        assert_eq!(by_mal.unwrap().mal_id, Some(52991));

        let by_anilist = catalog.get_anime_by_id(None, Some(5114)).await.unwrap();
        assert_eq!(by_anilist.unwrap().mal_id, Some(5114));

        assert!(catalog.get_anime_by_id(Some(1), Some(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn by_name_is_case_insensitive_over_variants() {
        let found = catalog()
            .get_anime_by_name(&AnimeTitle {
                english: Some("spirited away".to_string()),
                ..AnimeTitle::default()
            })
            .await
            .unwrap();
        assert_eq!(found.unwrap().mal_id, Some(199));
    }

    #[tokio::test]
    async fn search_applies_text_score_and_genre_filters() {
        let catalog = catalog();

        let text = catalog.search_anime(&SearchParams::query("FRIEREN")).await.unwrap();
        assert_eq!(text.len(), 1);

        let scored = catalog
            .search_anime(&SearchParams {
                min_score: Some(9.0),
                ..SearchParams::default()
            })
            .await
            .unwrap();
        assert_eq!(scored.len(), 2);

        let genres = catalog
            .search_anime(&SearchParams {
                genres: Some("fantasy, adventure".to_string()),
                genres_exclude: Some("Drama".to_string()),
                ..SearchParams::default()
            })
            .await
            .unwrap();
        assert_eq!(genres.len(), 1);
        assert_eq!(genres[0].mal_id, Some(199));
    }

    #[tokio::test]
    async fn streaming_respects_season_and_episode() {
        let catalog = catalog();
        let query = StreamingQuery {
            mal_id: Some(52991),
            season: Some("1".to_string()),
            episode: Some(1),
            ..StreamingQuery::default()
        };
        let info = catalog.get_streaming_info(&query).await.unwrap().unwrap();
        assert_eq!(info.quality, 1080);
        assert_eq!(info.sound_langs, vec!["jp"]);

        let other_episode = StreamingQuery {
            episode: Some(2),
            ..query
        };
        assert!(catalog.get_streaming_info(&other_episode).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn streaming_matches_by_title() {
        let query = StreamingQuery {
            title: AnimeTitle {
                english: Some("Spirited Away".to_string()),
                ..AnimeTitle::default()
            },
            episode: Some(1),
            ..StreamingQuery::default()
        };
        let info = catalog().get_streaming_info(&query).await.unwrap().unwrap();
        assert_eq!(info.quality, 720);
    }
}
