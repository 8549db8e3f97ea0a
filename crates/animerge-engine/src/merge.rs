// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merge engine: folds partial records from several addons into one.
//!
//! Inputs arrive in registry order. Every scalar keeps the first non-empty
//! value; genres are unioned. Absent, empty-string, zero and NaN values all
//! count as "not provided" so a later addon can fill them in.

use std::collections::HashSet;

use animerge_core::Anime;

/// Merge partial records in order.
///
/// Returns `None` only when every input is `None`. A single `Some` with no
/// populated fields still yields `Some` (an empty record).
pub fn merge_anime<I>(partials: I) -> Option<Anime>
where
    I: IntoIterator<Item = Option<Anime>>,
{
    let mut merged: Option<Anime> = None;
    let mut seen_genres: HashSet<String> = HashSet::new();

    for partial in partials.into_iter().flatten() {
        let target = merged.get_or_insert_with(Anime::default);
        fold_into(target, partial, &mut seen_genres);
    }

    merged
}

fn fold_into(target: &mut Anime, partial: Anime, seen_genres: &mut HashSet<String>) {
    fill_id(&mut target.mal_id, partial.mal_id);
    fill_id(&mut target.anilist_id, partial.anilist_id);
    fill_text(&mut target.title.romaji, partial.title.romaji);
    fill_text(&mut target.title.english, partial.title.english);
    fill_text(&mut target.title.native, partial.title.native);
    fill_text(&mut target.description, partial.description);
    if target.episodes.is_none_or(|e| e == 0) && partial.episodes.is_some_and(|e| e > 0) {
        target.episodes = partial.episodes;
    }
    if !is_score(target.average_score) && is_score(partial.average_score) {
        target.average_score = partial.average_score;
    }
    fill_text(&mut target.cover_image_large, partial.cover_image_large);
    if target.anime_type.is_none() {
        target.anime_type = partial.anime_type;
    }

    for genre in partial.genres {
        let key = genre.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        if seen_genres.insert(key) {
            target.genres.push(genre);
        }
    }
}

fn fill_id(slot: &mut Option<u64>, candidate: Option<u64>) {
    if slot.is_none_or(|v| v == 0) && candidate.is_some_and(|v| v != 0) {
        *slot = candidate;
    }
}

fn fill_text(slot: &mut Option<String>, candidate: Option<String>) {
    let empty = slot.as_deref().is_none_or(str::is_empty);
    if empty && candidate.as_deref().is_some_and(|v| !v.is_empty()) {
        *slot = candidate;
    }
}

fn is_score(value: Option<f64>) -> bool {
    value.is_some_and(|v| v != 0.0 && !v.is_nan())
}

#[cfg(test)]
mod tests {
    use animerge_core::{AnimeTitle, AnimeType};
    use proptest::prelude::*;

    use super::*;

    fn partial(romaji: Option<&str>, episodes: Option<u32>, genres: &[&str]) -> Anime {
        Anime {
            title: AnimeTitle {
                romaji: romaji.map(str::to_string),
                ..AnimeTitle::default()
            },
            episodes,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..Anime::default()
        }
    }

    #[test]
    fn all_absent_is_absent() {
        assert_eq!(merge_anime(vec![None, None]), None);
        assert_eq!(merge_anime(Vec::new()), None);
    }

    #[test]
    fn single_empty_record_is_present() {
        assert_eq!(
            merge_anime(vec![None, Some(Anime::default())]),
            Some(Anime::default())
        );
    }

    #[test]
    fn first_non_empty_value_wins() {
        let a = partial(Some("Frieren"), None, &[]);
        let b = partial(Some("Sousou no Frieren"), Some(28), &[]);

        let ab = merge_anime(vec![Some(a.clone()), Some(b.clone())]).unwrap();
        assert_eq!(ab.title.romaji.as_deref(), Some("Frieren"));
        assert_eq!(ab.episodes, Some(28));

        let ba = merge_anime(vec![Some(b), Some(a)]).unwrap();
        assert_eq!(ba.title.romaji.as_deref(), Some("Sousou no Frieren"));
        assert_eq!(ba.episodes, Some(28));
    }

    #[test]
    fn empty_and_zero_values_do_not_block_later_ones() {
        let a = Anime {
            mal_id: Some(0),
            description: Some(String::new()),
            episodes: Some(0),
            average_score: Some(0.0),
            ..Anime::default()
        };
        let b = Anime {
            mal_id: Some(52991),
            description: Some("An elf mage outlives her party.".to_string()),
            episodes: Some(28),
            average_score: Some(9.3),
            anime_type: Some(AnimeType::Tv),
            ..Anime::default()
        };

        let merged = merge_anime(vec![Some(a), Some(b)]).unwrap();
        assert_eq!(merged.mal_id, Some(52991));
        assert_eq!(merged.episodes, Some(28));
        assert_eq!(merged.average_score, Some(9.3));
        assert_eq!(merged.anime_type, Some(AnimeType::Tv));
        assert!(merged.description.is_some_and(|d| d.starts_with("An elf")));
    }

    #[test]
    fn genres_union_case_insensitively_keeping_first_spelling() {
        let a = partial(None, None, &["Action", "drama", " "]);
        let b = partial(None, None, &["Drama", "ACTION", "Fantasy", ""]);

        let merged = merge_anime(vec![Some(a), Some(b)]).unwrap();
        assert_eq!(merged.genres, vec!["Action", "drama", "Fantasy"]);
    }

    fn arb_partial() -> impl Strategy<Value = Option<Anime>> {
        proptest::option::of(
            (
                proptest::option::of(0u64..5),
                proptest::option::of("[a-c]{0,2}"),
                proptest::option::of(0u32..3),
                proptest::collection::vec("[a-cA-C]{0,2}", 0..4),
            )
                .prop_map(|(mal_id, romaji, episodes, genres)| Anime {
                    mal_id,
                    title: AnimeTitle {
                        romaji,
                        ..AnimeTitle::default()
                    },
                    episodes,
                    genres,
                    ..Anime::default()
                }),
        )
    }

    proptest! {
        #[test]
        fn merge_is_deterministic(inputs in proptest::collection::vec(arb_partial(), 0..6)) {
            prop_assert_eq!(merge_anime(inputs.clone()), merge_anime(inputs));
        }

        #[test]
        fn absence_only_when_every_input_absent(inputs in proptest::collection::vec(arb_partial(), 0..6)) {
            let any_present = inputs.iter().any(Option::is_some);
            prop_assert_eq!(merge_anime(inputs).is_some(), any_present);
        }

        #[test]
        fn merged_id_is_first_non_zero(inputs in proptest::collection::vec(arb_partial(), 1..6)) {
            let expected = inputs
                .iter()
                .flatten()
                .find_map(|a| a.mal_id.filter(|id| *id != 0));
            if let Some(merged) = merge_anime(inputs) {
                match expected {
                    Some(id) => prop_assert_eq!(merged.mal_id, Some(id)),
                    None => prop_assert!(merged.mal_id.is_none_or(|id| id == 0)),
                }
            }
        }

        #[test]
        fn genres_have_no_case_insensitive_duplicates(inputs in proptest::collection::vec(arb_partial(), 0..6)) {
            if let Some(merged) = merge_anime(inputs) {
                let mut keys: Vec<String> = merged.genres.iter().map(|g| g.to_lowercase()).collect();
                let before = keys.len();
                keys.sort();
                keys.dedup();
                prop_assert_eq!(keys.len(), before);
                prop_assert!(merged.genres.iter().all(|g| !g.trim().is_empty()));
            }
        }
    }
}
