//! Classified view over the manifest items.

use crate::api::models::{EpisodeMeta, Item, Manifest, MediaKind, MediaType};
use crate::utils::{insertion_sort_by, locale_cmp};
use std::cmp::Ordering;

pub const DEFAULT_SUBTITLE_LANGUAGE: &str = "en";

/// Items are stored once; per-kind lists hold indices into `items`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Library {
    items: Vec<Item>,
    episodes: Vec<usize>,
    films: Vec<usize>,
}

impl Library {
    pub fn new(items: Vec<Item>) -> Self {
        let mut episodes = Vec::new();
        let mut films = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match item.kind {
                MediaKind::Episode(_) => episodes.push(index),
                MediaKind::Film(_) => films.push(index),
                MediaKind::Other => {}
            }
        }
        Self {
            items,
            episodes,
            films,
        }
    }

    pub fn from_manifest(manifest: Manifest) -> Self {
        Self::new(manifest.items)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    fn episode_items(&self) -> impl Iterator<Item = (&Item, &EpisodeMeta)> {
        self.episodes.iter().filter_map(|&index| {
            let item = &self.items[index];
            item.kind.as_episode().map(|meta| (item, meta))
        })
    }

    fn film_items(&self) -> impl Iterator<Item = &Item> {
        self.films.iter().map(|&index| &self.items[index])
    }

    /// Distinct show names among video episodes, collated.
    pub fn list_shows(&self) -> Vec<String> {
        let mut shows: Vec<String> = Vec::new();
        for (item, meta) in self.episode_items() {
            if item.has_type(MediaType::Video) && !shows.contains(&meta.show) {
                shows.push(meta.show.clone());
            }
        }
        shows.sort_by(|a, b| locale_cmp(a, b));
        shows
    }

    /// Video episodes of `show`, ordered by season then episode as text.
    pub fn episodes_of(&self, show: &str) -> Vec<&Item> {
        let mut episodes: Vec<(&Item, &EpisodeMeta)> = self
            .episode_items()
            .filter(|(item, meta)| item.has_type(MediaType::Video) && meta.show == show)
            .collect();
        episodes.sort_by(|(_, a), (_, b)| {
            locale_cmp(&a.season, &b.season).then_with(|| locale_cmp(&a.episode, &b.episode))
        });
        episodes.into_iter().map(|(item, _)| item).collect()
    }

    /// Films tagged with nothing but `video`, ordered by title.
    pub fn films(&self) -> Vec<&Item> {
        let mut films: Vec<&Item> = self.film_items().filter(|item| item.is_video_only()).collect();
        films.sort_by(|a, b| locale_cmp(a.display_title(), b.display_title()));
        films
    }

    /// Subtitle track for `item`, preferring `preferred` (or English when blank).
    pub fn subtitle_for(&self, item: &Item, preferred: &str) -> Option<&Item> {
        let preferred = preferred_language(preferred);
        let mut candidates: Vec<&Item> = match &item.kind {
            MediaKind::Episode(target) => self
                .episode_items()
                .filter(|(candidate, meta)| {
                    candidate.has_type(MediaType::Subtitle)
                        && meta.show == target.show
                        && meta.season == target.season
                        && meta.episode == target.episode
                })
                .map(|(candidate, _)| candidate)
                .collect(),
            MediaKind::Film(target) => self
                .film_items()
                .filter(|candidate| {
                    candidate.has_type(MediaType::Subtitle)
                        && candidate.kind.title() == Some(target.title.as_str())
                })
                .collect(),
            MediaKind::Other => Vec::new(),
        };

        insertion_sort_by(&mut candidates, |a, b| {
            language_preference(a.kind.language(), b.kind.language(), preferred)
        });
        candidates.into_iter().next()
    }

    /// First artwork episode belonging to `show`.
    pub fn cover_art_for(&self, show: &str) -> Option<&Item> {
        self.episode_items()
            .find(|(item, meta)| item.has_type(MediaType::Artwork) && meta.show == show)
            .map(|(item, _)| item)
    }
}

pub fn preferred_language(configured: &str) -> &str {
    let trimmed = configured.trim();
    if trimmed.is_empty() {
        DEFAULT_SUBTITLE_LANGUAGE
    } else {
        trimmed
    }
}

// Looks the preferred code up in `[a, sentinel, b]`: position 0 ranks `a`
// first, position 2 ranks `b` first, anything else is a tie. When both sides
// match, `a` is reported as smaller in either argument order.
fn language_preference(a: Option<&str>, b: Option<&str>, preferred: &str) -> Ordering {
    let key = [a, None, b];
    match key.iter().position(|language| *language == Some(preferred)) {
        Some(0) => Ordering::Less,
        Some(2) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn item(path: &str, types: &[&str], meta: Value) -> Item {
        serde_json::from_value(json!({"path": path, "type": types, "meta": meta})).unwrap()
    }

    fn episode(path: &str, show: &str, season: &str, number: &str) -> Item {
        item(
            path,
            &["video"],
            json!({"show": show, "season": season, "episode": number, "title": path}),
        )
    }

    fn subtitle(path: &str, show: &str, language: Option<&str>) -> Item {
        let mut meta = json!({"show": show, "season": "1", "episode": "1", "title": "Pilot"});
        if let Some(language) = language {
            meta["language"] = json!(language);
        }
        item(path, &["subtitle"], meta)
    }

    fn paths(items: &[&Item]) -> Vec<String> {
        items.iter().map(|item| item.path.clone()).collect()
    }

    #[test]
    fn empty_library_answers_empty() {
        let library = Library::default();
        let probe = episode("x.mkv", "A", "1", "1");
        assert!(library.list_shows().is_empty());
        assert!(library.episodes_of("A").is_empty());
        assert!(library.films().is_empty());
        assert!(library.subtitle_for(&probe, "en").is_none());
        assert!(library.cover_art_for("A").is_none());
    }

    #[test]
    fn lists_distinct_shows_in_collation_order() {
        let library = Library::new(vec![
            episode("1", "zebra", "1", "1"),
            episode("2", "Alpha", "1", "1"),
            episode("3", "zebra", "1", "2"),
            episode("4", "beta", "1", "1"),
            item("5", &["artwork"], json!({"show": "Gamma"})),
            item("6", &["video"], json!({"title": "Film"})),
        ]);

        let shows = library.list_shows();
        assert_eq!(shows, vec!["Alpha", "beta", "zebra"]);
        assert_eq!(library.list_shows(), shows);
    }

    #[test]
    fn show_names_follow_locale_collation() {
        let library = Library::new(vec![
            episode("1", "Zorro", "1", "1"),
            episode("2", "Æon Flux", "1", "1"),
            episode("3", "Batman", "1", "1"),
            episode("4", "A_B", "1", "1"),
            episode("5", "A-B", "1", "1"),
        ]);

        assert_eq!(
            library.list_shows(),
            vec!["A_B", "A-B", "Æon Flux", "Batman", "Zorro"]
        );
    }

    #[test]
    fn episodes_are_ordered_as_strings() {
        let library = Library::new(vec![
            episode("s1e10", "A", "1", "10"),
            episode("s2e1", "A", "2", "1"),
            episode("s1e2", "A", "1", "2"),
            episode("b", "B", "1", "1"),
            item("sub", &["subtitle"], json!({"show": "A", "season": "1", "episode": "1"})),
        ]);

        assert_eq!(
            paths(&library.episodes_of("A")),
            vec!["s1e10", "s1e2", "s2e1"]
        );
        assert!(library
            .episodes_of("A")
            .iter()
            .all(|item| item.kind.as_episode().unwrap().show == "A"));
    }

    #[test]
    fn films_require_exactly_video_tag() {
        let library = Library::new(vec![
            item("heat", &["video"], json!({"title": "Heat"})),
            item("heat-sub", &["subtitle"], json!({"title": "Heat"})),
            item("alien", &["video", "artwork"], json!({"title": "Alien"})),
            item("brazil", &["video"], json!({"title": "brazil"})),
            item("song", &["video"], json!({"title": "Song", "artist": "Band"})),
        ]);

        assert_eq!(paths(&library.films()), vec!["brazil", "heat"]);
    }

    #[test]
    fn subtitle_prefers_configured_language() {
        let target = episode("ep", "A", "1", "1");
        let library = Library::new(vec![
            target.clone(),
            subtitle("fr.srt", "A", Some("fr")),
            subtitle("en.srt", "A", Some("en")),
            subtitle("de.srt", "A", Some("de")),
        ]);

        let chosen = library.subtitle_for(&target, "en").unwrap();
        assert_eq!(chosen.kind.language(), Some("en"));
        let chosen = library.subtitle_for(&target, "de").unwrap();
        assert_eq!(chosen.path, "de.srt");
        let chosen = library.subtitle_for(&target, "  ").unwrap();
        assert_eq!(chosen.path, "en.srt");
    }

    #[test]
    fn subtitle_without_candidates_is_none() {
        let target = episode("ep", "A", "1", "1");
        let library = Library::new(vec![target.clone(), subtitle("other.srt", "B", Some("en"))]);
        assert!(library.subtitle_for(&target, "en").is_none());
    }

    #[test]
    fn single_subtitle_is_chosen_regardless_of_language() {
        let target = episode("ep", "A", "1", "1");
        let library = Library::new(vec![target.clone(), subtitle("nl.srt", "A", Some("nl"))]);
        assert_eq!(library.subtitle_for(&target, "en").unwrap().path, "nl.srt");
    }

    #[test]
    fn unmatched_languages_keep_manifest_order() {
        let target = episode("ep", "A", "1", "1");
        let library = Library::new(vec![
            subtitle("fr.srt", "A", Some("fr")),
            subtitle("none.srt", "A", None),
            subtitle("de.srt", "A", Some("de")),
        ]);

        let first = library.subtitle_for(&target, "en").unwrap().path.clone();
        for _ in 0..5 {
            assert_eq!(library.subtitle_for(&target, "en").unwrap().path, first);
        }
        assert_eq!(first, "fr.srt");
    }

    #[test]
    fn film_subtitles_match_on_title() {
        let film = item("heat.mkv", &["video"], json!({"title": "Heat"}));
        let library = Library::new(vec![
            film.clone(),
            item("heat.fr.srt", &["subtitle"], json!({"title": "Heat", "language": "fr"})),
            item("heat.en.srt", &["subtitle"], json!({"title": "Heat", "language": "en"})),
            item("ronin.en.srt", &["subtitle"], json!({"title": "Ronin", "language": "en"})),
        ]);

        assert_eq!(library.subtitle_for(&film, "en").unwrap().path, "heat.en.srt");
    }

    #[test]
    fn cover_art_is_first_artwork_of_show() {
        let library = Library::new(vec![
            episode("ep", "A", "1", "1"),
            item("b.jpg", &["artwork"], json!({"show": "B"})),
            item("a1.jpg", &["artwork"], json!({"show": "A"})),
            item("a2.jpg", &["artwork"], json!({"show": "A"})),
        ]);

        assert_eq!(library.cover_art_for("A").unwrap().path, "a1.jpg");
        assert!(library.cover_art_for("C").is_none());
    }
}
