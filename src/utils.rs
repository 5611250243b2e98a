//! Utility helpers for Netnix

use std::cmp::Ordering;

#[cfg(not(target_arch = "wasm32"))]
use icu_collator::{Collator, CollatorOptions};

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new())
            .map_err(|e| tracing::warn!("collator unavailable, falling back to code point order: {e}"))
            .ok();
}

/// Compare two strings with the default locale collation, as used for every
/// user-facing list. Digits compare as text, so "10" sorts before "2".
#[cfg(target_arch = "wasm32")]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    js_sys::JsString::from(a)
        .locale_compare(b, &js_sys::Array::new())
        .cmp(&0)
}

/// Compare two strings with the root collation, the same order a browser's
/// default collator gives. Digits compare as text, so "10" sorts before "2".
#[cfg(not(target_arch = "wasm32"))]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

/// Stable binary insertion sort that tolerates comparators which are not a
/// total order. Each element is inserted after every element it does not
/// compare below, with the comparator called as `compare(inserted, existing)`.
pub fn insertion_sort_by<T, F>(items: &mut Vec<T>, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut left = 0;
        let mut right = i;
        while left < right {
            let mid = left + (right - left) / 2;
            if compare(&items[i], &items[mid]) == Ordering::Less {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        let pivot = items.remove(i);
        items.insert(left, pivot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut values: Vec<&str>) -> Vec<&str> {
        values.sort_by(|a, b| locale_cmp(a, b));
        values
    }

    #[test]
    fn orders_case_insensitively_with_lowercase_first() {
        assert_eq!(
            sorted(vec!["banana", "Apple", "apple", "Cherry"]),
            vec!["apple", "Apple", "banana", "Cherry"]
        );
    }

    #[test]
    fn compares_digits_as_text() {
        assert_eq!(sorted(vec!["2", "10", "1"]), vec!["1", "10", "2"]);
        assert_eq!(sorted(vec!["02", "10", "01"]), vec!["01", "02", "10"]);
    }

    #[test]
    fn accents_only_break_ties() {
        assert_eq!(
            sorted(vec!["eclair", "éclair", "ezra", "ecole"]),
            vec!["eclair", "éclair", "ecole", "ezra"]
        );
    }

    #[test]
    fn punctuation_and_digits_sort_before_letters() {
        assert_eq!(
            sorted(vec!["Zorro", "24", "(500) Days", "Alien"]),
            vec!["(500) Days", "24", "Alien", "Zorro"]
        );
    }

    #[test]
    fn underscore_sorts_before_hyphen() {
        assert_eq!(sorted(vec!["A-B", "A_B"]), vec!["A_B", "A-B"]);
    }

    #[test]
    fn ligatures_sort_with_their_base_letters() {
        assert_eq!(
            sorted(vec!["Zorro", "Æon Flux", "Batman"]),
            vec!["Æon Flux", "Batman", "Zorro"]
        );
        assert_eq!(locale_cmp("Œdipus", "Paris"), Ordering::Less);
    }

    #[test]
    fn differs_from_byte_order() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!("apple".cmp("Banana"), Ordering::Greater);
    }

    #[test]
    fn insertion_sort_is_stable() {
        let mut values = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        insertion_sort_by(&mut values, |a, b| a.0.cmp(&b.0));
        assert_eq!(values, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }
}
