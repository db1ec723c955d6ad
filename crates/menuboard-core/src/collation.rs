//! # Name Collation
//!
//! Korean-locale string ordering for menu item names.
//!
//! Uses the ICU4X collator with the `ko` locale and compiled data, so Hangul
//! sorts in dictionary order ahead of other scripts and Latin names compare case-insensitively at
//! the primary level. If the collator cannot be built, names fall back to
//! code-point order.

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use std::cmp::Ordering;

thread_local! {
    static KOREAN: Option<Collator> =
        Collator::try_new(&locale!("ko").into(), CollatorOptions::new()).ok();
}

/// Compare two names under Korean collation.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    KOREAN.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hangul_dictionary_order() {
        assert_eq!(compare_names("가", "나"), Ordering::Less);
        assert_eq!(compare_names("레몬 아이스티", "라임 소다"), Ordering::Greater);
        assert_eq!(compare_names("망고 스무디", "바나나 스무디"), Ordering::Less);
    }

    #[test]
    fn hangul_sorts_before_latin() {
        assert_eq!(compare_names("라임 소다", "Phở bò"), Ordering::Less);
    }

    #[test]
    fn latin_ignores_case_at_primary_level() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Bún bò Huế", "Phở bò"), Ordering::Less);
    }

    #[test]
    fn identical_names_are_equal() {
        assert_eq!(compare_names("얼그레이 밀크티", "얼그레이 밀크티"), Ordering::Equal);
    }
}
