//! Age heuristic: stated age first, then an explicit age field, then birth year.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;

use personscope_shared::SearchHit;

use super::tables;

/// Plausible stated ages.
pub const AGE_RANGE: RangeInclusive<u32> = 18..=100;

/// Plausible birth years.
pub const BIRTH_YEAR_RANGE: RangeInclusive<i32> = 1920..=2010;

static DIRECT: LazyLock<Vec<Regex>> = LazyLock::new(|| tables::compile(tables::DIRECT_AGE_PATTERNS));

static EXPLICIT: LazyLock<Vec<Regex>> =
    LazyLock::new(|| tables::compile(tables::EXPLICIT_AGE_PATTERNS));

static BIRTH_YEAR: LazyLock<Vec<Regex>> =
    LazyLock::new(|| tables::compile(tables::BIRTH_YEAR_PATTERNS));

/// Age from the first hit that states one, using the current calendar year.
pub fn extract_age(hits: &[SearchHit]) -> Option<u32> {
    extract_age_at(hits, chrono::Local::now().year())
}

/// Age from the first hit that states one, relative to `current_year`.
pub fn extract_age_at(hits: &[SearchHit], current_year: i32) -> Option<u32> {
    hits.iter()
        .find_map(|hit| age_in(&hit.lookup_text(), current_year))
}

/// Age stated in a single text.
pub fn age_in(text: &str, current_year: i32) -> Option<u32> {
    stated_age(&DIRECT, text)
        .or_else(|| stated_age(&EXPLICIT, text))
        .or_else(|| {
            first_capture(&BIRTH_YEAR, text, |year: i32| {
                BIRTH_YEAR_RANGE.contains(&year)
                    && age_from_birth_year(year, current_year).is_some()
            })
            .and_then(|year| age_from_birth_year(year, current_year))
        })
}

/// Age reached in `current_year`, when it falls in [`AGE_RANGE`].
fn age_from_birth_year(year: i32, current_year: i32) -> Option<u32> {
    u32::try_from(current_year - year)
        .ok()
        .filter(|age| AGE_RANGE.contains(age))
}

fn stated_age(patterns: &[Regex], text: &str) -> Option<u32> {
    first_capture(patterns, text, |age: u32| AGE_RANGE.contains(&age))
}

/// First group-1 capture that parses and satisfies `accept`.
fn first_capture<T: std::str::FromStr + Copy>(
    patterns: &[Regex],
    text: &str,
    accept: impl Fn(T) -> bool,
) -> Option<T> {
    patterns
        .iter()
        .flat_map(|re| re.captures_iter(text))
        .filter_map(|caps| caps[1].parse::<T>().ok())
        .find(|value| accept(*value))
}
