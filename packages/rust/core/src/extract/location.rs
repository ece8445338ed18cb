//! Location heuristic: residency phrases, city/state pairs, known cities.

use std::sync::LazyLock;

use regex::Regex;

use personscope_shared::SearchHit;

use super::tables;
use super::{Collector, MAX_LOCATIONS};

static RESIDENCE: LazyLock<Vec<Regex>> =
    LazyLock::new(|| tables::compile(&tables::residence_patterns()));

static CITY_STATE: LazyLock<Vec<Regex>> =
    LazyLock::new(|| tables::compile(&tables::city_state_patterns()));

/// Up to three distinct locations mentioned across `hits`.
pub fn extract_locations(hits: &[SearchHit]) -> Vec<String> {
    let mut found = Collector::new(MAX_LOCATIONS, 2, 49).with_key(city_key);

    for hit in hits {
        locations_in(&hit.lookup_text(), &mut found);
        if found.is_full() {
            break;
        }
    }

    found.into_vec()
}

/// "São Paulo - SP" and "São Paulo" name the same place.
fn city_key(location: &str) -> String {
    location
        .split_once(" - ")
        .map_or(location, |(city, _)| city)
        .trim()
        .to_lowercase()
}

fn locations_in(text: &str, found: &mut Collector) {
    for re in RESIDENCE.iter() {
        for caps in re.captures_iter(text) {
            found.push(&caps[1]);
        }
    }

    for re in CITY_STATE.iter() {
        for caps in re.captures_iter(text) {
            found.push(&format!("{} - {}", caps[1].trim(), &caps[2]));
        }
    }

    let lower = text.to_lowercase();
    for city in tables::CITY_GAZETTEER {
        if lower.contains(&city.to_lowercase()) {
            found.push(city);
        }
    }
}
