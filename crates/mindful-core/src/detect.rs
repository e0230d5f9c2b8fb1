//! Region and store detection from the shopper's current page host.

use crate::stores::{Region, Store};

const UKRAINE_HOST_MARKERS: [&str; 3] = [".ua", "rozetka", "prom"];
const EUROPE_HOST_MARKERS: [&str; 7] = [
    ".de",
    ".fr",
    ".es",
    ".it",
    "mediamarkt",
    "saturn",
    "idealo",
];
const AMERICA_HOST_MARKERS: [&str; 2] = [".com", "amazon"];

/// Detects the shopper's market from the page host, falling back to the
/// browser language (e.g. `"uk-UA"`, `"de-DE"`) when the host is not telling.
///
/// Host markers are checked in Ukraine, Europe, America order, so
/// `amazon.de` resolves to Europe.
#[must_use]
pub fn detect_region(host: &str, language: &str) -> Region {
    let host = host.to_ascii_lowercase();
    let has_any = |markers: &[&str]| markers.iter().any(|m| host.contains(m));

    if has_any(&UKRAINE_HOST_MARKERS) {
        return Region::Ukraine;
    }
    if has_any(&EUROPE_HOST_MARKERS) {
        return Region::Europe;
    }
    if has_any(&AMERICA_HOST_MARKERS) {
        return Region::America;
    }

    let language = language.to_ascii_lowercase();
    if language.starts_with("uk") {
        Region::Ukraine
    } else if ["de", "fr", "es"].iter().any(|p| language.starts_with(p)) {
        Region::Europe
    } else {
        Region::America
    }
}

/// Maps a page host to one of the enumerated stores, if the shopper is on one.
#[must_use]
pub fn detect_store(host: &str) -> Option<Store> {
    let host = host.to_ascii_lowercase();
    let markers = [
        ("rozetka", Store::Rozetka),
        ("prom.ua", Store::PromUa),
        ("comfy", Store::Comfy),
        ("foxtrot", Store::Foxtrot),
        ("allo", Store::Allo),
        ("amazon", Store::Amazon),
    ];
    markers
        .into_iter()
        .find(|(marker, _)| host.contains(marker))
        .map(|(_, store)| store)
}
