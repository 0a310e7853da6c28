//! Plain-text rendering of the location header and site cards.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use ratfinder_core::{Coordinates, EnrichedSite};

use crate::filters::FilterState;

const MAPS_SEARCH_BASE: &str = "https://www.google.com.au/maps/search/";

/// Characters left readable in a search path segment.
const SEARCH_TERM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b',');

/// Maps search link for free-text terms joined with `+`.
#[must_use]
pub fn maps_search_url(terms: &[&str]) -> String {
    let query = terms
        .iter()
        .map(|term| utf8_percent_encode(term, SEARCH_TERM).to_string())
        .collect::<Vec<_>>()
        .join("+");
    format!("{MAPS_SEARCH_BASE}{query}")
}

#[must_use]
pub fn location_header(location: Coordinates) -> String {
    let point = format!("{},{}", location.lat, location.lng);
    format!(
        "Your location is: {location} ({})",
        maps_search_url(&[point.as_str()])
    )
}

/// `"12.50 per 2"`, or just the amount when no unit count is given.
#[must_use]
pub fn format_price(price_in_cents: i64, price_per_n: Option<u32>) -> String {
    let sign = if price_in_cents < 0 { "-" } else { "" };
    let cents = price_in_cents.unsigned_abs();
    let amount = format!("{sign}{}.{:02}", cents / 100, cents % 100);
    match price_per_n {
        Some(n) => format!("{amount} per {n}"),
        None => amount,
    }
}

/// Lines of one result card.
#[must_use]
pub fn card_lines(entry: &EnrichedSite) -> Vec<String> {
    let site = &entry.site;
    let mut lines = vec![
        site.name.clone(),
        format!(
            "  {} <{}>",
            site.address,
            maps_search_url(&[site.name.as_str(), site.address.as_str()])
        ),
        format!("  {}", site.status.label()),
        format!("  {}", entry.distance_string),
        format!("  Last updated: {}", entry.last_updated),
    ];
    if let Some(cents) = site.price_in_cents {
        lines.push(format!("  {}", format_price(cents, site.price_per_n)));
    }
    lines
}

#[must_use]
pub fn controls_lines(state: &FilterState) -> Vec<String> {
    vec![
        format!("Filter: {}", state.text),
        format!("Sort by: {}", state.sort),
        format!("Distance less than: {}", state.max_distance),
        format!("Show: {}", state.status),
    ]
}
