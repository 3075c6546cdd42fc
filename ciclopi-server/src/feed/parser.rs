//! Best-effort parser for the CicloPi station page.
//!
//! The page is scraped third-party markup with no compatibility promise.
//! Every fragment is parsed independently: a malformed fragment degrades
//! to documented defaults (unknown id, zero counts) or is skipped, and
//! never aborts the remaining fragments.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::domain::{Station, StationId};

/// Marker the feed puts in the name of a station taken out of service.
const OUT_OF_SERVICE_MARKER: &str = "Non operativa";

static ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.rrItem").expect("static selector"));
static NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.Stazione").expect("static selector"));
static NUMBER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.cssNumero").expect("static selector"));
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.TableComune").expect("static selector"));
static COUNTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.Red").expect("static selector"));

/// Parse the raw page into station records.
pub fn parse_stations(payload: &str) -> Vec<Station> {
    let document = Html::parse_document(payload);
    let mut stations = Vec::new();

    for fragment in document.select(&ITEM) {
        match parse_fragment(fragment) {
            Some(station) => stations.push(station),
            None => {
                tracing::debug!("skipping station fragment without a name span");
            }
        }
    }

    stations
}

fn parse_fragment(fragment: ElementRef<'_>) -> Option<Station> {
    // A fragment without the name span carries nothing usable.
    let name_text = text_of(fragment, &NAME)?;
    let active = !name_text.contains(OUT_OF_SERVICE_MARKER);

    let id = text_of(fragment, &NUMBER)
        .and_then(|text| text.trim().parse::<u16>().ok())
        .map_or(StationId::UNKNOWN, StationId::new);

    let mut station = Station::new(id);
    station.set_active(active);

    if let Some(description) = text_of(fragment, &DESCRIPTION) {
        station.set_description(normalize_description(&description));
    }

    let (bikes, free) = match text_of(fragment, &COUNTS) {
        Some(text) => counts_from(&text),
        None => (0, 0),
    };
    station.set_counts(bikes, free);

    Some(station)
}

/// Concatenated text of the first element matching `selector`.
fn text_of(fragment: ElementRef<'_>, selector: &Selector) -> Option<String> {
    fragment
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

/// The feed encodes Italian accented vowels as letter + grave accent.
fn normalize_description(raw: &str) -> String {
    raw.trim().replace("a`", "à").replace("e`", "è")
}

/// Extract (bikes, free) from the availability text.
///
/// The feed writes two numeric groups separated by a slot marker. Fewer
/// than two groups means the station is temporarily not reporting
/// availability, which we record as (0, 0).
fn counts_from(text: &str) -> (u16, u16) {
    let runs = digit_runs(text);
    match runs.as_slice() {
        [bikes, free, ..] => (*bikes, *free),
        _ => (0, 0),
    }
}

/// All maximal runs of ASCII digits in `text`, in order.
fn digit_runs(text: &str) -> Vec<u16> {
    let mut runs = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_ascii_digit() {
            current.push(ch);
        } else if !current.is_empty() {
            runs.push(current.parse().unwrap_or(0));
            current.clear();
        }
    }
    if !current.is_empty() {
        runs.push(current.parse().unwrap_or(0));
    }

    runs
}
