//! Station ranking and filtering.
//!
//! Takes the raw records of one feed refresh and produces the final
//! ordered, filtered sequence for one chat. Every strategy resolves ties
//! with the station name, so equal keys never make the output order
//! depend on input order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::{ChatPreference, Coordinates, Sorting, Station, StationId, StationsToShow};

/// The fixed city-centre reference: the Borgo Stretto station.
pub const FIXED_REFERENCE: Coordinates = Coordinates::new(43.718518, 10.402165);

/// Rank stations absent from the custom order behind every present one.
const UNLISTED_RANK: i64 = i64::MAX;

/// Order and filter `stations` for one chat.
///
/// `custom_ranks` is the chat's favorite order as (station, rank) pairs;
/// it drives both the "custom" strategy and the favorites-only filter.
/// `show_all` disables filtering entirely (the "show the whole fleet"
/// affordance) without touching the sort.
pub fn rank_stations(
    mut stations: Vec<Station>,
    preference: &ChatPreference,
    custom_ranks: &[(StationId, i64)],
    show_all: bool,
) -> Vec<Station> {
    match preference.sorting {
        Sorting::Center => {
            sort_by_distance(&mut stations, FIXED_REFERENCE);
        }
        Sorting::Position => {
            let reference = preference.reference().unwrap_or(FIXED_REFERENCE);
            sort_by_distance(&mut stations, reference);
        }
        Sorting::Alphabetical => {
            stations.sort_by(|a, b| a.name().cmp(b.name()));
        }
        Sorting::Custom => {
            let ranks: HashMap<StationId, i64> = custom_ranks.iter().copied().collect();
            stations.sort_by(|a, b| {
                let rank_a = ranks.get(&a.id()).copied().unwrap_or(UNLISTED_RANK);
                let rank_b = ranks.get(&b.id()).copied().unwrap_or(UNLISTED_RANK);
                rank_a.cmp(&rank_b).then_with(|| a.name().cmp(b.name()))
            });
        }
    }

    if show_all {
        return stations;
    }

    match preference.stations_to_show {
        StationsToShow::Favorites => {
            let favorites: HashMap<StationId, i64> = custom_ranks.iter().copied().collect();
            stations.retain(|station| favorites.contains_key(&station.id()));
        }
        // An alphabetical board is a lookup table; cutting it off after
        // N entries would hide stations the user scans for by name.
        StationsToShow::Top(n) if preference.sorting != Sorting::Alphabetical => {
            stations.truncate(usize::from(n));
        }
        StationsToShow::Top(_) | StationsToShow::All => {}
    }

    stations
}

fn sort_by_distance(stations: &mut [Station], reference: Coordinates) {
    for station in stations.iter_mut() {
        station.attach_reference(reference);
    }
    stations.sort_by(|a, b| {
        compare_distance(a.distance_m(), b.distance_m()).then_with(|| a.name().cmp(b.name()))
    });
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    // Records without a distance (never the case after attach, but the
    // ordering must be total) sort last.
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatId;

    fn stations(ids: &[u16]) -> Vec<Station> {
        ids.iter().map(|&id| Station::new(StationId::new(id))).collect()
    }

    fn names(stations: &[Station]) -> Vec<&'static str> {
        stations.iter().map(|s| s.name()).collect()
    }

    fn preference(sorting: Sorting, show: StationsToShow) -> ChatPreference {
        let mut pref = ChatPreference::defaults(ChatId::new(1));
        pref.sorting = sorting;
        pref.stations_to_show = show;
        pref
    }

    #[test]
    fn alphabetical_sorts_by_name() {
        // Duomo (7), Borgo Stretto (5), Aeroporto (1)
        let input = stations(&[7, 5, 1]);
        let pref = preference(Sorting::Alphabetical, StationsToShow::All);

        let ranked = rank_stations(input, &pref, &[], false);
        assert_eq!(names(&ranked), vec!["Aeroporto", "Borgo Stretto", "Duomo"]);
    }

    #[test]
    fn center_sorts_by_distance_from_borgo_stretto() {
        // Borgo Stretto itself, Duomo (near), Aeroporto (far south).
        let input = stations(&[1, 7, 5]);
        let pref = preference(Sorting::Center, StationsToShow::All);

        let ranked = rank_stations(input, &pref, &[], false);
        assert_eq!(names(&ranked), vec!["Borgo Stretto", "Duomo", "Aeroporto"]);
        // Distances were attached along the way.
        assert!(ranked[0].distance_m().unwrap() < 1.0);
    }

    #[test]
    fn position_uses_the_stored_reference() {
        let input = stations(&[5, 1]);
        let mut pref = preference(Sorting::Position, StationsToShow::All);
        // Right on top of the Aeroporto station.
        pref.latitude = Some(43.699455);
        pref.longitude = Some(10.400075);

        let ranked = rank_stations(input, &pref, &[], false);
        assert_eq!(names(&ranked), vec!["Aeroporto", "Borgo Stretto"]);
    }

    #[test]
    fn position_without_stored_reference_falls_back_to_center() {
        let input = stations(&[1, 7, 5]);
        let pref = preference(Sorting::Position, StationsToShow::All);

        let ranked = rank_stations(input, &pref, &[], false);
        assert_eq!(names(&ranked), vec!["Borgo Stretto", "Duomo", "Aeroporto"]);
    }

    #[test]
    fn custom_sorts_by_stored_rank_then_name() {
        let input = stations(&[1, 5, 7, 2]);
        let pref = preference(Sorting::Custom, StationsToShow::All);
        let custom = [
            (StationId::new(7), 1),
            (StationId::new(1), 2),
        ];

        let ranked = rank_stations(input, &pref, &custom, false);
        // Ranked favorites first, then the rest alphabetically.
        assert_eq!(
            names(&ranked),
            vec!["Duomo", "Aeroporto", "Borgo Stretto", "Stazione F.S."]
        );
    }

    #[test]
    fn favorites_filter_keeps_only_custom_entries() {
        let input = stations(&[1, 5, 7]);
        let pref = preference(Sorting::Alphabetical, StationsToShow::Favorites);
        let custom = [(StationId::new(7), 1), (StationId::new(5), 2)];

        let ranked = rank_stations(input, &pref, &custom, false);
        assert_eq!(names(&ranked), vec!["Borgo Stretto", "Duomo"]);
    }

    #[test]
    fn top_n_truncates_after_sorting() {
        let input = stations(&[1, 2, 3, 4, 5, 6, 7]);
        let pref = preference(Sorting::Center, StationsToShow::Top(3));

        let ranked = rank_stations(input, &pref, &[], false);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].name(), "Borgo Stretto");
    }

    #[test]
    fn top_n_is_ignored_for_alphabetical_sorting() {
        let input = stations(&[1, 2, 3, 4, 5, 6, 7]);
        let pref = preference(Sorting::Alphabetical, StationsToShow::Top(3));

        let ranked = rank_stations(input, &pref, &[], false);
        assert_eq!(ranked.len(), 7);
    }

    #[test]
    fn show_all_disables_every_filter() {
        let input = stations(&[1, 2, 3, 4, 5, 6, 7]);

        let top = preference(Sorting::Center, StationsToShow::Top(3));
        assert_eq!(rank_stations(input.clone(), &top, &[], true).len(), 7);

        let favorites = preference(Sorting::Center, StationsToShow::Favorites);
        assert_eq!(rank_stations(input, &favorites, &[], true).len(), 7);
    }

    #[test]
    fn unknown_bucket_sorts_last_under_custom() {
        let input = stations(&[0, 7]);
        let pref = preference(Sorting::Custom, StationsToShow::All);
        let custom = [(StationId::new(7), 1)];

        let ranked = rank_stations(input, &pref, &custom, false);
        assert_eq!(ranked[0].id(), StationId::new(7));
        assert_eq!(ranked[1].id(), StationId::UNKNOWN);
    }
}
