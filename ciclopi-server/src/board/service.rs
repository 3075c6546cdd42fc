//! The core's interface to its host.
//!
//! `BoardService` owns the feed cache and the store, and exposes exactly
//! what the messaging layer needs: an ordered board per chat, plus the
//! preference and favorites mutators behind it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ChatId, Sorting, Station, StationId, StationsToShow, catalog_len};
use crate::feed::{FeedCache, FeedError, FetchPage};
use crate::store::{Direction, MoveOutcome, Store, StoreError, ToggleOutcome};

use super::rank::rank_stations;

/// Errors surfaced to the host.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// The feed could not be fetched; the host should tell the user the
    /// website is temporarily unavailable, not crash or retry.
    #[error("feed temporarily unavailable: {0}")]
    FeedUnavailable(#[from] FeedError),

    /// The persistent store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a preference mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingOutcome {
    /// Stored and now in effect.
    Updated,
    /// The new value equals the stored one; nothing written.
    NoChange,
    /// The code is not a recognized option; nothing written.
    UnknownOption,
}

/// Live counts for one station, absent when the feed reported none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub bikes: u16,
    pub free: u16,
}

/// One board line, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct BoardRow {
    pub id: StationId,
    pub name: &'static str,
    pub description: String,
    pub active: bool,
    pub availability: Option<Availability>,
    /// Metres from the reference point, for distance-based sorts.
    pub distance_m: Option<f64>,
}

impl From<&Station> for BoardRow {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id(),
            name: station.name(),
            description: station.description().to_string(),
            active: station.is_active(),
            availability: station
                .availability()
                .map(|(bikes, free)| Availability { bikes, free }),
            distance_m: station.distance_m(),
        }
    }
}

/// The filter that shaped the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardFilter {
    FavoritesOnly,
    FirstN(u8),
    All,
}

/// A ranked, filtered station board for one chat.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    pub rows: Vec<BoardRow>,
    pub sorting: Sorting,
    pub filter: BoardFilter,
    /// Whether the fleet has stations beyond the shown set.
    pub has_more: bool,
    pub fetched_at: DateTime<Utc>,
}

/// The station board engine.
pub struct BoardService<F> {
    cache: FeedCache<F>,
    store: Store,
}

impl<F: FetchPage> BoardService<F> {
    pub fn new(cache: FeedCache<F>, store: Store) -> Self {
        Self { cache, store }
    }

    /// The ranked, filtered board for `chat`.
    ///
    /// `show_all` overrides the chat's filter for this one request.
    pub async fn get_board(&self, chat: ChatId, show_all: bool) -> Result<Board, BoardError> {
        let snapshot = self.cache.get_snapshot().await?;
        let preference = self.store.preference(chat).await?;
        let custom_ranks = self.store.favorite_ranks(chat).await?;

        let ranked = rank_stations(snapshot.stations.clone(), &preference, &custom_ranks, show_all);

        let filter = if show_all {
            BoardFilter::All
        } else {
            match preference.stations_to_show {
                StationsToShow::Favorites => BoardFilter::FavoritesOnly,
                StationsToShow::All => BoardFilter::All,
                StationsToShow::Top(_) if preference.sorting == Sorting::Alphabetical => {
                    BoardFilter::All
                }
                StationsToShow::Top(n) => BoardFilter::FirstN(n),
            }
        };

        Ok(Board {
            has_more: ranked.len() < catalog_len(),
            rows: ranked.iter().map(BoardRow::from).collect(),
            sorting: preference.sorting,
            filter,
            fetched_at: snapshot.fetched_at,
        })
    }

    /// Persist a new position reference for "position" sorting.
    pub async fn set_reference_location(
        &self,
        chat: ChatId,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), BoardError> {
        self.store
            .set_reference_location(chat, latitude, longitude)
            .await?;
        Ok(())
    }

    /// Switch the chat's sort mode by wire code.
    pub async fn set_sort_mode(&self, chat: ChatId, code: i64) -> Result<SettingOutcome, BoardError> {
        let Some(sorting) = Sorting::from_code(code) else {
            return Ok(SettingOutcome::UnknownOption);
        };

        let current = self.store.preference(chat).await?;
        if current.sorting == sorting {
            return Ok(SettingOutcome::NoChange);
        }

        self.store.set_sorting(chat, sorting).await?;
        Ok(SettingOutcome::Updated)
    }

    /// Switch the chat's stations-to-show choice by wire code.
    pub async fn set_show_count(
        &self,
        chat: ChatId,
        code: i64,
    ) -> Result<SettingOutcome, BoardError> {
        let Some(choice) = StationsToShow::from_code(code) else {
            return Ok(SettingOutcome::UnknownOption);
        };

        let current = self.store.preference(chat).await?;
        if current.stations_to_show == choice {
            return Ok(SettingOutcome::NoChange);
        }

        self.store.set_stations_to_show(chat, choice).await?;
        Ok(SettingOutcome::Updated)
    }

    /// Add the station to the chat's favorites, or remove it if present.
    pub async fn toggle_favorite(
        &self,
        chat: ChatId,
        station: StationId,
    ) -> Result<ToggleOutcome, BoardError> {
        Ok(self.store.toggle_favorite(chat, station).await?)
    }

    /// Move a favorite one step within the chat's order.
    pub async fn move_favorite(
        &self,
        chat: ChatId,
        station: StationId,
        direction: Direction,
    ) -> Result<MoveOutcome, BoardError> {
        Ok(self.store.move_favorite(chat, station, direction).await?)
    }
}
