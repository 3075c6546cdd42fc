//! Per-chat board preferences.

use std::fmt;

use super::coordinates::Coordinates;

/// Chat identity, as assigned by the messaging transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How the board is ordered.
///
/// The numeric codes are the wire/storage representation and must stay
/// stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sorting {
    /// Ascending distance from the fixed city-centre reference.
    #[default]
    Center,
    /// Ascending station name.
    Alphabetical,
    /// Ascending distance from the chat's stored position, falling back
    /// to the fixed reference when none is stored.
    Position,
    /// The chat's own favorite-station order.
    Custom,
}

impl Sorting {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Sorting::Center),
            1 => Some(Sorting::Alphabetical),
            2 => Some(Sorting::Position),
            3 => Some(Sorting::Custom),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Sorting::Center => 0,
            Sorting::Alphabetical => 1,
            Sorting::Position => 2,
            Sorting::Custom => 3,
        }
    }
}

/// How many stations the board shows.
///
/// Codes: -1 favorites only, 0 all, otherwise the fixed count itself.
/// Only the counts the original menu offered are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationsToShow {
    Favorites,
    All,
    Top(u8),
}

impl StationsToShow {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(StationsToShow::Favorites),
            0 => Some(StationsToShow::All),
            3 | 5 | 10 => Some(StationsToShow::Top(code as u8)),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            StationsToShow::Favorites => -1,
            StationsToShow::All => 0,
            StationsToShow::Top(n) => i64::from(n),
        }
    }
}

impl Default for StationsToShow {
    fn default() -> Self {
        StationsToShow::Top(5)
    }
}

/// A chat's stored board preferences.
///
/// Created lazily with defaults on first read; one row per chat.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPreference {
    pub chat_id: ChatId,
    pub sorting: Sorting,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub stations_to_show: StationsToShow,
}

impl ChatPreference {
    /// Defaults for a chat that has never changed a setting.
    pub fn defaults(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            sorting: Sorting::default(),
            latitude: None,
            longitude: None,
            stations_to_show: StationsToShow::default(),
        }
    }

    /// The stored position reference, if the chat has set one.
    pub fn reference(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}
