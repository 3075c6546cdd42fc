//! Domain types for the station board engine.
//!
//! These types represent validated CicloPi data: coordinates, the fixed
//! station catalog, per-refresh station records and per-chat preferences.
//! Live feed state never leaks into the catalog, which is immutable after
//! startup.

mod catalog;
mod coordinates;
mod preference;
mod station;

pub use catalog::{CatalogEntry, catalog_len, catalog_lookup};
pub use coordinates::{AngleUnit, Coordinates, DistanceUnit};
pub use preference::{ChatId, ChatPreference, Sorting, StationsToShow};
pub use station::{Station, StationId};
