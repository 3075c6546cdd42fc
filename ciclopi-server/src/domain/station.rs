//! Station identifiers and per-refresh station records.

use std::fmt;

use super::catalog::catalog_lookup;
use super::coordinates::Coordinates;

/// Placeholder coordinates for stations the catalog does not know.
/// Deliberately outside the valid latitude/longitude range.
const UNKNOWN_COORDINATES: Coordinates = Coordinates::new(91.0, 181.0);

/// Numeric CicloPi station identifier.
///
/// Id 0 is the bucket for feed fragments whose id could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct StationId(u16);

impl StationId {
    /// The unknown/unparseable bucket.
    pub const UNKNOWN: StationId = StationId(0);

    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One station as seen in a single feed refresh.
///
/// Records are ephemeral: a fresh set is built on every parse, so the
/// lazily computed distance can never go stale. Static identity (name,
/// coordinates) comes from the catalog; the feed only contributes the
/// live fields.
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    name: &'static str,
    coordinates: Coordinates,
    active: bool,
    description: String,
    bikes: u16,
    free: u16,
    distance_m: Option<f64>,
}

impl Station {
    /// Build a record for `id`, pulling name and coordinates from the
    /// catalog. Unknown ids get the "unknown" placeholder identity.
    pub fn new(id: StationId) -> Self {
        let (name, coordinates) = match catalog_lookup(id) {
            Some(entry) => (entry.name, entry.coordinates),
            None => ("unknown", UNKNOWN_COORDINATES),
        };

        Self {
            id,
            name,
            coordinates,
            active: true,
            description: String::new(),
            bikes: 0,
            free: 0,
            distance_m: None,
        }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn bikes(&self) -> u16 {
        self.bikes
    }

    pub fn free(&self) -> u16 {
        self.free
    }

    /// Available bikes and free slots, or `None` when the feed reported
    /// neither. `bikes + free == 0` is how the feed says "no availability
    /// data right now"; it is not distinguishable from a genuinely empty
    /// zero-capacity reading, and we keep that ambiguity rather than
    /// invent a status the feed does not carry.
    pub fn availability(&self) -> Option<(u16, u16)> {
        if self.bikes == 0 && self.free == 0 {
            None
        } else {
            Some((self.bikes, self.free))
        }
    }

    /// Distance in metres from the attached reference point, if one was
    /// attached.
    pub fn distance_m(&self) -> Option<f64> {
        self.distance_m
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub fn set_counts(&mut self, bikes: u16, free: u16) {
        self.bikes = bikes;
        self.free = free;
    }

    /// Attach the reference point distances are measured from.
    ///
    /// The distance is computed once; later calls on the same record are
    /// no-ops, matching the record's single-refresh lifetime.
    pub fn attach_reference(&mut self, reference: Coordinates) {
        if self.distance_m.is_none() {
            self.distance_m = Some(reference.distance_m(&self.coordinates));
        }
    }
}
