//! Geographic coordinates and great-circle distance.

/// Mean Earth radius in kilometres, as used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Distance unit of measurement.
///
/// Each unit carries its conversion factor from kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Kilometres,
    Metres,
    Miles,
    NauticalMiles,
    Feet,
    Inches,
}

impl DistanceUnit {
    /// Kilometres-to-unit conversion factor.
    fn per_km(self) -> f64 {
        match self {
            DistanceUnit::Kilometres => 1.0,
            DistanceUnit::Metres => 1000.0,
            DistanceUnit::Miles => 0.621371192,
            DistanceUnit::NauticalMiles => 0.539956803,
            DistanceUnit::Feet => 3280.839895013,
            DistanceUnit::Inches => 39370.078740158,
        }
    }
}

/// Angle representation of the stored coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    /// Decimal degrees (the feed and the catalog use these).
    Degrees,
    Radians,
}

/// A point on the world map: (latitude, longitude).
///
/// Immutable once constructed. Values are decimal degrees unless an
/// [`AngleUnit`] says otherwise at distance time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` via the haversine formula.
    pub fn distance_in(&self, other: &Coordinates, unit: DistanceUnit, angles: AngleUnit) -> f64 {
        let (lat1, lon1, lat2, lon2) = match angles {
            AngleUnit::Degrees => (
                self.latitude.to_radians(),
                self.longitude.to_radians(),
                other.latitude.to_radians(),
                other.longitude.to_radians(),
            ),
            AngleUnit::Radians => (self.latitude, self.longitude, other.latitude, other.longitude),
        };

        let a = ((lat2 - lat1) * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * ((lon2 - lon1) * 0.5).sin().powi(2);

        2.0 * EARTH_RADIUS_KM * unit.per_km() * a.sqrt().asin()
    }

    /// Distance to `other` in metres, assuming decimal degrees.
    pub fn distance_m(&self, other: &Coordinates) -> f64 {
        self.distance_in(other, DistanceUnit::Metres, AngleUnit::Degrees)
    }
}
