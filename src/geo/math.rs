// Great-circle helpers used for scoring guesses and resolving distance/compass hints.
//
// All angles come in as degrees; the formulas assume a spherical Earth.
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe, serialized the same way as the bundled country dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// The eight compass octants, in clockwise order starting at North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum CompassDirection {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
}

const OCTANTS: [CompassDirection; 8] = [
    CompassDirection::North,
    CompassDirection::NorthEast,
    CompassDirection::East,
    CompassDirection::SouthEast,
    CompassDirection::South,
    CompassDirection::SouthWest,
    CompassDirection::West,
    CompassDirection::NorthWest,
];

impl CompassDirection {
    /// Maps a bearing in degrees (any range) to the nearest octant
    pub fn from_bearing(bearing: f64) -> Self {
        let normalized = bearing.rem_euclid(360.0);
        let index = (normalized / 45.0).round() as usize % OCTANTS.len();
        OCTANTS[index]
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            CompassDirection::North => "N",
            CompassDirection::NorthEast => "NE",
            CompassDirection::East => "E",
            CompassDirection::SouthEast => "SE",
            CompassDirection::South => "S",
            CompassDirection::SouthWest => "SW",
            CompassDirection::West => "W",
            CompassDirection::NorthWest => "NW",
        }
    }

    /// Human readable name used in hint text
    pub fn name(&self) -> &'static str {
        match self {
            CompassDirection::North => "North",
            CompassDirection::NorthEast => "North-East",
            CompassDirection::East => "East",
            CompassDirection::SouthEast => "South-East",
            CompassDirection::South => "South",
            CompassDirection::SouthWest => "South-West",
            CompassDirection::West => "West",
            CompassDirection::NorthWest => "North-West",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Haversine distance between two coordinates, rounded to the nearest kilometre
pub fn distance_km(a: Coordinate, b: Coordinate) -> u32 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    // Rounding noise can push h marginally outside [0, 1] for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    (EARTH_RADIUS_KM * c).round() as u32
}

/// Initial great-circle bearing from `from` to `to` in degrees within [0, 360).
///
/// Returns `None` when both points coincide, since no heading exists at zero distance.
pub fn initial_bearing(from: Coordinate, to: Coordinate) -> Option<f64> {
    if from == to {
        return None;
    }

    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    if y == 0.0 && x == 0.0 {
        return None;
    }

    Some(y.atan2(x).to_degrees().rem_euclid(360.0))
}

/// Nearest compass octant of the initial bearing, `None` for coincident points
pub fn bearing_compass(from: Coordinate, to: Coordinate) -> Option<CompassDirection> {
    initial_bearing(from, to).map(CompassDirection::from_bearing)
}

/// Points awarded for a guess that landed `km` kilometres from the answer
pub fn points_for_distance(km: u32) -> u32 {
    match km {
        0..=500 => 50,
        501..=1500 => 40,
        1501..=3000 => 30,
        3001..=5000 => 20,
        _ => 10,
    }
}
