// Geographic primitives: great-circle math and the country coordinate table

// Public API - what other modules can use
pub use countries::{CoordinateLookup, CountryMarker, GeoError, StaticCountryTable};
pub use math::{
    bearing_compass, distance_km, initial_bearing, points_for_distance, CompassDirection,
    Coordinate,
};

// Internal modules
mod countries;
mod math;
