use crate::state::Location;

const PRESETS: &[(&str, f64, f64)] = &[
    ("Chandpur, Bangladesh", 23.2332, 90.6712),
    ("Dhaka, Bangladesh", 23.8103, 90.4125),
    ("London, UK", 51.5074, -0.1278),
    ("New York, USA", 40.7128, -74.006),
    ("Dubai, UAE", 25.2048, 55.2708),
    ("Istanbul, Turkey", 41.0082, 28.9784),
    ("Mecca, Saudi Arabia", 21.4225, 39.8262),
    ("Chittagong, Bangladesh", 22.3569, 91.7832),
    ("Sylhet, Bangladesh", 24.8949, 91.8687),
    ("Rajshahi, Bangladesh", 24.3745, 88.6042),
    ("Kuala Lumpur, Malaysia", 3.139, 101.6869),
    ("Jakarta, Indonesia", -6.2088, 106.8456),
    ("Cairo, Egypt", 30.0444, 31.2357),
    ("Medina, Saudi Arabia", 24.4539, 39.6142),
    ("Toronto, Canada", 43.6532, -79.3832),
];

pub fn preset_locations() -> Vec<Location> {
    PRESETS
        .iter()
        .map(|&(name, lat, lon)| Location::new(name, lat, lon))
        .collect()
}

/// The location a fresh install starts with.
pub fn default_location() -> Location {
    let (name, lat, lon) = PRESETS[0];
    Location::new(name, lat, lon)
}

/// Case-insensitive substring match on the location name.
/// An empty query returns every preset.
pub fn search_locations(query: &str) -> Vec<Location> {
    let needle = query.trim().to_lowercase();
    preset_locations()
        .into_iter()
        .filter(|loc| loc.name.to_lowercase().contains(&needle))
        .collect()
}
