use std::f64::consts::PI;

pub const MU_EARTH: f64 = 3.986_004_418e14; // m^3/s^2
pub const R_EARTH: f64 = 6_378_137.0; // equatorial radius, m

/// Kepler mean motion n = sqrt(mu / a^3), rad/s.
///
/// `sma` and `mu` must be positive; this is not checked here.
pub fn kepler_mean_motion(sma: f64, mu: f64) -> f64 {
    (mu / (sma * sma * sma)).sqrt()
}

/// Period of a circular orbit with the given mean motion (s).
pub fn orbital_period(mean_motion: f64) -> f64 {
    2.0 * PI / mean_motion
}

/// Semi-major axis of a circular Earth orbit at `altitude` metres.
pub fn circular_orbit_sma(altitude: f64) -> f64 {
    R_EARTH + altitude
}
