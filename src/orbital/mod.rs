pub mod elements;
pub mod propagator;

pub use elements::{circular_orbit_sma, kepler_mean_motion, orbital_period, MU_EARTH, R_EARTH};
pub use propagator::{hill_derivatives, propagate_cw, propagate_hill_rk4};
