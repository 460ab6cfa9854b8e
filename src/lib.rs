//! Spacecraft rendezvous simulation.
//!
//! A chaser closes on a target in a circular orbit. Relative motion follows
//! the Clohessy-Wiltshire solution, guidance is the ZEM/ZEV feedback law
//! recomputed every thruster pulse, and the thruster is modelled as off,
//! throttled, or on-off.

pub mod config;
pub mod dynamics;
pub mod gnc;
pub mod io;
pub mod orbital;
pub mod sim;

pub use config::{load_parameters, ConfigError, SimulationParameters};
pub use dynamics::RelativeState;
pub use gnc::ThrustMode;
pub use sim::{simulate, simulate_with, Arrival, Rendezvous, SimError};
