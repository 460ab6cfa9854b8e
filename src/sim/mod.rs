pub mod event;
pub mod history;
pub mod runner;

pub use history::{History, StateHistory, ThrustHistory, TimeOrderError};
pub use runner::{coast_reference, simulate, simulate_with, Arrival, Rendezvous, SimError};
