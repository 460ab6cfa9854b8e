use nalgebra::Vector3;

use crate::dynamics::state::RelativeState;
use crate::orbital::propagator::propagate_cw;
use super::guidance::{zem_zev_acceleration, zero_effort_errors};

/// Trait for rendezvous guidance laws.
///
/// Implement this to plug a custom guidance law into the simulation loop.
/// The loop only asks for a command while time-to-go is positive and the
/// thruster is not switched off; saturation is applied afterwards.
pub trait Controller {
    /// Commanded (unsaturated) acceleration for the next pulse, m/s^2.
    fn command(&mut self, state: &RelativeState, time_to_go: f64, mean_motion: f64) -> Vector3<f64>;

    /// Reset controller internal state.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

// ---------------------------------------------------------------------------
// ZEM/ZEV controller: coast prediction + feedback law
// ---------------------------------------------------------------------------

/// Default guidance: predict the coast-only arrival state with the CW
/// solution, then apply the ZEM/ZEV law to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZemZevController;

impl ZemZevController {
    pub fn new() -> Self {
        Self
    }
}

impl Controller for ZemZevController {
    fn command(&mut self, state: &RelativeState, time_to_go: f64, mean_motion: f64) -> Vector3<f64> {
        let zero_thrust_end = propagate_cw(state, time_to_go, mean_motion, &Vector3::zeros());
        let errors = zero_effort_errors(&zero_thrust_end);
        zem_zev_acceleration(&errors, time_to_go)
    }

    fn name(&self) -> &str {
        "ZemZevController"
    }
}
