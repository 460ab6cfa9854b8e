use log::{debug, info, warn};
use nalgebra::Vector3;
use thiserror::Error;

use crate::config::SimulationParameters;
use crate::dynamics::state::RelativeState;
use crate::gnc::{saturate, Controller, ThrustCommand, ThrustMode, ZemZevController};
use crate::orbital::propagator::propagate_cw;
use super::event::{
    EventDetector, EventKind, SaturationDetector, SimEvent, ThrusterSwitchDetector, ToleranceDetector,
};
use super::history::{StateHistory, ThrustHistory};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Arrival check performed once the loop has terminated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    /// Norm of the full final 6-vector [m; m/s].
    pub final_distance: f64,
    pub tolerance: f64,
    pub reached: bool,
}

impl Arrival {
    pub fn assess(final_state: &RelativeState, tolerance: f64) -> Self {
        let final_distance = final_state.norm();
        Arrival {
            final_distance,
            tolerance,
            reached: final_distance <= tolerance,
        }
    }
}

/// Everything a rendezvous run produces.
#[derive(Debug, Clone)]
pub struct Rendezvous {
    pub states: StateHistory,
    pub thrust: ThrustHistory,
    pub events: Vec<SimEvent>,
    pub arrival: Arrival,
    pub pulses: usize,
}

impl Rendezvous {
    pub fn final_state(&self) -> RelativeState {
        self.states
            .last()
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }

    /// Whether the throttle hit its limit at any point.
    pub fn throttled(&self) -> bool {
        self.events.iter().any(|e| e.kind == EventKind::ThrottleSaturated)
    }
}

/// Inputs the loop cannot run with.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("target mean motion is zero or not finite ({0}); CW propagation is undefined")]
    ZeroMeanMotion(f64),
    #[error("thrust pulse frequency must be positive, got {0}")]
    NonPositivePulseFrequency(f64),
    #[error("on-off thrust mode needs a non-zero thrust maximum")]
    OnOffWithoutThrustLimit,
    #[error("chaser initial state is not finite")]
    NonFiniteState,
    #[error("thrust pulse of {pulse} s is below the time resolution at t = {time} s")]
    PulseBelowTimeResolution { pulse: f64, time: f64 },
}

fn check_inputs(params: &SimulationParameters, n: f64) -> Result<(), SimError> {
    if !n.is_finite() || n == 0.0 {
        return Err(SimError::ZeroMeanMotion(n));
    }
    if !(params.thrust_frequency > 0.0) || !params.thrust_frequency.is_finite() {
        return Err(SimError::NonPositivePulseFrequency(params.thrust_frequency));
    }
    if params.thrust_mode == ThrustMode::OnOff && !(params.max_thrust_acceleration() > 0.0) {
        return Err(SimError::OnOffWithoutThrustLimit);
    }
    if !params.chaser_initial_state.is_finite() {
        return Err(SimError::NonFiniteState);
    }
    // Every pulse must move the clock, or the histories stop growing.
    let pulse = params.pulse_duration();
    for time in [params.start_time, params.end_time] {
        if !(time + pulse > time) {
            return Err(SimError::PulseBelowTimeResolution { pulse, time });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendezvous simulation loop
// ---------------------------------------------------------------------------

/// Simulate a rendezvous with a custom guidance law.
///
/// Time advances in fixed thruster pulses of `1 / thrust_frequency` seconds
/// until time-to-go reaches zero; the last pulse may run past the end time.
/// Guidance is recomputed at the start of every pulse and the resulting
/// acceleration is held for the whole pulse.
pub fn simulate_with(
    params: &SimulationParameters,
    controller: &mut dyn Controller,
) -> Result<Rendezvous, SimError> {
    let n = params.mean_motion();
    check_inputs(params, n)?;

    let pulse = params.pulse_duration();
    let max_accel = params.max_thrust_acceleration();
    let mode = params.thrust_mode;

    info!(
        "rendezvous: mode={} controller={} pulse={} s mean_motion={:.6e} rad/s",
        mode.label(),
        controller.name(),
        pulse,
        n
    );

    let mut current_time = params.start_time;
    let mut state = params.chaser_initial_state;
    let mut time_to_go = params.end_time - params.start_time;

    let cap = params.pulse_count().min(1_000_000);
    let mut states = StateHistory::with_capacity(cap + 1);
    let mut thrust = ThrustHistory::with_capacity(cap);
    let mut events = Vec::new();

    let mut tolerance = ToleranceDetector::new(params.arrival_distance_tolerance);
    if let Some(kind) = tolerance.check_initial(&state) {
        events.push(SimEvent { time: current_time, kind, state });
    }

    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(SaturationDetector::default()),
        Box::new(tolerance),
        Box::new(ThrusterSwitchDetector::default()),
    ];

    states.record(current_time, state);
    let mut pulses = 0;

    while time_to_go > 0.0 {
        // Guidance + saturation
        let cmd = match mode {
            ThrustMode::Off => ThrustCommand::coast(),
            _ => {
                let commanded = controller.command(&state, time_to_go, n);
                saturate(&commanded, mode, max_accel)
            }
        };

        // Hold the command over one pulse
        let next = propagate_cw(&state, pulse, n, &cmd.accel);

        thrust.record(current_time, cmd.accel * params.chaser_wet_mass);

        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&state, &next, &cmd) {
                let (time, at) = match kind {
                    EventKind::ToleranceEntered => (current_time + pulse, next),
                    _ => (current_time, state),
                };
                if kind == EventKind::ThrottleSaturated {
                    warn!("maximum thrust level reached at t={} s, thruster throttled", time);
                }
                events.push(SimEvent { time, kind, state: at });
            }
        }

        debug!(
            "t={:.3} ttg={:.3} accel=[{:.6e}, {:.6e}, {:.6e}] range={:.3}",
            current_time, time_to_go, cmd.accel.x, cmd.accel.y, cmd.accel.z, next.range()
        );

        state = next;
        current_time += pulse;
        time_to_go -= pulse;
        pulses += 1;

        states.record(current_time, state);
    }

    let arrival = Arrival::assess(&state, params.arrival_distance_tolerance);
    info!(
        "rendezvous finished: {} pulses, final distance {:.6} (tolerance {}), target {}",
        pulses,
        arrival.final_distance,
        arrival.tolerance,
        if arrival.reached { "reached" } else { "not reached" }
    );

    Ok(Rendezvous { states, thrust, events, arrival, pulses })
}

/// Simulate with the default ZEM/ZEV guidance (convenience wrapper).
pub fn simulate(params: &SimulationParameters) -> Result<Rendezvous, SimError> {
    let mut controller = ZemZevController::new();
    simulate_with(params, &mut controller)
}

/// Coast-only reference trajectory over the same pulse grid, for comparison
/// against a guided run.
pub fn coast_reference(params: &SimulationParameters) -> Result<StateHistory, SimError> {
    let n = params.mean_motion();
    check_inputs(params, n)?;
    let pulse = params.pulse_duration();

    let mut history = StateHistory::with_capacity(params.pulse_count().min(1_000_000) + 1);
    let mut t = params.start_time;
    let mut time_to_go = params.duration();
    let mut state = params.chaser_initial_state;
    history.record(t, state);
    while time_to_go > 0.0 {
        state = propagate_cw(&state, pulse, n, &Vector3::zeros());
        t += pulse;
        time_to_go -= pulse;
        history.record(t, state);
    }
    Ok(history)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
