use crate::dynamics::state::RelativeState;
use crate::gnc::ThrustCommand;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Guidance asked for more than the thruster can give; command clipped.
    ThrottleSaturated,
    /// Chaser came within the arrival tolerance.
    ToleranceEntered,
    ThrusterOn,
    ThrusterOff,
    Custom(String),
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub state: RelativeState,
}

/// Trait for passive event detectors.
/// Implementations inspect each pulse (state before, state after, and the
/// thrust applied in between) and report events.
pub trait EventDetector {
    fn check(
        &mut self,
        prev: &RelativeState,
        current: &RelativeState,
        cmd: &ThrustCommand,
    ) -> Option<EventKind>;
}

/// Reports the first pulse on which the throttle saturates.
#[derive(Debug, Default)]
pub struct SaturationDetector {
    fired: bool,
}

impl EventDetector for SaturationDetector {
    fn check(&mut self, _prev: &RelativeState, _current: &RelativeState, cmd: &ThrustCommand) -> Option<EventKind> {
        if cmd.saturated && !self.fired {
            self.fired = true;
            Some(EventKind::ThrottleSaturated)
        } else {
            None
        }
    }
}

/// Detects the chaser entering the arrival tolerance (6-vector norm).
///
/// Fires at most once per run. A pulse only reports an outside-to-inside
/// crossing, so a chaser that starts inside must be reported through
/// [`ToleranceDetector::check_initial`].
pub struct ToleranceDetector {
    pub tolerance: f64,
    fired: bool,
}

impl ToleranceDetector {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance, fired: false }
    }

    /// Report a run that begins inside the tolerance. Call before the first pulse.
    pub fn check_initial(&mut self, initial: &RelativeState) -> Option<EventKind> {
        if !self.fired && initial.norm() <= self.tolerance {
            self.fired = true;
            Some(EventKind::ToleranceEntered)
        } else {
            None
        }
    }
}

impl EventDetector for ToleranceDetector {
    fn check(&mut self, prev: &RelativeState, current: &RelativeState, _cmd: &ThrustCommand) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.norm() > self.tolerance && current.norm() <= self.tolerance {
            self.fired = true;
            Some(EventKind::ToleranceEntered)
        } else {
            None
        }
    }
}

/// Reports thruster switching on and off between pulses.
#[derive(Debug, Default)]
pub struct ThrusterSwitchDetector {
    firing: bool,
}

impl EventDetector for ThrusterSwitchDetector {
    fn check(&mut self, _prev: &RelativeState, _current: &RelativeState, cmd: &ThrustCommand) -> Option<EventKind> {
        let firing = cmd.is_firing();
        if firing == self.firing {
            return None;
        }
        self.firing = firing;
        Some(if firing { EventKind::ThrusterOn } else { EventKind::ThrusterOff })
    }
}
