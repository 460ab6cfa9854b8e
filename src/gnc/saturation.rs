use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Thruster model: mode + saturation
// ---------------------------------------------------------------------------

/// Chaser thrust mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrustMode {
    /// Thruster switched off; the chaser coasts.
    Off,
    /// Continuous 0-100% throttle. With no thrust limit, 100% is unbounded.
    Throttle,
    /// Bang-bang: either 0% or 100%. Needs a thrust limit.
    OnOff,
}

impl ThrustMode {
    pub fn label(&self) -> &'static str {
        match self {
            ThrustMode::Off => "OFF",
            ThrustMode::Throttle => "throttle",
            ThrustMode::OnOff => "ON-OFF",
        }
    }
}

/// Acceleration actually applied over a pulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustCommand {
    pub accel: Vector3<f64>, // m/s^2
    /// True when a throttled command was clipped to the thrust limit.
    pub saturated: bool,
}

impl ThrustCommand {
    pub fn coast() -> Self {
        Self { accel: Vector3::zeros(), saturated: false }
    }

    pub fn is_firing(&self) -> bool {
        self.accel != Vector3::zeros()
    }
}

/// Map a commanded acceleration onto what the thruster can deliver.
///
/// `max_accel` is the thrust limit divided by chaser mass; zero means
/// unconstrained.
///
/// - `Off`: always zero.
/// - `Throttle`: passed through unless longer than `max_accel`, in which case
///   it is rescaled to `max_accel` along the same direction.
/// - `OnOff`: full `max_accel` along the command if the command exceeds half
///   of it, otherwise zero.
///
/// # Panics
/// If `mode` is `OnOff` and `max_accel` is zero.
pub fn saturate(commanded: &Vector3<f64>, mode: ThrustMode, max_accel: f64) -> ThrustCommand {
    match mode {
        ThrustMode::Off => ThrustCommand::coast(),
        ThrustMode::Throttle => {
            let norm = commanded.norm();
            if max_accel == 0.0 || norm <= max_accel {
                ThrustCommand { accel: *commanded, saturated: false }
            } else {
                ThrustCommand { accel: commanded * (max_accel / norm), saturated: true }
            }
        }
        ThrustMode::OnOff => {
            assert!(max_accel > 0.0, "on-off thrust mode needs a thrust limit");
            let norm = commanded.norm();
            if norm > max_accel / 2.0 {
                ThrustCommand { accel: commanded * (max_accel / norm), saturated: false }
            } else {
                ThrustCommand::coast()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_vectors() -> Vec<Vector3<f64>> {
        let mut v = Vec::new();
        for i in 1..=40 {
            let k = i as f64;
            v.push(Vector3::new(0.03 * k, -0.017 * k * k / 10.0, 0.5 - 0.02 * k));
            v.push(Vector3::new(-1e-4 * k, 2e-4, 0.0));
        }
        v
    }

    #[test]
    fn off_is_always_zero() {
        let cmd = saturate(&Vector3::new(3.0, 4.0, 0.0), ThrustMode::Off, 0.0);
        assert_eq!(cmd, ThrustCommand::coast());
        assert!(!cmd.is_firing());
    }

    #[test]
    fn throttle_clips_to_limit() {
        let commanded = Vector3::new(3.0, 0.0, 4.0); // |a| = 5
        let cmd = saturate(&commanded, ThrustMode::Throttle, 2.0);
        assert!(cmd.saturated);
        assert!((cmd.accel.norm() - 2.0).abs() < 1e-9, "got |a| = {}", cmd.accel.norm());
        let dir_err = (cmd.accel.normalize() - commanded.normalize()).norm();
        assert!(dir_err < 1e-12, "direction changed by {:.3e}", dir_err);
    }

    #[test]
    fn throttle_passes_small_commands() {
        let commanded = Vector3::new(0.1, -0.2, 0.05);
        let cmd = saturate(&commanded, ThrustMode::Throttle, 2.0);
        assert!(!cmd.saturated);
        assert_eq!(cmd.accel, commanded);
    }

    #[test]
    fn throttle_unconstrained_when_limit_is_zero() {
        let commanded = Vector3::new(1e3, 0.0, -1e3);
        let cmd = saturate(&commanded, ThrustMode::Throttle, 0.0);
        assert!(!cmd.saturated);
        assert_eq!(cmd.accel, commanded);
    }

    #[test]
    fn throttle_is_idempotent() {
        for v in probe_vectors() {
            for &m in &[0.0, 0.05, 0.3, 1.0] {
                let once = saturate(&v, ThrustMode::Throttle, m).accel;
                let twice = saturate(&once, ThrustMode::Throttle, m).accel;
                let err = (once - twice).norm();
                assert!(err <= 1e-15 * (1.0 + once.norm()), "not a fixed point: {:?} vs {:?}", once, twice);
            }
        }
    }

    #[test]
    fn on_off_is_zero_or_full() {
        let max = 0.2;
        let mut fired = 0;
        for v in probe_vectors() {
            let cmd = saturate(&v, ThrustMode::OnOff, max);
            let mag = cmd.accel.norm();
            assert!(
                mag == 0.0 || (mag - max).abs() < 1e-12,
                "on-off produced intermediate magnitude {}",
                mag
            );
            if mag > 0.0 {
                fired += 1;
                assert!(v.norm() > max / 2.0);
            }
        }
        assert!(fired > 0, "probe set should trigger at least one firing");
    }

    #[test]
    fn on_off_threshold_is_half_limit() {
        let cmd = saturate(&Vector3::new(0.5, 0.0, 0.0), ThrustMode::OnOff, 1.0);
        assert!(!cmd.is_firing(), "exactly half the limit stays off");
        let cmd = saturate(&Vector3::new(0.0, 0.0, -0.51), ThrustMode::OnOff, 1.0);
        assert!((cmd.accel - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "needs a thrust limit")]
    fn on_off_without_limit_panics() {
        saturate(&Vector3::new(1.0, 0.0, 0.0), ThrustMode::OnOff, 0.0);
    }

    #[test]
    fn mode_names_deserialize() {
        let modes: Vec<ThrustMode> = serde_json::from_str(r#"["off", "throttle", "on_off"]"#).unwrap();
        assert_eq!(modes, vec![ThrustMode::Off, ThrustMode::Throttle, ThrustMode::OnOff]);
    }
}
