use nalgebra::Vector3;

use crate::dynamics::state::RelativeState;

// ---------------------------------------------------------------------------
// Guidance: ZEM/ZEV feedback law
// ---------------------------------------------------------------------------

/// Zero-effort miss and zero-effort velocity.
///
/// Both are measured against the target at rest at the origin: they are the
/// negated position and velocity the chaser would have at arrival if it
/// coasted from now on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroEffortErrors {
    pub miss: Vector3<f64>,     // m
    pub velocity: Vector3<f64>, // m/s
}

/// Derive ZEM/ZEV from the coast-only end state.
pub fn zero_effort_errors(zero_thrust_end: &RelativeState) -> ZeroEffortErrors {
    ZeroEffortErrors {
        miss: -zero_thrust_end.pos,
        velocity: -zero_thrust_end.vel,
    }
}

/// Commanded acceleration from the ZEM/ZEV law:
///
///   a = 6 / T^2 * ZEM - 2 / T * ZEV
///
/// with `T` the time-to-go in seconds.
///
/// # Panics
/// If `time_to_go` is not strictly positive.
pub fn zem_zev_acceleration(errors: &ZeroEffortErrors, time_to_go: f64) -> Vector3<f64> {
    assert!(
        time_to_go > 0.0,
        "ZEM/ZEV guidance needs a positive time-to-go, got {}",
        time_to_go
    );
    let t = time_to_go;
    Vector3::from_fn(|i, _| 6.0 / (t * t) * errors.miss[i] - 2.0 / t * errors.velocity[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_negated_end_state() {
        let end = RelativeState::from_array([10.0, -2.0, 3.0, 0.1, 0.0, -0.4]);
        let e = zero_effort_errors(&end);
        assert_eq!(e.miss, Vector3::new(-10.0, 2.0, -3.0));
        assert_eq!(e.velocity, Vector3::new(-0.1, -0.0, 0.4));
    }

    #[test]
    fn law_gains() {
        let e = ZeroEffortErrors {
            miss: Vector3::new(100.0, 0.0, 0.0),
            velocity: Vector3::new(0.0, 2.0, 0.0),
        };
        let a = zem_zev_acceleration(&e, 10.0);
        assert!((a.x - 6.0).abs() < 1e-12, "6/T^2 * 100 = 6, got {}", a.x);
        assert!((a.y + 0.4).abs() < 1e-12, "-2/T * 2 = -0.4, got {}", a.y);
        assert_eq!(a.z, 0.0);
    }

    #[test]
    fn zero_errors_command_nothing() {
        let e = zero_effort_errors(&RelativeState::zeros());
        assert_eq!(zem_zev_acceleration(&e, 42.0), Vector3::zeros());
    }

    #[test]
    #[should_panic(expected = "positive time-to-go")]
    fn zero_time_to_go_panics() {
        let e = zero_effort_errors(&RelativeState::zeros());
        zem_zev_acceleration(&e, 0.0);
    }
}
