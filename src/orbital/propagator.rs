use nalgebra::Vector3;

use crate::dynamics::state::RelativeState;

// ---------------------------------------------------------------------------
// Clohessy-Wiltshire closed-form solution with constant forcing
// ---------------------------------------------------------------------------

/// Propagate a relative state over `dt` seconds under constant acceleration.
///
/// Closed-form Clohessy-Wiltshire solution for a circular reference orbit
/// with mean motion `n` (rad/s). `accel` is the specific thrust acceleration
/// (m/s^2) held constant over the interval.
///
/// The forcing terms enter the position channel only; the returned
/// velocities are the unforced solution.
///
/// # Panics
/// If `n` is zero: every term is scaled by `1/n` or `1/n^2`.
pub fn propagate_cw(state: &RelativeState, dt: f64, n: f64, accel: &Vector3<f64>) -> RelativeState {
    assert!(n != 0.0, "CW propagation is undefined for zero mean motion");

    let (x0, y0, z0) = (state.pos.x, state.pos.y, state.pos.z);
    let (vx0, vy0, vz0) = (state.vel.x, state.vel.y, state.vel.z);
    let (ax, ay, az) = (accel.x, accel.y, accel.z);

    let tau = n * dt;
    let (s, c) = (tau.sin(), tau.cos());
    let n2 = n * n;

    let x = (4.0 / n * vx0 - 6.0 * z0) * s
        - 2.0 * vz0 / n * c
        + (6.0 * n * z0 - 3.0 * vx0) * dt
        + (x0 + 2.0 * vz0 / n)
        // constant force terms
        + 2.0 / n2 * az * (tau - s)
        + ax * (4.0 / n2 * (1.0 - c) - 1.5 * dt * dt);

    let y = y0 * c
        + vy0 / n * s
        // constant force terms
        + ay / n2 * (1.0 - c);

    let z = (2.0 * vx0 / n - 3.0 * z0) * c
        + vz0 / n * s
        + (4.0 * z0 - 2.0 * vx0 / n)
        // constant force terms
        + 2.0 / n2 * ax * (s - tau)
        + az / n2 * (1.0 - c);

    let vx = n * (4.0 / n * vx0 - 6.0 * z0) * c + 2.0 * vz0 * s + (6.0 * n * z0 - 3.0 * vx0);
    let vy = -n * y0 * s + vy0 * c;
    let vz = -n * (2.0 * vx0 / n - 3.0 * z0) * s + vz0 * c;

    RelativeState {
        pos: Vector3::new(x, y, z),
        vel: Vector3::new(vx, vy, vz),
    }
}

// ---------------------------------------------------------------------------
// Hill equations (numerical reference)
// ---------------------------------------------------------------------------

/// Time derivative of the relative state under the linear Hill equations.
///
///   xddot = 2 n zdot           + ax
///   yddot = -n^2 y             + ay
///   zddot = 3 n^2 z - 2 n xdot + az
///
/// Returns `(d pos/dt, d vel/dt)`.
pub fn hill_derivatives(
    state: &RelativeState,
    n: f64,
    accel: &Vector3<f64>,
) -> (Vector3<f64>, Vector3<f64>) {
    let dvel = Vector3::new(
        2.0 * n * state.vel.z,
        -n * n * state.pos.y,
        3.0 * n * n * state.pos.z - 2.0 * n * state.vel.x,
    ) + accel;
    (state.vel, dvel)
}

/// RK4 step of the Hill equations.
fn rk4_hill_step(state: &RelativeState, dt: f64, n: f64, accel: &Vector3<f64>) -> RelativeState {
    let shifted = |dr: Vector3<f64>, dv: Vector3<f64>, h: f64| RelativeState {
        pos: state.pos + dr * h,
        vel: state.vel + dv * h,
    };

    let (k1_dr, k1_dv) = hill_derivatives(state, n, accel);
    let (k2_dr, k2_dv) = hill_derivatives(&shifted(k1_dr, k1_dv, dt * 0.5), n, accel);
    let (k3_dr, k3_dv) = hill_derivatives(&shifted(k2_dr, k2_dv, dt * 0.5), n, accel);
    let (k4_dr, k4_dv) = hill_derivatives(&shifted(k3_dr, k3_dv, dt), n, accel);

    RelativeState {
        pos: state.pos + (k1_dr + 2.0 * k2_dr + 2.0 * k3_dr + k4_dr) * (dt / 6.0),
        vel: state.vel + (k1_dv + 2.0 * k2_dv + 2.0 * k3_dv + k4_dv) * (dt / 6.0),
    }
}

/// Integrate the Hill equations over `duration` with fixed RK4 steps of at
/// most `step` seconds. The last step is shortened to land on `duration`.
///
/// Slower than [`propagate_cw`] but independent of it, so the two can be
/// checked against each other.
pub fn propagate_hill_rk4(
    state: &RelativeState,
    duration: f64,
    step: f64,
    n: f64,
    accel: &Vector3<f64>,
) -> RelativeState {
    let n_steps = (duration / step).ceil().max(0.0) as usize;
    if n_steps == 0 {
        return *state;
    }
    let h = duration / n_steps as f64;

    let mut current = *state;
    for _ in 0..n_steps {
        current = rk4_hill_step(&current, h, n, accel);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    const N_LEO: f64 = 0.0011;

    fn sample_state() -> RelativeState {
        RelativeState::from_array([-1200.0, 35.0, 80.0, 0.4, -0.05, 0.12])
    }

    #[test]
    fn zero_duration_is_identity() {
        let s = sample_state();
        let out = propagate_cw(&s, 0.0, N_LEO, &Vector3::new(1e-3, -2e-3, 5e-4));
        let err = (out.as_vector6() - s.as_vector6()).norm();
        assert!(err < 1e-9, "Zero-duration propagation drifted by {:.3e}", err);
    }

    #[test]
    fn golden_single_pulse_coast() {
        // 100 m along-track, at rest, one 10 s coast pulse
        let s = RelativeState::from_array([100.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let out = propagate_cw(&s, 10.0, N_LEO, &Vector3::zeros());
        assert!((out.pos.x - 100.0).abs() < 1e-12, "x = {}", out.pos.x);
        assert!(out.pos.y.abs() < 1e-12 && out.pos.z.abs() < 1e-12);
        assert!(out.vel.norm() < 1e-12);
    }

    #[test]
    fn golden_single_pulse_with_velocity_and_thrust() {
        let s = sample_state();
        let a = Vector3::new(2e-3, 0.0, -1e-3);
        let dt = 10.0;
        let n = N_LEO;
        let out = propagate_cw(&s, dt, n, &a);

        let tau = n * dt;
        let expected_x = (4.0 * 0.4 / n - 6.0 * 80.0) * tau.sin()
            - (2.0 * 0.12 / n) * tau.cos()
            + (6.0 * n * 80.0 - 3.0 * 0.4) * dt
            + (-1200.0 + 2.0 * 0.12 / n)
            + 2.0 / (n * n) * (-1e-3) * (tau - tau.sin())
            + 2e-3 * (4.0 / (n * n) * (1.0 - tau.cos()) - 1.5 * dt * dt);
        assert!(
            (out.pos.x - expected_x).abs() < 1e-9,
            "x mismatch: got {}, expected {}",
            out.pos.x,
            expected_x
        );
    }

    #[test]
    fn cross_track_decoupled() {
        let n = N_LEO;
        let base = RelativeState::from_array([50.0, 0.0, -20.0, 0.0, 0.0, 0.0]);
        let with_y = RelativeState::from_array([50.0, 30.0, -20.0, 0.0, 0.0, 0.0]);

        for &t in &[1.0, 100.0, 1000.0, 4000.0] {
            let a = propagate_cw(&base, t, n, &Vector3::zeros());
            let b = propagate_cw(&with_y, t, n, &Vector3::zeros());
            assert_eq!(a.pos.x, b.pos.x);
            assert_eq!(a.pos.z, b.pos.z);
            assert_eq!(a.vel.x, b.vel.x);
            assert_eq!(a.vel.z, b.vel.z);
            assert!((b.pos.y - 30.0 * (n * t).cos()).abs() < 1e-9);
            assert!(b.pos.y.abs() <= 30.0 + 1e-12, "y amplitude exceeded y0");
        }
    }

    #[test]
    fn closed_form_matches_rk4_unforced() {
        let s = sample_state();
        let duration = 1500.0;
        let cw = propagate_cw(&s, duration, N_LEO, &Vector3::zeros());
        let rk = propagate_hill_rk4(&s, duration, 1.0, N_LEO, &Vector3::zeros());
        let err = (cw.as_vector6() - rk.as_vector6()).norm();
        assert!(err < 1e-6, "CW vs RK4 state mismatch {:.3e}", err);
    }

    #[test]
    fn closed_form_positions_match_rk4_forced() {
        let s = sample_state();
        let a = Vector3::new(-3e-4, 1e-4, 2e-4);
        let duration = 600.0;
        let cw = propagate_cw(&s, duration, N_LEO, &a);
        let rk = propagate_hill_rk4(&s, duration, 0.5, N_LEO, &a);
        let err = (cw.pos - rk.pos).norm();
        assert!(err < 1e-6, "CW vs RK4 position mismatch {:.3e}", err);
    }

    #[test]
    fn forcing_does_not_enter_velocity_channel() {
        let s = sample_state();
        let coast = propagate_cw(&s, 30.0, N_LEO, &Vector3::zeros());
        let burn = propagate_cw(&s, 30.0, N_LEO, &Vector3::new(0.01, 0.01, 0.01));
        assert_eq!(coast.vel, burn.vel);
        assert!((coast.pos - burn.pos).norm() > 1.0);
    }

    #[test]
    fn hill_derivatives_at_rest_on_radial_offset() {
        let s = RelativeState::from_array([0.0, 0.0, 10.0, 0.0, 0.0, 0.0]);
        let (dr, dv) = hill_derivatives(&s, N_LEO, &Vector3::zeros());
        assert_eq!(dr, Vector3::zeros());
        assert!((dv.z - 3.0 * N_LEO * N_LEO * 10.0).abs() < 1e-15);
        assert_eq!(dv.x, 0.0);
    }

    #[test]
    #[should_panic(expected = "zero mean motion")]
    fn zero_mean_motion_panics() {
        propagate_cw(&sample_state(), 10.0, 0.0, &Vector3::zeros());
    }
}
