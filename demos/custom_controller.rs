use std::path::PathBuf;

use nalgebra::Vector3;

use rvd_sim::config::SimulationParameters;
use rvd_sim::dynamics::RelativeState;
use rvd_sim::gnc::{Controller, ThrustMode};
use rvd_sim::orbital::{kepler_mean_motion, MU_EARTH};
use rvd_sim::sim;

/// A crude bang-bang law: thrust straight at the target until the range
/// drops below `brake_range`, then push against the velocity.
struct BangBangController {
    brake_range: f64,
    accel: f64,
}

impl Controller for BangBangController {
    fn command(&mut self, state: &RelativeState, _time_to_go: f64, _mean_motion: f64) -> Vector3<f64> {
        if state.range() > self.brake_range {
            -state.pos.normalize() * self.accel
        } else if state.speed() > 1e-6 {
            -state.vel.normalize() * self.accel
        } else {
            Vector3::zeros()
        }
    }

    fn name(&self) -> &str {
        "BangBang"
    }
}

fn main() {
    let params = SimulationParameters {
        start_time: 0.0,
        end_time: 1200.0,
        gravitational_parameter: MU_EARTH,
        target_semi_major_axis: 6_778_137.0,
        chaser_initial_state: RelativeState::from_array([-500.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        thrust_mode: ThrustMode::Throttle,
        thrust_maximum: 2.0,
        thrust_frequency: 1.0,
        chaser_wet_mass: 400.0,
        arrival_distance_tolerance: 5.0,
        output_directory: PathBuf::from("output"),
        state_history_filename: "bangbang_state.csv".into(),
        thrust_history_filename: "bangbang_thrust.csv".into(),
    };

    let n = kepler_mean_motion(params.target_semi_major_axis, params.gravitational_parameter);
    let mut controller = BangBangController { brake_range: 150.0, accel: 0.004 };

    println!("Simulating with {} controller (n = {:.4e} rad/s)...", controller.name(), n);
    let run = match sim::simulate_with(&params, &mut controller) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("simulation failed: {}", e);
            return;
        }
    };

    let closest = run.states.values().map(|s| s.range()).fold(f64::INFINITY, f64::min);
    let last = run.final_state();
    println!("Pulses: {}", run.pulses);
    println!("Closest approach: {:.1} m", closest);
    println!("Final range: {:.1} m, speed {:.3} m/s", last.range(), last.speed());
    println!("Final distance (6-vector): {:.3}", run.arrival.final_distance);
    println!("Events: {}", run.events.len());
}
