use std::path::PathBuf;

use rvd_sim::config::SimulationParameters;
use rvd_sim::dynamics::RelativeState;
use rvd_sim::gnc::ThrustMode;
use rvd_sim::orbital::{circular_orbit_sma, orbital_period, MU_EARTH};
use rvd_sim::sim;

/// Closing along the V-bar from 1 km behind a target at 400 km altitude,
/// guided vs. the coast-only drift it would follow without thrust.
fn main() {
    pretty_env_logger::init();

    let sma = circular_orbit_sma(400e3);
    let params = SimulationParameters {
        start_time: 0.0,
        end_time: 900.0,
        gravitational_parameter: MU_EARTH,
        target_semi_major_axis: sma,
        chaser_initial_state: RelativeState::from_array([-1000.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        thrust_mode: ThrustMode::Throttle,
        thrust_maximum: 0.0,
        thrust_frequency: 1.0,
        chaser_wet_mass: 500.0,
        arrival_distance_tolerance: 1.0,
        output_directory: PathBuf::from("output"),
        state_history_filename: "vbar_state.csv".into(),
        thrust_history_filename: "vbar_thrust.csv".into(),
    };

    let n = params.mean_motion();
    println!("Target orbit: a = {:.0} m, period = {:.1} min", sma, orbital_period(n) / 60.0);

    let guided = match sim::simulate(&params) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("simulation failed: {}", e);
            return;
        }
    };
    let coast = match sim::coast_reference(&params) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("coast reference failed: {}", e);
            return;
        }
    };

    println!("{:>8} {:>12} {:>12}", "t (s)", "guided (m)", "coast (m)");
    for ((t, g), (_, c)) in guided.states.iter().zip(coast.iter()).step_by(90) {
        println!("{:>8.0} {:>12.2} {:>12.2}", t, g.range(), c.range());
    }

    println!();
    println!(
        "Final distance: {:.4} (tolerance {}) -> {}",
        guided.arrival.final_distance,
        guided.arrival.tolerance,
        if guided.arrival.reached { "target reached" } else { "target not reached" }
    );
}
