use std::path::PathBuf;

use rvd_sim::config::SimulationParameters;
use rvd_sim::dynamics::RelativeState;
use rvd_sim::gnc::ThrustMode;
use rvd_sim::io::RendezvousSummary;
use rvd_sim::orbital::MU_EARTH;
use rvd_sim::sim;

fn params(mode: ThrustMode, thrust_maximum: f64) -> SimulationParameters {
    SimulationParameters {
        start_time: 0.0,
        end_time: 600.0,
        gravitational_parameter: MU_EARTH,
        target_semi_major_axis: 6_778_137.0,
        chaser_initial_state: RelativeState::from_array([-800.0, 50.0, 100.0, 0.5, 0.0, -0.2]),
        thrust_mode: mode,
        thrust_maximum,
        thrust_frequency: 0.5,
        chaser_wet_mass: 500.0,
        arrival_distance_tolerance: 2.0,
        output_directory: PathBuf::from("output"),
        state_history_filename: "state.csv".into(),
        thrust_history_filename: "thrust.csv".into(),
    }
}

fn main() {
    let cases = [
        ("off", params(ThrustMode::Off, 0.0)),
        ("throttle, unconstrained", params(ThrustMode::Throttle, 0.0)),
        ("throttle, 2 N", params(ThrustMode::Throttle, 2.0)),
        ("on-off, 2 N", params(ThrustMode::OnOff, 2.0)),
    ];

    println!(
        "{:<26} {:>12} {:>10} {:>10} {:>9} {:>7}",
        "mode", "final dist", "dv (m/s)", "peak (N)", "throttle", "events"
    );
    for (name, p) in &cases {
        let run = match sim::simulate(p) {
            Ok(run) => run,
            Err(e) => {
                println!("{:<26} failed: {}", name, e);
                continue;
            }
        };
        let s = RendezvousSummary::from_run(p, &run);
        println!(
            "{:<26} {:>12.3} {:>10.4} {:>10.4} {:>9} {:>7}",
            name, s.final_distance, s.delta_v_m_s, s.peak_thrust_n, s.throttled, s.events
        );
    }
}
