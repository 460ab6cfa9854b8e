use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::SimulationParameters;
use crate::sim::runner::Rendezvous;

/// Summary statistics computed from a rendezvous run.
#[derive(Debug, Clone, Serialize)]
pub struct RendezvousSummary {
    pub thrust_mode: &'static str,
    pub pulses: usize,
    pub start_time_s: f64,
    pub end_time_s: f64,
    /// Norm of the final 6-vector, the value compared against the tolerance.
    pub final_distance: f64,
    pub final_range_m: f64,
    pub final_speed_m_s: f64,
    pub arrival_tolerance: f64,
    pub target_reached: bool,
    pub throttled: bool,
    pub delta_v_m_s: f64,
    pub peak_thrust_n: f64,
    pub events: usize,
}

impl RendezvousSummary {
    /// Compute summary from a finished run.
    pub fn from_run(params: &SimulationParameters, run: &Rendezvous) -> Self {
        let pulse = params.pulse_duration();
        let mass = params.chaser_wet_mass;

        let delta_v: f64 = run
            .thrust
            .values()
            .map(|f| f.norm() / mass * pulse)
            .sum();
        let peak_thrust = run.thrust.values().map(|f| f.norm()).fold(0.0_f64, f64::max);

        let last = run.final_state();
        let end_time = run.states.last().map_or(params.start_time, |(t, _)| t);

        RendezvousSummary {
            thrust_mode: params.thrust_mode.label(),
            pulses: run.pulses,
            start_time_s: params.start_time,
            end_time_s: end_time,
            final_distance: run.arrival.final_distance,
            final_range_m: last.range(),
            final_speed_m_s: last.speed(),
            arrival_tolerance: run.arrival.tolerance,
            target_reached: run.arrival.reached,
            throttled: run.throttled(),
            delta_v_m_s: delta_v,
            peak_thrust_n: peak_thrust,
            events: run.events.len(),
        }
    }
}

/// Write the summary as pretty-printed JSON.
pub fn write_summary<W: Write>(writer: W, summary: &RendezvousSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, summary)?;
    Ok(())
}

/// Write summary JSON to a file, creating the directory if needed.
pub fn write_summary_file(path: &Path, summary: &RendezvousSummary) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    write_summary(&mut file, summary)?;
    writeln!(file)
}
