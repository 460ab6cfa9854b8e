use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rvd_sim::config::{load_parameters, SimulationParameters};
use rvd_sim::io::{write_state_history_file, write_summary_file, write_thrust_history_file, RendezvousSummary};
use rvd_sim::sim::{self, Rendezvous};

#[derive(Parser)]
#[command(author, version, about = "Spacecraft rendezvous simulator (CW dynamics, ZEM/ZEV guidance)")]
struct Cli {
    /// Configuration file (JSON with // comment lines, or .toml)
    config: PathBuf,

    /// Write CSV histories here instead of the configured output directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Also write a JSON run summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    banner();

    let mut params = load_parameters(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    if let Some(dir) = cli.output_dir {
        params = params.with_output_directory(dir);
    }
    print_parameters(&params);

    section("Simulation & Output");
    print_derived(&params);

    println!();
    println!("  Executing simulation ...");
    let run = sim::simulate(&params).context("simulation rejected its inputs")?;
    if run.throttled() {
        println!("  Maximum thrust level reached, thruster throttled!");
    }
    println!("  Simulation completed: {} pulses, {} events", run.pulses, run.events.len());
    println!();

    write_outputs(&params, &run)?;

    if let Some(path) = &cli.summary {
        let summary = RendezvousSummary::from_run(&params, &run);
        write_summary_file(path, &summary)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
        println!("  Summary written to {}", path.display());
    }

    report_arrival(&run);
    println!("====================================================================");
    println!();
    Ok(())
}

fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();
}

fn banner() {
    println!();
    println!("====================================================================");
    println!("  RVD-SIM: spacecraft rendezvous simulation");
    println!("====================================================================");
}

fn section(title: &str) {
    println!();
    println!("  {}", title);
    println!("  ──────────────────────────────────────────────────────────────────");
}

fn print_parameters(p: &SimulationParameters) {
    section("Input Parameters");
    let s = p.chaser_initial_state.to_array();
    println!("  Start time                    [s]          {:>14}", p.start_time);
    println!("  End time                      [s]          {:>14}", p.end_time);
    println!("  Gravitational parameter       [m^3 s^-2]   {:>14e}", p.gravitational_parameter);
    println!("  Target semi-major axis        [m]          {:>14}", p.target_semi_major_axis);
    println!(
        "  Chaser initial state          [m; m/s]     [{}, {}, {}, {}, {}, {}]",
        s[0], s[1], s[2], s[3], s[4], s[5]
    );
    println!("  Chaser thrust mode                         {:>14}", p.thrust_mode.label());
    if p.thrust_maximum < f64::EPSILON {
        println!("  Chaser thrust maximum         [N]          {:>14}", "UNCONSTRAINED");
    } else {
        println!("  Chaser thrust maximum         [N]          {:>14}", p.thrust_maximum);
    }
    println!("  Chaser thrust frequency       [Hz]         {:>14}", p.thrust_frequency);
    println!("  Chaser wet mass               [kg]         {:>14}", p.chaser_wet_mass);
    println!("  Arrival distance tolerance    [m]          {:>14}", p.arrival_distance_tolerance);
    println!("  Output directory                           {}", p.output_directory.display());
    println!("  State history output file                  {}", p.state_history_filename);
    println!("  Thrust history output file                 {}", p.thrust_history_filename);
}

fn print_derived(p: &SimulationParameters) {
    println!("  Chaser acceleration maximum   [m/s^2]      {:>14.6e}", p.max_thrust_acceleration());
    println!("  Chaser thrust pulse           [s]          {:>14}", p.pulse_duration());
    println!("  Target mean motion            [rad/s]      {:>14.6e}", p.mean_motion());
}

fn write_outputs(params: &SimulationParameters, run: &Rendezvous) -> anyhow::Result<()> {
    println!("  Writing output to file ...");
    let state_path = params.state_history_path();
    write_state_history_file(&state_path, &run.states)
        .with_context(|| format!("failed to write state history {}", state_path.display()))?;
    let thrust_path = params.thrust_history_path();
    write_thrust_history_file(&thrust_path, &run.thrust)
        .with_context(|| format!("failed to write thrust history {}", thrust_path.display()))?;
    println!("  State history:  {}", state_path.display());
    println!("  Thrust history: {}", thrust_path.display());
    println!();
    Ok(())
}

fn report_arrival(run: &Rendezvous) {
    let arrival = run.arrival;
    section("Outcome");
    if arrival.reached {
        println!("  Target reached (final distance {:.6} <= {})", arrival.final_distance, arrival.tolerance);
    } else {
        println!("  Target not reached!");
        println!("  Final distance to target: {:.6} (tolerance {})", arrival.final_distance, arrival.tolerance);
    }
    println!();
}
