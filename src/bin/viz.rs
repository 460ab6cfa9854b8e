use std::path::PathBuf;

use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use rvd_sim::config::{load_parameters, SimulationParameters};
use rvd_sim::sim::{self, Rendezvous, StateHistory};

fn main() -> eframe::Result {
    pretty_env_logger::init();

    let path = match std::env::args_os().nth(1) {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("usage: rvd-viz <CONFIG>");
            std::process::exit(2);
        }
    };
    let (params, run, coast) = match load_and_run(&path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    };

    let app = RendezvousViz { params, run, coast };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Rendezvous Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

fn load_and_run(path: &PathBuf) -> anyhow::Result<(SimulationParameters, Rendezvous, StateHistory)> {
    let params = load_parameters(path)?;
    let run = sim::simulate(&params)?;
    let coast = sim::coast_reference(&params)?;
    Ok((params, run, coast))
}

struct RendezvousViz {
    params: SimulationParameters,
    run: Rendezvous,
    coast: StateHistory,
}

fn sampled<'a, T>(iter: impl Iterator<Item = (f64, &'a T)>, len: usize) -> Vec<(f64, &'a T)>
where
    T: 'a,
{
    let step = (len / 2000).max(1);
    iter.step_by(step).collect()
}

impl eframe::App for RendezvousViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let states = sampled(self.run.states.iter(), self.run.states.len());
        let coast = sampled(self.coast.iter(), self.coast.len());
        let thrust = sampled(self.run.thrust.iter(), self.run.thrust.len());

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let arrival = self.run.arrival;
            ui.heading(format!("Rendezvous: {} thrust", self.params.thrust_mode.label()));
            ui.label(format!(
                "Pulses: {}  |  Final distance: {:.3} (tol {})  |  Target {}{}",
                self.run.pulses,
                arrival.final_distance,
                arrival.tolerance,
                if arrival.reached { "reached" } else { "not reached" },
                if self.run.throttled() { "  |  throttled" } else { "" },
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // In-plane path, along-track vs radial
                ui.vertical(|ui| {
                    ui.label("In-plane path (m)");
                    let guided: PlotPoints = states.iter().map(|(_, s)| [s.pos.x, s.pos.z]).collect();
                    let coasting: PlotPoints = coast.iter().map(|(_, s)| [s.pos.x, s.pos.z]).collect();
                    Plot::new("in_plane")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Along-track x (m)")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Guided", guided));
                            plot_ui.line(Line::new("Coast", coasting));
                        });
                });

                // Range vs Time
                ui.vertical(|ui| {
                    ui.label("Range to target (m)");
                    let points: PlotPoints = states.iter().map(|(t, s)| [*t, s.range()]).collect();
                    Plot::new("range")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Range", points));
                        });
                });
            });

            ui.horizontal(|ui| {
                // Cross-track vs Time
                ui.vertical(|ui| {
                    ui.label("Cross-track y (m)");
                    let points: PlotPoints = states.iter().map(|(t, s)| [*t, s.pos.y]).collect();
                    Plot::new("cross_track")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("y", points));
                        });
                });

                // Thrust components vs Time
                ui.vertical(|ui| {
                    ui.label("Thrust (N)");
                    let tx: PlotPoints = thrust.iter().map(|(t, f)| [*t, f.x]).collect();
                    let ty: PlotPoints = thrust.iter().map(|(t, f)| [*t, f.y]).collect();
                    let tz: PlotPoints = thrust.iter().map(|(t, f)| [*t, f.z]).collect();
                    Plot::new("thrust")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Tx", tx));
                            plot_ui.line(Line::new("Ty", ty));
                            plot_ui.line(Line::new("Tz", tz));
                        });
                });
            });
        });
    }
}
