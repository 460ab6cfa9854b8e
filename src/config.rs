//! Simulation parameters and the configuration-file loader that produces them.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::dynamics::state::RelativeState;
use crate::gnc::ThrustMode;
use crate::orbital::elements::kepler_mean_motion;

/// Validated input to a rendezvous simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParameters {
    pub start_time: f64,              // s
    pub end_time: f64,                // s
    pub gravitational_parameter: f64, // m^3/s^2
    pub target_semi_major_axis: f64,  // m
    pub chaser_initial_state: RelativeState,
    pub thrust_mode: ThrustMode,
    pub thrust_maximum: f64,          // N, 0 = unconstrained
    pub thrust_frequency: f64,        // Hz
    pub chaser_wet_mass: f64,         // kg
    pub arrival_distance_tolerance: f64,
    pub output_directory: PathBuf,
    pub state_history_filename: String,
    pub thrust_history_filename: String,
}

impl SimulationParameters {
    /// Thrust limit as an acceleration (m/s^2); zero when unconstrained.
    pub fn max_thrust_acceleration(&self) -> f64 {
        self.thrust_maximum / self.chaser_wet_mass
    }

    /// Length of one thruster pulse (s).
    pub fn pulse_duration(&self) -> f64 {
        1.0 / self.thrust_frequency
    }

    /// Mean motion of the target orbit (rad/s).
    pub fn mean_motion(&self) -> f64 {
        kepler_mean_motion(self.target_semi_major_axis, self.gravitational_parameter)
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Nominal number of thruster pulses, ceil(duration * frequency).
    pub fn pulse_count(&self) -> usize {
        (self.duration() / self.pulse_duration()).ceil().max(0.0) as usize
    }

    pub fn state_history_path(&self) -> PathBuf {
        self.output_directory.join(&self.state_history_filename)
    }

    pub fn thrust_history_path(&self) -> PathBuf {
        self.output_directory.join(&self.thrust_history_filename)
    }

    /// Redirect output files to another directory.
    pub fn with_output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_directory = dir.into();
        self
    }

    /// Check every parameter constraint, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [
            ("propagation_settings", self.start_time),
            ("propagation_settings", self.end_time),
            ("earth_gravitational_parameter", self.gravitational_parameter),
            ("target_semi_major_axis", self.target_semi_major_axis),
            ("chaser_thrust_settings", self.thrust_maximum),
            ("chaser_thrust_settings", self.thrust_frequency),
            ("chaser_wet_mass", self.chaser_wet_mass),
            ("arrival_distance_tolerance", self.arrival_distance_tolerance),
        ];
        for (key, value) in numbers {
            if !value.is_finite() {
                return Err(invalid(key, format!("{} is not a finite number", value)));
            }
        }
        if !self.chaser_initial_state.is_finite() {
            return Err(invalid("chaser_initial_state", "contains a non-finite component"));
        }

        if self.end_time < self.start_time {
            return Err(invalid(
                "propagation_settings",
                format!("end time {} is before start time {}", self.end_time, self.start_time),
            ));
        }
        if self.gravitational_parameter <= 0.0 {
            return Err(invalid("earth_gravitational_parameter", "should be positive"));
        }
        if self.target_semi_major_axis <= 0.0 {
            return Err(invalid("target_semi_major_axis", "should be positive"));
        }
        if self.thrust_maximum < 0.0 {
            return Err(invalid("chaser_thrust_settings", "chaser thrust maximum should be non-negative"));
        }
        if self.thrust_frequency < f64::EPSILON {
            return Err(invalid("chaser_thrust_settings", "chaser thrust frequency should be positive"));
        }
        if self.thrust_mode == ThrustMode::OnOff && self.thrust_maximum < f64::EPSILON {
            return Err(invalid(
                "chaser_thrust_settings",
                "on_off thrust mode needs a non-zero thrust maximum",
            ));
        }
        if self.chaser_wet_mass <= 0.0 {
            return Err(invalid("chaser_wet_mass", "should be positive"));
        }
        if self.arrival_distance_tolerance < 0.0 {
            return Err(invalid("arrival_distance_tolerance", "should be non-negative"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Configuration file
// ---------------------------------------------------------------------------

/// On-disk configuration layout (JSON, or TOML with the same keys).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    propagation_settings: [f64; 2],
    earth_gravitational_parameter: f64,
    target_semi_major_axis: f64,
    chaser_initial_state: [f64; 6],
    /// `[mode, thrust maximum, frequency]`
    chaser_thrust_settings: (ThrustMode, f64, f64),
    chaser_wet_mass: f64,
    arrival_distance_tolerance: f64,
    output_directory: PathBuf,
    chaser_state_history_filename: String,
    chaser_thrust_history_filename: String,
}

impl From<ConfigFile> for SimulationParameters {
    fn from(file: ConfigFile) -> Self {
        let (thrust_mode, thrust_maximum, thrust_frequency) = file.chaser_thrust_settings;
        SimulationParameters {
            start_time: file.propagation_settings[0],
            end_time: file.propagation_settings[1],
            gravitational_parameter: file.earth_gravitational_parameter,
            target_semi_major_axis: file.target_semi_major_axis,
            chaser_initial_state: RelativeState::from_array(file.chaser_initial_state),
            thrust_mode,
            thrust_maximum,
            thrust_frequency,
            chaser_wet_mass: file.chaser_wet_mass,
            arrival_distance_tolerance: file.arrival_distance_tolerance,
            output_directory: file.output_directory,
            state_history_filename: file.chaser_state_history_filename,
            thrust_history_filename: file.chaser_thrust_history_filename,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration option \"{key}\": {reason}")]
    Invalid { key: &'static str, reason: String },
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { key, reason: reason.into() }
}

/// Load and validate simulation parameters.
///
/// `.toml` files are read as TOML, anything else as JSON with `//` comment
/// lines.
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<SimulationParameters, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        parse_toml(&contents)
    } else {
        parse_json(&contents)
    }
}

/// Parse and validate a JSON configuration document.
pub fn parse_json(contents: &str) -> Result<SimulationParameters, ConfigError> {
    let file: ConfigFile = serde_json::from_str(&strip_comment_lines(contents))?;
    finish(file)
}

/// Parse and validate a TOML configuration document.
pub fn parse_toml(contents: &str) -> Result<SimulationParameters, ConfigError> {
    let file: ConfigFile = toml::from_str(contents)?;
    finish(file)
}

fn finish(file: ConfigFile) -> Result<SimulationParameters, ConfigError> {
    let params = SimulationParameters::from(file);
    params.validate()?;
    Ok(params)
}

/// Drop lines whose first non-blank characters are `//`.
pub fn strip_comment_lines(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    {
        // [start, end] in seconds
        "propagation_settings": [0.0, 600.0],
        "earth_gravitational_parameter": 3.986004418e14,
        "target_semi_major_axis": 6778137.0,
        // [x, y, z, xdot, ydot, zdot]
        "chaser_initial_state": [-1000.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        "chaser_thrust_settings": ["throttle", 10.0, 0.1],
        "chaser_wet_mass": 500.0,
        "arrival_distance_tolerance": 1.0,
        "output_directory": "out",
        "chaser_state_history_filename": "state.csv",
        "chaser_thrust_history_filename": "thrust.csv"
    }
    "#;

    fn sample_with(from: &str, to: &str) -> String {
        assert!(SAMPLE.contains(from), "sample does not contain {}", from);
        SAMPLE.replace(from, to)
    }

    #[test]
    fn parses_commented_json() {
        let p = parse_json(SAMPLE).unwrap();
        assert_eq!(p.start_time, 0.0);
        assert_eq!(p.end_time, 600.0);
        assert_eq!(p.thrust_mode, ThrustMode::Throttle);
        assert_eq!(p.thrust_maximum, 10.0);
        assert_eq!(p.chaser_initial_state.pos.x, -1000.0);
        assert_eq!(p.state_history_path(), Path::new("out").join("state.csv"));
        assert_eq!(p.thrust_history_path(), Path::new("out").join("thrust.csv"));
    }

    #[test]
    fn derived_quantities() {
        let p = parse_json(SAMPLE).unwrap();
        assert!((p.max_thrust_acceleration() - 0.02).abs() < 1e-15);
        assert!((p.pulse_duration() - 10.0).abs() < 1e-12);
        assert_eq!(p.pulse_count(), 60);
        let n = p.mean_motion();
        assert!(n > 1.1e-3 && n < 1.2e-3, "mean motion {:.4e}", n);
    }

    #[test]
    fn parses_toml() {
        let toml_doc = r#"
            propagation_settings = [0.0, 100.0]
            earth_gravitational_parameter = 3.986004418e14
            target_semi_major_axis = 6778137.0
            chaser_initial_state = [10.0, 0.0, 0.0, 0.0, 0.0, 0.0]
            chaser_thrust_settings = ["on_off", 5.0, 1.0]
            chaser_wet_mass = 100.0
            arrival_distance_tolerance = 0.5
            output_directory = "."
            chaser_state_history_filename = "s.csv"
            chaser_thrust_history_filename = "t.csv"
        "#;
        let p = parse_toml(toml_doc).unwrap();
        assert_eq!(p.thrust_mode, ThrustMode::OnOff);
        assert_eq!(p.thrust_frequency, 1.0);
    }

    #[test]
    fn rejects_negative_thrust() {
        let doc = sample_with(r#"["throttle", 10.0, 0.1]"#, r#"["throttle", -1.0, 0.1]"#);
        assert!(matches!(
            parse_json(&doc),
            Err(ConfigError::Invalid { key: "chaser_thrust_settings", .. })
        ));
    }

    #[test]
    fn rejects_zero_frequency() {
        let doc = sample_with(r#"["throttle", 10.0, 0.1]"#, r#"["throttle", 10.0, 0.0]"#);
        let err = parse_json(&doc).unwrap_err();
        assert!(err.to_string().contains("frequency"), "unexpected error: {}", err);
    }

    #[test]
    fn rejects_on_off_without_limit() {
        let doc = sample_with(r#"["throttle", 10.0, 0.1]"#, r#"["on_off", 0.0, 0.1]"#);
        assert!(parse_json(&doc).is_err());
    }

    #[test]
    fn unconstrained_throttle_is_valid() {
        let doc = sample_with(r#"["throttle", 10.0, 0.1]"#, r#"["throttle", 0.0, 0.1]"#);
        let p = parse_json(&doc).unwrap();
        assert_eq!(p.max_thrust_acceleration(), 0.0);
    }

    #[test]
    fn rejects_unknown_mode() {
        let doc = sample_with(r#"["throttle", 10.0, 0.1]"#, r#"["warp", 10.0, 0.1]"#);
        assert!(matches!(parse_json(&doc), Err(ConfigError::Json(_))));
    }

    #[test]
    fn rejects_reversed_times() {
        let doc = sample_with("[0.0, 600.0]", "[600.0, 0.0]");
        assert!(matches!(
            parse_json(&doc),
            Err(ConfigError::Invalid { key: "propagation_settings", .. })
        ));
    }

    #[test]
    fn equal_start_and_end_is_valid() {
        let doc = sample_with("[0.0, 600.0]", "[600.0, 600.0]");
        let p = parse_json(&doc).unwrap();
        assert_eq!(p.pulse_count(), 0);
    }

    #[test]
    fn missing_key_is_parse_error() {
        let doc = sample_with(r#""chaser_wet_mass": 500.0,"#, "");
        assert!(matches!(parse_json(&doc), Err(ConfigError::Json(_))));
    }

    #[test]
    fn rejects_nonpositive_mass() {
        let doc = sample_with(r#""chaser_wet_mass": 500.0"#, r#""chaser_wet_mass": 0.0"#);
        assert!(matches!(
            parse_json(&doc),
            Err(ConfigError::Invalid { key: "chaser_wet_mass", .. })
        ));
    }

    #[test]
    fn comment_lines_stripped() {
        let out = strip_comment_lines("a\n   // note\n\t//x\nb // trailing stays");
        assert_eq!(out, "a\nb // trailing stays");
    }
}
