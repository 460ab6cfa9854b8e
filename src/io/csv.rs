use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dynamics::state::RelativeState;
use crate::sim::history::{StateHistory, ThrustHistory, TimeOrderError};

/// Errors from reading a history file back in.
#[derive(Debug, Error)]
pub enum ReadHistoryError {
    #[error("failed to open history file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed history CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("history CSV row {row}: {source}")]
    Time { row: usize, source: TimeOrderError },
}

/// One row of the state history file: `t,x,y,z,xdot,ydot,zdot`.
#[derive(Debug, Serialize, Deserialize)]
struct StateRow {
    t: f64,
    x: f64,
    y: f64,
    z: f64,
    xdot: f64,
    ydot: f64,
    zdot: f64,
}

/// One row of the thrust history file: `t,Tx,Ty,Tz`.
#[derive(Debug, Serialize, Deserialize)]
struct ThrustRow {
    t: f64,
    #[serde(rename = "Tx")]
    tx: f64,
    #[serde(rename = "Ty")]
    ty: f64,
    #[serde(rename = "Tz")]
    tz: f64,
}

/// Write the chaser state history as CSV.
///
/// Columns: t, x, y, z, xdot, ydot, zdot. Values are written in shortest
/// round-trip form, so [`read_state_history`] recovers them exactly.
pub fn write_state_history<W: Write>(writer: W, history: &StateHistory) -> csv::Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    for (t, s) in history.iter() {
        w.serialize(StateRow {
            t,
            x: s.pos.x,
            y: s.pos.y,
            z: s.pos.z,
            xdot: s.vel.x,
            ydot: s.vel.y,
            zdot: s.vel.z,
        })?;
    }
    w.flush()?;
    Ok(())
}

/// Write the chaser thrust history (N) as CSV. Columns: t, Tx, Ty, Tz.
pub fn write_thrust_history<W: Write>(writer: W, history: &ThrustHistory) -> csv::Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    for (t, f) in history.iter() {
        w.serialize(ThrustRow { t, tx: f.x, ty: f.y, tz: f.z })?;
    }
    w.flush()?;
    Ok(())
}

/// Read a state history written by [`write_state_history`].
///
/// Times must be finite and strictly increasing; `row` in the error counts
/// data rows from 1.
pub fn read_state_history<R: Read>(reader: R) -> Result<StateHistory, ReadHistoryError> {
    let mut r = csv::Reader::from_reader(reader);
    let mut history = StateHistory::new();
    for (i, row) in r.deserialize().enumerate() {
        let row: StateRow = row?;
        history
            .try_record(
                row.t,
                RelativeState::from_array([row.x, row.y, row.z, row.xdot, row.ydot, row.zdot]),
            )
            .map_err(|source| ReadHistoryError::Time { row: i + 1, source })?;
    }
    Ok(history)
}

/// Read a thrust history written by [`write_thrust_history`].
pub fn read_thrust_history<R: Read>(reader: R) -> Result<ThrustHistory, ReadHistoryError> {
    let mut r = csv::Reader::from_reader(reader);
    let mut history = ThrustHistory::new();
    for (i, row) in r.deserialize().enumerate() {
        let row: ThrustRow = row?;
        history
            .try_record(row.t, Vector3::new(row.tx, row.ty, row.tz))
            .map_err(|source| ReadHistoryError::Time { row: i + 1, source })?;
    }
    Ok(history)
}

fn create_with_parent(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    File::create(path)
}

/// Write state history to a CSV file, creating the directory if needed.
pub fn write_state_history_file(path: &Path, history: &StateHistory) -> csv::Result<()> {
    let file = create_with_parent(path)?;
    write_state_history(file, history)
}

/// Write thrust history to a CSV file, creating the directory if needed.
pub fn write_thrust_history_file(path: &Path, history: &ThrustHistory) -> csv::Result<()> {
    let file = create_with_parent(path)?;
    write_thrust_history(file, history)
}

pub fn read_state_history_file(path: &Path) -> Result<StateHistory, ReadHistoryError> {
    read_state_history(File::open(path)?)
}

pub fn read_thrust_history_file(path: &Path) -> Result<ThrustHistory, ReadHistoryError> {
    read_thrust_history(File::open(path)?)
}
