use nalgebra::Vector3;
use thiserror::Error;

use crate::dynamics::state::RelativeState;

/// A sample whose time cannot extend a history.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimeOrderError {
    #[error("time {0} is not finite")]
    NonFinite(f64),
    #[error("time {time} does not follow previous time {last}")]
    NotIncreasing { time: f64, last: f64 },
}

/// Time series keyed by simulation time, in ascending order.
///
/// Entries are appended as the simulation advances; recording at a time
/// equal to the last entry replaces that entry.
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    samples: Vec<(f64, T)>,
}

/// Chaser relative state over time [m; m/s].
pub type StateHistory = History<RelativeState>;

/// Chaser thrust force over time [N], stamped at pulse start.
pub type ThrustHistory = History<Vector3<f64>>;

impl<T> History<T> {
    pub fn new() -> Self {
        Self { samples: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { samples: Vec::with_capacity(capacity) }
    }

    /// Append `value` at `time`.
    ///
    /// # Panics
    /// If `time` is earlier than the last recorded time.
    pub fn record(&mut self, time: f64, value: T) {
        match self.samples.last_mut() {
            Some(last) if last.0 == time => last.1 = value,
            Some(last) => {
                assert!(time > last.0, "history time went backwards: {} after {}", time, last.0);
                self.samples.push((time, value));
            }
            None => self.samples.push((time, value)),
        }
    }

    /// Append `value` at `time`, requiring a finite time strictly after the
    /// last recorded one. Nothing is recorded on error.
    pub fn try_record(&mut self, time: f64, value: T) -> Result<(), TimeOrderError> {
        if !time.is_finite() {
            return Err(TimeOrderError::NonFinite(time));
        }
        if let Some((last, _)) = self.samples.last() {
            if time <= *last {
                return Err(TimeOrderError::NotIncreasing { time, last: *last });
            }
        }
        self.samples.push((time, value));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<(f64, &T)> {
        self.samples.first().map(|(t, v)| (*t, v))
    }

    pub fn last(&self) -> Option<(f64, &T)> {
        self.samples.last().map(|(t, v)| (*t, v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> + '_ {
        self.samples.iter().map(|(t, v)| (*t, v))
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|(t, _)| *t)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.samples.iter().map(|(_, v)| v)
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(f64, T)> for History<T> {
    fn from_iter<I: IntoIterator<Item = (f64, T)>>(iter: I) -> Self {
        let mut history = History::new();
        for (t, v) in iter {
            history.record(t, v);
        }
        history
    }
}
