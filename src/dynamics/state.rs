use nalgebra::{Vector3, Vector6};

// ---------------------------------------------------------------------------
// Relative state of the chaser in the target's rotating frame
// ---------------------------------------------------------------------------

/// Chaser position and velocity relative to the target.
///
/// Frame: target-centred, rotating with the circular reference orbit.
/// x is along-track, y cross-track (out of plane), z radial. This is the
/// axis ordering the closed-form propagator in [`crate::orbital`] expects.
/// Component order, where a flat representation is needed, is always
/// `[x, y, z, xdot, ydot, zdot]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeState {
    pub pos: Vector3<f64>, // m
    pub vel: Vector3<f64>, // m/s
}

impl RelativeState {
    pub fn new(pos: Vector3<f64>, vel: Vector3<f64>) -> Self {
        Self { pos, vel }
    }

    /// Target location with no relative motion.
    pub fn zeros() -> Self {
        Self { pos: Vector3::zeros(), vel: Vector3::zeros() }
    }

    pub fn from_array(s: [f64; 6]) -> Self {
        Self {
            pos: Vector3::new(s[0], s[1], s[2]),
            vel: Vector3::new(s[3], s[4], s[5]),
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.pos.x, self.pos.y, self.pos.z, self.vel.x, self.vel.y, self.vel.z]
    }

    pub fn as_vector6(&self) -> Vector6<f64> {
        Vector6::from_row_slice(&self.to_array())
    }

    pub fn from_vector6(v: &Vector6<f64>) -> Self {
        Self::from_array([v[0], v[1], v[2], v[3], v[4], v[5]])
    }

    /// Euclidean norm of the full 6-vector.
    ///
    /// Mixes metres and metres per second; this is the quantity the arrival
    /// check compares against its tolerance.
    pub fn norm(&self) -> f64 {
        self.as_vector6().norm()
    }

    /// Distance to the target (position only), m.
    pub fn range(&self) -> f64 {
        self.pos.norm()
    }

    /// Relative speed, m/s.
    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl Default for RelativeState {
    fn default() -> Self {
        Self::zeros()
    }
}

impl From<[f64; 6]> for RelativeState {
    fn from(s: [f64; 6]) -> Self {
        Self::from_array(s)
    }
}
