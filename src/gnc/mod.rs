pub mod controller;
pub mod guidance;
pub mod saturation;

pub use controller::{Controller, ZemZevController};
pub use guidance::{zem_zev_acceleration, zero_effort_errors, ZeroEffortErrors};
pub use saturation::{saturate, ThrustCommand, ThrustMode};
