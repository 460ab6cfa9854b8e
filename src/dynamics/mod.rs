pub mod state;

pub use state::RelativeState;
