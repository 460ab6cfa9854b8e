pub mod csv;
pub mod json;

pub use self::csv::{
    read_state_history, read_state_history_file, read_thrust_history, read_thrust_history_file,
    write_state_history, write_state_history_file, write_thrust_history, write_thrust_history_file,
    ReadHistoryError,
};
pub use self::json::{write_summary, write_summary_file, RendezvousSummary};
