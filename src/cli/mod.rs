pub mod orchestration;

pub use orchestration::{open_repository, run_action, Action, GateOutcome};
