pub mod boundary;
pub mod checks;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod hooks;
pub mod report;
pub mod run;
pub mod testframe;
pub mod ui;

pub use error::{GateError, Result};
