//! Command Line Interface (CLI) layer for imgfan.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that prepares a dataset run,
//! dispatches it to the chosen execution strategy and prints the console
//! report.
//!
//! If you are embedding imgfan into another application, prefer using
//! the high-level `imgfan::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
