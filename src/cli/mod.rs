//! Command-line interface
//!
//! Argument definitions and the run pipeline they drive:
//! discovery, batch validation, then reporting.

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::run;
