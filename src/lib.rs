//! `dupguard` - duplicate-entry checks for YAML configuration files
//!
//! Finds repeated records inside top-level array fields before they reach
//! whatever consumes the configuration. Files are discovered from paths,
//! validated concurrently under a cap, and reported together.

pub mod batch;
pub mod cli;
pub mod config;
pub mod detect;
pub mod discovery;
pub mod document;
pub mod error;
pub mod observability;
pub mod report;
pub mod validator;
