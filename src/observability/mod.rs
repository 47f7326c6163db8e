//! Observability
//!
//! Structured logging for `dupguard` runs. Logs go to stderr so the
//! report on stdout stays machine-readable.

pub mod logging;

pub use logging::{LogFormat, init_logging};
