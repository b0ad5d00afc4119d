//! HR Portal Common
//!
//! Infrastructure shared by every HR portal binary.

pub mod logging;

pub use logging::init_logging;
