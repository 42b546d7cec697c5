//! Logging facility
//!
//! Structured logging setup and a test capture layer for asserting on
//! emitted events.

pub mod init;
pub mod test_capture;

pub use init::{init, Profile};
