//! Support library for the `tyro` binary.
//!
//! Exposes argument parsing, command execution and logging setup so tests
//! can drive the command pipeline without spawning a process.

pub mod cli;
pub mod logging;
