//! Command implementations for the `curve-inspect` binary

pub mod commands;
