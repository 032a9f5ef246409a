//! Command-line interface for glyphmark
//!
//! This crate provides the `glyphmark` binary. The argument definitions
//! and command implementations live here so they can be tested without
//! spawning a process; `main.rs` only wires them up.

pub mod cli;
pub mod commands;
pub mod input;
