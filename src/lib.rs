//! BrainInk teacher client shell.
//!
//! Wires the HTTP adapter into the use cases and exposes them as CLI commands.

pub mod adapters;
pub mod bootstrap;
pub mod cli;
pub mod commands;
