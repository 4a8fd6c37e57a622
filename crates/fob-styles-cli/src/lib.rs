//! Command-line front end for the fob style pipeline compiler.
//!
//! - [`cli`] - argument definitions (clap derive)
//! - [`commands`] - subcommand implementations
//! - [`error`] - CLI errors and miette reporting
//! - [`logger`] - tracing subscriber setup

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
