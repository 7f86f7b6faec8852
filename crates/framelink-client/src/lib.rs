//! CLI, message client, interactive prompting.
//!
//! The initiator side of framelink: builds one framed message from flags
//! or interactive prompts, sends it over TCP (or TLS), and prints the
//! responder's textual reply. The `serve` subcommand runs the responder in
//! the foreground.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompt;
pub mod socket;
#[cfg(feature = "tls")]
pub mod tls;
