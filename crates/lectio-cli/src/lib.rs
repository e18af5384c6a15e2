//! lectio command-line front end
//!
//! The binary lives in `main.rs`; everything it dispatches to is exposed here
//! so integration tests can reach the argument definitions and formatters.

pub mod cli;
pub mod commands;
pub mod output;
