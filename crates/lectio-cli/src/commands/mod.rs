//! Subcommand implementations
//!
//! Each command returns `Ok(true)` when the process should exit successfully.

pub mod aliases;
pub mod lookup;
pub mod normalize;
pub mod validate;
