//! Command-line interface module.

mod args;
pub mod batch;
pub mod convert;
pub mod revert;

pub use args::{Cli, Commands, ConvertArgs, RevertArgs};
