//! Command implementations.
//!
//! - [`setup`] - create an environment and its database (default command)
//! - [`subnets`] - print a VPC's subnet classification
//! - [`prompt`] - interactive questions

mod prompt;
pub mod setup;
pub mod subnets;

pub use prompt::{choose, Prompter, TerminalPrompter};
