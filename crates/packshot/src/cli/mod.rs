//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the packshot binary.

mod commands;
#[cfg(feature = "gemini")]
mod generate;
mod output;
mod validate;

pub use commands::{Cli, Commands, GenerateArgs, ModeArg};
#[cfg(feature = "gemini")]
pub use generate::handle_generate_command;
pub use output::{shot_file_name, write_images};
pub use validate::handle_validate_config_command;
