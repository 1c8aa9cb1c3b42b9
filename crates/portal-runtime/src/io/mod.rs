//! Text command surface.
//!
//! - [`InputParser`] - pure line parser
//! - [`InputCommand`] - parsed command
//!
//! Execution and rendering live in the application crate; this module only
//! turns text into typed commands.

mod command;
mod parser;

pub use command::InputCommand;
pub use parser::InputParser;
