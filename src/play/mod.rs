//! Terminal front-end for human-versus-computer games.

mod command;
mod console;

pub use command::{Command, HELP};
pub use console::{Console, Tally};
