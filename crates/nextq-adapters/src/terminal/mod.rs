//! Terminal adapters.

mod live;
mod scripted;

pub use live::ConsoleTerminal;
pub use scripted::ScriptedTerminal;
