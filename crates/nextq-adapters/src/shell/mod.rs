//! Process execution adapters.

mod scripted;
mod system;

pub use scripted::ScriptedShell;
pub use system::SystemShell;
