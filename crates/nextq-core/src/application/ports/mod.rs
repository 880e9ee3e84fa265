//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `nextq-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Terminal`: line and key input, line output, cursor control
//!   - `Theme`: prompt styling
//!   - `Shell`: one attempt of an external command
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Key, PlainTheme, RunnerEvent, Shell, ShellOutput, Terminal, Theme};

#[cfg(test)]
pub use output::MockShell;
