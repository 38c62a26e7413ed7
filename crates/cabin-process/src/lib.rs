//! Child-process spawning and output capture for `cabin`.
//!
//! The build core runs single-threaded with opt-in fan-out, so
//! commands are run synchronously through `std::process` rather than
//! an async runtime;
//! this crate's `Command`/`Child`/`ExitStatus` types exist to give the
//! rest of `cabin` one narrow, POSIX-aware surface to depend on instead
//! of scattering `std::process::Command` calls everywhere.

mod command;
mod error;
mod retry;
mod status;

pub use command::{Child, Command, CommandOutput, Stdio};
pub use error::Error;
pub use retry::retry_command_output;
pub use status::ExitStatus;
