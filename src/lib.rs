//! t2s-bridge - Cross-process bridge for the Text2Speech skill.
//!
//! The bridge locates a system Python interpreter, makes sure the
//! `text2speech_skill` package is installed, and forwards command-line
//! arguments to the skill's CLI entry script as a subprocess, relaying its
//! output streams and exit code back to the caller.
//!
//! # Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`forward`] - Command forwarding with live stream relay
//! - [`install`] - Skill installation with fallback strategies
//! - [`probe`] - Time-bounded installation probe
//! - [`runtime`] - Interpreter and entry-point resolution
//!
//! # Example
//!
//! ```no_run
//! use std::ffi::OsString;
//!
//! let args = vec![OsString::from("speak"), OsString::from("hello")];
//! let result = t2s_bridge::execute_command(&args)?;
//! println!("skill exited with {:?}", result.exit_code);
//! # Ok::<(), t2s_bridge::BridgeError>(())
//! ```

pub mod error;
pub mod forward;
pub mod install;
pub mod probe;
pub mod runtime;

pub use error::{BridgeError, Result};
pub use forward::{execute_command, CommandResult};

/// Check whether the skill package is currently importable, without
/// forwarding anything. Embedding callers use this to gate their own
/// install flows.
pub fn check_installed() -> bool {
    probe::check_installed(&runtime::Runtime::resolve())
}
