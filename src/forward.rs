//! Command forwarding with live stream relay.
//!
//! The forwarder is the root of the bridge: it makes sure the skill is
//! installed, spawns the skill CLI with pass-through arguments, and relays
//! the child's output. Each output stream is copied chunk by chunk to the
//! parent's corresponding stream while the same chunks accumulate into the
//! result buffers, so what streamed and what was captured are identical.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{BridgeError, Result};
use crate::install;
use crate::probe;
use crate::runtime::Runtime;

/// Result of one forwarded invocation.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,

    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Whether the child exited zero.
    pub success: bool,

    /// Wall time of the child process.
    pub duration: Duration,
}

/// Forward `args` to the skill CLI, installing the skill first if needed.
///
/// A non-zero child exit is reported in the result, not as an error.
/// `Err` means the bridge itself failed: installation was exhausted, or
/// the child could not be spawned at all.
pub fn execute_command(args: &[OsString]) -> Result<CommandResult> {
    execute_with_runtime(&Runtime::resolve(), args)
}

/// Forward against an explicit runtime. The prober gates the installer:
/// an installed skill never triggers an install attempt, and an
/// irrecoverable install failure aborts before anything is spawned.
pub fn execute_with_runtime(runtime: &Runtime, args: &[OsString]) -> Result<CommandResult> {
    if !probe::check_installed(runtime) {
        tracing::info!("Text2Speech skill not installed, installing");
        install::install(runtime)?;
    }

    spawn_and_stream(runtime, args)
}

fn spawn_and_stream(runtime: &Runtime, args: &[OsString]) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(&runtime.interpreter);
    cmd.arg(&runtime.entry_path);
    cmd.args(args);
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| BridgeError::SpawnFailed {
        command: format!(
            "{} {}",
            runtime.interpreter.display(),
            runtime.entry_path.display()
        ),
        source,
    })?;

    let stdout = child.stdout.take().unwrap();
    let stderr = child.stderr.take().unwrap();

    let stdout_handle = thread::spawn(move || relay(stdout, std::io::stdout()));
    let stderr_handle = thread::spawn(move || relay(stderr, std::io::stderr()));

    let stdout_buf = stdout_handle.join().unwrap_or_default();
    let stderr_buf = stderr_handle.join().unwrap_or_default();

    let status = child.wait()?;
    let duration = start.elapsed();

    tracing::debug!("Child exited with {:?} after {:?}", status.code(), duration);

    Ok(CommandResult {
        stdout: stdout_buf,
        stderr: stderr_buf,
        exit_code: status.code(),
        success: status.success(),
        duration,
    })
}

/// Copy `reader` to `sink` chunk by chunk, returning everything copied.
/// The bytes written to the sink and the bytes returned are the same
/// chunks, in the same order.
fn relay<R: Read, W: Write>(mut reader: R, mut sink: W) -> String {
    let mut buf = [0u8; 8192];
    let mut collected = Vec::new();

    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                let chunk = &buf[..n];
                let _ = sink.write_all(chunk);
                let _ = sink.flush();
                collected.extend_from_slice(chunk);
            }
            Err(_) => break,
        }
    }

    String::from_utf8_lossy(&collected).into_owned()
}
