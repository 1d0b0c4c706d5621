//! Installation probe for the skill package.
//!
//! The probe answers one question: can the configured interpreter import
//! the skill package right now? It runs a minimal import in a child
//! process under a hard deadline. Every failure mode — interpreter
//! missing, import error, timeout — reads as "not installed"; the probe
//! never surfaces an error to its caller.

use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::runtime::Runtime;

/// Hard ceiling on how long an import probe may run before its child
/// process is killed.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Minimal invocation that succeeds only if the package is importable.
const IMPORT_PROBE: &str = "import text2speech_skill";

/// Check whether the skill package is importable in the runtime's
/// interpreter.
pub fn check_installed(runtime: &Runtime) -> bool {
    check_installed_with_timeout(runtime, PROBE_TIMEOUT)
}

pub(crate) fn check_installed_with_timeout(runtime: &Runtime, timeout: Duration) -> bool {
    let spawned = Command::new(&runtime.interpreter)
        .arg("-c")
        .arg(IMPORT_PROBE)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            tracing::debug!("Import probe could not spawn {:?}: {}", runtime.interpreter, e);
            return false;
        }
    };

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                tracing::debug!("Import probe exited with {:?}", status.code());
                return status.success();
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    tracing::debug!("Import probe timed out after {:?}, killing it", timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    return false;
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                tracing::debug!("Import probe wait failed: {}", e);
                let _ = child.kill();
                let _ = child.wait();
                return false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{Platform, Runtime};
    use std::path::PathBuf;

    fn runtime_with_interpreter(interpreter: PathBuf) -> Runtime {
        let mut rt = Runtime::for_platform_with_env(
            Platform::current(),
            |_| None,
            PathBuf::from("/nonexistent-skill"),
        );
        rt.interpreter = interpreter;
        rt
    }

    #[cfg(unix)]
    fn write_stub(dir: &std::path::Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("python-stub");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn missing_interpreter_reads_as_not_installed() {
        let rt = runtime_with_interpreter(PathBuf::from("this-interpreter-does-not-exist-12345"));
        assert!(!check_installed(&rt));
    }

    #[cfg(unix)]
    #[test]
    fn successful_import_reads_as_installed() {
        let temp = tempfile::TempDir::new().unwrap();
        let stub = write_stub(temp.path(), "exit 0");
        let rt = runtime_with_interpreter(stub);
        assert!(check_installed(&rt));
    }

    #[cfg(unix)]
    #[test]
    fn failed_import_reads_as_not_installed() {
        let temp = tempfile::TempDir::new().unwrap();
        let stub = write_stub(temp.path(), "exit 1");
        let rt = runtime_with_interpreter(stub);
        assert!(!check_installed(&rt));
    }

    #[cfg(unix)]
    #[test]
    fn hung_probe_is_killed_within_timeout() {
        let temp = tempfile::TempDir::new().unwrap();
        let stub = write_stub(temp.path(), "sleep 30");
        let rt = runtime_with_interpreter(stub);

        let timeout = Duration::from_millis(300);
        let start = Instant::now();
        let installed = check_installed_with_timeout(&rt, timeout);
        let elapsed = start.elapsed();

        assert!(!installed);
        assert!(
            elapsed < timeout + Duration::from_secs(2),
            "probe took {:?}, expected under {:?}",
            elapsed,
            timeout + Duration::from_secs(2)
        );
    }
}
