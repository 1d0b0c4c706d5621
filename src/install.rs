//! Skill package installation with fallback strategies.
//!
//! Installation is a fixed, ordered list of pip invocations at decreasing
//! levels of system permission. The first strategy that exits zero wins;
//! every failure is recorded and the next strategy is tried. Only when the
//! whole list is exhausted does the installer give up, printing manual
//! recovery instructions for the operator and returning the last error.

use std::process::Command;

use console::style;

use crate::error::{BridgeError, Result};
use crate::runtime::Runtime;

/// One parameterized attempt at installing the skill package.
#[derive(Debug, Clone)]
pub struct Strategy {
    /// Short label used in logs and errors.
    pub label: &'static str,

    /// Arguments passed to `<interpreter> -m pip`.
    pub pip_args: Vec<String>,
}

/// The prioritized strategy list for a runtime, parameterized only by the
/// skill directory. Order matters: user-scoped installs come before
/// anything that touches the system environment.
pub fn strategies(runtime: &Runtime) -> Vec<Strategy> {
    let dir = runtime.skill_dir.display().to_string();
    vec![
        Strategy {
            label: "user install",
            pip_args: vec!["install".into(), "--user".into(), dir.clone()],
        },
        Strategy {
            label: "user install overriding system protection",
            pip_args: vec![
                "install".into(),
                "--user".into(),
                "--break-system-packages".into(),
                dir.clone(),
            ],
        },
        Strategy {
            label: "global install overriding system protection",
            pip_args: vec!["install".into(), "--break-system-packages".into(), dir],
        },
    ]
}

/// Mockable dependencies for the installer.
pub struct InstallContext<'a> {
    /// Run one strategy. `Ok(Some(code))` is the pip exit code,
    /// `Ok(None)` means pip was killed by a signal, `Err` means pip
    /// could not be spawned.
    pub run_strategy: &'a dyn Fn(&Runtime, &Strategy) -> std::io::Result<Option<i32>>,
}

/// Build the default `InstallContext` for production use.
///
/// Stdio is inherited so pip's progress streams straight to the
/// controlling terminal while an install runs.
pub fn default_context() -> InstallContext<'static> {
    InstallContext {
        run_strategy: &|runtime, strategy| {
            Command::new(&runtime.interpreter)
                .arg("-m")
                .arg("pip")
                .args(&strategy.pip_args)
                .status()
                .map(|status| status.code())
        },
    }
}

/// Install the skill package, trying each strategy in order.
pub fn install(runtime: &Runtime) -> Result<()> {
    install_with(runtime, &default_context())
}

/// Install with injected dependencies. First zero-exit strategy
/// short-circuits success; exhaustion prints manual instructions and
/// returns the last recorded error.
pub fn install_with(runtime: &Runtime, ctx: &InstallContext<'_>) -> Result<()> {
    let mut last_error = None;

    for strategy in strategies(runtime) {
        eprintln!(
            "{} Installing Text2Speech skill ({})...",
            style("→").cyan(),
            strategy.label
        );

        match (ctx.run_strategy)(runtime, &strategy) {
            Ok(Some(0)) => {
                tracing::debug!("Strategy '{}' succeeded", strategy.label);
                return Ok(());
            }
            Ok(code) => {
                tracing::debug!("Strategy '{}' exited with {:?}", strategy.label, code);
                last_error = Some(BridgeError::InstallFailed {
                    strategy: strategy.label.to_string(),
                    code,
                });
            }
            Err(e) => {
                tracing::debug!("Strategy '{}' could not spawn pip: {}", strategy.label, e);
                last_error = Some(BridgeError::InstallFailed {
                    strategy: strategy.label.to_string(),
                    code: None,
                });
            }
        }
    }

    print_manual_instructions(runtime);
    Err(last_error.unwrap_or_else(|| {
        BridgeError::Other(anyhow::anyhow!("no install strategies configured"))
    }))
}

/// Manual recovery instructions, printed once automatic installation has
/// been exhausted. This text is the operator's only way forward, so it
/// spells out each option in full.
fn print_manual_instructions(runtime: &Runtime) {
    let py = runtime.interpreter.display();
    let dir = runtime.skill_dir.display();

    eprintln!();
    eprintln!(
        "{}",
        style("Automatic installation of the Text2Speech skill failed.").red().bold()
    );
    eprintln!("Install it manually with one of the following, then re-run:");
    eprintln!();
    eprintln!(
        "  {} Direct install, overriding system package protection:",
        style("1.").bold()
    );
    eprintln!("       {} -m pip install --break-system-packages {}", py, dir);
    eprintln!();
    eprintln!("  {} Install into a dedicated virtual environment:", style("2.").bold());
    eprintln!("       {} -m venv ~/.venvs/t2s", py);
    eprintln!("       source ~/.venvs/t2s/bin/activate");
    eprintln!("       pip install {}", dir);
    eprintln!();
    eprintln!("  {} Use your platform's package manager:", style("3.").bold());
    eprintln!("       macOS:          brew install pipx && pipx install {}", dir);
    eprintln!("       Debian/Ubuntu:  sudo apt install python3-pip python3-venv");
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{Platform, Runtime};
    use std::cell::Cell;
    use std::path::PathBuf;

    fn test_runtime() -> Runtime {
        Runtime::for_platform_with_env(Platform::Unix, |_| None, PathBuf::from("/pkg"))
    }

    #[test]
    fn strategies_are_ordered_by_decreasing_privilege_scope() {
        let rt = test_runtime();
        let list = strategies(&rt);

        assert_eq!(list.len(), 3);
        assert_eq!(list[0].pip_args, vec!["install", "--user", "/pkg"]);
        assert_eq!(
            list[1].pip_args,
            vec!["install", "--user", "--break-system-packages", "/pkg"]
        );
        assert_eq!(
            list[2].pip_args,
            vec!["install", "--break-system-packages", "/pkg"]
        );
    }

    #[test]
    fn strategies_are_parameterized_by_skill_dir() {
        let rt = test_runtime().with_skill_dir(PathBuf::from("/custom/location"));
        for strategy in strategies(&rt) {
            assert_eq!(strategy.pip_args.last().unwrap(), "/custom/location");
        }
    }

    #[test]
    fn first_success_short_circuits() {
        let rt = test_runtime();
        let calls = Cell::new(0);
        let ctx = InstallContext {
            run_strategy: &|_, _| {
                calls.set(calls.get() + 1);
                Ok(Some(0))
            },
        };

        assert!(install_with(&rt, &ctx).is_ok());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn second_strategy_succeeds_after_first_fails() {
        let rt = test_runtime();
        let calls = Cell::new(0);
        let ctx = InstallContext {
            run_strategy: &|_, _| {
                calls.set(calls.get() + 1);
                if calls.get() == 1 {
                    Ok(Some(1))
                } else {
                    Ok(Some(0))
                }
            },
        };

        assert!(install_with(&rt, &ctx).is_ok());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn exhaustion_returns_last_error() {
        let rt = test_runtime();
        let calls = Cell::new(0);
        let ctx = InstallContext {
            run_strategy: &|_, _| {
                calls.set(calls.get() + 1);
                Ok(Some(calls.get()))
            },
        };

        let err = install_with(&rt, &ctx).unwrap_err();
        assert_eq!(calls.get(), 3);
        match err {
            BridgeError::InstallFailed { strategy, code } => {
                assert_eq!(strategy, "global install overriding system protection");
                assert_eq!(code, Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn spawn_error_is_nonfatal_until_exhaustion() {
        let rt = test_runtime();
        let calls = Cell::new(0);
        let ctx = InstallContext {
            run_strategy: &|_, _| {
                calls.set(calls.get() + 1);
                if calls.get() < 3 {
                    Err(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "pip missing",
                    ))
                } else {
                    Ok(Some(0))
                }
            },
        };

        assert!(install_with(&rt, &ctx).is_ok());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn all_spawn_errors_report_last_strategy() {
        let rt = test_runtime();
        let ctx = InstallContext {
            run_strategy: &|_, _| {
                Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "pip missing",
                ))
            },
        };

        let err = install_with(&rt, &ctx).unwrap_err();
        match err {
            BridgeError::InstallFailed { strategy, code } => {
                assert_eq!(strategy, "global install overriding system protection");
                assert_eq!(code, None);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
