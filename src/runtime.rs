//! Interpreter and entry-point resolution.
//!
//! The interpreter name and the skill entry script differ per platform and
//! per environment, so they are resolved once per invocation into a
//! [`Runtime`] value rather than held as process-wide state. Resolution is
//! a pure function of the platform plus an injectable environment lookup,
//! which keeps tests free of global env mutation.

use std::path::{Path, PathBuf};

/// Environment variable overriding the skill package directory.
pub const SKILL_DIR_ENV: &str = "T2S_SKILL_DIR";

/// Environment variable overriding the Python interpreter.
pub const INTERPRETER_ENV: &str = "T2S_PYTHON";

/// Platform family used for interpreter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Resolved interpreter and entry-point configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Runtime {
    /// Python interpreter executable name or path.
    pub interpreter: PathBuf,

    /// Directory containing the installable skill package.
    pub skill_dir: PathBuf,

    /// CLI entry script inside the skill package.
    pub entry_path: PathBuf,
}

impl Runtime {
    /// Resolve the runtime for the current platform and environment.
    pub fn resolve() -> Self {
        Self::for_platform(Platform::current())
    }

    /// Resolve for a specific platform, reading overrides from the
    /// process environment.
    pub fn for_platform(platform: Platform) -> Self {
        Self::for_platform_with_env(platform, |key| std::env::var(key).ok(), default_skill_dir())
    }

    /// Resolve with an injected environment lookup and fallback skill
    /// directory. Used by `for_platform` and directly by tests.
    pub fn for_platform_with_env(
        platform: Platform,
        get_env: impl Fn(&str) -> Option<String>,
        fallback_skill_dir: PathBuf,
    ) -> Self {
        let interpreter = get_env(INTERPRETER_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(interpreter_name(platform)));

        let skill_dir = get_env(SKILL_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or(fallback_skill_dir);

        let entry_path = entry_path(&skill_dir);

        Self {
            interpreter,
            skill_dir,
            entry_path,
        }
    }

    /// Replace the skill directory, re-deriving the entry path.
    pub fn with_skill_dir(mut self, dir: PathBuf) -> Self {
        self.entry_path = entry_path(&dir);
        self.skill_dir = dir;
        self
    }
}

fn interpreter_name(platform: Platform) -> &'static str {
    match platform {
        Platform::Windows => "python",
        Platform::Unix => "python3",
    }
}

/// Fixed relative path of the CLI entry script within the skill package.
fn entry_path(skill_dir: &Path) -> PathBuf {
    skill_dir.join("text2speech_skill").join("cli.py")
}

/// Default skill location: `skill/` next to the bridge executable, so the
/// installable package travels with the wrapper.
fn default_skill_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .map(|dir| dir.join("skill"))
        .unwrap_or_else(|| PathBuf::from("skill"))
}
