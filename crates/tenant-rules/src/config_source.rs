//! Locating `tenant-rules.toml`.
//!
//! Lookup stops at the first hit: the `--config` path, a config file in the
//! project directory, the user-wide config, then built-in defaults.
//!
//! Relative `[schema] path` and `[output] file` values are read against the
//! directory holding the config file that was picked. The user-wide config
//! and the defaults have no project of their own, so they use the project
//! directory.

use std::fmt;
use std::path::{Path, PathBuf};

/// Overrides the user-wide config directory (`~/.tenant-rules`).
pub const CONFIG_DIR_ENV: &str = "TENANT_RULES_CONFIG_DIR";

/// Config file names looked up in the project directory, in order.
pub const PROJECT_FILE_NAMES: [&str; 2] = ["tenant-rules.toml", ".tenant-rules.toml"];

const USER_FILE_NAME: &str = "config.toml";

/// The config file a project was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; need not exist yet.
    Flag(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// User-wide config.
    User(PathBuf),
    /// No file; built-in defaults.
    Defaults,
}

impl ConfigSource {
    /// Picks the config for `project_dir`.
    #[must_use]
    pub fn locate(project_dir: &Path, flag: Option<&Path>) -> Self {
        Self::locate_in(project_dir, flag, user_config_dir().as_deref())
    }

    fn locate_in(project_dir: &Path, flag: Option<&Path>, user_dir: Option<&Path>) -> Self {
        if let Some(path) = flag {
            return Self::Flag(path.to_path_buf());
        }
        if let Some(path) = first_file(project_dir, &PROJECT_FILE_NAMES) {
            return Self::Project(path);
        }
        user_dir
            .and_then(|dir| first_file(dir, &[USER_FILE_NAME]))
            .map_or(Self::Defaults, Self::User)
    }

    /// Returns the config file, unless defaults are used.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(path) | Self::Project(path) | Self::User(path) => Some(path),
            Self::Defaults => None,
        }
    }

    /// Directory that relative paths inside the config resolve against.
    #[must_use]
    pub fn base_dir(&self, project_dir: &Path) -> PathBuf {
        match self {
            Self::Flag(path) | Self::Project(path) => path
                .parent()
                .map_or_else(|| project_dir.to_path_buf(), Path::to_path_buf),
            Self::User(_) | Self::Defaults => project_dir.to_path_buf(),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(path) => write!(f, "config {} (--config)", path.display()),
            Self::Project(path) => write!(f, "project config {}", path.display()),
            Self::User(path) => write!(f, "user config {}", path.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// `$TENANT_RULES_CONFIG_DIR`, else `~/.tenant-rules`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".tenant-rules")))
}

fn first_file(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}
