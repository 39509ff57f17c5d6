//! Path management for pftracker
//!
//! ## Path Resolution Order
//!
//! 1. `PFTRACKER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/pftracker` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{PfError, PfResult};

/// Environment variable that overrides the config directory
pub const DATA_DIR_ENV: &str = "PFTRACKER_DATA_DIR";

/// Manages the files pftracker keeps on disk
#[derive(Debug, Clone)]
pub struct PfPaths {
    base_dir: PathBuf,
}

impl PfPaths {
    /// Resolve the config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override is not set.
    pub fn new() -> PfResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "pftracker")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    PfError::Config(format!(
                        "Could not determine a config directory; set {}",
                        DATA_DIR_ENV
                    ))
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the saved login session
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    pub fn ensure_directories(&self) -> PfResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            PfError::Io(format!(
                "Failed to create config directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }
}
