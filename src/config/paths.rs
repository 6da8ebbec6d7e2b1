//! Path management for grocery-cli
//!
//! Provides XDG-compliant path resolution for configuration, data and reports.
//!
//! ## Path Resolution Order
//!
//! 1. `GROCERY_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/grocery-cli` or `~/.config/grocery-cli`
//! 3. Windows: `%APPDATA%\grocery-cli`

use std::path::PathBuf;

use crate::error::GroceryError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "GROCERY_CLI_DATA_DIR";

/// Manages all paths used by grocery-cli
#[derive(Debug, Clone)]
pub struct GroceryPaths {
    /// Base directory for all grocery-cli data
    base_dir: PathBuf,
}

impl GroceryPaths {
    /// Create a new GroceryPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, GroceryError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create GroceryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/grocery-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/grocery-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the directory generated reports are written to
    pub fn reports_dir(&self) -> PathBuf {
        self.base_dir.join("reports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to items.json
    pub fn items_file(&self) -> PathBuf {
        self.data_dir().join("items.json")
    }

    /// Get the path to budget.json
    pub fn budget_file(&self) -> PathBuf {
        self.data_dir().join("budget.json")
    }

    /// Ensure the base, data and reports directories exist
    pub fn ensure_directories(&self) -> Result<(), GroceryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| GroceryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| GroceryError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.reports_dir()).map_err(|e| {
            GroceryError::Io(format!("Failed to create reports directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if grocery-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, GroceryError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                GroceryError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("grocery-cli"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, GroceryError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| GroceryError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("grocery-cli"))
}
