//! First-run setup

use crate::config::paths::GroceryPaths;
use crate::config::settings::Settings;
use crate::error::GroceryResult;

use super::Storage;

/// Create the directory layout, default settings and empty data files
///
/// Existing files are left untouched, so running this twice is harmless.
/// Returns true when the settings file was newly written.
pub fn initialize_storage(paths: &GroceryPaths) -> GroceryResult<bool> {
    paths.ensure_directories()?;

    let fresh = !paths.is_initialized();
    if fresh {
        Settings::default().save(paths)?;
    }

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    if !paths.items_file().exists() {
        storage.items.save()?;
    }
    if !paths.budget_file().exists() {
        storage.budget.save()?;
    }

    Ok(fresh)
}

/// True when `grocery init` has not been run for this data directory
pub fn needs_initialization(paths: &GroceryPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(needs_initialization(&paths));

        assert!(initialize_storage(&paths).unwrap());
        assert!(paths.settings_file().exists());
        assert!(paths.items_file().exists());
        assert!(paths.budget_file().exists());
        assert!(!needs_initialization(&paths));
    }

    #[test]
    fn test_initialize_twice_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroceryPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let mut settings = Settings::load_or_create(&paths).unwrap();
        settings.currency_symbol = "€".into();
        settings.save(&paths).unwrap();

        assert!(!initialize_storage(&paths).unwrap());
        assert_eq!(Settings::load_or_create(&paths).unwrap().currency_symbol, "€");
    }
}
