//! Identified-item persistence
//!
//! Tracks which item names the player has confirmed, saved to disk
//! after every change so a closed terminal never loses progress.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed storage key; also the persisted file's stem
pub const STORAGE_KEY: &str = "torneko-identify-checker-items";

/// The set of identified item names, bound to its storage path
#[derive(Debug, Clone)]
pub struct IdentifiedSet {
    names: HashSet<String>,
    path: PathBuf,
}

/// Get the default storage path for identification state
pub fn default_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "zukan", "Zukan") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push(format!("{}.json", STORAGE_KEY));
        path
    } else {
        PathBuf::from(format!("./{}.json", STORAGE_KEY))
    }
}

impl IdentifiedSet {
    /// Load identification state (or start empty).
    ///
    /// A missing file means a fresh player; unreadable or malformed
    /// content is logged and treated the same way. Never fails.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let names = read_names(&path);
        Self { names, path }
    }

    /// Check whether an item has been identified
    pub fn has(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Flip an item's identified state and persist immediately.
    /// Returns the new membership state.
    pub fn toggle(&mut self, name: &str) -> bool {
        let identified = if self.names.remove(name) {
            false
        } else {
            self.names.insert(name.to_string());
            true
        };
        self.persist();
        identified
    }

    /// Clear all identification state and remove the persisted file
    pub fn reset(&mut self) {
        self.names.clear();
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                log::warn!("Failed to remove {:?}: {}", self.path, e);
            } else {
                log::info!("Identification state reset, removed {:?}", self.path);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Write the full set to disk as a JSON array of names.
    ///
    /// A write failure is logged and swallowed: the in-memory set stays
    /// authoritative for the rest of the session.
    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Failed to create {:?}: {}", parent, e);
                return;
            }
        }

        let mut names: Vec<&String> = self.names.iter().collect();
        names.sort();

        match serde_json::to_string(&names) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("Failed to save identification state: {}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize identification state: {}", e),
        }
    }
}

fn read_names(path: &Path) -> HashSet<String> {
    if !path.exists() {
        return HashSet::new();
    }

    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str::<Vec<String>>(&data) {
            Ok(names) => names.into_iter().collect(),
            Err(e) => {
                log::warn!("Corrupt identification data in {:?}: {}, starting empty", path, e);
                HashSet::new()
            }
        },
        Err(e) => {
            log::warn!("Failed to read {:?}: {}, starting empty", path, e);
            HashSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("{}.json", STORAGE_KEY));
        (dir, path)
    }

    #[test]
    fn test_load_missing_is_empty() {
        let (_dir, path) = temp_store();
        let set = IdentifiedSet::load(&path);
        assert!(set.is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let (_dir, path) = temp_store();
        fs::write(&path, "{ not an array").unwrap();
        let set = IdentifiedSet::load(&path);
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle_persists_round_trip() {
        let (_dir, path) = temp_store();

        let mut set = IdentifiedSet::load(&path);
        assert!(set.toggle("やくそう"));
        assert!(set.toggle("どくのつぼ"));
        assert!(set.has("やくそう"));

        // A fresh load sees exactly the same set
        let reloaded = IdentifiedSet::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.has("やくそう"));
        assert!(reloaded.has("どくのつぼ"));
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let (_dir, path) = temp_store();

        let mut set = IdentifiedSet::load(&path);
        assert!(set.toggle("やくそう"));
        assert!(!set.toggle("やくそう"));
        assert!(!set.has("やくそう"));

        let reloaded = IdentifiedSet::load(&path);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_reset_clears_and_removes_file() {
        let (_dir, path) = temp_store();

        let mut set = IdentifiedSet::load(&path);
        set.toggle("やくそう");
        assert!(path.exists());

        set.reset();
        assert!(set.is_empty());
        assert!(!path.exists());

        // Subsequent load also comes back empty
        let reloaded = IdentifiedSet::load(&path);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_reset_without_file_is_quiet() {
        let (_dir, path) = temp_store();
        let mut set = IdentifiedSet::load(&path);
        set.reset();
        assert!(set.is_empty());
    }
}
