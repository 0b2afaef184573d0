use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::prompts::update::{reduce, PromptUpdate};
use crate::prompts::{PromptConfig, PromptPreset};

#[derive(Debug, thiserror::Error)]
pub enum PromptStoreError {
    #[error("Failed to write prompt config to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize prompt config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Holds the active prompt configuration and its on-disk custom override.
#[derive(Debug, Clone)]
pub struct PromptStore {
    path: PathBuf,
    default_preset: PromptPreset,
    current: PromptConfig,
    is_custom: bool,
}

fn load_custom_config(path: &Path) -> Option<PromptConfig> {
    if !path.exists() {
        return None;
    }

    let raw = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(
                "Failed to read custom prompt config at {}: {}",
                path.display(),
                err
            );
            return None;
        }
    };

    match serde_json::from_str::<PromptConfig>(&raw) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!(
                "Failed to parse custom prompt config at {}: {}",
                path.display(),
                err
            );
            None
        }
    }
}

impl PromptStore {
    pub fn load(path: impl Into<PathBuf>, default_preset: PromptPreset) -> Self {
        let path = path.into();
        match load_custom_config(&path) {
            Some(current) => {
                info!("Loaded custom prompt config from {}", path.display());
                PromptStore {
                    path,
                    default_preset,
                    current,
                    is_custom: true,
                }
            }
            None => PromptStore {
                path,
                default_preset,
                current: default_preset.config(),
                is_custom: false,
            },
        }
    }

    pub fn config(&self) -> &PromptConfig {
        &self.current
    }

    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Changes the in-memory config only; call [`PromptStore::save`] to persist.
    pub fn apply(&mut self, update: PromptUpdate) {
        self.is_custom = reduce(&mut self.current, update);
    }

    pub fn save(&mut self) -> Result<(), PromptStoreError> {
        let io_err = |source| PromptStoreError::Io {
            path: self.path.clone(),
            source,
        };

        let parent_dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent_dir).map_err(io_err)?;

        let json = serde_json::to_string_pretty(&self.current)?;
        let temp_file = NamedTempFile::new_in(&parent_dir).map_err(io_err)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            writer.write_all(json.as_bytes()).map_err(io_err)?;
            writer.flush().map_err(io_err)?;
        }
        temp_file.persist(&self.path).map_err(|err| io_err(err.error))?;

        self.is_custom = true;
        info!("Saved custom prompt config to {}", self.path.display());
        Ok(())
    }

    pub fn reset_to_default(&mut self) -> Result<(), PromptStoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|source| PromptStoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        }
        self.current = self.default_preset.config();
        self.is_custom = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_default_preset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PromptStore::load(dir.path().join("prompts.json"), PromptPreset::Generic);
        assert_eq!(store.config(), &PromptPreset::Generic.config());
        assert!(!store.is_custom());
    }

    #[test]
    fn saved_config_is_loaded_next_time() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("prompts.json");

        let mut store = PromptStore::load(&path, PromptPreset::Jewelry);
        store.apply(PromptUpdate::SetGenerationSystemRole(
            "Act as a silversmith.".to_string(),
        ));
        store.save().expect("save succeeds");

        let reloaded = PromptStore::load(&path, PromptPreset::Jewelry);
        assert!(reloaded.is_custom());
        assert_eq!(
            reloaded.config().generation_prompt.system_role,
            "Act as a silversmith."
        );
    }

    #[test]
    fn corrupt_file_falls_back_to_preset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prompts.json");
        fs::write(&path, "{ not json").expect("write");
        let store = PromptStore::load(&path, PromptPreset::Fashion);
        assert_eq!(store.config(), &PromptPreset::Fashion.config());
    }

    #[test]
    fn reset_removes_saved_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prompts.json");
        let mut store = PromptStore::load(&path, PromptPreset::Jewelry);
        store.apply(PromptUpdate::SetProductType("腕表设计".to_string()));
        store.save().expect("save succeeds");
        assert!(path.exists());

        store.reset_to_default().expect("reset succeeds");
        assert!(!path.exists());
        assert_eq!(store.config(), &PromptPreset::Jewelry.config());
        assert!(!store.is_custom());
    }
}
