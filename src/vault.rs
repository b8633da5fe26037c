use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CalloutError, Result};

/// Host configuration folder inside a vault
pub const CONFIG_DIR_NAME: &str = ".obsidian";

/// Plugin id, used for the plugin data folder
pub const PLUGIN_ID: &str = "callout-modular-markdown";

/// Snippet file name inside `.obsidian/snippets`
pub const SNIPPET_FILE_NAME: &str = "CalloutModularMarkdown.css";

/// A vault root and the well-known paths inside its configuration area
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// Opens an existing vault directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CalloutError::VaultNotFound(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR_NAME)
    }

    /// `.obsidian/snippets/CalloutModularMarkdown.css`
    pub fn snippet_path(&self) -> PathBuf {
        self.config_dir().join("snippets").join(SNIPPET_FILE_NAME)
    }

    /// `.obsidian/plugins/<id>/data.json`
    pub fn plugin_data_path(&self) -> PathBuf {
        self.config_dir()
            .join("plugins")
            .join(PLUGIN_ID)
            .join("data.json")
    }

    /// Optional extra icon ids, one per line
    pub fn icon_list_path(&self) -> PathBuf {
        self.config_dir().join("icons.txt")
    }
}

/// Writes `content` to `path` in one step: temp file first, then rename.
/// Parent directories are created as needed. A failed rename removes the
/// temp file and leaves any previous file untouched.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| CalloutError::NoParent(path.to_path_buf()))?;
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = parent.join(format!("{}.tmp", file_name));

    // 임시 파일에 먼저 쓰고 rename
    fs::write(&temp_path, content)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}
