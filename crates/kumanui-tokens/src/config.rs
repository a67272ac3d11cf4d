//! Input locations for a generator run.
//!
//! Nothing in this crate assumes a fixed on-disk layout: every run is handed
//! a [`Config`] naming the token document and, optionally, the companion
//! version file.
//!
//! ```rust,ignore
//! use kumanui_tokens::Config;
//!
//! let config = Config::from_root(".");
//! let document = config.load_document()?;
//! let version = config.load_version()?;
//! ```

use std::path::{Path, PathBuf};

use crate::document::TokenDocument;
use crate::error::{DocumentError, TokenError};

/// Token document location relative to a repository root.
pub const DEFAULT_TOKENS_PATH: &str = "tokens/colors.yaml";

/// Version file name relative to a repository root.
pub const DEFAULT_VERSION_FILE: &str = "VERSION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tokens_path: PathBuf,
    pub version_path: Option<PathBuf>,
}

impl Config {
    pub fn new(tokens_path: impl Into<PathBuf>) -> Self {
        Self {
            tokens_path: tokens_path.into(),
            version_path: None,
        }
    }

    /// Conventional layout under `root`. The version file is only recorded
    /// when it exists.
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let version = root.join(DEFAULT_VERSION_FILE);
        Self {
            tokens_path: root.join(DEFAULT_TOKENS_PATH),
            version_path: version.is_file().then_some(version),
        }
    }

    pub fn with_version_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.version_path = Some(path.into());
        self
    }

    pub fn load_document(&self) -> Result<TokenDocument, DocumentError> {
        TokenDocument::from_file(&self.tokens_path)
    }

    /// The first line of the version file, trimmed. `None` when no version
    /// file is configured.
    pub fn load_version(&self) -> Result<Option<String>, TokenError> {
        let Some(path) = &self.version_path else {
            return Ok(None);
        };
        let content = std::fs::read_to_string(path).map_err(|source| TokenError::Version {
            path: path.clone(),
            source,
        })?;
        Ok(Some(content.lines().next().unwrap_or("").trim().to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_TOKENS_PATH)
    }
}
