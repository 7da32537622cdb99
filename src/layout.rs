//! Project layout for shaderbuild
//!
//! The tool expects one root directory per shading language (`glsl/`,
//! `hlsl/`) plus a `bin/` output directory under the project root. This
//! module checks for that structure and scaffolds it for `--init`.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::SourceLanguage;

/// Name of the build-output directory under the project root.
pub const OUTPUT_DIR: &str = "bin";

/// Error during layout initialization
#[derive(Debug, Error)]
pub enum InitError {
    /// Failed to create a directory
    #[error("Failed to create directory {}: {}", .0.display(), .1)]
    CreateDir(PathBuf, #[source] std::io::Error),
}

/// Result of checking the expected directory structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutStatus {
    /// All language roots exist.
    Complete,
    /// Some language roots exist; the missing ones are listed.
    Partial(Vec<SourceLanguage>),
    /// No language root exists; the project was never initialized.
    Absent,
}

/// The on-disk directory structure this tool operates on.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Create a layout rooted at a project directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The build-output directory (the single staging area for distribution).
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    /// The source root directory for one language.
    pub fn lang_root(&self, lang: SourceLanguage) -> PathBuf {
        self.root.join(lang.root_dir())
    }

    /// Check which language roots exist.
    pub fn status(&self) -> LayoutStatus {
        let missing: Vec<SourceLanguage> = SourceLanguage::ALL
            .into_iter()
            .filter(|lang| !self.lang_root(*lang).exists())
            .collect();

        if missing.is_empty() {
            LayoutStatus::Complete
        } else if missing.len() == SourceLanguage::ALL.len() {
            LayoutStatus::Absent
        } else {
            LayoutStatus::Partial(missing)
        }
    }

    /// Create the output directory and every language root, if missing.
    pub fn init(&self) -> Result<(), InitError> {
        create_dir(&self.output_dir())?;
        for lang in SourceLanguage::ALL {
            create_dir(&self.lang_root(lang))?;
        }
        Ok(())
    }

    /// Ensure the output directory exists.
    ///
    /// # Returns
    /// `true` if the directory was created by this call.
    pub fn ensure_output_dir(&self) -> Result<bool, InitError> {
        let dir = self.output_dir();
        if dir.exists() {
            return Ok(false);
        }
        create_dir(&dir)?;
        Ok(true)
    }

    /// Delete all regular files in the output directory.
    ///
    /// Missing output directory is fine; subdirectories are left alone.
    pub fn clean_output_dir(&self) -> std::io::Result<()> {
        let dir = self.output_dir();
        if !dir.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

/// Create a directory and all parent directories.
fn create_dir(path: &Path) -> Result<(), InitError> {
    fs::create_dir_all(path).map_err(|e| InitError::CreateDir(path.to_path_buf(), e))
}
