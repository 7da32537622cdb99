//! Shader source discovery for the build pipeline.
//!
//! Walks each language root directory recursively and returns the set of
//! compilable files after applying the exclusion rules.

use std::path::PathBuf;

use glob::glob;
use thiserror::Error;

use crate::config::{ExclusionRules, SourceLanguage};
use crate::layout::Layout;

/// Error during source discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Invalid glob pattern (root paths containing pattern metacharacters)
    #[error("Invalid glob pattern '{0}': {1}")]
    InvalidPattern(String, #[source] glob::PatternError),
}

/// A discovered shader source with its inferred language.
///
/// Ephemeral: produced here, consumed immediately by the compilation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderFile {
    /// Path to the source file, relative to or rooted at the project root.
    pub path: PathBuf,
    /// Language inferred from root-directory membership.
    pub language: SourceLanguage,
}

impl ShaderFile {
    /// The file name used in output-name derivation and log prefixes.
    pub fn base_name(&self) -> &str {
        self.path.file_name().and_then(|n| n.to_str()).unwrap_or("")
    }
}

/// Discover all compilable shader sources under the layout's language roots.
///
/// A missing language root simply yields no files for that language; the run
/// controller warns about incomplete layouts separately. The result is
/// sorted by path so compilation order is stable within a run.
pub fn discover_shaders(
    layout: &Layout,
    rules: &ExclusionRules,
) -> Result<Vec<ShaderFile>, DiscoveryError> {
    let mut shaders = Vec::new();

    for language in SourceLanguage::ALL {
        let root = layout.lang_root(language);
        if !root.exists() {
            continue;
        }

        let pattern = format!("{}/**/*", root.display());
        let paths =
            glob(&pattern).map_err(|e| DiscoveryError::InvalidPattern(pattern.clone(), e))?;

        let mut files = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) => {
                    if path.is_file() && !rules.is_excluded(&path.to_string_lossy()) {
                        files.push(ShaderFile { path, language });
                    }
                }
                Err(e) => {
                    // Log but continue on unreadable entries
                    eprintln!("Warning: error reading path: {}", e);
                }
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        shaders.extend(files);
    }

    Ok(shaders)
}
