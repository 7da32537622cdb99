//! Build result types.
//!
//! Contains types for representing the outcome of a compilation run.

use std::path::PathBuf;
use std::time::Duration;

/// Status of a single compiled shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// Compilation succeeded
    Success,
    /// Compilation failed with error
    Failed(String),
}

impl BuildStatus {
    /// Check if the status indicates success.
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Success)
    }

    /// Check if the status indicates failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, BuildStatus::Failed(_))
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStatus::Success => write!(f, "success"),
            BuildStatus::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of compiling a single shader.
#[derive(Debug, Clone)]
pub struct TargetResult {
    /// Source file base name
    pub name: String,
    /// Compilation status
    pub status: BuildStatus,
    /// Output artifact path (present on success)
    pub output: Option<PathBuf>,
    /// Compilation duration
    pub duration: Duration,
}

impl TargetResult {
    /// Create a successful result.
    pub fn success(name: String, output: PathBuf, duration: Duration) -> Self {
        Self { name, status: BuildStatus::Success, output: Some(output), duration }
    }

    /// Create a failed result.
    pub fn failed(name: String, error: String, duration: Duration) -> Self {
        Self { name, status: BuildStatus::Failed(error), output: None, duration }
    }

    /// Check if this result is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Result of a complete compilation run.
#[derive(Debug, Default)]
pub struct BuildResult {
    /// Results for each compiled shader
    pub targets: Vec<TargetResult>,
    /// Per-destination distribution failures
    pub distribution_failures: Vec<String>,
    /// Total run duration
    pub total_duration: Duration,
}

impl BuildResult {
    /// Create a new empty build result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target result.
    pub fn add_result(&mut self, result: TargetResult) {
        self.targets.push(result);
    }

    /// Get the number of successful compilations.
    pub fn success_count(&self) -> usize {
        self.targets.iter().filter(|r| r.status.is_success()).count()
    }

    /// Get the number of failed compilations.
    pub fn failed_count(&self) -> usize {
        self.targets.iter().filter(|r| r.status.is_failure()).count()
    }

    /// Check if the whole run succeeded (no compilation or copy failures).
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0 && self.distribution_failures.is_empty()
    }

    /// Get failed target results.
    pub fn failures(&self) -> Vec<&TargetResult> {
        self.targets.iter().filter(|r| r.status.is_failure()).collect()
    }

    /// Format a summary of the run.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        let success = self.success_count();
        let failed = self.failed_count();
        let total = self.targets.len();

        if failed > 0 {
            lines.push(format!(
                "Build failed: {} compiled, {} failed ({} total)",
                success, failed, total
            ));
            for target in self.failures() {
                lines.push(format!("  - {}: {}", target.name, target.status));
            }
        } else {
            lines.push(format!(
                "Build succeeded: {} shader(s) compiled in {:?}",
                success, self.total_duration
            ));
        }

        if !self.distribution_failures.is_empty() {
            lines.push(format!("Copy failures ({}):", self.distribution_failures.len()));
            for failure in &self.distribution_failures {
                lines.push(format!("  - {}", failure));
            }
        }

        lines.join("\n")
    }
}
