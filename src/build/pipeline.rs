//! Build pipeline orchestration.
//!
//! Sequences one run: validate the project layout, clean if requested,
//! discover sources, compile everything, then distribute artifacts. Only an
//! absent layout aborts the run; everything else is accumulated into the
//! [`BuildResult`].

use std::time::Instant;

use thiserror::Error;

use crate::build::compile::Compiler;
use crate::build::discovery::{discover_shaders, DiscoveryError};
use crate::build::distribute::distribute;
use crate::build::result::BuildResult;
use crate::config::{ExclusionRules, RunConfig, Toolchain};
use crate::layout::{InitError, Layout, LayoutStatus};

/// Error that aborts a run before any compilation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No language root exists; the project was never initialized.
    #[error("No shader directories found. Run with --init to create the project layout.")]
    LayoutAbsent,
    /// Discovery error
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),
    /// Output directory could not be created
    #[error(transparent)]
    Init(#[from] InitError),
    /// IO error while cleaning the output directory
    #[error("Failed to clean output directory: {0}")]
    Clean(std::io::Error),
}

/// Build pipeline for executing one compilation run.
pub struct BuildPipeline {
    config: RunConfig,
    layout: Layout,
    toolchain: Toolchain,
    rules: ExclusionRules,
}

impl BuildPipeline {
    /// Create a pipeline with default toolchain and exclusion rules.
    pub fn new(config: RunConfig, layout: Layout) -> Self {
        Self {
            config,
            layout,
            toolchain: Toolchain::default(),
            rules: ExclusionRules::default(),
        }
    }

    /// Replace the compiler toolchain (used by tests to inject stubs).
    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Replace the discovery exclusion rules.
    pub fn with_exclusion_rules(mut self, rules: ExclusionRules) -> Self {
        self.rules = rules;
        self
    }

    /// Run the pipeline to completion.
    ///
    /// Per-file compilation failures and per-destination copy failures do
    /// not abort the run; they are reported in the returned result.
    pub fn run(&self) -> Result<BuildResult, PipelineError> {
        let start = Instant::now();

        match self.layout.status() {
            LayoutStatus::Absent => return Err(PipelineError::LayoutAbsent),
            LayoutStatus::Partial(missing) => {
                let names: Vec<_> = missing.iter().map(|l| l.root_dir()).collect();
                eprintln!(
                    "Warning: not all shader directories are present (missing: {})",
                    names.join(", ")
                );
            }
            LayoutStatus::Complete => {}
        }

        let created = self.layout.ensure_output_dir()?;
        if created {
            self.info(&format!("Created output directory: {}", self.layout.output_dir().display()));
        } else if self.config.clean {
            // Must finish before any compilation so fresh artifacts survive.
            self.layout.clean_output_dir().map_err(PipelineError::Clean)?;
        }

        let shaders = discover_shaders(&self.layout, &self.rules)?;
        self.info(&format!(
            "Compiling {} shader(s) [target_env={}] [debug={}]",
            shaders.len(),
            self.config.target_env,
            self.config.emit_debug_info
        ));

        let compiler = Compiler::new(&self.config, &self.layout, &self.toolchain);
        let mut result = BuildResult::new();
        for target in compiler.compile_all(&shaders) {
            result.add_result(target);
        }

        if self.config.copy_enabled() {
            self.info(&format!(
                "Copying artifacts to {} destination(s)",
                self.config.copy_destinations.len()
            ));
            let failures = distribute(&self.layout.output_dir(), &self.config.copy_destinations);
            for failure in &failures {
                eprintln!("Warning: {}", failure);
            }
            result.distribution_failures = failures;
        }

        result.total_duration = start.elapsed();
        Ok(result)
    }

    fn info(&self, message: &str) {
        if !self.config.silent {
            println!("{}", message);
        }
    }
}
