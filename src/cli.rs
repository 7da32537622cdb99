//! Command-line interface implementation
//!
//! Parses the flag surface, builds the run configuration, and drives the
//! build pipeline. The exit status distinguishes an uninitialized project
//! from a run with compilation failures so scripts can react to each.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::build::{BuildPipeline, PipelineError};
use crate::config::{RunConfig, MAX_COPY_DESTINATIONS};
use crate::layout::Layout;

/// Run completed with every compilation and copy succeeding.
pub(crate) const EXIT_SUCCESS: u8 = 0;
/// Run completed but at least one compilation or copy failed.
pub(crate) const EXIT_ERROR: u8 = 1;
/// Run aborted: no shader directories exist.
pub(crate) const EXIT_NO_PROJECT: u8 = 2;

/// Shaderbuild - compile project shaders (GLSL, HLSL) and distribute the artifacts
#[derive(Parser)]
#[command(name = "shb")]
#[command(about = "Shaderbuild - compile project shaders (GLSL, HLSL) and distribute the artifacts")]
#[command(version)]
pub struct Cli {
    /// Create the shader directory layout (glsl/, hlsl/, bin/) and exit
    #[arg(long)]
    pub init: bool,

    /// Target Vulkan environment: 1.0, 1.1, 1.2 or 1.3 (default: 1.2)
    #[arg(long, value_name = "ENV", num_args = 0..=1, default_missing_value = "")]
    pub target: Option<String>,

    /// Do not emit debug information
    #[arg(long)]
    pub no_debug: bool,

    /// Suppress informational output and compiler stdout
    #[arg(long)]
    pub silent: bool,

    /// Delete output-directory files before compiling
    #[arg(long)]
    pub clean: bool,

    /// Copy compiled artifacts to these directories after the build
    #[arg(long, value_name = "DIR", num_args = 1..=MAX_COPY_DESTINATIONS)]
    pub copy: Vec<PathBuf>,

    /// Strip the shader language extension (.glsl, .hlsl) from output names
    /// (stripping is already the default)
    #[arg(long)]
    pub no_lang_ext: bool,

    /// Maximum number of concurrent compiler processes
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,
}

/// CLI entry point.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    run_in(cli, Layout::new(root))
}

/// Run the parsed command against a project layout.
pub fn run_in(cli: Cli, layout: Layout) -> ExitCode {
    if cli.init {
        return run_init(&layout);
    }

    let (config, warnings) = RunConfig::from_cli(&cli);
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    let silent = config.silent;
    match BuildPipeline::new(config, layout).run() {
        Ok(result) => {
            if !silent {
                println!("{}", result.summary());
            }
            if result.is_success() {
                ExitCode::from(EXIT_SUCCESS)
            } else {
                ExitCode::from(EXIT_ERROR)
            }
        }
        Err(e @ PipelineError::LayoutAbsent) => {
            eprintln!("{}", e);
            ExitCode::from(EXIT_NO_PROJECT)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Handle `--init`: scaffold the layout and exit.
fn run_init(layout: &Layout) -> ExitCode {
    match layout.init() {
        Ok(()) => {
            println!("Created shader directory layout at {}", layout.root().display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
