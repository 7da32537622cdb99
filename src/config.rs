//! Run configuration for shaderbuild
//!
//! Resolves command-line flags into an immutable [`RunConfig`] plus the
//! process-wide defaults (exclusion rules, compiler toolchain) that used to
//! be ambient globals in earlier incarnations of this tool. Everything here
//! is a plain constructed value so builds are deterministic and testable.

use std::path::PathBuf;

use crate::cli::Cli;

/// Maximum number of directories accepted by a single `--copy` flag.
pub const MAX_COPY_DESTINATIONS: usize = 25;

/// Copy destinations baked into the tool. Flag-supplied destinations are
/// appended to this list.
pub const DEFAULT_COPY_DESTINATIONS: &[&str] = &[];

/// Supported Vulkan target environments.
///
/// Closed set: the external compilers only accept these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetEnv {
    /// Vulkan 1.0
    V1_0,
    /// Vulkan 1.1
    V1_1,
    /// Vulkan 1.2
    #[default]
    V1_2,
    /// Vulkan 1.3
    V1_3,
}

impl TargetEnv {
    /// Parse a `--target` value like `1.2`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1.0" => Some(TargetEnv::V1_0),
            "1.1" => Some(TargetEnv::V1_1),
            "1.2" => Some(TargetEnv::V1_2),
            "1.3" => Some(TargetEnv::V1_3),
            _ => None,
        }
    }

    /// The form the compilers expect, e.g. `vulkan1.2`.
    pub fn as_arg(&self) -> &'static str {
        match self {
            TargetEnv::V1_0 => "vulkan1.0",
            TargetEnv::V1_1 => "vulkan1.1",
            TargetEnv::V1_2 => "vulkan1.2",
            TargetEnv::V1_3 => "vulkan1.3",
        }
    }
}

impl std::fmt::Display for TargetEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Shading language families this tool compiles.
///
/// Each language owns one root directory under the project root; a source
/// file's language is inferred from which root contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    Glsl,
    Hlsl,
}

impl SourceLanguage {
    /// All languages, in discovery order.
    pub const ALL: [SourceLanguage; 2] = [SourceLanguage::Glsl, SourceLanguage::Hlsl];

    /// Name of the root directory holding sources for this language.
    pub fn root_dir(&self) -> &'static str {
        match self {
            SourceLanguage::Glsl => "glsl",
            SourceLanguage::Hlsl => "hlsl",
        }
    }

    /// The extension marker stripped from output names by `--no-lang-ext`.
    pub fn extension_marker(&self) -> &'static str {
        match self {
            SourceLanguage::Glsl => ".glsl",
            SourceLanguage::Hlsl => ".hlsl",
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.root_dir())
    }
}

/// Discovery exclusion rules.
///
/// Both lists are matched as substrings against the full path, not as
/// path segments: `.spv` in `foo.spv.txt` excludes the file.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    /// Extension markers of previously-compiled artifacts, without the dot.
    pub extensions: Vec<String>,
    /// Directory name markers to skip entirely.
    pub directories: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            extensions: vec!["spv".to_string(), "dxil".to_string()],
            directories: Vec::new(),
        }
    }
}

impl ExclusionRules {
    /// Whether a discovered path should be dropped.
    pub fn is_excluded(&self, path: &str) -> bool {
        for ext in &self.extensions {
            if path.contains(&format!(".{}", ext)) {
                return true;
            }
        }
        for dir in &self.directories {
            if path.contains(&format!("{}/", dir)) {
                return true;
            }
        }
        false
    }
}

/// External compiler programs and backend policy knobs.
///
/// Injectable so tests can point the pipeline at stub executables instead
/// of a real `glslangValidator`/`dxc` installation.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// GLSL compiler program (resolved via PATH unless a path is given).
    pub glsl_compiler: PathBuf,
    /// HLSL compiler program.
    pub hlsl_compiler: PathBuf,
    /// Compile HLSL to SPIR-V for Vulkan interop instead of DXIL.
    pub vulkan_hlsl: bool,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            glsl_compiler: PathBuf::from("glslangValidator"),
            hlsl_compiler: PathBuf::from("dxc"),
            vulkan_hlsl: false,
        }
    }
}

/// Immutable configuration for one run.
///
/// Built once from the parsed command line, then passed by shared reference
/// to every pipeline stage. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Target Vulkan environment passed to the compilers.
    pub target_env: TargetEnv,
    /// Emit debug information (`-g` for GLSL). On by default.
    pub emit_debug_info: bool,
    /// Suppress informational output and compiler stdout streaming.
    pub silent: bool,
    /// Delete output-directory files before compiling.
    pub clean: bool,
    /// Keep the `.glsl`/`.hlsl` marker in derived output names. Stripping
    /// is the default; `--no-lang-ext` states that choice explicitly, so no
    /// flag ever sets this to `true`.
    pub preserve_lang_ext: bool,
    /// Distribution destinations, ordered, deduplicated.
    pub copy_destinations: Vec<PathBuf>,
    /// Upper bound on concurrent compiler processes.
    pub jobs: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_env: TargetEnv::default(),
            emit_debug_info: true,
            silent: false,
            clean: false,
            preserve_lang_ext: false,
            copy_destinations: default_copy_destinations(),
            jobs: default_jobs(),
        }
    }
}

impl RunConfig {
    /// Build a run configuration from parsed flags.
    ///
    /// Recognized-but-invalid values (e.g. `--target 9.9`) produce a warning
    /// string and fall back to the default; they never abort the run.
    ///
    /// # Returns
    /// The configuration and any non-fatal configuration warnings.
    pub fn from_cli(cli: &Cli) -> (Self, Vec<String>) {
        let mut config = RunConfig::default();
        let mut warnings = Vec::new();

        // An empty value means `--target` appeared with no following token;
        // the default is kept without a warning.
        if let Some(env) = cli.target.as_deref().filter(|s| !s.is_empty()) {
            match TargetEnv::parse(env) {
                Some(target) => config.target_env = target,
                None => warnings.push(format!(
                    "invalid target '{}' (valid values: 1.0, 1.1, 1.2, 1.3), using {}",
                    env, config.target_env
                )),
            }
        }

        config.emit_debug_info = !cli.no_debug;
        config.silent = cli.silent;
        config.clean = cli.clean;

        for dir in &cli.copy {
            if !config.copy_destinations.contains(dir) {
                config.copy_destinations.push(dir.clone());
            }
        }

        if let Some(jobs) = cli.jobs {
            config.jobs = jobs.max(1);
        }

        (config, warnings)
    }

    /// Whether the distribution step runs after compilation.
    pub fn copy_enabled(&self) -> bool {
        !self.copy_destinations.is_empty()
    }
}

/// The compiled-in destination list as owned paths.
fn default_copy_destinations() -> Vec<PathBuf> {
    DEFAULT_COPY_DESTINATIONS.iter().map(PathBuf::from).collect()
}

/// Default number of parallel compiler processes.
fn default_jobs() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}
