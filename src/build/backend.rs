//! Compiler backends.
//!
//! Each shading language family maps to one external compiler. A backend
//! knows two things: which output extension its artifacts carry, and how to
//! build the compiler command line for one source file. The batch logic in
//! [`crate::build::compile`] stays backend-agnostic behind this trait.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::build::discovery::ShaderFile;
use crate::config::{RunConfig, SourceLanguage, Toolchain};
use crate::layout::Layout;

/// Error while preparing a backend invocation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The filename carries no recognized HLSL stage marker. The compiler is
    /// never invoked with an empty profile.
    #[error(
        "Unrecognized shader stage in '{}' \
         (expected .vert, .frag, .comp, .rgen, .rchit, .rmiss, .mesh or .task)",
        .0.display()
    )]
    UnknownStage(PathBuf),
}

/// External compiler integration for one shading language family.
pub trait CompilerBackend {
    /// Backend name for reporting.
    fn name(&self) -> &'static str;

    /// Extension of the artifacts this backend produces, without the dot.
    fn output_extension(&self, toolchain: &Toolchain) -> &'static str;

    /// Build the compiler command line for one source file.
    fn command(
        &self,
        shader: &ShaderFile,
        output: &Path,
        config: &RunConfig,
        toolchain: &Toolchain,
    ) -> Result<Command, BackendError>;
}

/// GLSL backend (glslangValidator, SPIR-V output).
pub struct GlslBackend;

/// HLSL backend (dxc, DXIL output or SPIR-V in Vulkan interop mode).
pub struct HlslBackend;

/// Select the backend for a source language.
pub fn backend_for(language: SourceLanguage) -> &'static dyn CompilerBackend {
    match language {
        SourceLanguage::Glsl => &GlslBackend,
        SourceLanguage::Hlsl => &HlslBackend,
    }
}

impl CompilerBackend for GlslBackend {
    fn name(&self) -> &'static str {
        "glsl"
    }

    fn output_extension(&self, _toolchain: &Toolchain) -> &'static str {
        "spv"
    }

    fn command(
        &self,
        shader: &ShaderFile,
        output: &Path,
        config: &RunConfig,
        toolchain: &Toolchain,
    ) -> Result<Command, BackendError> {
        let mut cmd = Command::new(&toolchain.glsl_compiler);
        if config.emit_debug_info {
            cmd.arg("-g");
        }
        cmd.arg("-o")
            .arg(output)
            .arg("-V")
            .arg(&shader.path)
            .arg("--target-env")
            .arg(config.target_env.as_arg());
        Ok(cmd)
    }
}

impl CompilerBackend for HlslBackend {
    fn name(&self) -> &'static str {
        "hlsl"
    }

    fn output_extension(&self, toolchain: &Toolchain) -> &'static str {
        if toolchain.vulkan_hlsl {
            "spv"
        } else {
            "dxil"
        }
    }

    fn command(
        &self,
        shader: &ShaderFile,
        output: &Path,
        config: &RunConfig,
        toolchain: &Toolchain,
    ) -> Result<Command, BackendError> {
        let profile = hlsl_profile(shader.base_name())
            .ok_or_else(|| BackendError::UnknownStage(shader.path.clone()))?;

        let mut cmd = Command::new(&toolchain.hlsl_compiler);
        cmd.arg("-T")
            .arg(profile)
            .arg("-E")
            .arg("main")
            .arg(&shader.path)
            .arg("-Fo")
            .arg(output);
        if toolchain.vulkan_hlsl {
            cmd.arg("-spirv")
                .arg(format!("-fspv-target-env={}", config.target_env.as_arg()));
        }
        Ok(cmd)
    }
}

/// Map an HLSL filename to its shader-stage profile.
///
/// First match wins, checked in this order. Returns `None` for filenames
/// without a recognized stage marker.
pub fn hlsl_profile(file_name: &str) -> Option<&'static str> {
    if file_name.contains(".vert") {
        Some("vs_6_1")
    } else if file_name.contains(".frag") {
        Some("ps_6_4")
    } else if file_name.contains(".comp") {
        Some("cs_6_1")
    } else if file_name.contains(".rgen")
        || file_name.contains(".rchit")
        || file_name.contains(".rmiss")
    {
        Some("lib_6_3")
    } else if file_name.contains(".mesh") {
        Some("ms_6_6")
    } else if file_name.contains(".task") {
        Some("as_6_6")
    } else {
        None
    }
}

/// Derive the output artifact name for a source file name.
///
/// Pure and deterministic: `{base_name}.{extension}`, with every language
/// marker (".glsl", ".hlsl") removed unless `preserve_lang_ext` is set.
pub fn output_name(base_name: &str, extension: &str, preserve_lang_ext: bool) -> String {
    let mut name = format!("{}.{}", base_name, extension);
    if !preserve_lang_ext {
        for lang in SourceLanguage::ALL {
            name = name.replace(lang.extension_marker(), "");
        }
    }
    name
}

/// Derive the full output artifact path for a discovered shader.
pub fn output_path(
    layout: &Layout,
    shader: &ShaderFile,
    config: &RunConfig,
    toolchain: &Toolchain,
) -> PathBuf {
    let backend = backend_for(shader.language);
    let name = output_name(
        shader.base_name(),
        backend.output_extension(toolchain),
        config.preserve_lang_ext,
    );
    layout.output_dir().join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hlsl_profile_stage_markers() {
        assert_eq!(hlsl_profile("a.vert.hlsl"), Some("vs_6_1"));
        assert_eq!(hlsl_profile("a.frag.hlsl"), Some("ps_6_4"));
        assert_eq!(hlsl_profile("a.comp.hlsl"), Some("cs_6_1"));
        assert_eq!(hlsl_profile("a.mesh.hlsl"), Some("ms_6_6"));
        assert_eq!(hlsl_profile("shader.task.hlsl"), Some("as_6_6"));
    }

    #[test]
    fn test_hlsl_profile_ray_tracing_markers_checked_independently() {
        assert_eq!(hlsl_profile("a.rgen.hlsl"), Some("lib_6_3"));
        assert_eq!(hlsl_profile("shader.rchit.hlsl"), Some("lib_6_3"));
        assert_eq!(hlsl_profile("a.rmiss.hlsl"), Some("lib_6_3"));
    }

    #[test]
    fn test_hlsl_profile_unknown_stage() {
        assert_eq!(hlsl_profile("a.hlsl"), None);
        assert_eq!(hlsl_profile("notes.txt"), None);
    }

    #[test]
    fn test_hlsl_profile_first_match_wins() {
        // .vert outranks .task when both markers appear
        assert_eq!(hlsl_profile("a.vert.task.hlsl"), Some("vs_6_1"));
    }

    #[test]
    fn test_output_name_strips_language_markers() {
        assert_eq!(output_name("b.comp.hlsl", "dxil", false), "b.comp.dxil");
        assert_eq!(output_name("a.vert.glsl", "spv", false), "a.vert.spv");
        assert_eq!(output_name("a.vert", "spv", false), "a.vert.spv");
    }

    #[test]
    fn test_output_name_preserves_language_markers() {
        assert_eq!(output_name("b.comp.hlsl", "dxil", true), "b.comp.hlsl.dxil");
    }

    #[test]
    fn test_output_name_is_deterministic() {
        let a = output_name("shader.rchit.hlsl", "spv", false);
        let b = output_name("shader.rchit.hlsl", "spv", false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_extension_policy() {
        let default = Toolchain::default();
        assert_eq!(GlslBackend.output_extension(&default), "spv");
        assert_eq!(HlslBackend.output_extension(&default), "dxil");

        let vulkan = Toolchain { vulkan_hlsl: true, ..Toolchain::default() };
        assert_eq!(HlslBackend.output_extension(&vulkan), "spv");
    }

    fn shader(path: &str, language: SourceLanguage) -> ShaderFile {
        ShaderFile { path: PathBuf::from(path), language }
    }

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_glsl_command_line() {
        let config = RunConfig::default();
        let toolchain = Toolchain::default();
        let file = shader("glsl/a.vert", SourceLanguage::Glsl);

        let cmd = GlslBackend
            .command(&file, Path::new("bin/a.vert.spv"), &config, &toolchain)
            .unwrap();

        assert_eq!(cmd.get_program(), "glslangValidator");
        assert_eq!(
            args_of(&cmd),
            vec!["-g", "-o", "bin/a.vert.spv", "-V", "glsl/a.vert", "--target-env", "vulkan1.2"]
        );
    }

    #[test]
    fn test_glsl_command_line_no_debug() {
        let config = RunConfig { emit_debug_info: false, ..RunConfig::default() };
        let toolchain = Toolchain::default();
        let file = shader("glsl/a.vert", SourceLanguage::Glsl);

        let cmd = GlslBackend
            .command(&file, Path::new("bin/a.vert.spv"), &config, &toolchain)
            .unwrap();
        assert!(!args_of(&cmd).contains(&"-g".to_string()));
    }

    #[test]
    fn test_hlsl_command_line_dxil() {
        let config = RunConfig::default();
        let toolchain = Toolchain::default();
        let file = shader("hlsl/b.comp.hlsl", SourceLanguage::Hlsl);

        let cmd = HlslBackend
            .command(&file, Path::new("bin/b.comp.dxil"), &config, &toolchain)
            .unwrap();

        assert_eq!(cmd.get_program(), "dxc");
        assert_eq!(
            args_of(&cmd),
            vec!["-T", "cs_6_1", "-E", "main", "hlsl/b.comp.hlsl", "-Fo", "bin/b.comp.dxil"]
        );
    }

    #[test]
    fn test_hlsl_command_line_vulkan_interop() {
        let config = RunConfig::default();
        let toolchain = Toolchain { vulkan_hlsl: true, ..Toolchain::default() };
        let file = shader("hlsl/b.comp.hlsl", SourceLanguage::Hlsl);

        let cmd = HlslBackend
            .command(&file, Path::new("bin/b.comp.spv"), &config, &toolchain)
            .unwrap();

        let args = args_of(&cmd);
        assert!(args.contains(&"-spirv".to_string()));
        assert!(args.contains(&"-fspv-target-env=vulkan1.2".to_string()));
    }

    #[test]
    fn test_hlsl_command_unknown_stage_is_an_error() {
        let config = RunConfig::default();
        let toolchain = Toolchain::default();
        let file = shader("hlsl/util.hlsl", SourceLanguage::Hlsl);

        let result = HlslBackend.command(&file, Path::new("bin/util.dxil"), &config, &toolchain);
        assert!(matches!(result, Err(BackendError::UnknownStage(_))));
    }

    #[test]
    fn test_output_path_end_to_end_names() {
        let layout = Layout::new(PathBuf::from("/project"));
        let config = RunConfig::default();
        let toolchain = Toolchain::default();

        let glsl = shader("/project/glsl/a.vert", SourceLanguage::Glsl);
        assert_eq!(
            output_path(&layout, &glsl, &config, &toolchain),
            PathBuf::from("/project/bin/a.vert.spv")
        );

        let hlsl = shader("/project/hlsl/b.comp.hlsl", SourceLanguage::Hlsl);
        assert_eq!(
            output_path(&layout, &hlsl, &config, &toolchain),
            PathBuf::from("/project/bin/b.comp.dxil")
        );
    }
}
