//! Shader compilation invoker.
//!
//! For each discovered shader: derive the artifact path, build the backend
//! command line, run the external compiler, and stream its output. Failures
//! are per-file; the batch always runs to completion (best-effort).

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use crate::build::backend::{backend_for, output_path};
use crate::build::discovery::ShaderFile;
use crate::build::result::TargetResult;
use crate::config::{RunConfig, Toolchain};
use crate::layout::Layout;

/// Batch compiler over discovered shader files.
pub struct Compiler<'a> {
    config: &'a RunConfig,
    layout: &'a Layout,
    toolchain: &'a Toolchain,
}

impl<'a> Compiler<'a> {
    /// Create a compiler bound to one run's configuration.
    pub fn new(config: &'a RunConfig, layout: &'a Layout, toolchain: &'a Toolchain) -> Self {
        Self { config, layout, toolchain }
    }

    /// Compile every shader, up to `jobs` processes at a time.
    ///
    /// All invocations complete before this returns (distribution relies on
    /// that barrier). Results keep discovery order regardless of which
    /// worker finished first.
    pub fn compile_all(&self, shaders: &[ShaderFile]) -> Vec<TargetResult> {
        if shaders.is_empty() {
            return Vec::new();
        }

        let workers = self.config.jobs.min(shaders.len());
        if workers == 1 {
            return shaders.iter().map(|s| self.compile_one(s)).collect();
        }

        let next_idx = AtomicUsize::new(0);
        let results: Mutex<Vec<Option<TargetResult>>> = Mutex::new(vec![None; shaders.len()]);

        std::thread::scope(|s| {
            for _ in 0..workers {
                s.spawn(|| loop {
                    let i = next_idx.fetch_add(1, Ordering::SeqCst);
                    if i >= shaders.len() {
                        break;
                    }
                    let result = self.compile_one(&shaders[i]);
                    results.lock().unwrap()[i] = Some(result);
                });
            }
        });

        results.into_inner().unwrap().into_iter().flatten().collect()
    }

    /// Compile a single shader file.
    pub fn compile_one(&self, shader: &ShaderFile) -> TargetResult {
        let start = Instant::now();
        let name = shader.base_name().to_string();

        match self.run_compiler(shader) {
            Ok(output) => TargetResult::success(name, output, start.elapsed()),
            Err(e) => TargetResult::failed(name, e, start.elapsed()),
        }
    }

    /// Spawn the backend compiler and wait for it, streaming its stdout.
    fn run_compiler(&self, shader: &ShaderFile) -> Result<PathBuf, String> {
        let backend = backend_for(shader.language);
        let output = output_path(self.layout, shader, self.config, self.toolchain);

        let mut cmd = backend
            .command(shader, &output, self.config, self.toolchain)
            .map_err(|e| e.to_string())?;

        // Compiler diagnostics on stderr pass through unmodified.
        if self.config.silent {
            cmd.stdout(Stdio::null());
        } else {
            cmd.stdout(Stdio::piped());
        }

        let mut child = cmd.spawn().map_err(|e| {
            format!("failed to run {}: {}", cmd.get_program().to_string_lossy(), e)
        })?;

        if let Some(stdout) = child.stdout.take() {
            let name = shader.base_name();
            for line in BufReader::new(stdout).lines() {
                match line {
                    // One println! per line keeps concurrent streams from
                    // interleaving within a line.
                    Ok(line) => println!("{}: {}", name, line),
                    Err(_) => break,
                }
            }
        }

        let status = child.wait().map_err(|e| format!("failed to wait for compiler: {}", e))?;
        if !status.success() {
            let code = status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "terminated by signal".to_string());
            return Err(format!("compiler exited with {}", code));
        }

        Ok(output)
    }
}
