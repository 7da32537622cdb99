//! Build pipeline module for shaderbuild
//!
//! Provides the compilation orchestration pipeline for processing shader
//! sources into compiled artifacts.
//!
//! # Overview
//!
//! The pipeline consists of:
//! - **Discovery**: Find shader sources under the language root directories
//! - **Compilation**: Invoke the matching external compiler per file
//! - **Distribution**: Copy produced artifacts to consumer directories
//!
//! # Example
//!
//! ```ignore
//! use shaderbuild::build::BuildPipeline;
//! use shaderbuild::config::RunConfig;
//! use shaderbuild::layout::Layout;
//!
//! let layout = Layout::new(project_root);
//! let result = BuildPipeline::new(RunConfig::default(), layout).run()?;
//! println!("{}", result.summary());
//! ```

pub mod backend;
pub mod compile;
pub mod discovery;
pub mod distribute;
pub mod pipeline;
pub mod result;

pub use backend::*;
pub use compile::*;
pub use discovery::*;
pub use distribute::*;
pub use pipeline::*;
pub use result::*;
