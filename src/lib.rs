//! Shaderbuild - Library for orchestrating shader compilation
//!
//! This library provides functionality to:
//! - Discover GLSL and HLSL shader sources in a project layout
//! - Invoke the matching external compiler for each source file
//! - Distribute compiled artifacts to consumer directories

pub mod build;
pub mod cli;
pub mod config;
pub mod layout;
