//! Shaderbuild - Command-line tool for compiling project shaders

use std::process::ExitCode;

use shaderbuild::cli;

fn main() -> ExitCode {
    cli::run()
}
