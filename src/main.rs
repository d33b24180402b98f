// Tastier - A single-pass compiler for a stack-based virtual machine
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.


//! Tastier Compiler CLI
//!
//! Compiles a Tastier source file into a listing for the stack machine.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tastier::error::{format_error, format_warning};
use tastier::output::{default_output_path, write_listing};
use tastier::watch::{SourceWatcher, WatchError};

/// Tastier - A single-pass compiler for a stack-based virtual machine
#[derive(Parser, Debug)]
#[command(name = "tastier")]
#[command(version)]
#[command(about = "A single-pass compiler for a stack-based virtual machine")]
#[command(long_about = r#"
Tastier compiles a source program into a listing for a stack-based virtual
machine: a symbol directory followed by the instruction stream.

Example usage:
  tastier Prog.TAS
  tastier Prog.TAS -o out/Prog.asm

Watch mode, recompiling on every save:
  tastier Prog.TAS --watch

Set RUST_LOG=trace for symbol table and frame tracing.
"#)]
struct Cli {
    /// Source file to compile
    source: PathBuf,

    /// Output listing (defaults to the source path with an .asm extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Watch the source file and recompile on changes
    #[arg(short, long)]
    watch: bool,
}

/// Why a build did not produce a listing.
#[derive(Debug, Clone, Copy)]
enum BuildFailure {
    Compile,
    Read,
    Write,
}

impl BuildFailure {
    fn exit_code(self) -> ExitCode {
        match self {
            BuildFailure::Compile => ExitCode::from(1),
            BuildFailure::Read => ExitCode::from(3),
            BuildFailure::Write => ExitCode::from(4),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.source));

    if cli.verbose {
        println!("{} Compiler v{}", tastier::NAME, tastier::VERSION);
        println!("Source: {}", cli.source.display());
        println!("Output: {}", output_path.display());
        println!();
    }

    let result = build(&cli.source, &output_path, cli.verbose);
    if !cli.watch {
        return match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(failure) => failure.exit_code(),
        };
    }

    run_watch_loop(&cli, &output_path)
}

/// Compile `source` and write the listing to `output_path`.
fn build(source_path: &Path, output_path: &Path, verbose: bool) -> Result<(), BuildFailure> {
    let source = match std::fs::read_to_string(source_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", source_path.display(), e);
            return Err(BuildFailure::Read);
        }
    };

    let filename = source_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("<input>");

    if verbose {
        println!("Compiling...");
    }

    let (listing, warnings) = match tastier::compile_with_warnings(&source) {
        Ok(result) => result,
        Err(errors) => {
            for error in &errors {
                eprint!("{}", format_error(error, &source, Some(filename)));
            }
            eprintln!("{} errors detected", errors.len());
            return Err(BuildFailure::Compile);
        }
    };

    for warning in &warnings {
        eprint!("{}", format_warning(warning, &source, Some(filename)));
    }

    if verbose {
        println!(
            "Generated {} directory entries and {} instructions",
            listing.header.len(),
            listing.code.len()
        );
        println!("Writing {}...", output_path.display());
    }

    if let Err(e) = write_listing(&listing, output_path) {
        eprintln!("Error: Cannot write {}: {}", output_path.display(), e);
        return Err(BuildFailure::Write);
    }

    println!(
        "Compiled {} -> {}",
        source_path.display(),
        output_path.display()
    );
    Ok(())
}

/// Recompile every time the source file changes.
fn run_watch_loop(cli: &Cli, output_path: &Path) -> ExitCode {
    let watcher = match SourceWatcher::new(&cli.source) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: Failed to create file watcher: {}", e);
            return ExitCode::from(6);
        }
    };

    println!();
    println!("Watching for changes... (Press Ctrl+C to stop)");

    loop {
        match watcher.wait_for_change() {
            Ok(()) => {}
            Err(WatchError::Disconnected) => {
                eprintln!("Error: File watcher stopped");
                return ExitCode::from(6);
            }
            Err(e) => {
                eprintln!("Watch error: {}", e);
                continue;
            }
        }

        println!();
        if cli.verbose {
            println!("Change detected, recompiling...");
        } else {
            println!("Recompiling...");
        }

        if build(&cli.source, output_path, cli.verbose).is_err() {
            println!("Fix errors and save to retry.");
        }
    }
}
