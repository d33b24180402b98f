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


//! Tastier Compiler Library
//!
//! This library compiles Tastier programs into listings for a stack-based
//! virtual machine in a single pass: identifiers are resolved, storage is
//! allocated, types are checked and instructions are emitted while the
//! tokens are recognized.
//!
//! # Modules
//!
//! - [`error`] - Error types, the throttled diagnostics sink and error reporting
//! - [`lexer`] - Tokenization of source code
//! - [`symbols`] - Symbols, scopes and the scope chain
//! - [`codegen`] - Instructions, labels, addresses and the symbol directory
//! - [`translator`] - The syntax-directed translator
//! - [`output`] - Listing rendering and writing
//! - [`watch`] - Source file watching
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! fn build(source: &str, output_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
//!     let listing = tastier::compile(source).map_err(|errors| errors[0].clone())?;
//!     tastier::output::write_listing(&listing, output_path)?;
//!     Ok(())
//! }
//! ```

pub mod codegen;
pub mod error;
pub mod lexer;
pub mod output;
pub mod symbols;
pub mod translator;
pub mod watch;

// Re-export commonly used types
pub use codegen::{Instruction, Listing, Opcode};
pub use error::{
    format_error, CompileError, CompileWarning, ErrorCode, Result, SourceLocation, Span,
};
pub use lexer::Token;
pub use translator::Translation;

/// The version of the Tastier compiler.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the compiler.
pub const NAME: &str = "Tastier";

/// Scan and translate source code.
///
/// Translation never aborts. Lexical, syntax and semantic errors are all
/// collected in the returned diagnostics.
pub fn translate(source: &str) -> Translation {
    let tokens = lexer::scan(source);
    translator::translate(&tokens)
}

/// Compile source code to a listing.
///
/// # Example
///
/// ```
/// let listing = tastier::compile("program P { void Main() { write 42; } }").unwrap();
/// assert_eq!(listing.lines()[4], "Main: Enter 0");
/// ```
pub fn compile(source: &str) -> std::result::Result<Listing, Vec<CompileError>> {
    compile_with_warnings(source).map(|(listing, _)| listing)
}

/// Compile source code to a listing, also returning the warnings.
pub fn compile_with_warnings(
    source: &str,
) -> std::result::Result<(Listing, Vec<CompileWarning>), Vec<CompileError>> {
    let translation = translate(source);
    let (errors, warnings) = translation.diagnostics.into_parts();
    if errors.is_empty() {
        Ok((translation.listing, warnings))
    } else {
        Err(errors)
    }
}
