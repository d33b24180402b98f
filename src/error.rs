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

//! Error types for the Tastier compiler.
//!
//! This module defines the lexical, syntax and semantic errors produced
//! during translation, the throttled [`Diagnostics`] sink that collects them,
//! and the functions that render them for humans.

use std::ops::Range;

use ariadne::{Config, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Minimum number of tokens that must be consumed between two reported
/// errors. Errors arriving closer together are dropped.
pub const MIN_ERROR_DISTANCE: usize = 2;

/// A source span representing a range in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Error codes for the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical errors (E001-E003)
    InvalidCharacter,
    UnterminatedString,
    IntegerTooLarge,

    // Syntax errors (E100-E102)
    ExpectedToken,
    InvalidConstruct,
    NestingTooDeep,

    // Semantic errors (E200-E213)
    UndefinedVariable,
    TypeMismatch,
    IntegerExpected,
    BooleanExpected,
    CannotAssignToNonVariable,
    VariableExpected,
    NotAProcedure,
    UntypedGlobal,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCharacter => "E001",
            ErrorCode::UnterminatedString => "E002",
            ErrorCode::IntegerTooLarge => "E003",

            ErrorCode::ExpectedToken => "E100",
            ErrorCode::InvalidConstruct => "E101",
            ErrorCode::NestingTooDeep => "E102",

            ErrorCode::UndefinedVariable => "E200",
            ErrorCode::TypeMismatch => "E201",
            ErrorCode::IntegerExpected => "E202",
            ErrorCode::BooleanExpected => "E203",
            ErrorCode::CannotAssignToNonVariable => "E210",
            ErrorCode::VariableExpected => "E211",
            ErrorCode::NotAProcedure => "E212",
            ErrorCode::UntypedGlobal => "E213",
        }
    }

    /// Whether this code belongs to the syntax error range.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            ErrorCode::ExpectedToken | ErrorCode::InvalidConstruct | ErrorCode::NestingTooDeep
        )
    }
}

/// A compiler error with source location.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct CompileError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source span where the error occurred.
    pub span: Span,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// A non-fatal remark about the program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompileWarning {
    /// The warning message.
    pub message: String,
    /// The source span the warning refers to.
    pub span: Span,
}

impl CompileWarning {
    /// Create a new warning.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;
        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() + 1;

        Self { line, column }
    }
}

/// Convert a byte offset into a character offset.
fn char_offset(source: &str, byte: usize) -> usize {
    source.char_indices().take_while(|(i, _)| *i < byte).count()
}

/// Render a labelled report for `span` without terminal colours.
fn render_report(
    kind: ReportKind<'_>,
    code: Option<&str>,
    message: &str,
    hint: Option<&str>,
    span: Span,
    source: &str,
    filename: Option<&str>,
) -> String {
    let filename = filename.unwrap_or("<input>");
    let loc = SourceLocation::from_offset(source, span.start);

    // ariadne counts characters, and EOF spans must still point into the text.
    let total = source.chars().count();
    let start = char_offset(source, span.start).min(total.saturating_sub(1));
    let end = char_offset(source, span.end).clamp(start + 1, total.max(start + 1));

    let mut builder = Report::<Range<usize>>::build(kind, (), start)
        .with_config(Config::default().with_color(false))
        .with_message(format!(
            "{} ({}:{}:{})",
            message, filename, loc.line, loc.column
        ));
    if total > 0 {
        builder = builder.with_label(Label::new(start..end).with_message(message));
    }
    if let Some(code) = code {
        builder = builder.with_code(code);
    }
    if let Some(hint) = hint {
        builder = builder.with_help(hint);
    }

    let mut buffer = Vec::new();
    if builder
        .finish()
        .write(Source::from(source.to_string()), &mut buffer)
        .is_err()
    {
        return format!(
            "-- line {} col {}: {}\n",
            loc.line, loc.column, message
        );
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Format an error with source context.
pub fn format_error(error: &CompileError, source: &str, filename: Option<&str>) -> String {
    render_report(
        ReportKind::Error,
        Some(error.code_str()),
        &error.message,
        error.hint.as_deref(),
        error.span,
        source,
        filename,
    )
}

/// Format a warning with source context.
pub fn format_warning(warning: &CompileWarning, source: &str, filename: Option<&str>) -> String {
    render_report(
        ReportKind::Warning,
        None,
        &warning.message,
        None,
        warning.span,
        source,
        filename,
    )
}

/// Format an error the way the classic one-line reporter does:
/// `-- line L col C: message`.
pub fn format_error_line(error: &CompileError, source: &str) -> String {
    let loc = SourceLocation::from_offset(source, error.span.start);
    format!("-- line {} col {}: {}", loc.line, loc.column, error.message)
}

/// The diagnostics sink shared by every translation routine.
///
/// Errors are throttled: each consumed token increases a distance counter and
/// an error is only recorded when at least [`MIN_ERROR_DISTANCE`] tokens have
/// been consumed since the previous one. The counter resets on every error,
/// recorded or not, so a single malformed token cannot cause an error storm.
#[derive(Debug)]
pub struct Diagnostics {
    errors: Vec<CompileError>,
    warnings: Vec<CompileWarning>,
    distance: usize,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            distance: MIN_ERROR_DISTANCE,
        }
    }

    /// Note that a token was successfully consumed.
    pub fn token_consumed(&mut self) {
        self.distance = self.distance.saturating_add(1);
    }

    /// Report an error. Returns `true` if it was recorded.
    pub fn report(&mut self, error: CompileError) -> bool {
        let recorded = self.distance >= MIN_ERROR_DISTANCE;
        if recorded {
            log::debug!("{}", error);
            self.errors.push(error);
        }
        self.distance = 0;
        recorded
    }

    /// Report a warning. Warnings are never throttled.
    pub fn warn(&mut self, warning: CompileWarning) {
        log::debug!("warning: {}", warning);
        self.warnings.push(warning);
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of recorded errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get the recorded errors.
    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    /// Get the recorded warnings.
    pub fn warnings(&self) -> &[CompileWarning] {
        &self.warnings
    }

    /// Split into errors and warnings.
    pub fn into_parts(self) -> (Vec<CompileError>, Vec<CompileWarning>) {
        (self.errors, self.warnings)
    }
}
