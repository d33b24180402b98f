// Tastier - A single-pass compiler for a stack-based virtual machine
//
// Copyright (C) 2026 Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Translator helper methods for token stream navigation and error handling.
//!
//! This module provides utility methods for the translator including:
//! - Token stream navigation (peek, advance, check)
//! - Token expectation with error recovery
//! - Error and warning reporting at the right source position
//! - Identifier resolution against the scope chain and external table
//!
//! Text the lexer could not match arrives as [`Token::Invalid`]. It is
//! reported as a lexical error and stepped over, so the parser never sees it.
//!
//! A failed expectation reports a syntax error and does not consume the
//! offending token. Translation simply carries on, relying on the error
//! throttle in [`Diagnostics`](crate::error::Diagnostics) to suppress the
//! follow-on errors.

use super::{Translator, MAX_NESTING_DEPTH};
use crate::error::{CompileError, CompileWarning, ErrorCode, Span};
use crate::lexer::{lexical_error, Token};
use crate::symbols::Resolved;

static EOF_TOKEN: Token = Token::Eof;

/// Trait for translator helper operations.
pub trait TranslatorHelpers {
    /// Peek at the lookahead token. Past the end this is always EOF.
    fn peek(&self) -> &Token;

    /// Span of the lookahead token.
    fn peek_span(&self) -> Span;

    /// Span of the most recently consumed token.
    fn previous_span(&self) -> Span;

    /// Consume the lookahead token.
    fn advance(&mut self) -> Token;

    /// Report and step over any unmatched source text at the current
    /// position. Skipped text does not count as a consumed token.
    fn skip_invalid(&mut self);

    /// Open one level of nesting. Past [`MAX_NESTING_DEPTH`] this reports a
    /// syntax error, skips to the end of input and returns `false`; the
    /// caller must then not recurse.
    fn enter_nested(&mut self) -> bool;

    /// Close the level opened by a successful [`enter_nested`](Self::enter_nested).
    fn leave_nested(&mut self);

    /// Check if the lookahead token is of the same kind as `expected`.
    fn check(&self, expected: &Token) -> bool;

    /// Consume the lookahead token if it is of the expected kind, otherwise
    /// report `"<token>" expected`. Returns whether it matched.
    fn expect(&mut self, expected: &Token) -> bool;

    /// Consume an identifier and return its name, or report a syntax error
    /// and return an empty name.
    fn expect_identifier(&mut self) -> String;

    /// Report a syntax error at the lookahead token.
    fn syntax_error(&mut self, code: ErrorCode, message: impl Into<String>);

    /// Report a semantic error at the last consumed token.
    fn semantic_error(&mut self, code: ErrorCode, message: impl Into<String>);

    /// Report a warning at the last consumed token.
    fn warning(&mut self, message: impl Into<String>);

    /// Resolve a name, reporting it as undefined if nothing matches.
    fn resolve_or_report(&mut self, name: &str) -> Option<Resolved>;
}

impl<'a> TranslatorHelpers for Translator<'a> {
    fn peek(&self) -> &Token {
        self.tokens
            .get(self.position)
            .map(|(t, _)| t)
            .unwrap_or(&EOF_TOKEN)
    }

    fn peek_span(&self) -> Span {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }

    fn previous_span(&self) -> Span {
        self.tokens[..self.position.min(self.tokens.len())]
            .iter()
            .rev()
            .find(|(t, _)| !matches!(t, Token::Invalid(_)))
            .map(|(_, s)| *s)
            .unwrap_or_else(|| self.peek_span())
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token != Token::Eof && self.position < self.tokens.len() {
            self.position += 1;
        }
        self.diagnostics.token_consumed();
        self.skip_invalid();
        token
    }

    fn skip_invalid(&mut self) {
        let tokens = self.tokens;
        while let Some((Token::Invalid(slice), span)) = tokens.get(self.position) {
            self.diagnostics.report(lexical_error(slice, *span));
            self.position += 1;
        }
    }

    fn enter_nested(&mut self) -> bool {
        if self.nesting >= MAX_NESTING_DEPTH {
            self.syntax_error(
                ErrorCode::NestingTooDeep,
                format!("nesting deeper than {} levels", MAX_NESTING_DEPTH),
            );
            self.position = self.tokens.len().saturating_sub(1);
            return false;
        }
        self.nesting += 1;
        true
    }

    fn leave_nested(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    fn check(&self, expected: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(expected)
    }

    fn expect(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            self.syntax_error(
                ErrorCode::ExpectedToken,
                format!("{} expected", expected.describe()),
            );
            false
        }
    }

    fn expect_identifier(&mut self) -> String {
        match self.peek() {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                name
            }
            _ => {
                self.syntax_error(ErrorCode::ExpectedToken, "ident expected");
                String::new()
            }
        }
    }

    fn syntax_error(&mut self, code: ErrorCode, message: impl Into<String>) {
        let span = self.peek_span();
        self.diagnostics.report(CompileError::new(code, message, span));
    }

    fn semantic_error(&mut self, code: ErrorCode, message: impl Into<String>) {
        let span = self.previous_span();
        self.diagnostics.report(CompileError::new(code, message, span));
    }

    fn warning(&mut self, message: impl Into<String>) {
        let span = self.previous_span();
        self.diagnostics.warn(CompileWarning::new(message, span));
    }

    fn resolve_or_report(&mut self, name: &str) -> Option<Resolved> {
        let resolved = self.ctx.symbols.resolve(name);
        if resolved.is_none() {
            self.semantic_error(
                ErrorCode::UndefinedVariable,
                format!("reference to undefined variable {}", name),
            );
        }
        resolved
    }
}
