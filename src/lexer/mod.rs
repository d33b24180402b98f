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

//! Lexer module for the Tastier compiler.
//!
//! This module tokenizes Tastier source code into a stream of tokens.
//! It handles:
//! - Keywords and identifiers
//! - Decimal integer literals
//! - String literals (no escape sequences)
//! - Operators and punctuation
//! - Line (`//`) and block (`/* */`) comments

mod tokens;

pub use tokens::Token;

use logos::Logos;

use crate::error::{CompileError, ErrorCode, Span};

/// Scan source code into a vector of tokens with spans.
///
/// Unmatched text becomes [`Token::Invalid`] so the translator can report it
/// and keep going. The returned stream always ends with [`Token::Eof`],
/// positioned at the end of the source.
pub fn scan(source: &str) -> Vec<(Token, Span)> {
    let mut tokens: Vec<(Token, Span)> = Token::lexer(source)
        .spanned()
        .map(|(result, range)| {
            let span = Span::from(range);
            let token = result
                .unwrap_or_else(|()| Token::Invalid(source[span.start..span.end].to_string()));
            (token, span)
        })
        .collect();

    tokens.push((Token::Eof, Span::new(source.len(), source.len())));
    tokens
}

/// Tokenize source code, failing on the first slice the lexer cannot match.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, CompileError> {
    let tokens = scan(source);
    match tokens.iter().find(|(token, _)| matches!(token, Token::Invalid(_))) {
        Some((Token::Invalid(slice), span)) => Err(lexical_error(slice, *span)),
        _ => Ok(tokens),
    }
}

/// Classify a slice the lexer could not match.
pub(crate) fn lexical_error(slice: &str, span: Span) -> CompileError {
    if slice.starts_with(|c: char| c.is_ascii_digit()) {
        CompileError::new(
            ErrorCode::IntegerTooLarge,
            format!("integer literal {} does not fit in 32 bits", slice),
            span,
        )
    } else if slice.starts_with('"') {
        CompileError::new(ErrorCode::UnterminatedString, "unterminated string", span)
            .with_hint("strings must be closed with '\"'")
    } else {
        CompileError::new(
            ErrorCode::InvalidCharacter,
            format!("invalid character '{}'", slice),
            span,
        )
    }
}
