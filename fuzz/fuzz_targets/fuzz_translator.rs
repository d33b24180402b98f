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


//! Structured fuzz target for the Tastier translator.
//!
//! Random bytes rarely get past the lexer, so this target builds sources
//! from valid tokens only and drives the translator's error recovery.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_translator

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Piece {
    Keyword(u8),
    Punct(u8),
    Name(bool),
    Number(i32),
    Text(bool),
}

const KEYWORDS: &[&str] = &[
    "program", "void", "const", "external", "procedure", "int", "bool", "string", "if",
    "else", "while", "switch", "case", "default", "for", "do", "read", "write", "true",
    "false",
];

const PUNCTUATION: &[&str] = &[
    "+", "-", "*", "/", "=", "<", ">", ">=", "<=", ":=", "(", ")", "{", "}", "?", ":", ";",
    ",",
];

impl Piece {
    fn text(&self) -> String {
        match self {
            Piece::Keyword(i) => KEYWORDS[*i as usize % KEYWORDS.len()].to_string(),
            Piece::Punct(i) => PUNCTUATION[*i as usize % PUNCTUATION.len()].to_string(),
            Piece::Name(main) => (if *main { "Main" } else { "x" }).to_string(),
            Piece::Number(n) => n.unsigned_abs().min(i32::MAX as u32).to_string(),
            Piece::Text(empty) => (if *empty { "\"\"" } else { "\"abc\"" }).to_string(),
        }
    }
}

fuzz_target!(|pieces: Vec<Piece>| {
    let source = pieces.iter().map(Piece::text).collect::<Vec<_>>().join(" ");
    let translation = tastier::translate(&source);
    for error in translation.diagnostics.errors() {
        assert!(error.span.end <= source.len());
    }
});
