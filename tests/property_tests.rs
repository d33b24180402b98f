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


//! Property-based tests for the Tastier compiler.
//!
//! These tests verify important invariants and properties that should
//! hold for all inputs, using proptest for random input generation.

use std::collections::HashSet;

use proptest::prelude::*;
use tastier::codegen::END_LABEL;
use tastier::{lexer, Listing, Opcode};

// ============================================================================
// Lexer Property Tests
// ============================================================================

proptest! {
    /// Property: Token spans are within source bounds and ordered.
    #[test]
    fn prop_lexer_spans_in_bounds(source in "[a-zA-Z0-9 +\\-*/=<>:;,(){}?\\n]{0,200}") {
        let tokens = lexer::scan(&source);
        let mut previous_end = 0;
        for (token, span) in &tokens {
            prop_assert!(span.start <= span.end, "Invalid span for {:?}", token);
            prop_assert!(span.end <= source.len(), "Span of {:?} out of bounds", token);
            prop_assert!(span.start >= previous_end, "Overlapping span for {:?}", token);
            previous_end = span.end;
        }
    }

    /// Property: The token stream always ends with exactly one EOF.
    #[test]
    fn prop_lexer_ends_with_eof(source in "[a-z ;{}]{0,100}") {
        let tokens = lexer::tokenize(&source).unwrap();
        prop_assert_eq!(tokens.last().map(|(t, _)| t.clone()), Some(tastier::Token::Eof));
        let eofs = tokens.iter().filter(|(t, _)| *t == tastier::Token::Eof).count();
        prop_assert_eq!(eofs, 1);
    }
}

// ============================================================================
// Translator Property Tests
// ============================================================================

const TOKEN_SOUP: &[&str] = &[
    "program", "P", "{", "}", "(", ")", "int", "bool", "string", "void", "Main", "x", "y",
    ":=", ";", ",", "if", "else", "while", "switch", "case", "default", ":", "for", "do",
    "read", "write", "const", "external", "procedure", "true", "false", "1", "42", "+",
    "-", "*", "/", "=", "<", ">", ">=", "<=", "?", "\"s\"",
];

fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(TOKEN_SOUP), 0..80).prop_map(|t| t.join(" "))
}

proptest! {
    /// Property: Translation never panics on arbitrary text.
    #[test]
    fn prop_translate_never_panics(source in "\\PC{0,200}") {
        let _ = tastier::translate(&source);
    }

    /// Property: Translation never panics on arbitrary token sequences, and
    /// every reported error points into the source.
    #[test]
    fn prop_token_soup_errors_in_bounds(source in token_soup()) {
        let translation = tastier::translate(&source);
        for error in translation.diagnostics.errors() {
            prop_assert!(error.span.end <= source.len());
        }
    }

    /// Property: A program prefixed with garbage reports at least one error.
    #[test]
    fn prop_leading_garbage_is_rejected(n in 0i32..1000) {
        let source = format!("{} program P {{ void Main() {{ }} }}", n);
        prop_assert!(tastier::compile(&source).is_err());
    }
}

// ============================================================================
// Generated Program Properties
// ============================================================================

fn int_expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0i32..100).prop_map(|n| n.to_string()),
        Just("x".to_string()),
        Just("n".to_string()),
    ];
    leaf.prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{} + {}", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{} * {}", a, b)),
            inner.clone().prop_map(|a| format!("-{}", a)),
        ]
    })
}

fn condition() -> impl Strategy<Value = String> {
    (int_expression(), prop::sample::select(&["=", "<", ">", ">=", "<="][..]), int_expression())
        .prop_map(|(a, op, b)| format!("{} {} {}", a, op, b))
}

fn statement() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        int_expression().prop_map(|e| format!("x := {};", e)),
        int_expression().prop_map(|e| format!("write {};", e)),
        Just("read n;".to_string()),
        Just("Helper();".to_string()),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            (condition(), inner.clone()).prop_map(|(c, s)| format!("if ({}) {}", c, s)),
            (condition(), inner.clone(), inner.clone())
                .prop_map(|(c, a, b)| format!("if ({}) {} else {}", c, a, b)),
            (condition(), inner.clone()).prop_map(|(c, s)| format!("while ({}) {}", c, s)),
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|body| format!("{{ {} }}", body.join(" "))),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!(
                "switch (x) {{ case 1: {} case 2: {} default: write 0; }}",
                a, b
            )),
            (condition(), inner.clone()).prop_map(|(c, s)| format!(
                "for (n := 0; n := n + 1; {}) do {{ {} }}",
                c, s
            )),
        ]
    })
}

fn program() -> impl Strategy<Value = String> {
    (prop::collection::vec(statement(), 1..4), prop::collection::vec(statement(), 0..3))
        .prop_map(|(main, helper)| {
            format!(
                "program Gen {{ int x; void Helper() {{ int n; {} }} void Main() {{ int n; {} }} }}",
                helper.join(" "),
                main.join(" ")
            )
        })
}

fn jump_targets(listing: &Listing) -> Vec<String> {
    listing
        .code
        .iter()
        .filter_map(|i| match &i.op {
            Opcode::Jmp(label) | Opcode::FJmp(label) => Some(label.clone()),
            _ => None,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: Well-typed generated programs compile cleanly.
    #[test]
    fn prop_generated_programs_compile(source in program()) {
        let result = tastier::compile(&source);
        prop_assert!(result.is_ok(), "{}: {:?}", source, result.err());
    }

    /// Property: Every label is placed exactly once and every jump reaches
    /// a placed label.
    #[test]
    fn prop_labels_placed_once(source in program()) {
        let listing = tastier::compile(&source).unwrap();
        let mut placed = HashSet::new();
        for instruction in &listing.code {
            if let Some(label) = &instruction.label {
                prop_assert!(placed.insert(label.clone()), "{} placed twice", label);
            }
        }
        for target in jump_targets(&listing) {
            prop_assert!(target == END_LABEL || placed.contains(&target), "{} never placed", target);
        }
    }

    /// Property: Every procedure opens exactly one frame, sized by its
    /// single local variable.
    #[test]
    fn prop_frames_are_patched(source in program()) {
        let listing = tastier::compile(&source).unwrap();
        let entries: Vec<String> = listing
            .code
            .iter()
            .filter(|i| matches!(i.op, Opcode::Enter(_)))
            .map(ToString::to_string)
            .collect();
        prop_assert_eq!(entries, vec!["Helper: Enter 1".to_string(), "Main: Enter 1".to_string()]);
    }
}
