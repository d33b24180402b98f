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

//! Syntax-directed translator for the Tastier language.
//!
//! This module recognizes a token stream and, in the same pass, resolves
//! identifiers, allocates storage, checks types and emits stack machine
//! instructions. No syntax tree is built.
//!
//! # Module Structure
//!
//! - `context` - Translation state threaded through every routine (TranslationContext)
//! - `control_flow` - If, while, switch and for statements (ControlFlowTranslator trait)
//! - `declarations` - Variable, constant, procedure and external declarations (DeclarationTranslator trait)
//! - `expressions` - Expressions and their types (ExpressionTranslator trait)
//! - `helpers` - Token stream navigation and error reporting (TranslatorHelpers trait)
//! - `statements` - Assignments, calls, read, write and blocks (StatementTranslator trait)

// Submodules
pub mod context;
pub mod control_flow;
pub mod declarations;
pub mod expressions;
pub mod helpers;
pub mod statements;

pub use context::TranslationContext;

use declarations::DeclarationTranslator;
use helpers::TranslatorHelpers;

use crate::codegen::{build_header, Listing, Opcode, END_LABEL, ENTRY_PROCEDURE};
use crate::error::{Diagnostics, ErrorCode, Span};
use crate::lexer::Token;

/// How deep statements, conditionals, negations and nested procedures may
/// nest before translation gives up on the rest of the input.
pub const MAX_NESTING_DEPTH: usize = 200;

/// The translator state.
pub struct Translator<'a> {
    /// The token stream to translate.
    pub(crate) tokens: &'a [(Token, Span)],
    /// Current position in the token stream.
    pub(crate) position: usize,
    /// Number of nested constructs currently open.
    pub(crate) nesting: usize,
    /// Symbols, code and label bookkeeping.
    pub(crate) ctx: TranslationContext,
    /// Errors and warnings reported so far.
    pub(crate) diagnostics: Diagnostics,
}

/// The result of one translation run.
#[derive(Debug)]
pub struct Translation {
    /// The generated listing. Only meaningful if there are no errors.
    pub listing: Listing,
    /// Errors and warnings.
    pub diagnostics: Diagnostics,
}

impl<'a> Translator<'a> {
    /// Create a new translator for the given token stream.
    pub fn new(tokens: &'a [(Token, Span)]) -> Self {
        let mut translator = Self {
            tokens,
            position: 0,
            nesting: 0,
            ctx: TranslationContext::new(),
            diagnostics: Diagnostics::new(),
        };
        translator.skip_invalid();
        translator
    }

    // ========================================
    // Program Translation
    // ========================================

    /// Translate a complete program.
    ///
    /// Top-level constants are initialized before `Main` is called; the
    /// remaining declarations follow the call, since procedure bodies are
    /// only ever entered through calls.
    pub fn translate_program(mut self) -> Translation {
        self.expect(&Token::Program);
        let name = self.expect_identifier();
        self.expect(&Token::LeftBrace);

        while self.check(&Token::Const) {
            self.const_declaration(false);
        }

        self.ctx.code.emit(Opcode::Call {
            level: 0,
            label: ENTRY_PROCEDURE.to_string(),
        });
        self.ctx.jump(END_LABEL);

        loop {
            if self.peek().is_type() {
                self.var_declaration(false);
            } else if self.check(&Token::Void) {
                self.procedure_declaration();
            } else if self.check(&Token::External) {
                self.extern_declaration();
            } else {
                break;
            }
        }
        self.expect(&Token::RightBrace);

        if self.ctx.symbols.global().is_empty() {
            self.warning(format!("Program {} is empty", name));
        }

        let header = build_header(&self.ctx.symbols);
        for item in &header.untyped_globals {
            self.semantic_error(
                ErrorCode::UntypedGlobal,
                format!("global item {} has no defined type", item),
            );
        }
        for item in &header.untyped_externals {
            self.semantic_error(
                ErrorCode::UntypedGlobal,
                format!("external item {} has no defined type", item),
            );
        }

        self.expect(&Token::Eof);

        Translation {
            listing: Listing {
                header: header.directives,
                code: self.ctx.code.into_instructions(),
            },
            diagnostics: self.diagnostics,
        }
    }
}

/// Translate a token stream into a listing.
pub fn translate(tokens: &[(Token, Span)]) -> Translation {
    Translator::new(tokens).translate_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn translate_source(source: &str) -> Translation {
        let tokens = tokenize(source).unwrap();
        translate(&tokens)
    }

    fn lines(source: &str) -> Vec<String> {
        let translation = translate_source(source);
        assert!(
            !translation.diagnostics.has_errors(),
            "unexpected errors: {:?}",
            translation.diagnostics.errors()
        );
        translation.listing.lines()
    }

    fn error_messages(source: &str) -> Vec<String> {
        translate_source(source)
            .diagnostics
            .errors()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    // ========================================
    // Program Layout Tests
    // ========================================

    #[test]
    fn test_arithmetic_in_main() {
        assert_eq!(
            lines("program P { void Main() { write 1+2*3; } }"),
            vec![
                ".names 1",
                ".proc Main",
                "Call 0 Main",
                "Jmp $END",
                "Main: Enter 0",
                "Const 1",
                "Const 2",
                "Const 3",
                "Mul",
                "Add",
                "Write",
                "Leave",
                "Ret",
            ]
        );
    }

    #[test]
    fn test_if_else_in_block() {
        let source = "program P { int x; void Main() { { x := 5; \
                      if (x > 0) write 1; else write 0; } } }";
        assert_eq!(
            lines(source),
            vec![
                ".names 2",
                ".proc Main",
                ".var 1 x",
                "Call 0 Main",
                "Jmp $END",
                "Main: Enter 0",
                "Const 5",
                "StoG 3",
                "LoadG 3",
                "Const 0",
                "Gtr",
                "FJmp L$0",
                "Const 1",
                "Write",
                "Jmp L$1",
                "L$0: Nop",
                "Const 0",
                "Write",
                "L$1: Nop",
                "Leave",
                "Ret",
            ]
        );
    }

    #[test]
    fn test_global_constants_are_initialized_before_main() {
        assert_eq!(
            lines("program P { const int k := 7; void Main() { } }"),
            vec![
                ".names 2",
                ".proc Main",
                ".const 1 k",
                "Const 7",
                "StoG 3",
                "Call 0 Main",
                "Jmp $END",
                "Main: Enter 0",
                "Leave",
                "Ret",
            ]
        );
    }

    #[test]
    fn test_empty_program_warns() {
        let translation = translate_source("program Empty { }");
        assert!(!translation.diagnostics.has_errors());
        let warnings = translation.diagnostics.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Program Empty is empty");
        assert_eq!(
            translation.listing.lines(),
            vec![".names 0", "Call 0 Main", "Jmp $END"]
        );
    }

    // ========================================
    // Scoping Tests
    // ========================================

    #[test]
    fn test_latest_declaration_shadows() {
        let code = lines("program P { int x; void Main() { int x; int x; x := 1; } }");
        assert!(code.contains(&"Main: Enter 2".to_string()));
        assert!(code.contains(&"Sto 0 1".to_string()));
        assert!(!code.contains(&"StoG 3".to_string()));
    }

    #[test]
    fn test_outer_frame_access() {
        let source = "program P { void Main() { int a; void inner() { a := 1; } a := 2; } }";
        let code = lines(source);
        assert!(code.contains(&"Sto 1 0".to_string()));
        assert!(code.contains(&"Sto 0 0".to_string()));
    }

    #[test]
    fn test_nested_procedures_with_same_name() {
        let source = "program P { \
                      void foo() { void foo() { foo(); } foo(); } \
                      void Main() { foo(); } }";
        let translation = translate_source(source);
        assert!(!translation.diagnostics.has_errors());
        assert_eq!(
            translation.listing.code_lines(),
            vec![
                "Call 0 Main",
                "Jmp $END",
                "foo: Enter 0",
                "Jmp L$0",
                "foo$foo: Enter 0",
                "Call 1 foo$foo",
                "Leave",
                "Ret",
                "L$0: Nop",
                "Call 0 foo$foo",
                "Leave",
                "Ret",
                "Main: Enter 0",
                "Call 1 foo",
                "Leave",
                "Ret",
            ]
        );
    }

    #[test]
    fn test_frame_size_counts_direct_variables_only() {
        let source = "program P { void Main() { int a, b; bool c; const int k := 3; \
                      void inner() { int z; } a := k; } }";
        let code = lines(source);
        assert!(code.contains(&"Main: Enter 3".to_string()));
        assert!(code.contains(&"Main$inner: Enter 1".to_string()));
        // the constant takes the slot after the variables
        assert!(code.contains(&"Sto 0 3".to_string()));
        assert!(code.contains(&"Load 0 3".to_string()));
    }

    // ========================================
    // String Tests
    // ========================================

    #[test]
    fn test_string_round_trip() {
        assert_eq!(
            lines("program P { string s; void Main() { s := \"abc\"; write s; } }"),
            vec![
                ".names 2",
                ".proc Main",
                ".var 3 s",
                "Call 0 Main",
                "Jmp $END",
                "Main: Enter 0",
                "Const 97",
                "Const 98",
                "Const 99",
                "StoG 3",
                "StoG 4",
                "StoG 5",
                "LoadG 5",
                "LoadG 4",
                "LoadG 3",
                "WriteS 3",
                "Leave",
                "Ret",
            ]
        );
    }

    #[test]
    fn test_local_string_warns() {
        let translation =
            translate_source("program P { void Main() { string s; s := \"hi\"; } }");
        assert!(!translation.diagnostics.has_errors());
        assert_eq!(
            translation.diagnostics.warnings()[0].message,
            "string s declared inside a procedure is stored in global string memory"
        );
    }

    // ========================================
    // Error Tests
    // ========================================

    #[test]
    fn test_undefined_variable_is_reported_once() {
        let source = "program P { int x; void Main() { y := 1; x := 2; } }";
        let translation = translate_source(source);
        assert_eq!(translation.diagnostics.error_count(), 1);
        assert_eq!(
            translation.diagnostics.errors()[0].message,
            "reference to undefined variable y"
        );
        // translation carried on past the error
        assert!(translation
            .listing
            .code_lines()
            .contains(&"StoG 3".to_string()));
    }

    #[test]
    fn test_missing_semicolon_is_syntax_error() {
        let errors = error_messages("program P { void Main() { write 1 } }");
        assert_eq!(errors, vec!["\";\" expected"]);
    }

    #[test]
    fn test_trailing_tokens() {
        let errors = error_messages("program P { void Main() { } } extra");
        assert_eq!(errors, vec!["EOF expected"]);
    }

    #[test]
    fn test_call_of_variable() {
        let errors = error_messages("program P { int x; void Main() { x(); } }");
        assert_eq!(errors, vec!["object is not a procedure"]);
    }
}
