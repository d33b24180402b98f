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

//! Control flow statement translation.
//!
//! This module provides control flow statement translation:
//! - If/else statements
//! - While loops
//! - Switch statements
//! - For loops
//!
//! Forward jump targets are opened on the label stack when the jump is
//! emitted and placed as labelled `Nop`s once the target position is reached.

use super::expressions::ExpressionTranslator;
use super::helpers::TranslatorHelpers;
use super::statements::StatementTranslator;
use super::Translator;
use crate::codegen::Opcode;
use crate::error::ErrorCode;
use crate::lexer::Token;
use crate::symbols::ValueType;

/// Extension trait for control flow translation.
pub trait ControlFlowTranslator {
    /// Translate `if (cond) stat [else stat]`.
    fn if_statement(&mut self);

    /// Translate `while (cond) stat`.
    fn while_statement(&mut self);

    /// Translate `switch (expr) { case expr: stats ... [default: stat] }`.
    fn switch_statement(&mut self);

    /// Translate `for (init; update; test) do { stat }`.
    fn for_statement(&mut self);

    /// Translate a parenthesized condition and check it is boolean.
    fn condition(&mut self);

    /// Translate `name := expr;` inside a `for` header.
    fn loop_assignment(&mut self, name: &str);
}

impl<'a> ControlFlowTranslator for Translator<'a> {
    fn if_statement(&mut self) {
        self.advance();
        self.condition();
        let else_label = self.ctx.open_label();
        self.ctx.jump_if_false(else_label);

        self.statement();

        let else_label = self.ctx.labels.pop().unwrap_or_default();
        let end_label = self.ctx.open_label();
        self.ctx.jump(end_label);
        self.ctx.code.place_label(else_label);

        if self.check(&Token::Else) {
            self.advance();
            self.statement();
        }
        self.ctx.place_open_label();
    }

    fn while_statement(&mut self) {
        self.advance();
        let start_label = self.ctx.labels.fresh();
        let end_label = self.ctx.open_label();
        self.ctx.code.place_label(start_label.clone());

        self.condition();
        self.ctx.jump_if_false(end_label);

        self.statement();
        self.ctx.jump(start_label);
        self.ctx.place_open_label();
    }

    fn switch_statement(&mut self) {
        self.advance();
        self.expect(&Token::LeftParen);
        let discriminant = self.expression();
        self.expect(&Token::RightParen);
        self.expect(&Token::LeftBrace);
        let switchable = matches!(discriminant, ValueType::Integer | ValueType::Boolean);
        if !switchable {
            self.semantic_error(
                ErrorCode::TypeMismatch,
                "Boolean or Integer type expected in switch statement",
            );
        }
        let end_label = self.ctx.labels.fresh();

        while self.check(&Token::Case) {
            self.ctx.code.emit(Opcode::Dup);
            self.advance();
            let case_type = self.expression();
            self.expect(&Token::Colon);
            if switchable && case_type != discriminant {
                self.semantic_error(ErrorCode::TypeMismatch, "incompatible types");
            }

            let next_case = self.ctx.open_label();
            self.ctx.code.emit(Opcode::Equ);
            self.ctx.jump_if_false(next_case);
            while self.peek().starts_statement() {
                self.statement();
            }
            self.ctx.jump(end_label.clone());
            self.ctx.place_open_label();
        }

        if self.check(&Token::Default) {
            self.advance();
            self.expect(&Token::Colon);
            self.statement();
        }
        self.expect(&Token::RightBrace);
        self.ctx.code.place_label(end_label);
        self.ctx.code.emit(Opcode::Pop);
    }

    fn for_statement(&mut self) {
        self.advance();
        self.expect(&Token::LeftParen);

        let init = self.expect_identifier();
        self.loop_assignment(&init);

        let update = self.expect_identifier();
        let update_target = self.resolve_or_report(&update);
        let head_label = self.ctx.labels.fresh();
        let exit_label = self.ctx.open_label();
        let test_label = self.ctx.open_label();
        self.ctx.jump(test_label);
        self.ctx.code.place_label(head_label.clone());

        self.expect(&Token::Assign);
        let ty = self.expression();
        self.expect(&Token::Semicolon);
        if let Some(target) = &update_target {
            self.check_assignable(target);
        }
        self.finish_assignment(update_target, ty);
        self.ctx.place_open_label();

        if self.expression() != ValueType::Boolean {
            self.semantic_error(ErrorCode::BooleanExpected, "boolean type expected");
        }
        self.ctx.jump_if_false(exit_label);

        self.expect(&Token::RightParen);
        self.expect(&Token::Do);
        self.expect(&Token::LeftBrace);
        if self.peek().starts_statement() {
            self.statement();
        }
        self.expect(&Token::RightBrace);
        self.ctx.jump(head_label);
        self.ctx.place_open_label();
    }

    fn condition(&mut self) {
        self.expect(&Token::LeftParen);
        let ty = self.expression();
        self.expect(&Token::RightParen);
        if ty != ValueType::Boolean {
            self.semantic_error(ErrorCode::BooleanExpected, "boolean type expected");
        }
    }

    fn loop_assignment(&mut self, name: &str) {
        let target = self.resolve_or_report(name);
        self.expect(&Token::Assign);
        let ty = self.expression();
        self.expect(&Token::Semicolon);
        if let Some(target) = &target {
            self.check_assignable(target);
        }
        self.finish_assignment(target, ty);
    }
}
