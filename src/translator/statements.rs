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

//! Statement translation.
//!
//! This module translates the statements that do not branch:
//! - Assignments and procedure calls
//! - `read` and `write`
//! - Blocks
//!
//! It also owns the store logic shared by assignments, constant
//! initializers and `for` headers.

use super::control_flow::ControlFlowTranslator;
use super::declarations::DeclarationTranslator;
use super::expressions::ExpressionTranslator;
use super::helpers::TranslatorHelpers;
use super::Translator;
use crate::codegen::{EmitHelpers, Opcode};
use crate::error::ErrorCode;
use crate::lexer::Token;
use crate::symbols::{Resolved, SymbolKind, ValueType};

/// Extension trait for statement translation.
pub trait StatementTranslator {
    /// Translate one statement.
    fn statement(&mut self);

    /// Translate `name := expr;` or `name();` after the name was consumed.
    fn assignment_or_call(&mut self, name: &str);

    /// Translate `read name;`.
    fn read_statement(&mut self);

    /// Translate `write expr, ...;`.
    fn write_statement(&mut self);

    /// Translate `{ ... }`. Blocks do not open a scope.
    fn block(&mut self);

    /// Report an error unless `target` is a variable.
    fn check_assignable(&mut self, target: &Resolved);

    /// Check the assigned value's type and emit the store.
    fn finish_assignment(&mut self, target: Option<Resolved>, ty: ValueType);

    /// Emit code storing the top of stack into `target`.
    ///
    /// A string is not copied into the variable's storage. Instead the
    /// variable is rebound to the location the string is stored at.
    fn store_into(&mut self, target: &Resolved);

    /// Emit a call to `target`.
    fn call(&mut self, target: &Resolved);
}

impl<'a> StatementTranslator for Translator<'a> {
    fn statement(&mut self) {
        if !self.enter_nested() {
            return;
        }
        match self.peek() {
            Token::Identifier(_) => {
                let name = self.expect_identifier();
                self.assignment_or_call(&name);
            }
            Token::If => self.if_statement(),
            Token::While => self.while_statement(),
            Token::Switch => self.switch_statement(),
            Token::For => self.for_statement(),
            Token::Read => self.read_statement(),
            Token::Write => self.write_statement(),
            Token::LeftBrace => self.block(),
            _ => self.syntax_error(ErrorCode::InvalidConstruct, "invalid Stat"),
        }
        self.leave_nested();
    }

    fn assignment_or_call(&mut self, name: &str) {
        let target = self.resolve_or_report(name);

        if self.check(&Token::Assign) {
            self.advance();
            if let Some(target) = &target {
                self.check_assignable(target);
            }
            let ty = self.expression();
            self.expect(&Token::Semicolon);
            self.finish_assignment(target, ty);
        } else if self.check(&Token::LeftParen) {
            self.advance();
            self.expect(&Token::RightParen);
            self.expect(&Token::Semicolon);
            if let Some(target) = target {
                self.call(&target);
            }
        } else {
            self.syntax_error(ErrorCode::InvalidConstruct, "invalid Stat");
        }
    }

    fn read_statement(&mut self) {
        self.advance();
        let name = self.expect_identifier();
        self.expect(&Token::Semicolon);
        let target = self.resolve_or_report(&name);

        if let Some(target) = &target {
            let symbol = &target.symbol;
            if symbol.kind != SymbolKind::Variable {
                self.semantic_error(
                    ErrorCode::VariableExpected,
                    format!("variable expected but {} has kind {}", name, symbol.kind),
                );
            }
            if symbol.ty != ValueType::Integer {
                self.semantic_error(
                    ErrorCode::IntegerExpected,
                    format!("integer type expected but {} has type {}", name, symbol.ty),
                );
            }
        }

        self.ctx.code.emit(Opcode::Read);
        if let Some(access) = target.as_ref().and_then(|t| self.ctx.access(t)) {
            self.ctx.code.emit_store(&access);
        }
    }

    fn write_statement(&mut self) {
        self.advance();
        loop {
            let ty = self.expression();
            if ty == ValueType::String {
                let length = self.ctx.strings.last_length();
                self.ctx.code.emit(Opcode::WriteS(length));
            } else {
                if ty != ValueType::Integer {
                    self.semantic_error(ErrorCode::IntegerExpected, "integer type expected");
                }
                self.ctx.code.emit(Opcode::Write);
            }

            if !self.check(&Token::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&Token::Semicolon);
    }

    fn block(&mut self) {
        self.advance();
        loop {
            let token = self.peek();
            if token.is_type() {
                self.var_declaration(false);
            } else if token.starts_statement() {
                self.statement();
            } else {
                break;
            }
        }
        self.expect(&Token::RightBrace);
    }

    fn check_assignable(&mut self, target: &Resolved) {
        if target.symbol.kind != SymbolKind::Variable {
            self.semantic_error(
                ErrorCode::CannotAssignToNonVariable,
                "cannot assign to non-variable",
            );
        }
    }

    fn finish_assignment(&mut self, target: Option<Resolved>, ty: ValueType) {
        let Some(target) = target else {
            return;
        };
        if ty != target.symbol.ty {
            self.semantic_error(ErrorCode::TypeMismatch, "incompatible types");
        }
        self.store_into(&target);
    }

    fn store_into(&mut self, target: &Resolved) {
        if target.symbol.ty == ValueType::String {
            let scalars = self.ctx.symbols.global().scalar_slots();
            let address = self.ctx.strings.rebind_address(scalars);
            let length = self.ctx.strings.last_length();
            let bound = target.symbol.rebind_string(address, length);
            log::debug!(
                "string {} bound to address {} ({} characters, version {})",
                bound.name,
                address,
                length,
                bound.version
            );
            self.ctx.symbols.rebind(bound, target.external);
            self.ctx.code.emit_string_store(address, length);
        } else if let Some(access) = self.ctx.access(target) {
            self.ctx.code.emit_store(&access);
        }
    }

    fn call(&mut self, target: &Resolved) {
        let symbol = &target.symbol;
        if symbol.kind != SymbolKind::Procedure {
            self.semantic_error(ErrorCode::NotAProcedure, "object is not a procedure");
            return;
        }

        let chain_depth = self.ctx.chain_depth();
        let op = if target.external {
            Opcode::Call {
                level: chain_depth.saturating_sub(1),
                label: symbol.name.clone(),
            }
        } else {
            let distance = chain_depth.saturating_sub(symbol.depth);
            Opcode::Call {
                level: distance,
                label: self.ctx.procedures.call_label(distance, &symbol.name),
            }
        };
        self.ctx.code.emit(op);
    }
}
