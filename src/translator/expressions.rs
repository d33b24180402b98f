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

//! Expression translation.
//!
//! Every routine emits the code that leaves the expression's value on the
//! stack and returns the value's type. On a type error the error is reported
//! and translation continues with a best-effort type.
//!
//! Precedence, lowest first:
//! - relational (`=`, `<`, `>`, `>=`, `<=`), at most one per expression
//! - additive (`+`, `-`)
//! - multiplicative (`*`, `/`)
//! - unary minus

use super::helpers::TranslatorHelpers;
use super::Translator;
use crate::codegen::{EmitHelpers, Opcode};
use crate::error::ErrorCode;
use crate::lexer::Token;
use crate::symbols::{SymbolKind, ValueType};

/// Extension trait for expression translation.
pub trait ExpressionTranslator {
    /// Translate a full expression: a relational expression, a string
    /// literal or a conditional.
    fn expression(&mut self) -> ValueType;

    /// Translate additive operations.
    fn simple_expression(&mut self) -> ValueType;

    /// Translate multiplicative operations.
    fn term(&mut self) -> ValueType;

    /// Translate an operand.
    fn factor(&mut self) -> ValueType;

    /// Translate a string literal into one constant per character.
    fn string_literal(&mut self) -> ValueType;

    /// Translate `(cond) ? a : b`.
    fn conditional(&mut self) -> ValueType;

    /// Translate an identifier used as a value.
    fn identifier_value(&mut self) -> ValueType;
}

fn relational_opcode(token: &Token) -> Option<Opcode> {
    match token {
        Token::Equal => Some(Opcode::Equ),
        Token::Less => Some(Opcode::Lss),
        Token::Greater => Some(Opcode::Gtr),
        Token::GreaterEqual => Some(Opcode::GorE),
        Token::LessEqual => Some(Opcode::LorE),
        _ => None,
    }
}

impl<'a> ExpressionTranslator for Translator<'a> {
    fn expression(&mut self) -> ValueType {
        if self.peek().starts_simple_expression() {
            let ty = self.simple_expression();
            let Some(op) = relational_opcode(self.peek()) else {
                return ty;
            };
            self.advance();
            let rhs = self.simple_expression();
            if ty != rhs {
                self.semantic_error(ErrorCode::TypeMismatch, "incompatible types");
                return ValueType::Undefined;
            }
            self.ctx.code.emit(op);
            ValueType::Boolean
        } else if self.check(&Token::String(String::new())) {
            self.string_literal()
        } else if self.check(&Token::LeftParen) {
            if !self.enter_nested() {
                return ValueType::Undefined;
            }
            let ty = self.conditional();
            self.leave_nested();
            ty
        } else {
            self.syntax_error(ErrorCode::InvalidConstruct, "invalid Expr");
            ValueType::Undefined
        }
    }

    fn simple_expression(&mut self) -> ValueType {
        let mut result = self.term();
        loop {
            let op = match self.peek() {
                Token::Plus => Opcode::Add,
                Token::Minus => Opcode::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.term();
            if result != ValueType::Integer || rhs != ValueType::Integer {
                self.semantic_error(ErrorCode::IntegerExpected, "integer type expected");
            }
            self.ctx.code.emit(op);
            result = ValueType::Integer;
        }
        result
    }

    fn term(&mut self) -> ValueType {
        let mut result = self.factor();
        loop {
            let op = match self.peek() {
                Token::Star => Opcode::Mul,
                Token::Slash => Opcode::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.factor();
            if result != ValueType::Integer || rhs != ValueType::Integer {
                self.semantic_error(ErrorCode::IntegerExpected, "integer type expected");
            }
            self.ctx.code.emit(op);
            result = ValueType::Integer;
        }
        result
    }

    fn factor(&mut self) -> ValueType {
        match self.peek() {
            Token::Identifier(_) => self.identifier_value(),
            Token::Number(n) => {
                let n = *n;
                self.advance();
                self.ctx.code.emit(Opcode::Const(n));
                ValueType::Integer
            }
            Token::Minus => {
                self.advance();
                if !self.enter_nested() {
                    return ValueType::Undefined;
                }
                let operand = self.factor();
                self.leave_nested();
                if operand != ValueType::Integer {
                    self.semantic_error(ErrorCode::IntegerExpected, "integer type expected");
                }
                self.ctx.code.emit(Opcode::Neg);
                self.ctx.code.emit(Opcode::Const(1));
                self.ctx.code.emit(Opcode::Add);
                ValueType::Integer
            }
            Token::True => {
                self.advance();
                self.ctx.code.emit(Opcode::Const(1));
                ValueType::Boolean
            }
            Token::False => {
                self.advance();
                self.ctx.code.emit(Opcode::Const(0));
                ValueType::Boolean
            }
            _ => {
                self.syntax_error(ErrorCode::InvalidConstruct, "invalid Factor");
                ValueType::Undefined
            }
        }
    }

    fn string_literal(&mut self) -> ValueType {
        if let Token::String(text) = self.advance() {
            let length = self.ctx.code.emit_string_literal(&text);
            self.ctx.strings.commit(length);
        }
        ValueType::String
    }

    fn conditional(&mut self) -> ValueType {
        self.expect(&Token::LeftParen);
        let condition = self.expression();
        self.expect(&Token::RightParen);
        if condition != ValueType::Boolean {
            self.semantic_error(ErrorCode::BooleanExpected, "boolean type expected");
        }
        let else_label = self.ctx.open_label();
        self.ctx.jump_if_false(else_label);

        self.expect(&Token::Question);
        let ty = self.expression();
        let else_label = self.ctx.labels.pop().unwrap_or_default();
        let end_label = self.ctx.open_label();
        self.ctx.jump(end_label);
        self.ctx.code.place_label(else_label);

        self.expect(&Token::Colon);
        let other = self.expression();
        if other != ty {
            self.semantic_error(
                ErrorCode::TypeMismatch,
                "both branches of a conditional must have the same type",
            );
        }
        self.ctx.place_open_label();
        ty
    }

    fn identifier_value(&mut self) -> ValueType {
        let name = self.expect_identifier();
        let Some(resolved) = self.resolve_or_report(&name) else {
            return ValueType::Undefined;
        };
        let symbol = &resolved.symbol;
        if symbol.kind == SymbolKind::Procedure {
            self.semantic_error(ErrorCode::VariableExpected, "variable expected");
            return ValueType::Undefined;
        }

        if symbol.ty == ValueType::String {
            let length = symbol.length.unwrap_or(0);
            let address = symbol.address.unwrap_or(0);
            self.ctx.code.emit_string_load(address, length);
            self.ctx.strings.set_last_length(length);
        } else if let Some(access) = self.ctx.access(&resolved) {
            self.ctx.code.emit_load(&access);
        }
        symbol.ty
    }
}
