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

//! Declaration translation.
//!
//! This module translates declarations and enters them into the symbol
//! table:
//! - Types
//! - Variable and constant declarations
//! - Procedure declarations, including nested procedures
//! - External declarations

use super::expressions::ExpressionTranslator;
use super::helpers::TranslatorHelpers;
use super::statements::StatementTranslator;
use super::Translator;
use crate::codegen::{allocate_address, Instruction, Opcode};
use crate::error::ErrorCode;
use crate::lexer::Token;
use crate::symbols::{Resolved, Symbol, SymbolKind, ValueType};

/// Extension trait for declaration translation.
pub trait DeclarationTranslator {
    /// Translate a type keyword.
    fn value_type(&mut self) -> ValueType;

    /// Translate `type name {, name};`.
    fn var_declaration(&mut self, external: bool);

    /// Translate `const type name := expr;`.
    fn const_declaration(&mut self, external: bool);

    /// Translate `void name() { ... }`.
    fn procedure_declaration(&mut self);

    /// Translate `external (var decl | const decl | procedure name;)`.
    fn extern_declaration(&mut self);

    /// Enter a variable or constant into the innermost scope, or into the
    /// external table.
    fn declare_data(
        &mut self,
        name: String,
        kind: SymbolKind,
        ty: ValueType,
        external: bool,
    ) -> Resolved;
}

fn log_symbol(symbol: &Symbol, global: bool, external: bool) {
    let place = if external {
        "external "
    } else if global {
        "global "
    } else {
        ""
    };
    match symbol.address {
        Some(address) => log::debug!(
            "new symbol table entry: {}{} {} {} in scope {} stored at address {}",
            place,
            symbol.kind,
            symbol.ty,
            symbol.name,
            symbol.depth,
            address
        ),
        None => log::debug!(
            "new symbol table entry: {}{} {}",
            place,
            symbol.kind,
            symbol.name
        ),
    }
}

impl<'a> DeclarationTranslator for Translator<'a> {
    fn value_type(&mut self) -> ValueType {
        let ty = match self.peek() {
            Token::Int => ValueType::Integer,
            Token::Bool => ValueType::Boolean,
            Token::StringType => ValueType::String,
            _ => {
                self.syntax_error(ErrorCode::InvalidConstruct, "invalid Type");
                return ValueType::Undefined;
            }
        };
        self.advance();
        ty
    }

    fn var_declaration(&mut self, external: bool) {
        let ty = self.value_type();
        loop {
            let name = self.expect_identifier();
            self.declare_data(name, SymbolKind::Variable, ty, external);
            if !self.check(&Token::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&Token::Semicolon);
    }

    fn const_declaration(&mut self, external: bool) {
        self.expect(&Token::Const);
        let ty = self.value_type();
        let name = self.expect_identifier();
        let target = self.declare_data(name, SymbolKind::Constant, ty, external);

        self.expect(&Token::Assign);
        let value = self.expression();
        if value != ty {
            self.semantic_error(ErrorCode::TypeMismatch, "incompatible types");
        }
        self.store_into(&target);
        self.expect(&Token::Semicolon);
    }

    fn procedure_declaration(&mut self) {
        self.expect(&Token::Void);
        let name = self.expect_identifier();
        let procedure = Symbol::procedure(name.clone(), self.ctx.chain_depth());
        log_symbol(&procedure, self.ctx.symbols.is_global_scope(), false);
        self.ctx.symbols.declare(procedure);
        self.ctx.symbols.push_scope();

        self.expect(&Token::LeftParen);
        self.expect(&Token::RightParen);
        self.expect(&Token::LeftBrace);

        let entry = self.ctx.code.emit_placeholder();
        let label = self.ctx.procedures.declaration_label(&name);
        self.ctx.procedures.push(name);

        loop {
            let token = self.peek();
            if token.is_type() {
                self.var_declaration(false);
            } else if token.starts_statement() {
                self.statement();
            } else if self.check(&Token::Const) {
                self.const_declaration(false);
            } else if self.check(&Token::Void) {
                // nested procedures are only entered through a call
                if !self.enter_nested() {
                    break;
                }
                let skip = self.ctx.open_label();
                self.ctx.jump(skip);
                self.procedure_declaration();
                self.ctx.place_open_label();
                self.leave_nested();
            } else {
                break;
            }
        }

        self.expect(&Token::RightBrace);
        self.ctx.code.emit(Opcode::Leave);
        self.ctx.code.emit(Opcode::Ret);

        let frame_size = self
            .ctx
            .symbols
            .pop_scope()
            .map(|scope| scope.variable_count())
            .unwrap_or(0);
        log::trace!("patching entry of {} at {}: Enter {}", label, entry, frame_size);
        self.ctx
            .code
            .patch(entry, Instruction::labelled(label, Opcode::Enter(frame_size)));
        self.ctx.procedures.pop();
    }

    fn extern_declaration(&mut self) {
        self.expect(&Token::External);
        if self.peek().is_type() {
            self.var_declaration(true);
        } else if self.check(&Token::Const) {
            self.const_declaration(true);
        } else if self.check(&Token::Procedure) {
            self.advance();
            let name = self.expect_identifier();
            self.expect(&Token::Semicolon);
            let procedure = Symbol::external(name, SymbolKind::Procedure, ValueType::Undefined);
            log_symbol(&procedure, false, true);
            self.ctx.symbols.declare_external(procedure);
        } else {
            self.syntax_error(ErrorCode::InvalidConstruct, "invalid ExternDecl");
        }
    }

    fn declare_data(
        &mut self,
        name: String,
        kind: SymbolKind,
        ty: ValueType,
        external: bool,
    ) -> Resolved {
        if external {
            let symbol = Symbol::external(name, kind, ty);
            log_symbol(&symbol, false, true);
            self.ctx.symbols.declare_external(symbol.clone());
            return Resolved {
                symbol,
                external: true,
            };
        }

        let global = self.ctx.symbols.is_global_scope();
        if ty == ValueType::String && !global {
            self.warning(format!(
                "string {} declared inside a procedure is stored in global string memory",
                name
            ));
        }

        let address = allocate_address(&self.ctx.symbols, &self.ctx.strings);
        let symbol = Symbol::data(name, kind, ty, self.ctx.chain_depth(), address);
        log_symbol(&symbol, global, false);
        self.ctx.symbols.declare(symbol.clone());
        Resolved {
            symbol,
            external: false,
        }
    }
}
