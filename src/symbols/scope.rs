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

//! Scope management for the translator.
//!
//! A scope is an insertion-ordered stack of symbols. Names may repeat: a
//! later declaration shadows an earlier one, so lookups scan from the most
//! recently declared symbol backwards.

use super::symbol::{Symbol, SymbolKind, ValueType};

/// A scope in the symbol table.
#[derive(Debug, Default, Clone)]
pub struct Scope {
    /// Symbols in declaration order (newest last).
    symbols: Vec<Symbol>,
}

impl Scope {
    /// Create a new empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a symbol in this scope. Duplicates shadow, they are never
    /// rejected.
    pub fn declare(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    /// Look up the most recently declared symbol with this name.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().rev().find(|s| s.name == name)
    }

    /// Check if a symbol with this name is declared here.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Iterate over all entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().rev()
    }

    /// Iterate over original declarations (no rebindings), newest first.
    pub fn declarations(&self) -> impl Iterator<Item = &Symbol> {
        self.iter().filter(|s| s.is_declaration())
    }

    /// Number of entries, rebindings included.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the scope has no entries.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of declarations that occupy a data slot.
    pub fn storage_slots(&self) -> usize {
        self.declarations().filter(|s| s.is_storage()).count()
    }

    /// Number of declarations that occupy a scalar (non-string) data slot.
    pub fn scalar_slots(&self) -> usize {
        self.declarations()
            .filter(|s| s.is_storage() && s.ty != ValueType::String)
            .count()
    }

    /// Number of variables declared here: the frame size of a procedure.
    pub fn variable_count(&self) -> usize {
        self.declarations()
            .filter(|s| s.kind == SymbolKind::Variable)
            .count()
    }
}
