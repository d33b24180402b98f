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

//! Symbol table for the translator.
//!
//! The symbol table holds the chain of open scopes (global scope at the
//! bottom, one scope per procedure body being translated) plus the flat
//! table of external declarations. External symbols never take part in the
//! chain lookup; they are consulted only when the chain has no match.

use super::scope::Scope;
use super::symbol::{Symbol, GLOBAL_DEPTH};
use std::iter;

/// A symbol found by [`SymbolTable::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// A copy of the visible binding.
    pub symbol: Symbol,
    /// Whether the symbol came from the external table.
    pub external: bool,
}

/// The symbol table for translation.
#[derive(Debug, Default)]
pub struct SymbolTable {
    /// The program's global scope, always open.
    global: Scope,
    /// Scopes opened by procedure bodies (innermost last).
    nested: Vec<Scope>,
    /// Symbols declared `external`.
    externals: Scope,
}

impl SymbolTable {
    /// Create a new symbol table with an empty global scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new scope onto the chain.
    pub fn push_scope(&mut self) {
        self.nested.push(Scope::new());
    }

    /// Pop the innermost scope and hand it back. The global scope is never
    /// popped.
    pub fn pop_scope(&mut self) -> Option<Scope> {
        self.nested.pop()
    }

    /// Number of open scopes, the global one included.
    pub fn depth(&self) -> usize {
        GLOBAL_DEPTH + self.nested.len()
    }

    /// Check if only the global scope is open.
    pub fn is_global_scope(&self) -> bool {
        self.nested.is_empty()
    }

    /// The global scope.
    pub fn global(&self) -> &Scope {
        &self.global
    }

    /// The innermost open scope.
    pub fn current(&self) -> &Scope {
        self.nested.last().unwrap_or(&self.global)
    }

    fn current_mut(&mut self) -> &mut Scope {
        self.nested.last_mut().unwrap_or(&mut self.global)
    }

    /// The external declarations.
    pub fn externals(&self) -> &Scope {
        &self.externals
    }

    /// Declare a symbol in the innermost scope.
    pub fn declare(&mut self, symbol: Symbol) {
        self.current_mut().declare(symbol);
    }

    /// Declare a symbol in the external table.
    pub fn declare_external(&mut self, symbol: Symbol) {
        self.externals.declare(symbol);
    }

    /// Open scopes from innermost to outermost.
    fn chain(&self) -> impl Iterator<Item = &Scope> {
        self.nested.iter().rev().chain(iter::once(&self.global))
    }

    /// Look up a name along the scope chain: innermost scope first, newest
    /// declaration first within each scope.
    pub fn lookup_chain(&self, name: &str) -> Option<&Symbol> {
        self.chain().find_map(|scope| scope.lookup(name))
    }

    /// Look up a name in the external table.
    pub fn lookup_external(&self, name: &str) -> Option<&Symbol> {
        self.externals.lookup(name)
    }

    /// Find the scope on the chain that holds the visible binding of `name`.
    pub fn find_owning_scope(&mut self, name: &str) -> Option<&mut Scope> {
        self.nested
            .iter_mut()
            .rev()
            .chain(iter::once(&mut self.global))
            .find(|scope| scope.contains(name))
    }

    /// Resolve a reference: the scope chain first, then the external table.
    pub fn resolve(&self, name: &str) -> Option<Resolved> {
        if let Some(symbol) = self.lookup_chain(name) {
            return Some(Resolved {
                symbol: symbol.clone(),
                external: false,
            });
        }
        self.lookup_external(name).map(|symbol| Resolved {
            symbol: symbol.clone(),
            external: true,
        })
    }

    /// Push a new version of a binding next to the one it replaces, so that
    /// it shadows the old one in place.
    pub fn rebind(&mut self, symbol: Symbol, external: bool) {
        if external {
            self.externals.declare(symbol);
            return;
        }
        match self.find_owning_scope(&symbol.name) {
            Some(scope) => scope.declare(symbol),
            None => self.declare(symbol),
        }
    }
}
