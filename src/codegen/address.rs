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

//! Storage address allocation.
//!
//! Scalars declared in the global scope live in global memory, after the
//! machine's reserved cells. String characters share global memory with
//! them: every committed string literal extends the string area, so a global
//! address is the number of global scalars plus the number of string
//! characters committed so far. Scalars declared in a procedure live in its
//! frame, numbered from 0.

use crate::symbols::{Resolved, Symbol, SymbolTable, GLOBAL_DEPTH};

/// Global memory cells reserved by the machine in front of program data.
pub const RESERVED_SLOTS: usize = 3;

/// Accounting for the characters held in global string memory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StringStorage {
    total: usize,
    last_length: usize,
}

impl StringStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a string literal of `length` characters pushed onto the stack.
    pub fn commit(&mut self, length: usize) {
        self.total += length;
        self.last_length = length;
    }

    /// Record a string value loaded from a variable.
    pub fn set_last_length(&mut self, length: usize) {
        self.last_length = length;
    }

    /// Length of the string value produced most recently.
    pub fn last_length(&self) -> usize {
        self.last_length
    }

    /// Characters committed by all string literals so far.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Address a string of the last produced length is stored at when it is
    /// bound to a variable.
    pub fn rebind_address(&self, scalar_slots: usize) -> usize {
        (scalar_slots + self.total).saturating_sub(self.last_length)
    }
}

/// Address for the next data declaration in the innermost scope.
pub fn allocate_address(table: &SymbolTable, strings: &StringStorage) -> usize {
    if table.is_global_scope() {
        table.global().scalar_slots() + strings.total()
    } else {
        table.current().storage_slots()
    }
}

/// How a data symbol is reached from the current point of translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// By name, resolved by the linker.
    External(String),
    /// A global memory cell, reserved cells already skipped.
    Global(usize),
    /// A frame slot `level` frames out from the current one.
    Frame { level: usize, slot: usize },
}

impl Access {
    /// Compute the access path of `resolved` from a point where
    /// `chain_depth` scopes are open. Procedures have none.
    pub fn of(resolved: &Resolved, chain_depth: usize) -> Option<Self> {
        if resolved.external {
            return Some(Access::External(resolved.symbol.name.clone()));
        }
        Self::of_symbol(&resolved.symbol, chain_depth)
    }

    /// Access path of a symbol from the scope chain.
    pub fn of_symbol(symbol: &Symbol, chain_depth: usize) -> Option<Self> {
        let address = symbol.address?;
        if symbol.depth <= GLOBAL_DEPTH {
            Some(Access::Global(address + RESERVED_SLOTS))
        } else {
            Some(Access::Frame {
                level: chain_depth.saturating_sub(symbol.depth),
                slot: address,
            })
        }
    }
}
