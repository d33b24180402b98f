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

//! Translation context shared by every translation routine.
//!
//! The translator is single-pass, so all state that survives between
//! grammar productions lives here: the scope chain, the instruction stream,
//! label and procedure-name bookkeeping and the string storage counters.

use crate::codegen::{Access, CodeBuffer, LabelAllocator, Opcode, ProcedureNames, StringStorage};
use crate::symbols::{Resolved, SymbolTable};

/// Mutable state of one translation run.
#[derive(Debug, Default)]
pub struct TranslationContext {
    /// Scope chain and external table.
    pub symbols: SymbolTable,
    /// The instruction stream.
    pub code: CodeBuffer,
    /// Label generation and the open forward-jump stack.
    pub labels: LabelAllocator,
    /// Enclosing procedure names, outermost first.
    pub procedures: ProcedureNames,
    /// Global string memory accounting.
    pub strings: StringStorage,
}

impl TranslationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scopes currently open.
    pub fn chain_depth(&self) -> usize {
        self.symbols.depth()
    }

    /// Access path of a resolved symbol from the current point.
    pub fn access(&self, resolved: &Resolved) -> Option<Access> {
        Access::of(resolved, self.chain_depth())
    }

    /// Open a forward label and return it.
    pub fn open_label(&mut self) -> String {
        self.labels.push_fresh()
    }

    /// Place the most recently opened label at the current position.
    pub fn place_open_label(&mut self) {
        if let Some(label) = self.labels.pop() {
            self.code.place_label(label);
        }
    }

    /// Emit a jump to `label`.
    pub fn jump(&mut self, label: impl Into<String>) {
        self.code.emit(Opcode::Jmp(label.into()));
    }

    /// Emit a jump to `label` taken when the popped value is false.
    pub fn jump_if_false(&mut self, label: impl Into<String>) {
        self.code.emit(Opcode::FJmp(label.into()));
    }
}
