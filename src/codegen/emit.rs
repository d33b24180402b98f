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

//! Emit helper methods for code generation.
//!
//! This module provides the load and store sequences for the three ways a
//! data symbol can be addressed, plus the character-wise sequences used for
//! string values:
//! - External symbols by name (`LoadG name`)
//! - Global symbols by numeric address (`LoadG 7`)
//! - Frame slots by lexical level and slot (`Load 1 0`)

use super::address::{Access, RESERVED_SLOTS};
use super::{CodeBuffer, Opcode, Operand};

/// Extension trait for data movement emission.
pub trait EmitHelpers {
    /// Emit code to push the value reached by `access`.
    fn emit_load(&mut self, access: &Access);

    /// Emit code to pop the top of stack into the cell reached by `access`.
    fn emit_store(&mut self, access: &Access);

    /// Emit one `Const` per character of a string literal and return the
    /// number of characters pushed.
    fn emit_string_literal(&mut self, text: &str) -> usize;

    /// Emit code to push a string stored at `address` in global string
    /// memory, last character first.
    fn emit_string_load(&mut self, address: usize, length: usize);

    /// Emit code to pop a string from the stack into global string memory
    /// starting at `address`.
    fn emit_string_store(&mut self, address: usize, length: usize);
}

impl EmitHelpers for CodeBuffer {
    fn emit_load(&mut self, access: &Access) {
        let op = match access {
            Access::External(name) => Opcode::LoadG(Operand::Name(name.clone())),
            Access::Global(address) => Opcode::LoadG(Operand::Address(*address)),
            Access::Frame { level, slot } => Opcode::Load {
                level: *level,
                slot: *slot,
            },
        };
        self.emit(op);
    }

    fn emit_store(&mut self, access: &Access) {
        let op = match access {
            Access::External(name) => Opcode::StoG(Operand::Name(name.clone())),
            Access::Global(address) => Opcode::StoG(Operand::Address(*address)),
            Access::Frame { level, slot } => Opcode::Sto {
                level: *level,
                slot: *slot,
            },
        };
        self.emit(op);
    }

    fn emit_string_literal(&mut self, text: &str) -> usize {
        let mut length = 0;
        for c in text.chars() {
            self.emit(Opcode::Const(u32::from(c) as i32));
            length += 1;
        }
        length
    }

    fn emit_string_load(&mut self, address: usize, length: usize) {
        for i in (0..length).rev() {
            self.emit(Opcode::LoadG(Operand::Address(address + RESERVED_SLOTS + i)));
        }
    }

    fn emit_string_store(&mut self, address: usize, length: usize) {
        for i in 0..length {
            self.emit(Opcode::StoG(Operand::Address(address + RESERVED_SLOTS + i)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(code: &CodeBuffer) -> Vec<String> {
        code.instructions().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_load_forms() {
        let mut code = CodeBuffer::new();
        code.emit_load(&Access::External("count".to_string()));
        code.emit_load(&Access::Global(5));
        code.emit_load(&Access::Frame { level: 1, slot: 0 });
        assert_eq!(text(&code), vec!["LoadG count", "LoadG 5", "Load 1 0"]);
    }

    #[test]
    fn test_store_forms() {
        let mut code = CodeBuffer::new();
        code.emit_store(&Access::External("count".to_string()));
        code.emit_store(&Access::Global(5));
        code.emit_store(&Access::Frame { level: 0, slot: 2 });
        assert_eq!(text(&code), vec!["StoG count", "StoG 5", "Sto 0 2"]);
    }

    #[test]
    fn test_string_literal_pushes_char_codes() {
        let mut code = CodeBuffer::new();
        assert_eq!(code.emit_string_literal("Hi"), 2);
        assert_eq!(text(&code), vec!["Const 72", "Const 105"]);
    }

    #[test]
    fn test_string_load_and_store_mirror_each_other() {
        let mut code = CodeBuffer::new();
        code.emit_string_store(4, 3);
        code.emit_string_load(4, 3);
        assert_eq!(
            text(&code),
            vec!["StoG 7", "StoG 8", "StoG 9", "LoadG 9", "LoadG 8", "LoadG 7"]
        );
    }

    #[test]
    fn test_empty_string_emits_nothing() {
        let mut code = CodeBuffer::new();
        assert_eq!(code.emit_string_literal(""), 0);
        code.emit_string_load(0, 0);
        assert!(code.is_empty());
    }
}
