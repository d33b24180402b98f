// Tastier - A single-pass compiler for a stack-based virtual machine
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Code generation module for the Tastier compiler.
//!
//! This module holds the instruction model of the target stack machine and
//! the bookkeeping the translator needs while it emits code:
//! - `address` - Storage address allocation and string storage accounting
//! - `emit` - Load/store emission for the different addressing forms
//! - `header` - The symbol directory that precedes the instruction stream
//! - `labels` - Unique label generation and the open forward-jump stack
//! - `naming` - Globally unique labels for nested procedures
//!
//! Instructions are kept symbolic: jump and call targets are labels, which a
//! downstream assembler resolves to instruction addresses.

pub mod address;
pub mod emit;
pub mod header;
pub mod labels;
pub mod naming;

pub use address::{allocate_address, Access, StringStorage, RESERVED_SLOTS};
pub use emit::EmitHelpers;
pub use header::{build_header, Directive, Header};
pub use labels::LabelAllocator;
pub use naming::ProcedureNames;

use std::fmt;

/// Name of the procedure the program starts in.
pub const ENTRY_PROCEDURE: &str = "Main";

/// Label the assembler places after the last instruction.
pub const END_LABEL: &str = "$END";

/// A global memory operand: a numeric address, or a name left for the
/// linker to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Address(usize),
    Name(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Address(address) => write!(f, "{}", address),
            Operand::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A stack machine operation with its operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opcode {
    /// Push a constant.
    Const(i32),
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Equ,
    Lss,
    Gtr,
    GorE,
    LorE,
    /// Push a frame slot `level` frames out.
    Load { level: usize, slot: usize },
    /// Push a global memory cell.
    LoadG(Operand),
    /// Pop into a frame slot `level` frames out.
    Sto { level: usize, slot: usize },
    /// Pop into a global memory cell.
    StoG(Operand),
    Jmp(String),
    /// Jump if the popped value is false.
    FJmp(String),
    Call { level: usize, label: String },
    /// Open a frame with the given number of slots.
    Enter(usize),
    Leave,
    Ret,
    Read,
    Write,
    /// Write a string of the given length from the stack.
    WriteS(usize),
    Dup,
    Pop,
    Nop,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Const(value) => write!(f, "Const {}", value),
            Opcode::Add => write!(f, "Add"),
            Opcode::Sub => write!(f, "Sub"),
            Opcode::Mul => write!(f, "Mul"),
            Opcode::Div => write!(f, "Div"),
            Opcode::Neg => write!(f, "Neg"),
            Opcode::Equ => write!(f, "Equ"),
            Opcode::Lss => write!(f, "Lss"),
            Opcode::Gtr => write!(f, "Gtr"),
            Opcode::GorE => write!(f, "GorE"),
            Opcode::LorE => write!(f, "LorE"),
            Opcode::Load { level, slot } => write!(f, "Load {} {}", level, slot),
            Opcode::LoadG(operand) => write!(f, "LoadG {}", operand),
            Opcode::Sto { level, slot } => write!(f, "Sto {} {}", level, slot),
            Opcode::StoG(operand) => write!(f, "StoG {}", operand),
            Opcode::Jmp(label) => write!(f, "Jmp {}", label),
            Opcode::FJmp(label) => write!(f, "FJmp {}", label),
            Opcode::Call { level, label } => write!(f, "Call {} {}", level, label),
            Opcode::Enter(size) => write!(f, "Enter {}", size),
            Opcode::Leave => write!(f, "Leave"),
            Opcode::Ret => write!(f, "Ret"),
            Opcode::Read => write!(f, "Read"),
            Opcode::Write => write!(f, "Write"),
            Opcode::WriteS(length) => write!(f, "WriteS {}", length),
            Opcode::Dup => write!(f, "Dup"),
            Opcode::Pop => write!(f, "Pop"),
            Opcode::Nop => write!(f, "Nop"),
        }
    }
}

/// One entry of the instruction stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Label naming this instruction's address, if any.
    pub label: Option<String>,
    /// The operation.
    pub op: Opcode,
}

impl Instruction {
    /// An unlabelled instruction.
    pub fn new(op: Opcode) -> Self {
        Self { label: None, op }
    }

    /// An instruction carrying a label.
    pub fn labelled(label: impl Into<String>, op: Opcode) -> Self {
        Self {
            label: Some(label.into()),
            op,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}: {}", label, self.op),
            None => write!(f, "{}", self.op),
        }
    }
}

/// The instruction stream under construction.
///
/// Positions in the buffer are final instruction addresses, so slots can be
/// patched in place once a value that was unknown at emission time (the
/// frame size of a procedure) becomes known.
#[derive(Debug, Default)]
pub struct CodeBuffer {
    instructions: Vec<Instruction>,
}

impl CodeBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unlabelled instruction and return its position.
    pub fn emit(&mut self, op: Opcode) -> usize {
        self.instructions.push(Instruction::new(op));
        self.instructions.len() - 1
    }

    /// Append a frame-entry instruction whose size is not yet known.
    pub fn emit_placeholder(&mut self) -> usize {
        self.emit(Opcode::Enter(0))
    }

    /// Overwrite the instruction at `index`.
    pub fn patch(&mut self, index: usize, instruction: Instruction) {
        if let Some(slot) = self.instructions.get_mut(index) {
            *slot = instruction;
        }
    }

    /// Append a labelled no-op, resolving forward jumps to `label`.
    pub fn place_label(&mut self, label: impl Into<String>) -> usize {
        self.instructions.push(Instruction::labelled(label, Opcode::Nop));
        self.instructions.len() - 1
    }

    /// Number of emitted instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The emitted instructions.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Take the emitted instructions.
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

/// The compiled artifact: the symbol directory followed by the code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Symbol directory entries.
    pub header: Vec<Directive>,
    /// The instruction stream.
    pub code: Vec<Instruction>,
}

impl Listing {
    /// Render every entry as one line of text, header first.
    pub fn lines(&self) -> Vec<String> {
        self.header
            .iter()
            .map(ToString::to_string)
            .chain(self.code.iter().map(ToString::to_string))
            .collect()
    }

    /// Render only the instruction stream.
    pub fn code_lines(&self) -> Vec<String> {
        self.code.iter().map(ToString::to_string).collect()
    }
}
