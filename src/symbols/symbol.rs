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

//! Symbol definitions for the translator.
//!
//! A symbol is created once per declaration. When a string value is bound to
//! a name, the binding is not mutated; a new version of the symbol is pushed
//! instead and shadows the old one.

/// Scope depth of symbols held in the external table.
pub const EXTERNAL_DEPTH: usize = 0;

/// Scope depth of the program's global scope.
pub const GLOBAL_DEPTH: usize = 1;

/// The kind of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Procedure,
    Constant,
    Array,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Procedure => "procedure",
            SymbolKind::Constant => "constant",
            SymbolKind::Array => "array",
        };
        write!(f, "{}", name)
    }
}

/// The type of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Undefined,
    Integer,
    Boolean,
    String,
}

impl ValueType {
    /// The numeric type code written into the program header.
    pub fn code(self) -> u8 {
        match self {
            ValueType::Undefined => 0,
            ValueType::Integer => 1,
            ValueType::Boolean => 2,
            ValueType::String => 3,
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Undefined => "undefined",
            ValueType::Integer => "int",
            ValueType::Boolean => "bool",
            ValueType::String => "string",
        };
        write!(f, "{}", name)
    }
}

/// Symbol table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The symbol name.
    pub name: String,
    /// What the name denotes.
    pub kind: SymbolKind,
    /// The value type (`Undefined` for procedures).
    pub ty: ValueType,
    /// Number of open scopes when the symbol was declared.
    pub depth: usize,
    /// Data address: a global memory offset at [`GLOBAL_DEPTH`], a frame
    /// slot deeper than that. `None` for procedures and externals.
    pub address: Option<usize>,
    /// Character count of the bound string, for string bindings.
    pub length: Option<usize>,
    /// 0 for the declaration, incremented by every rebinding.
    pub version: u32,
}

impl Symbol {
    /// Create a symbol with storage (a variable or a constant).
    pub fn data(
        name: impl Into<String>,
        kind: SymbolKind,
        ty: ValueType,
        depth: usize,
        address: usize,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            depth,
            address: Some(address),
            length: None,
            version: 0,
        }
    }

    /// Create a procedure symbol. Procedures are code, never storage.
    pub fn procedure(name: impl Into<String>, depth: usize) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Procedure,
            ty: ValueType::Undefined,
            depth,
            address: None,
            length: None,
            version: 0,
        }
    }

    /// Create a symbol for the external table; it is resolved by name.
    pub fn external(name: impl Into<String>, kind: SymbolKind, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            depth: EXTERNAL_DEPTH,
            address: None,
            length: None,
            version: 0,
        }
    }

    /// A new version of this symbol bound to a string of `length`
    /// characters stored at `address`.
    pub fn rebind_string(&self, address: usize, length: usize) -> Self {
        Self {
            address: Some(address),
            length: Some(length),
            version: self.version + 1,
            ..self.clone()
        }
    }

    /// Whether this entry is an original declaration rather than a rebinding.
    pub fn is_declaration(&self) -> bool {
        self.version == 0
    }

    /// Whether this symbol occupies a data slot.
    pub fn is_storage(&self) -> bool {
        self.kind != SymbolKind::Procedure
    }
}
