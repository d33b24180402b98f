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

//! The symbol directory emitted in front of the instruction stream.
//!
//! The directory lists every global declaration, newest first, followed by
//! every external declaration, newest first, so a linker can match names
//! across separately compiled programs.

use std::fmt;

use crate::symbols::{Symbol, SymbolKind, SymbolTable, ValueType};

/// One line of the symbol directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Number of entries that follow.
    Names(usize),
    Var { ty: ValueType, name: String },
    Proc(String),
    Const { ty: ValueType, name: String },
    ExternalVar { ty: ValueType, name: String },
    ExternalProc(String),
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Names(count) => write!(f, ".names {}", count),
            Directive::Var { ty, name } => write!(f, ".var {} {}", ty.code(), name),
            Directive::Proc(name) => write!(f, ".proc {}", name),
            Directive::Const { ty, name } => write!(f, ".const {} {}", ty.code(), name),
            Directive::ExternalVar { ty, name } => {
                write!(f, ".external var {} {}", ty.code(), name)
            }
            Directive::ExternalProc(name) => write!(f, ".external proc {}", name),
        }
    }
}

/// The built directory and the names it could not describe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub directives: Vec<Directive>,
    /// Globals whose kind has no directive form.
    pub untyped_globals: Vec<String>,
    /// Externals whose kind has no directive form.
    pub untyped_externals: Vec<String>,
}

fn global_directive(symbol: &Symbol) -> Option<Directive> {
    let name = symbol.name.clone();
    match symbol.kind {
        SymbolKind::Variable => Some(Directive::Var { ty: symbol.ty, name }),
        SymbolKind::Procedure => Some(Directive::Proc(name)),
        SymbolKind::Constant => Some(Directive::Const { ty: symbol.ty, name }),
        SymbolKind::Array => None,
    }
}

fn external_directive(symbol: &Symbol) -> Option<Directive> {
    let name = symbol.name.clone();
    match symbol.kind {
        SymbolKind::Variable => Some(Directive::ExternalVar { ty: symbol.ty, name }),
        SymbolKind::Procedure => Some(Directive::ExternalProc(name)),
        SymbolKind::Constant | SymbolKind::Array => None,
    }
}

/// Build the symbol directory from the global scope and the external table.
///
/// String rebindings are not declarations and do not appear.
pub fn build_header(table: &SymbolTable) -> Header {
    let mut entries = Vec::new();
    let mut untyped_globals = Vec::new();
    let mut untyped_externals = Vec::new();

    for symbol in table.global().declarations() {
        match global_directive(symbol) {
            Some(directive) => entries.push(directive),
            None => untyped_globals.push(symbol.name.clone()),
        }
    }
    for symbol in table.externals().declarations() {
        match external_directive(symbol) {
            Some(directive) => entries.push(directive),
            None => untyped_externals.push(symbol.name.clone()),
        }
    }

    let mut directives = Vec::with_capacity(entries.len() + 1);
    directives.push(Directive::Names(entries.len()));
    directives.extend(entries);

    Header {
        directives,
        untyped_globals,
        untyped_externals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::GLOBAL_DEPTH;

    fn lines(header: &Header) -> Vec<String> {
        header.directives.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_table() {
        let header = build_header(&SymbolTable::new());
        assert_eq!(lines(&header), vec![".names 0"]);
        assert!(header.untyped_globals.is_empty());
        assert!(header.untyped_externals.is_empty());
    }

    #[test]
    fn test_globals_newest_first_then_externals() {
        let mut table = SymbolTable::new();
        table.declare(Symbol::data(
            "i",
            SymbolKind::Variable,
            ValueType::Integer,
            GLOBAL_DEPTH,
            0,
        ));
        table.declare(Symbol::procedure("Main", GLOBAL_DEPTH));
        table.declare(Symbol::data(
            "flag",
            SymbolKind::Constant,
            ValueType::Boolean,
            GLOBAL_DEPTH,
            1,
        ));
        table.declare_external(Symbol::external(
            "count",
            SymbolKind::Variable,
            ValueType::Integer,
        ));
        table.declare_external(Symbol::external(
            "helper",
            SymbolKind::Procedure,
            ValueType::Undefined,
        ));

        assert_eq!(
            lines(&build_header(&table)),
            vec![
                ".names 5",
                ".const 2 flag",
                ".proc Main",
                ".var 1 i",
                ".external proc helper",
                ".external var 1 count",
            ]
        );
    }

    #[test]
    fn test_string_rebindings_are_not_listed() {
        let mut table = SymbolTable::new();
        let s = Symbol::data("s", SymbolKind::Variable, ValueType::String, GLOBAL_DEPTH, 0);
        table.declare(s.clone());
        table.rebind(s.rebind_string(0, 3), false);
        assert_eq!(lines(&build_header(&table)), vec![".names 1", ".var 3 s"]);
    }

    #[test]
    fn test_external_constant_has_no_directive() {
        let mut table = SymbolTable::new();
        table.declare_external(Symbol::external(
            "limit",
            SymbolKind::Constant,
            ValueType::Integer,
        ));
        let header = build_header(&table);
        assert_eq!(lines(&header), vec![".names 0"]);
        assert!(header.untyped_globals.is_empty());
        assert_eq!(header.untyped_externals, vec!["limit".to_string()]);
    }

    #[test]
    fn test_array_kind_is_reported_untyped() {
        let mut table = SymbolTable::new();
        table.declare(Symbol::data(
            "grid",
            SymbolKind::Array,
            ValueType::Integer,
            GLOBAL_DEPTH,
            0,
        ));
        let header = build_header(&table);
        assert_eq!(lines(&header), vec![".names 0"]);
        assert_eq!(header.untyped_globals, vec!["grid".to_string()]);
        assert!(header.untyped_externals.is_empty());
    }
}
