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

//! Symbol and scope model.
//!
//! - `symbol` - The [`Symbol`] record and its kinds and types
//! - `scope` - A LIFO collection of symbols for one declaration region
//! - `symbol_table` - The scope chain plus the external declaration table

pub mod scope;
pub mod symbol;
pub mod symbol_table;

pub use scope::Scope;
pub use symbol::{Symbol, SymbolKind, ValueType, EXTERNAL_DEPTH, GLOBAL_DEPTH};
pub use symbol_table::{Resolved, SymbolTable};
