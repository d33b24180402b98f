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

//! Globally unique labels for nested procedures.
//!
//! Procedures may be nested and may reuse names, so a procedure's entry
//! label is the `$`-joined path of the procedures enclosing it. A call site
//! recomputes the callee's path from the names open at that point.

/// Separator between the components of a procedure path.
pub const PATH_SEPARATOR: &str = "$";

/// The names of the procedures currently open, outermost first.
#[derive(Debug, Default)]
pub struct ProcedureNames {
    open: Vec<String>,
}

impl ProcedureNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a procedure body.
    pub fn push(&mut self, name: impl Into<String>) {
        self.open.push(name.into());
    }

    /// Leave the innermost procedure body.
    pub fn pop(&mut self) -> Option<String> {
        self.open.pop()
    }

    /// Number of open procedures.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Entry label of a procedure declared at this point.
    ///
    /// Must be computed before the procedure's own name is pushed.
    pub fn declaration_label(&self, name: &str) -> String {
        self.path_with(self.open.len(), name)
    }

    /// Label of a procedure called from this point whose declaration lies
    /// `distance` scopes outward from the innermost open scope.
    ///
    /// Only the outermost `len - distance` names are shared between the call
    /// site and the declaration site.
    pub fn call_label(&self, distance: usize, name: &str) -> String {
        self.path_with(self.open.len().saturating_sub(distance), name)
    }

    fn path_with(&self, prefix: usize, name: &str) -> String {
        let mut path = self.open[..prefix].join(PATH_SEPARATOR);
        if !path.is_empty() {
            path.push_str(PATH_SEPARATOR);
        }
        path.push_str(name);
        path
    }
}
