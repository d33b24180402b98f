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

//! Label allocation for code generation.
//!
//! This module handles:
//! - Unique jump labels (`L$0`, `L$1`, ...)
//! - The stack of labels opened by a construct and placed when it closes

/// Prefix shared by every generated jump label.
pub const LABEL_PREFIX: &str = "L$";

/// Generates unique labels and tracks the ones waiting to be placed.
///
/// Control constructs nest, so the open labels form a strict LIFO stack: the
/// label pushed last is the first one placed.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    counter: usize,
    open: Vec<String>,
}

impl LabelAllocator {
    /// Create an allocator whose first label is `L$0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new label. Labels are never reused.
    pub fn fresh(&mut self) -> String {
        let label = format!("{}{}", LABEL_PREFIX, self.counter);
        self.counter += 1;
        label
    }

    /// Generate a new label and push it onto the open stack.
    pub fn push_fresh(&mut self) -> String {
        let label = self.fresh();
        self.open.push(label.clone());
        label
    }

    /// Remove the most recently opened label.
    pub fn pop(&mut self) -> Option<String> {
        self.open.pop()
    }

    /// The most recently opened label.
    pub fn peek(&self) -> Option<&str> {
        self.open.last().map(String::as_str)
    }

    /// Number of labels generated so far.
    pub fn generated(&self) -> usize {
        self.counter
    }

    /// Number of labels waiting to be placed.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_labels_are_unique() {
        let mut labels = LabelAllocator::new();
        assert_eq!(labels.fresh(), "L$0");
        assert_eq!(labels.fresh(), "L$1");
        assert_eq!(labels.push_fresh(), "L$2");
        assert_eq!(labels.generated(), 3);
    }

    #[test]
    fn test_open_labels_are_lifo() {
        let mut labels = LabelAllocator::new();
        labels.push_fresh();
        labels.push_fresh();
        assert_eq!(labels.peek(), Some("L$1"));
        assert_eq!(labels.pop().as_deref(), Some("L$1"));
        assert_eq!(labels.pop().as_deref(), Some("L$0"));
        assert_eq!(labels.pop(), None);
    }

    #[test]
    fn test_fresh_does_not_open() {
        let mut labels = LabelAllocator::new();
        labels.fresh();
        assert_eq!(labels.open_count(), 0);
        assert_eq!(labels.peek(), None);
    }
}
