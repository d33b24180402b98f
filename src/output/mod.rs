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


//! Output module for the Tastier compiler.
//!
//! A listing is written as plain text, one entry per line: the symbol
//! directory first, then the instruction stream. Labelled instructions are
//! written as `label: instruction`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::codegen::Listing;

/// Extension given to listing files.
pub const LISTING_EXTENSION: &str = "asm";

/// Render a listing to text, one newline-terminated line per entry.
pub fn render_listing(listing: &Listing) -> String {
    let mut text = String::new();
    for line in listing.lines() {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

/// Write a listing file.
pub fn write_listing(listing: &Listing, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in listing.lines() {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}

/// The listing path used when none is given: the source path with its
/// extension replaced.
pub fn default_output_path(source: &Path) -> PathBuf {
    source.with_extension(LISTING_EXTENSION)
}
