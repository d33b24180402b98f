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


//! Fuzz target for the complete Tastier compiler pipeline.
//!
//! This fuzzer feeds random source code through tokenization, translation
//! and listing rendering to find crashes at any stage.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_compiler

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        // Should never panic, only return Ok or Err
        if let Ok(listing) = tastier::compile(source) {
            let _ = tastier::output::render_listing(&listing);
        }
    }
});
