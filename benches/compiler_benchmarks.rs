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


//! Performance benchmarks for the Tastier compiler.
//!
//! Run with: cargo bench
//!
//! Results are saved to target/criterion/ with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fs;

// ============================================================================
// Benchmark Inputs
// ============================================================================

fn load_input(name: &str) -> String {
    let path = format!("benches/inputs/{}.TAS", name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load benchmark input: {}", path))
}

/// Build a program with `procedures` procedures exercising every statement.
fn generate_input(procedures: usize) -> String {
    let mut source = String::from("program Bench {\n  int total;\n  string name;\n");
    for i in 0..procedures {
        source.push_str(&format!(
            "  void Work{i}() {{
    int n, k;
    bool done;
    n := {i};
    k := 0;
    done := false;
    while (k < 10) {{
      k := k + 1;
      if (k = 5) total := total + n * k; else total := total - 1;
    }}
    switch (n) {{
      case 0: write 0;
      case 1: write 1; write 2;
      default: done := true;
    }}
    for (k := 0; k := k + 1; k < 3) do {{ write (done) ? k : -k; }}
    name := \"work\";
    write name;
  }}
"
        ));
    }
    source.push_str("  void Main() {\n    total := 0;\n");
    for i in 0..procedures {
        source.push_str(&format!("    Work{}();\n", i));
    }
    source.push_str("    write total;\n  }\n}\n");
    source
}

fn inputs() -> Vec<(&'static str, String)> {
    vec![
        ("small", load_input("small")),
        ("medium", generate_input(20)),
        ("large", generate_input(200)),
    ]
}

// ============================================================================
// Lexer Benchmarks
// ============================================================================

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    for (name, source) in inputs() {
        // Throughput based on source code size
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("tokenize", name), &source, |b, src| {
            b.iter(|| tastier::lexer::tokenize(black_box(src)))
        });
    }

    group.finish();
}

// ============================================================================
// Translator Benchmarks
// ============================================================================

fn bench_translator(c: &mut Criterion) {
    let mut group = c.benchmark_group("translator");

    for (name, source) in inputs() {
        // Pre-tokenize so only the translation pass is measured
        let tokens = tastier::lexer::tokenize(&source).unwrap();
        group.throughput(Throughput::Elements(tokens.len() as u64));
        group.bench_with_input(BenchmarkId::new("translate", name), &tokens, |b, tokens| {
            b.iter(|| tastier::translator::translate(black_box(tokens)))
        });
    }

    group.finish();
}

// ============================================================================
// End-to-End Compilation Benchmarks
// ============================================================================

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for (name, source) in inputs() {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("full", name), &source, |b, src| {
            b.iter(|| tastier::compile(black_box(src)))
        });
    }

    group.finish();
}

// ============================================================================
// Output Benchmarks
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let source = generate_input(200);
    let listing = tastier::compile(&source).unwrap();

    c.bench_function("render_listing/large", |b| {
        b.iter(|| tastier::output::render_listing(black_box(&listing)))
    });
}

criterion_group!(
    benches,
    bench_lexer,
    bench_translator,
    bench_compile,
    bench_render
);
criterion_main!(benches);
