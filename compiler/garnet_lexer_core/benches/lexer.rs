//! Lexer throughput benchmarks for `garnet_lexer_core`.
//!
//! Measures pure tokenization speed over generated source: no parsing, no
//! value conversion, no interning. This is the apples-to-apples comparison
//! point with other published lexer benchmarks.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use garnet_lexer_core::{Lexer, SourceBuffer, TokenKind};

/// Generate N small method definitions for scaling benchmarks.
fn generate_n_methods(n: usize) -> Vec<u8> {
    let mut source = String::new();
    for i in 0..n {
        source.push_str(&format!(
            "def method{i}(x)\n  \"value #{{x + {i}}}\" # {i}\nend\n"
        ));
    }
    source.into_bytes()
}

/// Benchmark lexer throughput at various scales.
///
/// Consumes tokens in a tight loop without collecting into a Vec,
/// measuring pure scanning speed.
fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer/throughput");

    for num_methods in [10, 100, 1000, 5000] {
        let source = generate_n_methods(num_methods);
        let bytes = source.len() as u64;

        group.throughput(Throughput::Bytes(bytes));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_methods),
            &source,
            |b, src| {
                b.iter(|| {
                    let buf = SourceBuffer::new(src);
                    let mut lexer = Lexer::new(&buf);
                    loop {
                        let token = lexer.lex();
                        if token.kind == TokenKind::Eof {
                            break;
                        }
                        black_box(token);
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_throughput);
criterion_main!(benches);
