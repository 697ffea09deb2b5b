use std::fmt::Write;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use monkeyscript::bytecode::compiler::Compiler;
use monkeyscript::frontend::lexer::Lexer;
use monkeyscript::frontend::parser::Parser;

struct Corpus {
    name: &'static str,
    source: String,
}

fn build_arithmetic_corpus(n: usize) -> String {
    let mut src = String::with_capacity(n * 24);
    for i in 0..n {
        let _ = writeln!(src, "let v_{i} = {} + {} * ({} - 1) % 7;", i, i + 1, i + 2);
    }
    src
}

fn build_function_heavy_corpus(n: usize) -> String {
    let mut src = String::with_capacity(n * 64);
    for i in 0..n {
        let _ = writeln!(src, "fn f_{i}(a, b) {{ if (a < b) {{ a + b }} else {{ a - b }} }}");
        let _ = writeln!(src, "f_{i}({i}, {});", i + 1);
    }
    src
}

fn build_loop_heavy_corpus(n: usize) -> String {
    let mut src = String::with_capacity(n * 48);
    for i in 0..n {
        let _ = writeln!(
            src,
            "let s_{i} = 0; let j_{i} = 0; while j_{i} < 10 {{ s_{i} = s_{i} + j_{i}; j_{i} = j_{i} + 1; }}"
        );
    }
    src
}

fn corpora() -> Vec<Corpus> {
    vec![
        Corpus { name: "arithmetic", source: build_arithmetic_corpus(2_000) },
        Corpus { name: "function_heavy", source: build_function_heavy_corpus(500) },
        Corpus { name: "loop_heavy", source: build_loop_heavy_corpus(500) },
    ]
}

fn compile(source: &str) -> usize {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    let mut compiler = Compiler::new();
    compiler.compile(&program).expect("corpus must compile cleanly");
    compiler.bytecode().instructions.len()
}

fn bench_compile(c: &mut Criterion) {
    let corpora = corpora();
    let mut group = c.benchmark_group("compiler/compile");

    for corpus in &corpora {
        let input = corpus.source.as_str();
        group.throughput(Throughput::Bytes(input.as_bytes().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(corpus.name), input, |b, input| {
            b.iter(|| {
                let len = compile(black_box(input));
                black_box(len);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);
