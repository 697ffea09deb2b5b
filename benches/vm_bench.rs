use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use monkeyscript::bytecode::bytecode::Bytecode;
use monkeyscript::bytecode::compiler::Compiler;
use monkeyscript::frontend::diagnostic::render_diagnostics;
use monkeyscript::frontend::lexer::Lexer;
use monkeyscript::frontend::parser::Parser;
use monkeyscript::runtime::vm::VM;

struct Scenario {
    name: &'static str,
    source: String,
}

fn compile_program(source: &str) -> Bytecode {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    let mut compiler = Compiler::new();
    compiler
        .compile(&program)
        .unwrap_or_else(|diags| panic!("{}", render_diagnostics(&diags, Some(source), None)));
    compiler.bytecode()
}

fn run_program(bytecode: Bytecode) {
    let mut vm = VM::new(bytecode);
    vm.run().unwrap();
    black_box(vm.last_popped_stack_elem());
}

fn build_fibonacci(n: u32) -> String {
    format!(
        "fn fib(x) {{ if (x < 2) {{ x }} else {{ fib(x - 1) + fib(x - 2) }} }} fib({});",
        n
    )
}

fn build_while_loop(iterations: u32) -> String {
    format!(
        "let total = 0; let i = 0; while i < {} {{ total = total + i; i = i + 1; }} total;",
        iterations
    )
}

fn build_array_churn(size: u32) -> String {
    let mut src = String::from("let arr = [];\n");
    for i in 0..size {
        src.push_str(&format!("arr = push(arr, {});\n", i));
    }
    src.push_str("len(arr);");
    src
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario { name: "fib_20", source: build_fibonacci(20) },
        Scenario { name: "while_10k", source: build_while_loop(10_000) },
        Scenario { name: "array_push_1k", source: build_array_churn(1_000) },
    ]
}

fn bench_vm_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("vm/run");
    for scenario in scenarios() {
        let bytecode = compile_program(&scenario.source);
        group.bench_with_input(BenchmarkId::from_parameter(scenario.name), &bytecode, |b, bytecode| {
            b.iter(|| run_program(bytecode.clone()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_vm_run);
criterion_main!(benches);
