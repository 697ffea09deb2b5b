use std::process::ExitCode;
use std::{fs, io::Write};

use clap::Parser as ClapParser;
use monkeyscript::bytecode::compiler::Compiler;
use monkeyscript::cli::Args;
use monkeyscript::frontend::diagnostic::render_diagnostics;
use monkeyscript::frontend::{lexer::Lexer, parser::Parser};
use monkeyscript::repl;
use monkeyscript::runtime::vm::VM;
use monkeyscript::tracer::Tracer;

fn main() -> ExitCode {
    let args = Args::parse();
    let tracer = Tracer::new(args.tracing_enabled());

    match &args.file {
        None => {
            repl::start(args.tracing_enabled());
            ExitCode::SUCCESS
        }
        Some(path) => run_file(path, &tracer),
    }
}

fn run_file(path: &str, tracer: &Tracer) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    let mut parser = Parser::new(Lexer::new(&source));
    let program = parser.parse_program();

    if !parser.errors.is_empty() {
        eprintln!("{}", render_diagnostics(&parser.errors, Some(&source), Some(path)));
        return ExitCode::FAILURE;
    }

    tracer.trace(format!("parsed {} statement(s)", program.statements.len()));

    let mut compiler = Compiler::new_with_file_path(path);
    if let Err(diagnostics) = compiler.compile(&program) {
        eprintln!("{}", render_diagnostics(&diagnostics, Some(&source), Some(path)));
        return ExitCode::FAILURE;
    }

    let bytecode = compiler.bytecode();
    tracer.trace(format!("compiled {} constant(s)", bytecode.constants.len()));

    let mut vm = VM::new(bytecode);
    if let Err(err) = vm.run() {
        eprintln!("runtime error: {}", err);
        return ExitCode::FAILURE;
    }

    std::io::stdout().flush().ok();
    ExitCode::SUCCESS
}
