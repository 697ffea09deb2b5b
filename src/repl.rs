//! Interactive driver: reuses the compiler's symbol table and constant
//! pool, and the VM's globals, across every input it reads.
use std::io::{self, Write};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use crate::bytecode::compiler::Compiler;
use crate::bytecode::symbol_table::SymbolTable;
use crate::error::ParseError;
use crate::frontend::diagnostic::render_diagnostics;
use crate::frontend::{lexer::Lexer, parser::Parser};
use crate::runtime::object::Object;
use crate::runtime::vm::{GLOBALS_SIZE, VM};
use crate::tracer::Tracer;

const PROMPT: &str = ">> ";
const CONTINUATION_PROMPT: &str = ".. ";

pub fn start(tracing: bool) {
    let tracer = Tracer::new(tracing);
    let stdin = io::stdin();
    let mut symbol_table = SymbolTable::new();
    for (idx, name) in crate::runtime::builtins::BUILTIN_NAMES.iter().enumerate() {
        symbol_table.define_builtin(idx, name);
    }
    let mut constants = Vec::new();
    let globals = Arc::new(Mutex::new(vec![Object::Null; GLOBALS_SIZE]));
    let cancelled = Arc::new(AtomicBool::new(false));

    let mut buffer = String::new();

    loop {
        if buffer.is_empty() {
            print!("{}", PROMPT);
        } else {
            print!("{}", CONTINUATION_PROMPT);
        }
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.read_line(&mut line).unwrap_or(0) == 0 {
            println!();
            return;
        }

        let trimmed = line.trim();
        if buffer.is_empty() {
            match trimmed {
                "exit" | "quit" => return,
                "help" => {
                    print_help();
                    continue;
                }
                "clear" => {
                    print!("\x1b[2J\x1b[H");
                    io::stdout().flush().ok();
                    continue;
                }
                _ => {}
            }
        }

        buffer.push_str(&line);

        let mut parser = Parser::new(Lexer::new(&buffer));
        let program = parser.parse_program();

        if needs_continuation(&parser) {
            continue;
        }
        buffer.clear();

        if !parser.errors.is_empty() {
            eprintln!("{}", render_diagnostics(&parser.errors, None, None));
            continue;
        }

        let mut compiler = Compiler::new_with_state(symbol_table.clone(), constants.clone());
        let compile_result = compiler.compile(&program);
        match compile_result {
            Err(diagnostics) => {
                eprintln!("{}", render_diagnostics(&diagnostics, None, None));
                continue;
            }
            Ok(()) => {}
        }

        symbol_table = compiler.symbol_table.clone();
        let bytecode = compiler.bytecode();
        constants = bytecode.constants.clone();

        let mut vm = VM::new_with_globals(bytecode, globals.clone(), cancelled.clone());
        tracer.trace(format!("executing {} constant(s)", constants.len()));
        if let Err(err) = vm.run() {
            eprintln!("runtime error: {}", err);
            continue;
        }

        let result = vm.last_popped_stack_elem();
        if *result != Object::Null {
            println!("{}", result);
        }
    }
}

/// Heuristic: `ParseError::UnexpectedToken` is the only signal we have
/// that an input was cut off mid-statement (missing closing token) rather
/// than genuinely malformed.
fn needs_continuation(parser: &Parser) -> bool {
    parser
        .errors
        .last()
        .is_some_and(|diag| matches!(diag.parse_error, Some(ParseError::UnexpectedToken { .. })))
}

fn print_help() {
    println!("Commands:");
    println!("  exit, quit   leave the REPL");
    println!("  help         show this message");
    println!("  clear        clear the terminal");
}
