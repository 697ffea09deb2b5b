use std::sync::Arc;

use crate::{
    bytecode::{
        bytecode::Bytecode,
        compilation_scope::CompilationScope,
        emitted_instruction::EmittedInstruction,
        op_code::{Instructions, OpCode, make},
        symbol::Symbol,
        symbol_scope::SymbolScope,
        symbol_table::SymbolTable,
    },
    error::CompileError,
    frontend::{
        ast::{AssignTarget, Block, Expression, Program, Statement},
        diagnostic::Diagnostic,
        token::Position,
    },
    runtime::{compiled_function::CompiledFunction, object::Object},
};

/// Per-`while` bookkeeping: where `continue` jumps to, and the positions of
/// `break` jumps still awaiting a target once the loop's end is known.
struct LoopContext {
    continue_target: usize,
    break_jumps: Vec<usize>,
}

pub struct Compiler {
    constants: Vec<Object>,
    pub symbol_table: SymbolTable,
    scopes: Vec<CompilationScope>,
    scope_index: usize,
    pub errors: Vec<Diagnostic>,
    file_path: String,
    loops: Vec<LoopContext>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::new_with_file_path("<unknown>")
    }

    pub fn new_with_file_path(file_path: impl Into<String>) -> Self {
        let mut symbol_table = SymbolTable::new();
        for (idx, name) in crate::runtime::builtins::BUILTIN_NAMES.iter().enumerate() {
            symbol_table.define_builtin(idx, name);
        }

        Self {
            constants: Vec::new(),
            symbol_table,
            scopes: vec![CompilationScope::new()],
            scope_index: 0,
            errors: Vec::new(),
            file_path: file_path.into(),
            loops: Vec::new(),
        }
    }

    pub fn new_with_state(symbol_table: SymbolTable, constants: Vec<Object>) -> Self {
        let mut compiler = Self::new();
        compiler.symbol_table = symbol_table;
        compiler.constants = constants;
        compiler
    }

    pub fn compile(&mut self, program: &Program) -> Result<(), Vec<Diagnostic>> {
        for statement in &program.statements {
            if let Err(err) = self.compile_statement(statement) {
                self.errors.push(err);
            }
        }

        if !self.errors.is_empty() {
            return Err(std::mem::take(&mut self.errors));
        }

        Ok(())
    }

    fn compile_statement(&mut self, statement: &Statement) -> Result<(), Diagnostic> {
        match statement {
            Statement::Expression { expression, .. } => {
                self.compile_expression(expression)?;
                self.emit(OpCode::OpPop, &[]);
            }
            Statement::Let { name, value, position } => {
                if self.symbol_table.exists_in_current_scope(name) {
                    return Err(self.make_redeclaration_error(name, *position));
                }

                let symbol = self.symbol_table.define(name);
                self.compile_expression(value)?;
                self.emit_store(&symbol);
            }
            Statement::Const { name, value, position } => {
                if self.symbol_table.exists_in_current_scope(name) {
                    return Err(self.make_redeclaration_error(name, *position));
                }

                let symbol = self.symbol_table.define(name);
                self.compile_expression(value)?;
                self.emit_store(&symbol);
                self.symbol_table.mark_assigned(name).ok();
            }
            Statement::Assign { target, value, position } => match target {
                AssignTarget::Identifier(name) => {
                    let symbol = self
                        .symbol_table
                        .resolve(name)
                        .ok_or_else(|| self.make_undefined_variable_error(name, *position))?;

                    if symbol.is_assigned {
                        return Err(self.make_immutability_error(name, *position));
                    }

                    match symbol.symbol_scope {
                        SymbolScope::Global | SymbolScope::Local => {
                            self.compile_expression(value)?;
                            self.emit_store(&symbol);
                        }
                        SymbolScope::Free | SymbolScope::Builtin | SymbolScope::Function => {
                            return Err(self.make_captured_assignment_error(name, *position));
                        }
                    }
                }
                AssignTarget::Index { left, index } => {
                    let Expression::Identifier(name) = left.as_ref() else {
                        return Err(self.make_invalid_assignment_target_error(
                            *position,
                            "only `name[index] = value;` is supported here; nested targets like \
                             `a[0][1] = x;` are not"
                                .to_string(),
                        ));
                    };

                    let symbol = self
                        .symbol_table
                        .resolve(name)
                        .ok_or_else(|| self.make_undefined_variable_error(name, *position))?;

                    if symbol.is_assigned {
                        return Err(self.make_immutability_error(name, *position));
                    }

                    match symbol.symbol_scope {
                        SymbolScope::Global | SymbolScope::Local => {
                            self.compile_expression(left)?;
                            self.compile_expression(index)?;
                            self.compile_expression(value)?;
                            self.emit(OpCode::OpSetIndex, &[]);
                            self.emit_store(&symbol);
                        }
                        SymbolScope::Free | SymbolScope::Builtin | SymbolScope::Function => {
                            return Err(self.make_captured_assignment_error(name, *position));
                        }
                    }
                }
            },
            Statement::Return { value, .. } => match value {
                Some(expr) => {
                    self.compile_expression(expr)?;
                    self.emit(OpCode::OpReturnValue, &[]);
                }
                None => {
                    self.emit(OpCode::OpReturn, &[]);
                }
            },
            Statement::Function { name, parameters, body, .. } => {
                self.compile_function_statement(name, parameters, body)?;
            }
            Statement::While { condition, body, position } => {
                self.compile_while_statement(condition, body, *position)?;
            }
            Statement::Break { position } => {
                if self.loops.is_empty() {
                    return Err(Diagnostic::error("`break` outside of a loop")
                        .with_file(self.file_path.clone())
                        .with_position(*position));
                }
                let pos = self.emit(OpCode::OpJump, &[9999]);
                self.loops.last_mut().unwrap().break_jumps.push(pos);
            }
            Statement::Continue { position } => {
                if self.loops.is_empty() {
                    return Err(Diagnostic::error("`continue` outside of a loop")
                        .with_file(self.file_path.clone())
                        .with_position(*position));
                }
                let target = self.loops.last().unwrap().continue_target;
                self.emit(OpCode::OpJump, &[target]);
            }
            Statement::Spawn { call, position } => {
                self.compile_spawn_statement(call, *position)?;
            }
        }

        Ok(())
    }

    fn emit_store(&mut self, symbol: &Symbol) {
        match symbol.symbol_scope {
            SymbolScope::Global => {
                self.emit(OpCode::OpSetGlobal, &[symbol.index]);
            }
            SymbolScope::Local => {
                self.emit(OpCode::OpSetLocal, &[symbol.index]);
            }
            _ => {}
        }
    }

    fn emit(&mut self, op_code: OpCode, operands: &[usize]) -> usize {
        let instruction = make(op_code, operands);
        let pos = self.add_instruction(&instruction);
        self.set_last_instruction(op_code, pos);
        pos
    }

    fn add_instruction(&mut self, instruction: &[u8]) -> usize {
        let pos = self.scopes[self.scope_index].instructions.len();
        self.scopes[self.scope_index].instructions.extend_from_slice(instruction);
        pos
    }

    fn set_last_instruction(&mut self, op_code: OpCode, pos: usize) {
        let previous = self.scopes[self.scope_index].last_instruction.clone();
        self.scopes[self.scope_index].previous_instruction = previous;
        self.scopes[self.scope_index].last_instruction = EmittedInstruction {
            opcode: Some(op_code),
            position: pos,
        };
    }

    fn compile_expression(&mut self, expression: &Expression) -> Result<(), Diagnostic> {
        match expression {
            Expression::Integer(value) => {
                let idx = self.add_constant(Object::Integer(*value));
                self.emit(OpCode::OpConstant, &[idx]);
            }
            Expression::Float(value) => {
                let idx = self.add_constant(Object::Float(*value));
                self.emit(OpCode::OpConstant, &[idx]);
            }
            Expression::String(value) => {
                let idx = self.add_constant(Object::String(value.clone()));
                self.emit(OpCode::OpConstant, &[idx]);
            }
            Expression::Boolean(value) => {
                if *value {
                    self.emit(OpCode::OpTrue, &[]);
                } else {
                    self.emit(OpCode::OpFalse, &[]);
                }
            }
            Expression::Null => {
                self.emit(OpCode::OpNull, &[]);
            }
            Expression::Identifier(name) => {
                let symbol = self.symbol_table.resolve(name).ok_or_else(|| {
                    Diagnostic::from(CompileError::UnknownIdentifier { name: name.clone() })
                        .with_file(self.file_path.clone())
                        .with_hint(format!("Define it first: let {} = ...;", name))
                })?;
                self.load_symbol(&symbol);
            }
            Expression::Prefix { operator, right } => {
                self.compile_expression(right)?;
                match operator.as_str() {
                    "!" => self.emit(OpCode::OpBang, &[]),
                    "-" => self.emit(OpCode::OpMinus, &[]),
                    _ => {
                        return Err(Diagnostic::from(CompileError::UnsupportedOperator {
                            operator: operator.clone(),
                        })
                        .with_file(self.file_path.clone()))
                    }
                };
            }
            Expression::Infix { left, operator, right } => {
                self.compile_infix(left, operator, right)?;
            }
            Expression::If { condition, consequence, alternative } => {
                self.compile_if_expression(condition, consequence, alternative)?;
            }
            Expression::Function { parameters, body } => {
                self.compile_function_literal(parameters, body)?;
            }
            Expression::Array { elements } => {
                for el in elements {
                    self.compile_expression(el)?;
                }
                self.emit(OpCode::OpArray, &[elements.len()]);
            }
            Expression::Hash { pairs } => {
                let mut sorted_pairs: Vec<_> = pairs.iter().collect();
                sorted_pairs.sort_by(|a, b| a.0.to_string().cmp(&b.0.to_string()));

                for (key, value) in sorted_pairs {
                    self.compile_expression(key)?;
                    self.compile_expression(value)?;
                }
                self.emit(OpCode::OpHash, &[pairs.len() * 2]);
            }
            Expression::Index { left, index } => {
                self.compile_expression(left)?;
                self.compile_expression(index)?;
                self.emit(OpCode::OpIndex, &[]);
            }
            Expression::Call { function, arguments } => {
                self.compile_expression(function)?;
                for arg in arguments {
                    self.compile_expression(arg)?;
                }
                self.emit(OpCode::OpCall, &[arguments.len()]);
            }
            Expression::Channel => {
                self.emit(OpCode::OpMakeChannel, &[]);
            }
            Expression::ChanSend { channel, value } => {
                self.compile_expression(channel)?;
                self.compile_expression(value)?;
                self.emit(OpCode::OpChanSend, &[]);
            }
            Expression::ChanRecv { channel } => {
                self.compile_expression(channel)?;
                self.emit(OpCode::OpChanRecv, &[]);
            }
        }
        Ok(())
    }

    fn compile_infix(
        &mut self,
        left: &Expression,
        operator: &str,
        right: &Expression,
    ) -> Result<(), Diagnostic> {
        match operator {
            "&&" => return self.compile_logical_and(left, right),
            "||" => return self.compile_logical_or(left, right),
            "<" => {
                self.compile_expression(right)?;
                self.compile_expression(left)?;
                self.emit(OpCode::OpGreaterThan, &[]);
                return Ok(());
            }
            _ => {}
        }

        self.compile_expression(left)?;
        self.compile_expression(right)?;

        match operator {
            "+" => self.emit(OpCode::OpAdd, &[]),
            "-" => self.emit(OpCode::OpSub, &[]),
            "*" => self.emit(OpCode::OpMul, &[]),
            "/" => self.emit(OpCode::OpDiv, &[]),
            "%" => self.emit(OpCode::OpMod, &[]),
            "==" => self.emit(OpCode::OpEqual, &[]),
            "!=" => self.emit(OpCode::OpNotEqual, &[]),
            ">" => self.emit(OpCode::OpGreaterThan, &[]),
            "<=" => self.emit(OpCode::OpLessThanOrEqual, &[]),
            ">=" => self.emit(OpCode::OpGreaterThanOrEqual, &[]),
            _ => {
                return Err(
                    Diagnostic::from(CompileError::UnsupportedOperator { operator: operator.to_string() })
                        .with_file(self.file_path.clone())
                        .with_hint("Use a supported operator like +, -, *, /, %, ==, !=, <, >, <=, or >=."),
                )
            }
        };
        Ok(())
    }

    /// `left && right`, short-circuiting: if `left` is falsy, `right` is
    /// never evaluated and the result is `false`.
    fn compile_logical_and(&mut self, left: &Expression, right: &Expression) -> Result<(), Diagnostic> {
        self.compile_expression(left)?;
        let jump_false_pos = self.emit(OpCode::OpJumpNotTruthy, &[9999]);
        self.compile_expression(right)?;
        let jump_end_pos = self.emit(OpCode::OpJump, &[9999]);
        self.change_operand(jump_false_pos, self.current_instructions().len());
        self.emit(OpCode::OpFalse, &[]);
        self.change_operand(jump_end_pos, self.current_instructions().len());
        Ok(())
    }

    /// `left || right`, short-circuiting: if `left` is truthy, `right` is
    /// never evaluated and the result is `true`.
    fn compile_logical_or(&mut self, left: &Expression, right: &Expression) -> Result<(), Diagnostic> {
        self.compile_expression(left)?;
        let jump_to_right_pos = self.emit(OpCode::OpJumpNotTruthy, &[9999]);
        let jump_true_pos = self.emit(OpCode::OpJump, &[9999]);
        self.change_operand(jump_to_right_pos, self.current_instructions().len());
        self.compile_expression(right)?;
        let jump_end_pos = self.emit(OpCode::OpJump, &[9999]);
        self.change_operand(jump_true_pos, self.current_instructions().len());
        self.emit(OpCode::OpTrue, &[]);
        self.change_operand(jump_end_pos, self.current_instructions().len());
        Ok(())
    }

    fn compile_spawn_statement(&mut self, call: &Expression, position: Position) -> Result<(), Diagnostic> {
        let Expression::Call { function, arguments } = call else {
            return Err(Diagnostic::error("`spawn` requires a function call")
                .with_file(self.file_path.clone())
                .with_position(position)
                .with_hint("Use spawn like: spawn worker(1, 2);"));
        };

        self.compile_expression(function)?;
        for arg in arguments {
            self.compile_expression(arg)?;
        }
        self.emit(OpCode::OpSpawn, &[arguments.len()]);
        Ok(())
    }

    fn compile_while_statement(
        &mut self,
        condition: &Expression,
        body: &Block,
        _position: Position,
    ) -> Result<(), Diagnostic> {
        let loop_start = self.current_instructions().len();
        self.compile_expression(condition)?;
        let jump_not_truthy_pos = self.emit(OpCode::OpJumpNotTruthy, &[9999]);

        self.loops.push(LoopContext {
            continue_target: loop_start,
            break_jumps: Vec::new(),
        });

        self.compile_block(body)?;

        self.emit(OpCode::OpJump, &[loop_start]);
        let after_loop = self.current_instructions().len();
        self.change_operand(jump_not_truthy_pos, after_loop);

        let loop_ctx = self.loops.pop().unwrap();
        for break_pos in loop_ctx.break_jumps {
            self.change_operand(break_pos, after_loop);
        }

        Ok(())
    }

    fn add_constant(&mut self, obj: Object) -> usize {
        self.constants.push(obj);
        self.constants.len() - 1
    }

    fn load_symbol(&mut self, symbol: &Symbol) {
        match symbol.symbol_scope {
            SymbolScope::Global => {
                self.emit(OpCode::OpGetGlobal, &[symbol.index]);
            }
            SymbolScope::Local => {
                self.emit(OpCode::OpGetLocal, &[symbol.index]);
            }
            SymbolScope::Builtin => {
                self.emit(OpCode::OpGetBuiltin, &[symbol.index]);
            }
            SymbolScope::Free => {
                self.emit(OpCode::OpGetFree, &[symbol.index]);
            }
            SymbolScope::Function => {
                self.emit(OpCode::OpCurrentClosure, &[]);
            }
        }
    }

    fn compile_function_literal(&mut self, parameters: &[String], body: &Block) -> Result<(), Diagnostic> {
        self.enter_scope();

        for param in parameters {
            self.symbol_table.define(param);
        }

        self.compile_block(body)?;

        if self.is_last_instruction(OpCode::OpPop) {
            self.replace_last_pop_with_return();
        }
        if !self.is_last_instruction(OpCode::OpReturnValue) {
            self.emit(OpCode::OpReturn, &[]);
        }

        let free_symbols = self.symbol_table.free_symbols.clone();
        let num_locals = self.symbol_table.num_definitions;
        let instructions = self.leave_scope();

        for free in &free_symbols {
            self.load_symbol(free);
        }

        let fn_idx = self.add_constant(Object::Function(Arc::new(CompiledFunction::new(
            instructions,
            num_locals,
            parameters.len(),
        ))));

        self.emit(OpCode::OpClosure, &[fn_idx, free_symbols.len()]);
        Ok(())
    }

    fn compile_if_expression(
        &mut self,
        condition: &Expression,
        consequence: &Block,
        alternative: &Option<Block>,
    ) -> Result<(), Diagnostic> {
        self.compile_expression(condition)?;

        let jump_not_truthy_pos = self.emit(OpCode::OpJumpNotTruthy, &[9999]);
        self.compile_block(consequence)?;

        if self.is_last_instruction(OpCode::OpPop) {
            self.remove_last_pop();
        }

        let jump_pos = self.emit(OpCode::OpJump, &[9999]);
        self.change_operand(jump_not_truthy_pos, self.current_instructions().len());

        if let Some(alt) = alternative {
            self.compile_block(alt)?;
            if self.is_last_instruction(OpCode::OpPop) {
                self.remove_last_pop();
            }
        } else {
            self.emit(OpCode::OpNull, &[]);
        }

        self.change_operand(jump_pos, self.current_instructions().len());
        Ok(())
    }

    fn compile_function_statement(
        &mut self,
        name: &str,
        parameters: &[String],
        body: &Block,
    ) -> Result<(), Diagnostic> {
        let symbol = self.symbol_table.define(name);

        self.enter_scope();
        self.symbol_table.define_function_name(name);

        for param in parameters {
            self.symbol_table.define(param);
        }

        self.compile_block(body)?;

        if self.is_last_instruction(OpCode::OpPop) {
            self.replace_last_pop_with_return();
        }
        if !self.is_last_instruction(OpCode::OpReturnValue) {
            self.emit(OpCode::OpReturn, &[]);
        }

        let free_symbols = self.symbol_table.free_symbols.clone();
        let num_locals = self.symbol_table.num_definitions;
        let instructions = self.leave_scope();

        for free in &free_symbols {
            self.load_symbol(free);
        }

        let fn_idx = self.add_constant(Object::Function(Arc::new(CompiledFunction::new(
            instructions,
            num_locals,
            parameters.len(),
        ))));
        self.emit(OpCode::OpClosure, &[fn_idx, free_symbols.len()]);
        self.emit_store(&symbol);
        Ok(())
    }

    fn compile_block(&mut self, block: &Block) -> Result<(), Diagnostic> {
        for statement in &block.statements {
            self.compile_statement(statement)?;
        }
        Ok(())
    }

    fn enter_scope(&mut self) {
        self.scopes.push(CompilationScope::new());
        self.scope_index += 1;
        self.symbol_table = SymbolTable::new_enclosed(self.symbol_table.clone());
    }

    fn leave_scope(&mut self) -> Instructions {
        let scope = self.scopes.pop().unwrap();
        self.scope_index -= 1;
        if let Some(outer) = self.symbol_table.outer.take() {
            self.symbol_table = *outer;
        }
        scope.instructions
    }

    pub fn bytecode(&self) -> Bytecode {
        Bytecode {
            instructions: self.scopes[self.scope_index].instructions.clone(),
            constants: self.constants.clone(),
        }
    }

    fn is_last_instruction(&self, opcode: OpCode) -> bool {
        self.scopes[self.scope_index].last_instruction.opcode == Some(opcode)
    }

    fn remove_last_pop(&mut self) {
        let last_pos = self.scopes[self.scope_index].last_instruction.position;
        let previous = self.scopes[self.scope_index].previous_instruction.clone();
        self.scopes[self.scope_index].instructions.truncate(last_pos);
        self.scopes[self.scope_index].last_instruction = previous;
    }

    fn change_operand(&mut self, op_pos: usize, operand: usize) {
        let op_code = OpCode::from(self.current_instructions()[op_pos]);
        self.replace_instruction(op_pos, make(op_code, &[operand]));
    }

    fn current_instructions(&self) -> &Instructions {
        &self.scopes[self.scope_index].instructions
    }

    fn replace_instruction(&mut self, pos: usize, new_instruction: Instructions) {
        for (i, byte) in new_instruction.iter().enumerate() {
            self.scopes[self.scope_index].instructions[pos + i] = *byte;
        }
    }

    fn replace_last_pop_with_return(&mut self) {
        let pos = self.scopes[self.scope_index].last_instruction.position;
        self.replace_instruction(pos, make(OpCode::OpReturnValue, &[]));
        self.scopes[self.scope_index].last_instruction.opcode = Some(OpCode::OpReturnValue);
    }

    fn make_immutability_error(&self, name: &str, position: Position) -> Diagnostic {
        Diagnostic::error(format!("cannot assign twice to immutable variable `{}`", name))
            .with_file(self.file_path.clone())
            .with_position(position)
            .with_message(format!("`{}` is declared with `const`", name))
            .with_hint("Use `let` instead of `const` if this variable needs to be reassigned.")
    }

    fn make_undefined_variable_error(&self, name: &str, position: Position) -> Diagnostic {
        Diagnostic::from(CompileError::UnknownIdentifier { name: name.to_string() })
            .with_file(self.file_path.clone())
            .with_position(position)
            .with_message(format!("`{}` is not defined here", name))
            .with_hint(format!("Define it first: let {} = ...;", name))
    }

    fn make_redeclaration_error(&self, name: &str, position: Position) -> Diagnostic {
        Diagnostic::from(CompileError::DuplicateConst { name: name.to_string() })
            .with_file(self.file_path.clone())
            .with_position(position)
            .with_message(format!("`{}` was already declared in this scope", name))
            .with_hint(format!("Use a different name: let {} = ...; let {}2 = ...;", name, name))
    }

    fn make_invalid_assignment_target_error(&self, position: Position, detail: String) -> Diagnostic {
        Diagnostic::from(CompileError::InvalidAssignmentTarget)
            .with_file(self.file_path.clone())
            .with_position(position)
            .with_message(detail)
    }

    /// Closures capture free variables by value (see `runtime::closure::
    /// Closure::free`); there is no upvalue cell to write back through, so
    /// assigning to a captured, builtin, or the enclosing function's own
    /// name is rejected at compile time rather than silently discarded.
    fn make_captured_assignment_error(&self, name: &str, position: Position) -> Diagnostic {
        self.make_invalid_assignment_target_error(
            position,
            format!(
                "`{}` is captured from an enclosing scope; closures capture free variables by \
                 value, so it cannot be reassigned here",
                name
            ),
        )
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{lexer::Lexer, parser::Parser};

    fn compile(input: &str) -> Bytecode {
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        assert!(parser.errors.is_empty(), "parse errors: {:?}", parser.errors);
        let mut compiler = Compiler::new();
        compiler.compile(&program).expect("compile errors");
        compiler.bytecode()
    }

    #[test]
    fn test_integer_arithmetic() {
        let bc = compile("1 + 2;");
        assert_eq!(bc.constants, vec![Object::Integer(1), Object::Integer(2)]);
    }

    #[test]
    fn test_const_then_reassign_fails() {
        let mut parser = Parser::new(Lexer::new("const x = 1; x = 2;"));
        let program = parser.parse_program();
        let mut compiler = Compiler::new();
        let result = compiler.compile(&program);
        assert!(result.is_err());
    }

    #[test]
    fn test_let_then_reassign_ok() {
        compile("let x = 1; x = 2;");
    }

    #[test]
    fn test_index_assign_compiles() {
        compile("let a = [1, 2]; a[0] = 5;");
        compile(r#"let m = {"k": 1}; m["k"] = 2;"#);
    }

    #[test]
    fn test_assign_to_captured_free_variable_is_a_typed_error() {
        let input = "fn make_counter() { let count = 0; fn() { count = count + 1; count } }";
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        let mut compiler = Compiler::new();
        let errors = compiler.compile(&program).expect_err("assigning to a free variable must fail");
        assert_eq!(errors[0].compile_error, Some(CompileError::InvalidAssignmentTarget));
    }

    #[test]
    fn test_undefined_variable_error_is_typed() {
        let mut parser = Parser::new(Lexer::new("x;"));
        let program = parser.parse_program();
        let mut compiler = Compiler::new();
        let errors = compiler.compile(&program).expect_err("undefined variable must fail");
        assert_eq!(
            errors[0].compile_error,
            Some(CompileError::UnknownIdentifier { name: "x".to_string() })
        );
    }

    #[test]
    fn test_invalid_assignment_target_nested_index() {
        let mut parser = Parser::new(Lexer::new("let a = [[1]]; a[0][0] = 9;"));
        let program = parser.parse_program();
        let mut compiler = Compiler::new();
        let errors = compiler.compile(&program).expect_err("nested index assignment must fail");
        assert_eq!(errors[0].compile_error, Some(CompileError::InvalidAssignmentTarget));
    }

    #[test]
    fn test_while_loop_compiles() {
        compile("let i = 0; while i < 10 { i = i + 1; }");
    }

    #[test]
    fn test_break_continue_compile() {
        compile("while true { break; }");
        compile("while true { continue; }");
    }

    #[test]
    fn test_break_outside_loop_errors() {
        let mut parser = Parser::new(Lexer::new("break;"));
        let program = parser.parse_program();
        let mut compiler = Compiler::new();
        assert!(compiler.compile(&program).is_err());
    }

    #[test]
    fn test_spawn_compiles() {
        compile("fn worker(x) { x } spawn worker(1);");
    }

    #[test]
    fn test_channel_ops_compile() {
        compile("let c = channel; c <- 1; c ->;");
    }

    #[test]
    fn test_modulo_compiles() {
        compile("5 % 2;");
    }
}
