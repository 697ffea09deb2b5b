use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::bytecode::bytecode::Bytecode;
use crate::bytecode::op_code::{OpCode, read_u16, read_u8};
use crate::error::RuntimeError;
use crate::runtime::{
    builtins::get_builtin_by_index, channel, closure::Closure, compiled_function::CompiledFunction,
    frame::Frame, object::Object, scheduler,
};

pub const STACK_SIZE: usize = 2048;
pub const GLOBALS_SIZE: usize = 65536;
pub const MAX_FRAMES: usize = 1024;

pub struct VM {
    constants: Arc<Vec<Object>>,
    stack: Vec<Object>,
    sp: usize,
    pub globals: Arc<Mutex<Vec<Object>>>,
    frames: Vec<Frame>,
    frame_index: usize,
    cancelled: Arc<AtomicBool>,
}

impl VM {
    pub fn new(bytecode: Bytecode) -> Self {
        Self::new_with_globals(
            bytecode,
            Arc::new(Mutex::new(vec![Object::Null; GLOBALS_SIZE])),
            Arc::new(AtomicBool::new(false)),
        )
    }

    /// Used by the REPL to keep bindings alive across separate inputs: the
    /// same globals `Arc` is handed to each freshly-compiled VM in turn.
    pub fn new_with_globals(
        bytecode: Bytecode,
        globals: Arc<Mutex<Vec<Object>>>,
        cancelled: Arc<AtomicBool>,
    ) -> Self {
        let main_fn = Arc::new(CompiledFunction::new(bytecode.instructions, 0, 0));
        let main_closure = Arc::new(Closure::new(main_fn, vec![]));
        let main_frame = Frame::new(main_closure, 0);

        Self {
            constants: Arc::new(bytecode.constants),
            stack: vec![Object::Null; STACK_SIZE],
            sp: 0,
            globals,
            frames: vec![main_frame],
            frame_index: 0,
            cancelled,
        }
    }

    /// Entry point for a spawned activity: a VM whose only frame is a call
    /// to `closure` with `args` already bound as its locals.
    pub(crate) fn for_activity(
        closure: Arc<Closure>,
        args: Vec<Object>,
        constants: Arc<Vec<Object>>,
        globals: Arc<Mutex<Vec<Object>>>,
        cancelled: Arc<AtomicBool>,
    ) -> Result<Self, RuntimeError> {
        let want = closure.function.num_parameters;
        if args.len() != want {
            return Err(RuntimeError::WrongArity { got: args.len(), want });
        }

        let num_locals = closure.function.num_locals;
        let mut stack = vec![Object::Null; STACK_SIZE];
        for (i, arg) in args.into_iter().enumerate() {
            stack[i] = arg;
        }

        let frame = Frame::new(closure, 0);

        Ok(Self {
            constants,
            stack,
            sp: num_locals,
            globals,
            frames: vec![frame],
            frame_index: 0,
            cancelled,
        })
    }

    pub fn last_popped_stack_elem(&self) -> &Object {
        &self.stack[self.sp]
    }

    pub fn run(&mut self) -> Result<(), RuntimeError> {
        while self.current_frame().ip < self.current_frame().instructions().len() {
            if self.cancelled.load(Ordering::Relaxed) {
                return Err(RuntimeError::Cancelled);
            }

            let ip = self.current_frame().ip;
            let instructions = self.current_frame().instructions().clone();
            let op = OpCode::from(instructions[ip]);

            match op {
                OpCode::OpConstant => {
                    let const_idx = read_u16(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 3;
                    self.push(self.constants[const_idx].clone())?;
                }
                OpCode::OpTrue => {
                    self.current_frame_mut().ip += 1;
                    self.push(Object::Boolean(true))?;
                }
                OpCode::OpFalse => {
                    self.current_frame_mut().ip += 1;
                    self.push(Object::Boolean(false))?;
                }
                OpCode::OpNull => {
                    self.current_frame_mut().ip += 1;
                    self.push(Object::Null)?;
                }
                OpCode::OpAdd | OpCode::OpSub | OpCode::OpMul | OpCode::OpDiv | OpCode::OpMod => {
                    self.current_frame_mut().ip += 1;
                    self.execute_binary_operation(op)?;
                }
                OpCode::OpEqual
                | OpCode::OpNotEqual
                | OpCode::OpGreaterThan
                | OpCode::OpLessThanOrEqual
                | OpCode::OpGreaterThanOrEqual => {
                    self.current_frame_mut().ip += 1;
                    self.execute_comparison(op)?;
                }
                OpCode::OpBang => {
                    self.current_frame_mut().ip += 1;
                    let operand = self.pop();
                    self.push(Object::Boolean(!operand.is_truthy()))?;
                }
                OpCode::OpMinus => {
                    self.current_frame_mut().ip += 1;
                    let operand = self.pop();
                    let result = match operand {
                        Object::Integer(v) => Object::Integer(-v),
                        Object::Float(v) => Object::Float(-v),
                        other => {
                            return Err(RuntimeError::UnsupportedOperandTypes {
                                operator: "-".to_string(),
                                left: other.type_name(),
                                right: other.type_name(),
                            })
                        }
                    };
                    self.push(result)?;
                }
                OpCode::OpJump => {
                    let target = read_u16(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip = target;
                }
                OpCode::OpJumpNotTruthy => {
                    let target = read_u16(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 3;
                    let condition = self.pop();
                    if !condition.is_truthy() {
                        self.current_frame_mut().ip = target;
                    }
                }
                OpCode::OpGetGlobal => {
                    let idx = read_u16(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 3;
                    let value = self.globals.lock().unwrap()[idx].clone();
                    self.push(value)?;
                }
                OpCode::OpSetGlobal => {
                    let idx = read_u16(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 3;
                    let value = self.pop();
                    self.globals.lock().unwrap()[idx] = value;
                }
                OpCode::OpGetLocal => {
                    let idx = read_u8(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 2;
                    let base = self.current_frame().base_pointer;
                    let value = self.stack[base + idx].clone();
                    self.push(value)?;
                }
                OpCode::OpSetLocal => {
                    let idx = read_u8(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 2;
                    let base = self.current_frame().base_pointer;
                    let value = self.pop();
                    self.stack[base + idx] = value;
                }
                OpCode::OpGetFree => {
                    let idx = read_u8(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 2;
                    let value = self.current_frame().closure.free[idx].clone();
                    self.push(value)?;
                }
                OpCode::OpGetBuiltin => {
                    let idx = read_u8(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 2;
                    let builtin = get_builtin_by_index(idx).expect("valid builtin index");
                    self.push(Object::Builtin(builtin.clone()))?;
                }
                OpCode::OpCurrentClosure => {
                    self.current_frame_mut().ip += 1;
                    let closure = self.current_frame().closure.clone();
                    self.push(Object::Closure(closure))?;
                }
                OpCode::OpArray => {
                    let n = read_u16(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 3;
                    let array = self.build_array(n);
                    self.sp -= n;
                    self.push(array)?;
                }
                OpCode::OpHash => {
                    let n = read_u16(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 3;
                    let hash = self.build_hash(n)?;
                    self.sp -= n;
                    self.push(hash)?;
                }
                OpCode::OpIndex => {
                    self.current_frame_mut().ip += 1;
                    let index = self.pop();
                    let left = self.pop();
                    let result = self.execute_index_expression(left, index)?;
                    self.push(result)?;
                }
                OpCode::OpSetIndex => {
                    self.current_frame_mut().ip += 1;
                    let value = self.pop();
                    let index = self.pop();
                    let container = self.pop();
                    let updated = self.execute_set_index(container, index, value)?;
                    self.push(updated)?;
                }
                OpCode::OpClosure => {
                    let const_idx = read_u16(&instructions, ip + 1) as usize;
                    let num_free = read_u8(&instructions, ip + 3) as usize;
                    self.current_frame_mut().ip += 4;
                    self.push_closure(const_idx, num_free)?;
                }
                OpCode::OpCall => {
                    let num_args = read_u8(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 2;
                    self.execute_call(num_args)?;
                }
                OpCode::OpReturnValue => {
                    let return_value = self.pop();
                    let frame = self.pop_frame();
                    self.sp = frame.base_pointer - 1;
                    self.push(return_value)?;
                }
                OpCode::OpReturn => {
                    let frame = self.pop_frame();
                    self.sp = frame.base_pointer - 1;
                    self.push(Object::Null)?;
                }
                OpCode::OpPop => {
                    self.current_frame_mut().ip += 1;
                    self.pop();
                }
                OpCode::OpSpawn => {
                    let num_args = read_u8(&instructions, ip + 1) as usize;
                    self.current_frame_mut().ip += 2;
                    self.execute_spawn(num_args)?;
                }
                OpCode::OpMakeChannel => {
                    self.current_frame_mut().ip += 1;
                    self.push(Object::Channel(channel::new_shared()))?;
                }
                OpCode::OpChanSend => {
                    self.current_frame_mut().ip += 1;
                    let value = self.pop();
                    let chan = self.pop();
                    match chan {
                        Object::Channel(c) => {
                            c.send(value, &self.cancelled)?;
                            self.push(Object::Null)?;
                        }
                        other => {
                            return Err(RuntimeError::UnsupportedOperandTypes {
                                operator: "<-".to_string(),
                                left: other.type_name(),
                                right: value.type_name(),
                            })
                        }
                    }
                }
                OpCode::OpChanRecv => {
                    self.current_frame_mut().ip += 1;
                    let chan = self.pop();
                    match chan {
                        Object::Channel(c) => {
                            let value = c.recv(&self.cancelled)?;
                            self.push(value)?;
                        }
                        other => {
                            return Err(RuntimeError::UnsupportedOperandTypes {
                                operator: "->".to_string(),
                                left: other.type_name(),
                                right: other.type_name(),
                            })
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn build_array(&self, n: usize) -> Object {
        Object::Array(self.stack[self.sp - n..self.sp].to_vec())
    }

    fn build_hash(&self, n: usize) -> Result<Object, RuntimeError> {
        let mut pairs = HashMap::new();
        let mut i = self.sp - n;
        while i < self.sp {
            let key = self.stack[i].clone();
            let value = self.stack[i + 1].clone();
            let hash_key = key
                .to_hash_key()
                .ok_or(RuntimeError::UnhashableKey { type_name: key.type_name() })?;
            pairs.insert(hash_key, value);
            i += 2;
        }
        Ok(Object::Hash(pairs))
    }

    fn execute_index_expression(&self, left: Object, index: Object) -> Result<Object, RuntimeError> {
        match (&left, &index) {
            (Object::Array(_), Object::Integer(_)) => self.execute_array_index(left, index),
            (Object::Hash(_), _) => self.execute_hash_index(left, index),
            _ => Err(RuntimeError::UnsupportedOperandTypes {
                operator: "[]".to_string(),
                left: left.type_name(),
                right: index.type_name(),
            }),
        }
    }

    fn execute_array_index(&self, array: Object, index: Object) -> Result<Object, RuntimeError> {
        let Object::Array(elements) = array else { unreachable!() };
        let Object::Integer(idx) = index else { unreachable!() };

        if idx < 0 || idx as usize >= elements.len() {
            return Ok(Object::Null);
        }
        Ok(elements[idx as usize].clone())
    }

    fn execute_hash_index(&self, hash: Object, index: Object) -> Result<Object, RuntimeError> {
        let Object::Hash(pairs) = hash else { unreachable!() };
        let key = index
            .to_hash_key()
            .ok_or(RuntimeError::UnhashableKey { type_name: index.type_name() })?;
        Ok(pairs.get(&key).cloned().unwrap_or(Object::Null))
    }

    /// `arr[idx] = value;` / `map[key] = value;`: mutates a clone of the
    /// container popped off the stack and pushes it back so the compiler's
    /// `emit_store` can write it into the variable the container came from.
    fn execute_set_index(&self, container: Object, index: Object, value: Object) -> Result<Object, RuntimeError> {
        let container_type = container.type_name();
        match container {
            Object::Array(mut elements) => {
                let Object::Integer(idx) = index else {
                    return Err(RuntimeError::UnsupportedOperandTypes {
                        operator: "[]=".to_string(),
                        left: container_type,
                        right: index.type_name(),
                    });
                };
                if idx < 0 || idx as usize >= elements.len() {
                    return Err(RuntimeError::IndexOutOfBounds { index: idx });
                }
                elements[idx as usize] = value;
                Ok(Object::Array(elements))
            }
            Object::Hash(mut pairs) => {
                let key = index
                    .to_hash_key()
                    .ok_or(RuntimeError::UnhashableKey { type_name: index.type_name() })?;
                pairs.insert(key, value);
                Ok(Object::Hash(pairs))
            }
            _ => Err(RuntimeError::UnsupportedOperandTypes {
                operator: "[]=".to_string(),
                left: container_type,
                right: index.type_name(),
            }),
        }
    }

    fn execute_call(&mut self, num_args: usize) -> Result<(), RuntimeError> {
        let callee = self.stack[self.sp - 1 - num_args].clone();
        match callee {
            Object::Closure(closure) => self.call_closure(closure, num_args),
            Object::Builtin(builtin) => {
                let args = self.stack[self.sp - num_args..self.sp].to_vec();
                self.sp -= num_args + 1;
                let result = (builtin.func)(args)?;
                self.push(result)
            }
            other => Err(RuntimeError::NotCallable { type_name: other.type_name() }),
        }
    }

    fn call_closure(&mut self, closure: Arc<Closure>, num_args: usize) -> Result<(), RuntimeError> {
        let want = closure.function.num_parameters;
        if num_args != want {
            return Err(RuntimeError::WrongArity { got: num_args, want });
        }

        let num_locals = closure.function.num_locals;
        let base_pointer = self.sp - num_args;
        let frame = Frame::new(closure, base_pointer);
        self.push_frame(frame)?;
        self.sp = base_pointer + num_locals;
        Ok(())
    }

    fn execute_spawn(&mut self, num_args: usize) -> Result<(), RuntimeError> {
        let callee = self.stack[self.sp - 1 - num_args].clone();
        let args = self.stack[self.sp - num_args..self.sp].to_vec();
        self.sp -= num_args + 1;

        let closure = match callee {
            Object::Closure(c) => c,
            other => return Err(RuntimeError::NotCallable { type_name: other.type_name() }),
        };

        scheduler::spawn(closure, args, self.constants.clone(), self.globals.clone(), self.cancelled.clone());
        Ok(())
    }

    fn push_closure(&mut self, const_idx: usize, num_free: usize) -> Result<(), RuntimeError> {
        let constant = self.constants[const_idx].clone();
        let Object::Function(function) = constant else {
            return Err(RuntimeError::NotCallable { type_name: constant.type_name() });
        };

        let free = self.stack[self.sp - num_free..self.sp].to_vec();
        self.sp -= num_free;

        self.push(Object::Closure(Arc::new(Closure::new(function, free))))
    }

    fn execute_binary_operation(&mut self, op: OpCode) -> Result<(), RuntimeError> {
        let right = self.pop();
        let left = self.pop();

        if let (Object::String(l), Object::String(r)) = (&left, &right) {
            if op == OpCode::OpAdd {
                return self.push(Object::String(format!("{}{}", l, r)));
            }
        }

        if left.is_number() && right.is_number() {
            let l = left.as_f64().unwrap();
            let r = right.as_f64().unwrap();
            let both_integer = matches!((&left, &right), (Object::Integer(_), Object::Integer(_)));

            let result = match op {
                OpCode::OpAdd => l + r,
                OpCode::OpSub => l - r,
                OpCode::OpMul => l * r,
                OpCode::OpDiv => {
                    if r == 0.0 {
                        return Err(RuntimeError::DivideByZero);
                    }
                    l / r
                }
                OpCode::OpMod => {
                    if r == 0.0 {
                        return Err(RuntimeError::DivideByZero);
                    }
                    l % r
                }
                _ => unreachable!(),
            };

            return if both_integer {
                self.push(Object::Integer(result as i64))
            } else {
                self.push(Object::Float(result))
            };
        }

        Err(RuntimeError::UnsupportedOperandTypes {
            operator: format!("{:?}", op),
            left: left.type_name(),
            right: right.type_name(),
        })
    }

    fn execute_comparison(&mut self, op: OpCode) -> Result<(), RuntimeError> {
        let right = self.pop();
        let left = self.pop();

        if left.is_number() && right.is_number() {
            let l = left.as_f64().unwrap();
            let r = right.as_f64().unwrap();
            let result = match op {
                OpCode::OpEqual => l == r,
                OpCode::OpNotEqual => l != r,
                OpCode::OpGreaterThan => l > r,
                OpCode::OpLessThanOrEqual => l <= r,
                OpCode::OpGreaterThanOrEqual => l >= r,
                _ => unreachable!(),
            };
            return self.push(Object::Boolean(result));
        }

        if matches!(left, Object::Array(_) | Object::Hash(_))
            || matches!(right, Object::Array(_) | Object::Hash(_))
        {
            return Err(RuntimeError::UnsupportedOperandTypes {
                operator: format!("{:?}", op),
                left: left.type_name(),
                right: right.type_name(),
            });
        }

        let result = match op {
            OpCode::OpEqual => left == right,
            OpCode::OpNotEqual => left != right,
            _ => {
                return Err(RuntimeError::UnsupportedOperandTypes {
                    operator: format!("{:?}", op),
                    left: left.type_name(),
                    right: right.type_name(),
                })
            }
        };
        self.push(Object::Boolean(result))
    }

    fn current_frame(&self) -> &Frame {
        &self.frames[self.frame_index]
    }

    fn current_frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.frame_index]
    }

    fn push_frame(&mut self, frame: Frame) -> Result<(), RuntimeError> {
        if self.frames.len() >= MAX_FRAMES {
            return Err(RuntimeError::FramesOverflow);
        }
        self.frames.push(frame);
        self.frame_index += 1;
        Ok(())
    }

    fn pop_frame(&mut self) -> Frame {
        self.frame_index -= 1;
        self.frames.pop().unwrap()
    }

    fn push(&mut self, obj: Object) -> Result<(), RuntimeError> {
        if self.sp >= STACK_SIZE {
            return Err(RuntimeError::StackOverflow);
        }
        self.stack[self.sp] = obj;
        self.sp += 1;
        Ok(())
    }

    fn pop(&mut self) -> Object {
        let obj = self.stack[self.sp - 1].clone();
        self.sp -= 1;
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::compiler::Compiler;
    use crate::frontend::{lexer::Lexer, parser::Parser};

    fn run(input: &str) -> Object {
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        assert!(parser.errors.is_empty(), "parser errors: {:?}", parser.errors);

        let mut compiler = Compiler::new();
        compiler.compile(&program).expect("compile errors");

        let mut vm = VM::new(compiler.bytecode());
        vm.run().expect("vm error");
        vm.last_popped_stack_elem().clone()
    }

    #[test]
    fn test_integer_arithmetic() {
        assert_eq!(run("1 + 2 * 3;"), Object::Integer(7));
        assert_eq!(run("(1 + 2) * 3;"), Object::Integer(9));
        assert_eq!(run("10 % 3;"), Object::Integer(1));
    }

    #[test]
    fn test_float_arithmetic() {
        assert_eq!(run("1.5 + 2.5;"), Object::Float(4.0));
        assert_eq!(run("1 + 2.5;"), Object::Float(3.5));
    }

    #[test]
    fn test_divide_by_zero() {
        let mut parser = Parser::new(Lexer::new("1 / 0;"));
        let program = parser.parse_program();
        let mut compiler = Compiler::new();
        compiler.compile(&program).unwrap();
        let mut vm = VM::new(compiler.bytecode());
        assert_eq!(vm.run(), Err(RuntimeError::DivideByZero));
    }

    #[test]
    fn test_boolean_expressions() {
        assert_eq!(run("1 < 2;"), Object::Boolean(true));
        assert_eq!(run("1 <= 1;"), Object::Boolean(true));
        assert_eq!(run("2 >= 3;"), Object::Boolean(false));
        assert_eq!(run("true && false;"), Object::Boolean(false));
        assert_eq!(run("true || false;"), Object::Boolean(true));
    }

    #[test]
    fn test_conditionals() {
        assert_eq!(run("if (true) { 10 }"), Object::Integer(10));
        assert_eq!(run("if (false) { 10 }"), Object::Null);
    }

    #[test]
    fn test_while_loop() {
        assert_eq!(run("let i = 0; while i < 5 { i = i + 1; } i;"), Object::Integer(5));
    }

    #[test]
    fn test_break() {
        assert_eq!(
            run("let i = 0; while true { if i == 3 { break; } i = i + 1; } i;"),
            Object::Integer(3)
        );
    }

    #[test]
    fn test_global_let_and_const() {
        assert_eq!(run("let one = 1; let two = 2; one + two;"), Object::Integer(3));
        assert_eq!(run("const x = 5; x;"), Object::Integer(5));
    }

    #[test]
    fn test_functions_and_closures() {
        assert_eq!(run("let add = fn(a, b) { a + b }; add(2, 3);"), Object::Integer(5));
        assert_eq!(
            run("let adder = fn(a) { fn(b) { a + b } }; adder(2)(3);"),
            Object::Integer(5)
        );
    }

    #[test]
    fn test_recursive_fibonacci() {
        let input = "fn fib(x) { if (x < 2) { x } else { fib(x - 1) + fib(x - 2) } } fib(10);";
        assert_eq!(run(input), Object::Integer(55));
    }

    #[test]
    fn test_arrays_and_index() {
        assert_eq!(run("[1, 2, 3][1];"), Object::Integer(2));
        assert_eq!(run("[1, 2, 3][10];"), Object::Null);
        assert_eq!(run("[1, 2, 3][-1];"), Object::Null);
    }

    #[test]
    fn test_hash_index() {
        assert_eq!(run(r#"{"a": 1, "b": 2}["a"];"#), Object::Integer(1));
    }

    #[test]
    fn test_index_assign_array() {
        let input = "let a = [1, 2, 3]; a[1] = 20; a[1];";
        assert_eq!(run(input), Object::Integer(20));
    }

    #[test]
    fn test_index_assign_hash() {
        let input = r#"let m = {"a": 1}; m["a"] = 2; m["b"] = 3; m["a"] + m["b"];"#;
        assert_eq!(run(input), Object::Integer(5));
    }

    #[test]
    fn test_array_equality_is_a_runtime_error() {
        let mut parser = Parser::new(Lexer::new("[1, 2] == [1, 2];"));
        let program = parser.parse_program();
        let mut compiler = Compiler::new();
        compiler.compile(&program).unwrap();
        let mut vm = VM::new(compiler.bytecode());
        assert!(matches!(
            vm.run(),
            Err(RuntimeError::UnsupportedOperandTypes { .. })
        ));
    }

    #[test]
    fn test_hash_equality_is_a_runtime_error() {
        let mut parser = Parser::new(Lexer::new(r#"{"a": 1} == {"a": 1};"#));
        let program = parser.parse_program();
        let mut compiler = Compiler::new();
        compiler.compile(&program).unwrap();
        let mut vm = VM::new(compiler.bytecode());
        assert!(matches!(
            vm.run(),
            Err(RuntimeError::UnsupportedOperandTypes { .. })
        ));
    }

    #[test]
    fn test_builtins() {
        assert_eq!(run(r#"len("hello");"#), Object::Integer(5));
        assert_eq!(
            run("push([1, 2], 3);"),
            Object::Array(vec![Object::Integer(1), Object::Integer(2), Object::Integer(3)])
        );
    }

    #[test]
    fn test_channel_send_recv_same_activity() {
        assert_eq!(run("let c = channel; c <- 5; c ->;"), Object::Integer(5));
    }

    #[test]
    fn test_spawn_and_channel_rendezvous() {
        let input = "let c = channel; fn worker(chan) { chan <- 99; } spawn worker(c); c ->;";
        assert_eq!(run(input), Object::Integer(99));
    }
}
