use std::fmt;

use crate::frontend::token::Position;

pub type Identifier = String;

#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Self { statements: Vec::new() }
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for statement in &self.statements {
            write!(f, "{} ", statement)?;
        }
        write!(f, "}}")
    }
}

/// The left-hand side of an `=` assignment: a plain name, or an index
/// expression (`arr[0]`, `map["k"]`).
#[derive(Debug, Clone)]
pub enum AssignTarget {
    Identifier(Identifier),
    Index { left: Box<Expression>, index: Box<Expression> },
}

impl fmt::Display for AssignTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignTarget::Identifier(name) => write!(f, "{}", name),
            AssignTarget::Index { left, index } => write!(f, "{}[{}]", left, index),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Statement {
    Let { name: Identifier, value: Expression, position: Position },
    Const { name: Identifier, value: Expression, position: Position },
    Assign { target: AssignTarget, value: Expression, position: Position },
    Return { value: Option<Expression>, position: Position },
    Expression { expression: Expression, position: Position },
    Function { name: Identifier, parameters: Vec<Identifier>, body: Block, position: Position },
    While { condition: Expression, body: Block, position: Position },
    Break { position: Position },
    Continue { position: Position },
    Spawn { call: Expression, position: Position },
}

impl Statement {
    pub fn position(&self) -> Position {
        match self {
            Statement::Let { position, .. }
            | Statement::Const { position, .. }
            | Statement::Assign { position, .. }
            | Statement::Return { position, .. }
            | Statement::Expression { position, .. }
            | Statement::Function { position, .. }
            | Statement::While { position, .. }
            | Statement::Break { position }
            | Statement::Continue { position }
            | Statement::Spawn { position, .. } => *position,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value, .. } => write!(f, "let {} = {};", name, value),
            Statement::Const { name, value, .. } => write!(f, "const {} = {};", name, value),
            Statement::Assign { target, value, .. } => write!(f, "{} = {};", target, value),
            Statement::Return { value: Some(v), .. } => write!(f, "return {};", v),
            Statement::Return { value: None, .. } => write!(f, "return;"),
            Statement::Expression { expression, .. } => write!(f, "{}", expression),
            Statement::Function { name, parameters, body, .. } => {
                write!(f, "fn {}({}) {}", name, parameters.join(", "), body)
            }
            Statement::While { condition, body, .. } => write!(f, "while {} {}", condition, body),
            Statement::Break { .. } => write!(f, "break;"),
            Statement::Continue { .. } => write!(f, "continue;"),
            Statement::Spawn { call, .. } => write!(f, "spawn {};", call),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Identifier),
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Prefix {
        operator: String,
        right: Box<Expression>,
    },
    Infix {
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: Block,
        alternative: Option<Block>,
    },
    Function {
        parameters: Vec<Identifier>,
        body: Block,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Array {
        elements: Vec<Expression>,
    },
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
    Hash {
        pairs: Vec<(Expression, Expression)>,
    },
    Channel,
    ChanSend {
        channel: Box<Expression>,
        value: Box<Expression>,
    },
    ChanRecv {
        channel: Box<Expression>,
    },
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Integer(v) => write!(f, "{}", v),
            Expression::Float(v) => write!(f, "{}", v),
            Expression::String(v) => write!(f, "\"{}\"", v),
            Expression::Boolean(v) => write!(f, "{}", v),
            Expression::Null => write!(f, "null"),
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix { left, operator, right } => {
                write!(f, "({} {} {})", left, operator, right)
            }
            Expression::If { condition, consequence, alternative } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {}", alt)?;
                }
                Ok(())
            }
            Expression::Function { parameters, body } => {
                write!(f, "fn({}) {}", parameters.join(", "), body)
            }
            Expression::Call { function, arguments } => {
                let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", function, args.join(", "))
            }
            Expression::Array { elements } => {
                let elems: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elems.join(", "))
            }
            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
            Expression::Hash { pairs } => {
                let items: Vec<String> = pairs.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", items.join(", "))
            }
            Expression::Channel => write!(f, "channel"),
            Expression::ChanSend { channel, value } => write!(f, "({} <- {})", channel, value),
            Expression::ChanRecv { channel } => write!(f, "({} ->)", channel),
        }
    }
}
