//! Typed error taxonomy shared by every pipeline stage.
//!
//! Every stage's failure modes are a closed, nameable set, so each builds
//! its own typed error first and converts it into a `frontend::diagnostic::
//! Diagnostic` for display (see the `From` impls in `diagnostic.rs`), giving
//! tests and callers a typed value to match on instead of scraping a
//! rendered message string.
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LexError {
    #[error("illegal character `{character}`")]
    IllegalCharacter { character: char },
    #[error("unterminated string literal")]
    UnterminatedString,
}

impl LexError {
    pub fn code(&self) -> &'static str {
        match self {
            LexError::IllegalCharacter { .. } => "L0001",
            LexError::UnterminatedString => "L0002",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: String, got: String },
    #[error("no prefix parse function for {token}")]
    NoPrefixParseFn { token: String },
}

impl ParseError {
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } => "P0001",
            ParseError::NoPrefixParseFn { .. } => "P0002",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompileError {
    #[error("cannot find value `{name}` in this scope")]
    UnknownIdentifier { name: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("unsupported operator `{operator}`")]
    UnsupportedOperator { operator: String },
    #[error("the name `{name}` is defined multiple times")]
    DuplicateConst { name: String },
}

impl CompileError {
    /// Stable short code rendered by `Diagnostic::render` (e.g. `[E0001]`).
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::UnknownIdentifier { .. } => "E0001",
            CompileError::InvalidAssignmentTarget => "E0002",
            CompileError::UnsupportedOperator { .. } => "E0003",
            CompileError::DuplicateConst { .. } => "E0004",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuntimeError {
    #[error("wrong number of arguments: got={got}, want={want}")]
    WrongArity { got: usize, want: usize },
    #[error("not callable: {type_name}")]
    NotCallable { type_name: &'static str },
    #[error("unsupported operand types: {operator} {left} {right}")]
    UnsupportedOperandTypes {
        operator: String,
        left: &'static str,
        right: &'static str,
    },
    #[error("index out of bounds: {index}")]
    IndexOutOfBounds { index: i64 },
    #[error("unusable as hash key: {type_name}")]
    UnhashableKey { type_name: &'static str },
    #[error("stack overflow")]
    StackOverflow,
    #[error("frames overflow")]
    FramesOverflow,
    #[error("divide by zero")]
    DivideByZero,
    #[error("send on closed channel")]
    SendOnClosedChannel,
    #[error("cancelled")]
    Cancelled,
}
