//! Error taxonomy.

use hzlang_lex::LexError;
use hzlang_par::ParseError;
use thiserror::Error;

/// A runtime failure. Aborts the current execution; in a session the global
/// environment survives.
#[derive(Debug, Error, PartialEq)]
pub enum RuntimeError {
    #[error("未定义的变量: {name}")]
    Name { name: String },

    #[error("类型错误: {message}")]
    Type { message: String },

    #[error("函数 {name} 期望 {expected} 个参数，但提供了 {got} 个")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("除零错误")]
    DivideByZero,

    #[error("运行时错误: {0}")]
    Internal(String),
}

impl RuntimeError {
    pub(crate) fn type_error(message: impl Into<String>) -> Self {
        RuntimeError::Type {
            message: message.into(),
        }
    }
}

/// Any way an execution can fail: lexing, parsing, or running.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
