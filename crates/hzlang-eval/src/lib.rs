//! hzlang-eval - The evaluator and embedding surface.
//!
//! Ties the pipeline together: source text → tokens → AST → execution. Two
//! entry points are exposed:
//!
//! - [`interpret_source`] runs one program in a fresh interpreter;
//! - [`Session`] keeps the global environment alive across `exec` calls, the
//!   shape the REPL needs. Runtime errors abort the current call but leave
//!   the environment intact for inspection and retry.
//!
//! # Example
//!
//! ```
//! use hzlang_eval::interpret_source;
//!
//! let result = interpret_source("话说 \"你好，杭州！\"");
//! assert!(result.error.is_none());
//! assert_eq!(result.outputs, vec!["你好，杭州！"]);
//! ```

pub mod builtins;
pub mod env;
pub mod error;
pub mod interp;
pub mod value;

pub use env::{EnvRef, Environment};
pub use error::{Error, RuntimeError};
pub use interp::Interpreter;
pub use value::{Number, Value};

// The inspection hooks for tooling, re-exported so embedders need one crate.
pub use hzlang_lex::tokenize;
pub use hzlang_par::parse;

/// Parses source text straight to a program, without running it.
pub fn parse_source(source: &str) -> Result<hzlang_par::Program, Error> {
    let tokens = hzlang_lex::tokenize(source)?;
    Ok(hzlang_par::parse(tokens)?)
}

/// The outcome of one execution: everything printed, in order, and the error
/// that stopped it, if any. Output produced before a failure is retained.
#[derive(Debug)]
pub struct Interpretation {
    pub outputs: Vec<String>,
    pub error: Option<Error>,
}

/// A persistent interpreter session. The global frame survives across `exec`
/// calls and across runtime errors.
pub struct Session {
    interpreter: Interpreter,
}

impl Session {
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
        }
    }

    /// Executes one source text against the session's environment.
    pub fn exec(&mut self, source: &str) -> Interpretation {
        tracing::debug!(bytes = source.len(), "executing source");

        let program = match parse_source(source) {
            Ok(program) => program,
            Err(error) => {
                return Interpretation {
                    outputs: Vec::new(),
                    error: Some(error),
                }
            }
        };

        let error = self.interpreter.run(&program).err().map(Into::into);
        Interpretation {
            outputs: self.interpreter.take_outputs(),
            error,
        }
    }

    /// The interpreter behind this session.
    pub fn interpreter(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot execution in a fresh interpreter.
pub fn interpret_source(source: &str) -> Interpretation {
    Session::new().exec(source)
}
