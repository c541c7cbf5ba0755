//! The tree-walking evaluator.

use std::rc::Rc;

use hzlang_par::ast::*;
use hzlang_util::Symbol;

use crate::builtins;
use crate::env::{EnvRef, Environment};
use crate::error::RuntimeError;
use crate::value::{Number, UserFn, Value};

/// How a statement finished: fell through, or unwound via 有数.
pub enum Flow {
    Normal,
    Return(Value),
}

/// The interpreter: a global frame plus the output sink.
///
/// All observable effects happen in source order; 话说 lines go to the sink
/// and to stdout as they are produced, so output printed before a failure is
/// retained.
pub struct Interpreter {
    globals: EnvRef,
    outputs: Vec<String>,
}

impl Interpreter {
    /// Creates an interpreter with the built-ins installed.
    pub fn new() -> Self {
        let globals = Environment::global();
        builtins::install(&globals);
        Self {
            globals,
            outputs: Vec::new(),
        }
    }

    /// The global frame, alive for the lifetime of the interpreter.
    pub fn globals(&self) -> &EnvRef {
        &self.globals
    }

    /// Takes the lines printed since the last call.
    pub fn take_outputs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outputs)
    }

    /// Runs a program's statements against the global frame.
    ///
    /// A 有数 at top level is absorbed: the rest of the program is skipped
    /// quietly, not reported as an error.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let globals = Rc::clone(&self.globals);
        for stmt in &program.statements {
            if let Flow::Return(_) = self.exec_stmt(stmt, &globals)? {
                tracing::debug!("top-level return absorbed");
                break;
            }
        }
        Ok(())
    }

    fn exec_block(&mut self, stmts: &[Stmt], env: &EnvRef) -> Result<Flow, RuntimeError> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &EnvRef) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::VarDecl(decl) => {
                let value = match &decl.init {
                    Some(init) => self.eval_expr(init, env)?,
                    None => Value::Null,
                };
                env.borrow_mut().define(decl.name, value);
                Ok(Flow::Normal)
            }

            Stmt::Assign(assign) => {
                let value = self.eval_expr(&assign.value, env)?;
                if Environment::assign(env, assign.name, value) {
                    Ok(Flow::Normal)
                } else {
                    Err(RuntimeError::Name {
                        name: assign.name.as_str().to_string(),
                    })
                }
            }

            Stmt::Print(expr) => {
                let value = self.eval_expr(expr, env)?;
                let line = value.to_string();
                println!("{line}");
                self.outputs.push(line);
                Ok(Flow::Normal)
            }

            Stmt::If(stmt) => {
                if self.eval_expr(&stmt.cond, env)?.is_truthy() {
                    self.exec_block(&stmt.then_branch, env)
                } else if let Some(else_branch) = &stmt.else_branch {
                    self.exec_block(else_branch, env)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While(stmt) => {
                while self.eval_expr(&stmt.cond, env)?.is_truthy() {
                    if let Flow::Return(value) = self.exec_block(&stmt.body, env)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::FuncDef(def) => {
                let function = UserFn {
                    name: def.name,
                    params: def.params.clone(),
                    body: def.body.clone(),
                    // The defining frame chain itself, so the body sees later
                    // mutations and the function can call itself.
                    env: Rc::clone(env),
                };
                env.borrow_mut()
                    .define(def.name, Value::Function(Rc::new(function)));
                Ok(Flow::Normal)
            }

            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }

            Stmt::Expr(expr) => {
                self.eval_expr(expr, env)?;
                Ok(Flow::Normal)
            }
        }
    }

    fn eval_expr(&mut self, expr: &Expr, env: &EnvRef) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(lit) => Ok(match lit {
                Lit::Int(i) => Value::Number(Number::Int(*i)),
                Lit::Float(f) => Value::Number(Number::Float(*f)),
                Lit::Str(s) => Value::Str(s.clone()),
                Lit::Bool(b) => Value::Bool(*b),
                Lit::Null => Value::Null,
            }),

            Expr::Ident(name) => Environment::get(env, *name).ok_or_else(|| RuntimeError::Name {
                name: name.as_str().to_string(),
            }),

            Expr::Unary(unary) => {
                let operand = self.eval_expr(&unary.operand, env)?;
                match unary.op {
                    UnOp::Neg => match operand {
                        Value::Number(n) => Ok(Value::Number(n.neg())),
                        other => Err(RuntimeError::type_error(format!(
                            "不能对{}取负",
                            other.type_name()
                        ))),
                    },
                    UnOp::Not => Ok(Value::Bool(!operand.is_truthy())),
                }
            }

            Expr::Binary(binary) => self.eval_binary(binary, env),

            Expr::Call(call) => self.eval_call(call, env),
        }
    }

    fn eval_binary(&mut self, binary: &BinaryExpr, env: &EnvRef) -> Result<Value, RuntimeError> {
        let left = self.eval_expr(&binary.left, env)?;

        // Short circuit: the deciding operand comes back unchanged.
        match binary.op {
            BinOp::And => {
                return if left.is_truthy() {
                    self.eval_expr(&binary.right, env)
                } else {
                    Ok(left)
                };
            }
            BinOp::Or => {
                return if left.is_truthy() {
                    Ok(left)
                } else {
                    self.eval_expr(&binary.right, env)
                };
            }
            _ => {}
        }

        let right = self.eval_expr(&binary.right, env)?;

        match binary.op {
            BinOp::Add => match (&left, &right) {
                // 加 concatenates as soon as one side is a string.
                (Value::Str(_), _) | (_, Value::Str(_)) => {
                    Ok(Value::Str(format!("{left}{right}")))
                }
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.add(*b))),
                _ => Err(self.binary_type_error("加", &left, &right)),
            },

            BinOp::Sub => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.sub(*b))),
                _ => Err(self.binary_type_error("减", &left, &right)),
            },

            BinOp::Mul => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.mul(*b))),
                _ => Err(self.binary_type_error("乘", &left, &right)),
            },

            BinOp::Div => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => match a.div(*b) {
                    Some(n) => Ok(Value::Number(n)),
                    None => Err(RuntimeError::DivideByZero),
                },
                _ => Err(self.binary_type_error("除", &left, &right)),
            },

            BinOp::Eq => Ok(Value::Bool(left == right)),
            BinOp::Ne => Ok(Value::Bool(left != right)),

            BinOp::Gt | BinOp::Lt | BinOp::Ge | BinOp::Le => {
                self.eval_comparison(binary.op, &left, &right)
            }

            BinOp::And | BinOp::Or => unreachable!("short-circuited above"),
        }
    }

    /// Ordering: numeric on numbers, lexicographic on strings.
    fn eval_comparison(
        &self,
        op: BinOp,
        left: &Value,
        right: &Value,
    ) -> Result<Value, RuntimeError> {
        let result = match (left, right) {
            (Value::Number(a), Value::Number(b)) => match op {
                BinOp::Gt => a > b,
                BinOp::Lt => a < b,
                BinOp::Ge => a >= b,
                BinOp::Le => a <= b,
                _ => unreachable!(),
            },
            (Value::Str(a), Value::Str(b)) => match op {
                BinOp::Gt => a > b,
                BinOp::Lt => a < b,
                BinOp::Ge => a >= b,
                BinOp::Le => a <= b,
                _ => unreachable!(),
            },
            _ => {
                let word = match op {
                    BinOp::Gt => "大过",
                    BinOp::Lt => "小过",
                    BinOp::Ge => "大等于",
                    BinOp::Le => "小等于",
                    _ => unreachable!(),
                };
                return Err(self.binary_type_error(word, left, right));
            }
        };
        Ok(Value::Bool(result))
    }

    fn eval_call(&mut self, call: &CallExpr, env: &EnvRef) -> Result<Value, RuntimeError> {
        let callee = Environment::get(env, call.name).ok_or_else(|| RuntimeError::Name {
            name: call.name.as_str().to_string(),
        })?;

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_expr(arg, env)?);
        }

        match callee {
            Value::Builtin(builtin) => (builtin.func)(&args),
            Value::Function(function) => self.call_user_fn(&function, args),
            other => Err(RuntimeError::type_error(format!(
                "{} 不是一个函数，是{}",
                call.name.as_str(),
                other.type_name()
            ))),
        }
    }

    fn call_user_fn(&mut self, function: &UserFn, args: Vec<Value>) -> Result<Value, RuntimeError> {
        if args.len() != function.params.len() {
            return Err(RuntimeError::Arity {
                name: function.name.as_str().to_string(),
                expected: function.params.len(),
                got: args.len(),
            });
        }

        // New frame under the *captured* environment, not the caller's.
        let frame = Environment::with_parent(Rc::clone(&function.env));
        {
            let mut bindings = frame.borrow_mut();
            for (param, arg) in function.params.iter().zip(args) {
                bindings.define(*param, arg);
            }
        }

        match self.exec_block(&function.body, &frame)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Null),
        }
    }

    fn binary_type_error(&self, op_word: &str, left: &Value, right: &Value) -> RuntimeError {
        RuntimeError::type_error(format!(
            "{} 和 {} 不能做 {op_word} 运算",
            left.type_name(),
            right.type_name()
        ))
    }

    /// Defines a binding in the global frame. Used by embedders and tests.
    pub fn define_global(&mut self, name: Symbol, value: Value) {
        self.globals.borrow_mut().define(name, value);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
