//! Runtime values.

use std::fmt;
use std::rc::Rc;

use hzlang_par::ast::Stmt;
use hzlang_util::Symbol;

use crate::env::EnvRef;
use crate::error::RuntimeError;

/// A runtime number: integer or floating, distinguished internally.
///
/// Integer arithmetic stays integral while it fits; overflow promotes to
/// floats rather than wrapping. Division always computes in floats, so
/// 10 除 4 is 2.5; the display rule below hides the fractional part again
/// when the result is whole.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    pub fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(sum) => Number::Int(sum),
                None => Number::Float(a as f64 + b as f64),
            },
            _ => Number::Float(self.as_f64() + other.as_f64()),
        }
    }

    pub fn sub(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_sub(b) {
                Some(diff) => Number::Int(diff),
                None => Number::Float(a as f64 - b as f64),
            },
            _ => Number::Float(self.as_f64() - other.as_f64()),
        }
    }

    pub fn mul(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_mul(b) {
                Some(product) => Number::Int(product),
                None => Number::Float(a as f64 * b as f64),
            },
            _ => Number::Float(self.as_f64() * other.as_f64()),
        }
    }

    /// Division; `None` when the divisor is zero.
    pub fn div(self, other: Number) -> Option<Number> {
        if other.is_zero() {
            return None;
        }
        Some(Number::Float(self.as_f64() / other.as_f64()))
    }

    pub fn neg(self) -> Number {
        match self {
            Number::Int(i) => match i.checked_neg() {
                Some(n) => Number::Int(n),
                None => Number::Float(-(i as f64)),
            },
            Number::Float(f) => Number::Float(-f),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        // Int and Float compare numerically: 2 等于 2.0 is 真的.
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            // Rust's float Display already drops a whole number's ".0".
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

/// A user-defined function: parameter names, body, and the environment it
/// closes over. The captured environment is the defining frame chain itself,
/// by reference, so later mutation of outer bindings is visible inside.
pub struct UserFn {
    pub name: Symbol,
    pub params: Vec<Symbol>,
    pub body: Vec<Stmt>,
    pub env: EnvRef,
}

impl fmt::Debug for UserFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The captured environment may reach back to this function; print
        // the signature only.
        f.debug_struct("UserFn")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A host-provided callable.
pub struct Builtin {
    pub name: &'static str,
    pub func: fn(&[Value]) -> Result<Value, RuntimeError>,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Number(Number),
    Str(String),
    Bool(bool),
    Null,
    Builtin(&'static Builtin),
    Function(Rc<UserFn>),
}

impl Value {
    /// Truthiness: 空的 is false, booleans are themselves, numbers are
    /// nonzero, strings are nonempty, callables are true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !n.is_zero(),
            Value::Str(s) => !s.is_empty(),
            Value::Builtin(_) | Value::Function(_) => true,
        }
    }

    /// The value's type, named in the dialect, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "数字",
            Value::Str(_) => "字符串",
            Value::Bool(_) => "布尔",
            Value::Null => "空的",
            Value::Builtin(_) | Value::Function(_) => "函数",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        // Value equality within a type; everything cross-type is unequal.
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Builtin(a), Value::Builtin(b)) => std::ptr::eq(*a, *b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Display stringification, used by 话说 and string concatenation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("空的"),
            Value::Bool(true) => f.write_str("真的"),
            Value::Bool(false) => f.write_str("假的"),
            Value::Str(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Builtin(b) => write!(f, "<内置函数 {}>", b.name),
            Value::Function(func) => write!(f, "<会做事 {}>", func.name),
        }
    }
}
