//! Host-provided built-ins.
//!
//! Installed into the global frame before any user code runs. Each built-in
//! receives already-evaluated arguments, checks its own arity and argument
//! types, and answers in dialect-worded errors like everything else.

use std::thread;
use std::time::Duration;

use rand::Rng;

use hzlang_util::Symbol;

use crate::env::EnvRef;
use crate::error::RuntimeError;
use crate::value::{Builtin, Number, Value};

/// The built-in table.
pub static BUILTINS: &[Builtin] = &[
    Builtin {
        name: "求根",
        func: builtin_sqrt,
    },
    Builtin {
        name: "绝对值",
        func: builtin_abs,
    },
    Builtin {
        name: "向上取整",
        func: builtin_ceil,
    },
    Builtin {
        name: "向下取整",
        func: builtin_floor,
    },
    Builtin {
        name: "长度",
        func: builtin_len,
    },
    Builtin {
        name: "大写",
        func: builtin_upper,
    },
    Builtin {
        name: "小写",
        func: builtin_lower,
    },
    Builtin {
        name: "是数字",
        func: builtin_is_number,
    },
    Builtin {
        name: "是字符串",
        func: builtin_is_string,
    },
    Builtin {
        name: "是布尔",
        func: builtin_is_bool,
    },
    Builtin {
        name: "撒宽",
        func: builtin_sleep,
    },
    Builtin {
        name: "撒子儿",
        func: builtin_random,
    },
];

/// Defines every built-in in the given (global) frame.
pub fn install(globals: &EnvRef) {
    let mut frame = globals.borrow_mut();
    for builtin in BUILTINS {
        frame.define(Symbol::intern(builtin.name), Value::Builtin(builtin));
    }
}

// -- argument helpers --------------------------------------------------------

fn expect_arity(name: &str, args: &[Value], expected: usize) -> Result<(), RuntimeError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::Arity {
            name: name.to_string(),
            expected,
            got: args.len(),
        })
    }
}

fn expect_number(name: &str, value: &Value) -> Result<Number, RuntimeError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(RuntimeError::type_error(format!(
            "{name} 的参数必须是数字，不是{}",
            other.type_name()
        ))),
    }
}

fn expect_str<'a>(name: &str, value: &'a Value) -> Result<&'a str, RuntimeError> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(RuntimeError::type_error(format!(
            "{name} 的参数必须是字符串，不是{}",
            other.type_name()
        ))),
    }
}

/// Truncates toward zero, the way the original coerced 小数 to 整数.
fn as_int(n: Number) -> i64 {
    match n {
        Number::Int(i) => i,
        Number::Float(f) => f as i64,
    }
}

// -- math --------------------------------------------------------------------

fn builtin_sqrt(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("求根", args, 1)?;
    let n = expect_number("求根", &args[0])?;
    let x = n.as_f64();
    if x < 0.0 {
        return Err(RuntimeError::type_error("负数不好求根"));
    }
    Ok(Value::Number(Number::Float(x.sqrt())))
}

fn builtin_abs(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("绝对值", args, 1)?;
    let n = expect_number("绝对值", &args[0])?;
    let result = match n {
        Number::Int(i) => match i.checked_abs() {
            Some(a) => Number::Int(a),
            None => Number::Float((i as f64).abs()),
        },
        Number::Float(f) => Number::Float(f.abs()),
    };
    Ok(Value::Number(result))
}

fn builtin_ceil(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("向上取整", args, 1)?;
    let n = expect_number("向上取整", &args[0])?;
    let result = match n {
        Number::Int(i) => Number::Int(i),
        Number::Float(f) => Number::Int(f.ceil() as i64),
    };
    Ok(Value::Number(result))
}

fn builtin_floor(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("向下取整", args, 1)?;
    let n = expect_number("向下取整", &args[0])?;
    let result = match n {
        Number::Int(i) => Number::Int(i),
        Number::Float(f) => Number::Int(f.floor() as i64),
    };
    Ok(Value::Number(result))
}

// -- strings -----------------------------------------------------------------

fn builtin_len(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("长度", args, 1)?;
    let s = expect_str("长度", &args[0])?;
    Ok(Value::Number(Number::Int(s.chars().count() as i64)))
}

fn builtin_upper(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("大写", args, 1)?;
    let s = expect_str("大写", &args[0])?;
    Ok(Value::Str(s.to_uppercase()))
}

fn builtin_lower(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("小写", args, 1)?;
    let s = expect_str("小写", &args[0])?;
    Ok(Value::Str(s.to_lowercase()))
}

// -- type predicates ---------------------------------------------------------

fn builtin_is_number(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("是数字", args, 1)?;
    Ok(Value::Bool(matches!(args[0], Value::Number(_))))
}

fn builtin_is_string(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("是字符串", args, 1)?;
    Ok(Value::Bool(matches!(args[0], Value::Str(_))))
}

fn builtin_is_bool(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("是布尔", args, 1)?;
    Ok(Value::Bool(matches!(args[0], Value::Bool(_))))
}

// -- system ------------------------------------------------------------------

/// 撒宽 - suspend for N milliseconds of wall time.
fn builtin_sleep(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arity("撒宽", args, 1)?;
    let ms = expect_number("撒宽", &args[0])?.as_f64();
    if !ms.is_finite() || ms < 0.0 {
        return Err(RuntimeError::type_error("撒宽的参数必须是毫秒数"));
    }
    tracing::trace!(ms, "sleeping");
    thread::sleep(Duration::from_secs_f64(ms / 1000.0));
    Ok(Value::Null)
}

/// 撒子儿 - random numbers.
///
/// 撒子儿() is a float in [0,1); 撒子儿(max) an integer in [0, max];
/// 撒子儿(lo, hi) an integer in [lo, hi].
fn builtin_random(args: &[Value]) -> Result<Value, RuntimeError> {
    let mut rng = rand::thread_rng();
    match args {
        [] => Ok(Value::Number(Number::Float(rng.gen::<f64>()))),
        [max] => {
            let max = as_int(expect_number("撒子儿", max)?);
            if max < 0 {
                return Err(RuntimeError::type_error("撒子儿的上界不好是负数"));
            }
            Ok(Value::Number(Number::Int(rng.gen_range(0..=max))))
        }
        [lo, hi] => {
            let lo = as_int(expect_number("撒子儿", lo)?);
            let hi = as_int(expect_number("撒子儿", hi)?);
            if lo > hi {
                return Err(RuntimeError::type_error("撒子儿的范围不对，下界大过上界"));
            }
            Ok(Value::Number(Number::Int(rng.gen_range(lo..=hi))))
        }
        _ => Err(RuntimeError::Arity {
            name: "撒子儿".to_string(),
            expected: 2,
            got: args.len(),
        }),
    }
}
