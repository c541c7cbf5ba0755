//! Lexical environment frames.
//!
//! Frames form a singly-linked chain rooted at the global frame. Name lookup
//! walks innermost-out; the first frame holding the name wins. A function call
//! pushes a frame whose parent is the function's captured environment, not the
//! caller's.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use hzlang_util::Symbol;

use crate::value::Value;

/// Shared handle to a frame.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One scope frame: bindings plus an optional parent.
pub struct Environment {
    bindings: IndexMap<Symbol, Value>,
    parent: Option<EnvRef>,
}

impl Environment {
    /// Creates a root frame with no parent.
    pub fn global() -> EnvRef {
        Rc::new(RefCell::new(Environment {
            bindings: IndexMap::new(),
            parent: None,
        }))
    }

    /// Creates a frame whose parent is `parent`.
    pub fn with_parent(parent: EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            bindings: IndexMap::new(),
            parent: Some(parent),
        }))
    }

    /// Defines `name` in this frame, shadowing any outer binding.
    pub fn define(&mut self, name: Symbol, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Looks `name` up along the chain, innermost first.
    pub fn get(env: &EnvRef, name: Symbol) -> Option<Value> {
        let mut current = Rc::clone(env);
        loop {
            let parent = {
                let frame = current.borrow();
                if let Some(value) = frame.bindings.get(&name) {
                    return Some(value.clone());
                }
                frame.parent.clone()
            };
            match parent {
                Some(next) => current = next,
                None => return None,
            }
        }
    }

    /// Rebinds the nearest existing binding of `name`. Returns false when the
    /// name is bound nowhere in the chain; the caller decides what that means
    /// (the evaluator makes it a name error).
    pub fn assign(env: &EnvRef, name: Symbol, value: Value) -> bool {
        let mut current = Rc::clone(env);
        loop {
            let parent = {
                let mut frame = current.borrow_mut();
                if let Some(slot) = frame.bindings.get_mut(&name) {
                    *slot = value;
                    return true;
                }
                frame.parent.clone()
            };
            match parent {
                Some(next) => current = next,
                None => return false,
            }
        }
    }

    /// Names bound in this frame only, in definition order.
    pub fn local_names(&self) -> Vec<Symbol> {
        self.bindings.keys().copied().collect()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bindings can reach back to this frame through closures; keep the
        // output shallow.
        f.debug_struct("Environment")
            .field("names", &self.local_names())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    fn sym(name: &str) -> Symbol {
        Symbol::intern(name)
    }

    fn int(i: i64) -> Value {
        Value::Number(Number::Int(i))
    }

    #[test]
    fn define_then_get() {
        let env = Environment::global();
        env.borrow_mut().define(sym("甲"), int(1));
        assert_eq!(Environment::get(&env, sym("甲")), Some(int(1)));
        assert_eq!(Environment::get(&env, sym("乙")), None);
    }

    #[test]
    fn inner_shadows_outer() {
        let global = Environment::global();
        global.borrow_mut().define(sym("甲"), int(1));
        let inner = Environment::with_parent(Rc::clone(&global));
        inner.borrow_mut().define(sym("甲"), int(2));

        assert_eq!(Environment::get(&inner, sym("甲")), Some(int(2)));
        assert_eq!(Environment::get(&global, sym("甲")), Some(int(1)));
    }

    #[test]
    fn lookup_walks_to_the_root() {
        let global = Environment::global();
        global.borrow_mut().define(sym("深处"), int(7));
        let mid = Environment::with_parent(Rc::clone(&global));
        let inner = Environment::with_parent(mid);
        assert_eq!(Environment::get(&inner, sym("深处")), Some(int(7)));
    }

    #[test]
    fn assign_mutates_the_nearest_binding() {
        let global = Environment::global();
        global.borrow_mut().define(sym("甲"), int(1));
        let inner = Environment::with_parent(Rc::clone(&global));

        assert!(Environment::assign(&inner, sym("甲"), int(5)));
        assert_eq!(Environment::get(&global, sym("甲")), Some(int(5)));
    }

    #[test]
    fn assign_to_unbound_name_fails() {
        let env = Environment::global();
        assert!(!Environment::assign(&env, sym("没有的"), int(1)));
    }
}
