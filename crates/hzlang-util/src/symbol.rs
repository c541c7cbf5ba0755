//! String interning for identifier names.
//!
//! Dialect programs mention the same names over and over (变量名、函数名、
//! 内置函数名). Interning stores one copy of each distinct name and hands out
//! a compact [`Symbol`] handle, so name comparison is an integer comparison
//! and environment maps stay cheap to key.
//!
//! Interned strings are never freed; the set of distinct names in a program
//! is small and bounded.

use std::fmt;
use std::sync::{Mutex, OnceLock};

use rustc_hash::FxHashMap;

/// An interned string.
///
/// Two symbols compare equal exactly when the strings they were interned
/// from are equal.
///
/// # Example
///
/// ```
/// use hzlang_util::Symbol;
///
/// let a = Symbol::intern("甲");
/// let b = Symbol::intern("甲");
/// let c = Symbol::intern("乙");
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// assert_eq!(a.as_str(), "甲");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

struct Interner {
    lookup: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

fn interner() -> &'static Mutex<Interner> {
    static INTERNER: OnceLock<Mutex<Interner>> = OnceLock::new();
    INTERNER.get_or_init(|| {
        Mutex::new(Interner {
            lookup: FxHashMap::default(),
            strings: Vec::new(),
        })
    })
}

impl Symbol {
    /// Interns a string, returning its symbol.
    ///
    /// Repeated calls with the same string return the same symbol.
    pub fn intern(string: &str) -> Self {
        let mut table = interner().lock().unwrap_or_else(|e| e.into_inner());
        if let Some(&index) = table.lookup.get(string) {
            return Symbol(index);
        }
        // Leak to get 'static storage; interned names live for the process.
        let stored: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let index = table.strings.len() as u32;
        table.strings.push(stored);
        table.lookup.insert(stored, index);
        Symbol(index)
    }

    /// Returns the string this symbol was interned from.
    pub fn as_str(self) -> &'static str {
        let table = interner().lock().unwrap_or_else(|e| e.into_inner());
        table.strings[self.0 as usize]
    }

    /// Raw index, useful for debugging.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
