//! Property keys: strings and symbols.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::rc::Rc;

/// Symbols the object model knows about ahead of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WellKnownSymbol {
    /// `Symbol.asyncIterator`
    AsyncIterator,
    /// `Symbol.hasInstance`
    HasInstance,
    /// `Symbol.isConcatSpreadable`
    IsConcatSpreadable,
    /// `Symbol.iterator`
    Iterator,
    /// `Symbol.match`
    Match,
    /// `Symbol.replace`
    Replace,
    /// `Symbol.search`
    Search,
    /// `Symbol.species`
    Species,
    /// `Symbol.split`
    Split,
    /// `Symbol.toPrimitive`
    ToPrimitive,
    /// `Symbol.toStringTag`
    ToStringTag,
    /// `Symbol.unscopables`
    Unscopables,
}

impl WellKnownSymbol {
    /// The symbol's description, e.g. `Symbol.toStringTag`.
    pub const fn description(self) -> &'static str {
        match self {
            Self::AsyncIterator => "Symbol.asyncIterator",
            Self::HasInstance => "Symbol.hasInstance",
            Self::IsConcatSpreadable => "Symbol.isConcatSpreadable",
            Self::Iterator => "Symbol.iterator",
            Self::Match => "Symbol.match",
            Self::Replace => "Symbol.replace",
            Self::Search => "Symbol.search",
            Self::Species => "Symbol.species",
            Self::Split => "Symbol.split",
            Self::ToPrimitive => "Symbol.toPrimitive",
            Self::ToStringTag => "Symbol.toStringTag",
            Self::Unscopables => "Symbol.unscopables",
        }
    }
}

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, PartialEq, Eq, Hash)]
enum SymbolRepr {
    WellKnown(WellKnownSymbol),
    Unique {
        id: u64,
        description: Option<Rc<str>>,
    },
}

/// A symbol value. Two symbols are equal only if they come from the same
/// [`Symbol::new`] call (or name the same [`WellKnownSymbol`]).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Symbol(SymbolRepr);

impl Symbol {
    /// Create a fresh, unique symbol.
    pub fn new(description: Option<&str>) -> Self {
        let id = NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed);
        Symbol(SymbolRepr::Unique {
            id,
            description: description.map(Rc::from),
        })
    }

    /// The shared symbol for a well-known slot.
    pub const fn well_known(symbol: WellKnownSymbol) -> Self {
        Symbol(SymbolRepr::WellKnown(symbol))
    }

    /// The symbol's description, if it has one.
    pub fn description(&self) -> Option<&str> {
        match &self.0 {
            SymbolRepr::WellKnown(w) => Some(w.description()),
            SymbolRepr::Unique { description, .. } => description.as_deref(),
        }
    }

    /// Returns the well-known slot this symbol occupies, if any.
    pub fn as_well_known(&self) -> Option<WellKnownSymbol> {
        match &self.0 {
            SymbolRepr::WellKnown(w) => Some(*w),
            SymbolRepr::Unique { .. } => None,
        }
    }
}

impl From<WellKnownSymbol> for Symbol {
    fn from(symbol: WellKnownSymbol) -> Self {
        Symbol::well_known(symbol)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A property key: either a string or a symbol.
///
/// Array indices are plain string keys (`"0"`, `"1"`, ...), exactly as they
/// would be in a script.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// String key.
    String(Rc<str>),
    /// Symbol key.
    Symbol(Symbol),
}

impl PropertyKey {
    /// The key as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyKey::String(s) => Some(s),
            PropertyKey::Symbol(_) => None,
        }
    }

    /// The key as a symbol, if it is one.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            PropertyKey::String(_) => None,
            PropertyKey::Symbol(s) => Some(s),
        }
    }

    /// Returns the array index this key denotes, if it is a canonical one
    /// (`"7"` is, `"07"` and `"7.0"` are not).
    pub fn array_index(&self) -> Option<u32> {
        let s = self.as_str()?;
        let index: u32 = s.parse().ok()?;
        // 2^32 - 1 is reserved for `length`
        (index != u32::MAX && index.to_string() == s).then_some(index)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => f.write_str(s),
            PropertyKey::Symbol(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl fmt::Debug for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => fmt::Debug::fmt(s, f),
            PropertyKey::Symbol(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::String(Rc::from(s))
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::String(Rc::from(s))
    }
}

impl From<Rc<str>> for PropertyKey {
    fn from(s: Rc<str>) -> Self {
        PropertyKey::String(s)
    }
}

impl From<&PropertyKey> for PropertyKey {
    fn from(key: &PropertyKey) -> Self {
        key.clone()
    }
}

impl From<usize> for PropertyKey {
    fn from(index: usize) -> Self {
        PropertyKey::String(Rc::from(index.to_string()))
    }
}

impl From<Symbol> for PropertyKey {
    fn from(symbol: Symbol) -> Self {
        PropertyKey::Symbol(symbol)
    }
}

impl From<WellKnownSymbol> for PropertyKey {
    fn from(symbol: WellKnownSymbol) -> Self {
        PropertyKey::Symbol(Symbol::well_known(symbol))
    }
}
