//! The per-tree access registry.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use facet::Facet;
use indexmap::IndexMap;
use propwatch_object::Value;

/// Access counters for one path.
///
/// `total` is always `get + set`: the only way to change the counters is to
/// record a read or a write, and each bumps `total` together with exactly one
/// of the other two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Facet)]
pub struct Counters {
    get: u64,
    set: u64,
    total: u64,
}

impl Counters {
    /// Number of recorded reads.
    pub fn get(&self) -> u64 {
        self.get
    }

    /// Number of recorded writes.
    pub fn set(&self) -> u64 {
        self.set
    }

    /// Reads plus writes.
    pub fn total(&self) -> u64 {
        self.total
    }

    fn record_get(&mut self) {
        self.get += 1;
        self.total += 1;
    }

    fn record_set(&mut self) {
        self.set += 1;
        self.total += 1;
    }
}

/// One registry entry: a path and its counters.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct RegistryItem {
    path: String,
    counters: Counters,
}

impl RegistryItem {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_owned(),
            counters: Counters::default(),
        }
    }

    /// The canonical path this entry counts.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The counters recorded so far.
    pub fn counters(&self) -> Counters {
        self.counters
    }
}

/// Path → counters, shared by every node of one watched tree.
///
/// Cloning a `Registry` clones the handle, not the contents: all clones see
/// the same entries. Entries are created on first access and never removed.
#[derive(Clone)]
pub struct Registry {
    items: Rc<RefCell<IndexMap<String, RegistryItem>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            items: Rc::new(RefCell::new(IndexMap::new())),
        }
    }

    /// Recover the registry from the value returned by reading
    /// [`REGISTRY_KEY`](crate::REGISTRY_KEY) on a tracked node.
    pub fn from_value(value: &Value) -> Option<Registry> {
        let registry = value.as_object()?.host_data::<Registry>()?;
        Some(Registry::clone(&registry))
    }

    pub(crate) fn record_get(&self, path: &str) {
        self.update(path, Counters::record_get)
    }

    pub(crate) fn record_set(&self, path: &str) {
        self.update(path, Counters::record_set)
    }

    fn update(&self, path: &str, record: fn(&mut Counters)) {
        let mut items = self.items.borrow_mut();
        if !items.contains_key(path) {
            items.insert(path.to_owned(), RegistryItem::new(path));
        }
        record(&mut items[path].counters);
    }

    /// The entry for `path`, if it has ever been accessed.
    pub fn get(&self, path: &str) -> Option<RegistryItem> {
        self.items.borrow().get(path).cloned()
    }

    /// The counters for `path`, if it has ever been accessed.
    pub fn counters(&self, path: &str) -> Option<Counters> {
        self.items.borrow().get(path).map(|item| item.counters)
    }

    /// Has `path` ever been accessed?
    pub fn contains(&self, path: &str) -> bool {
        self.items.borrow().contains_key(path)
    }

    /// Number of distinct paths recorded.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// No access recorded yet?
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Every recorded path, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.items.borrow().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// A snapshot of every entry, sorted by path.
    pub fn items(&self) -> Vec<RegistryItem> {
        let mut items: Vec<RegistryItem> = self.items.borrow().values().cloned().collect();
        items.sort_by(|a, b| a.path.cmp(&b.path));
        items
    }

    /// Do both handles refer to the same registry?
    pub fn ptr_eq(&self, other: &Registry) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.items().iter().map(|item| (item.path.clone(), item.counters)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_create_entries_on_first_access() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        registry.record_get("foo");
        registry.record_get("foo");
        registry.record_set("foo");
        registry.record_set("bar");

        let foo = registry.get("foo").unwrap();
        assert_eq!(foo.path(), "foo");
        assert_eq!(foo.counters().get(), 2);
        assert_eq!(foo.counters().set(), 1);
        assert_eq!(foo.counters().total(), 3);
        assert_eq!(registry.paths(), ["bar", "foo"]);
        assert!(registry.get("baz").is_none());
    }

    #[test]
    fn clones_share_entries() {
        let registry = Registry::new();
        let other = registry.clone();
        other.record_get("foo");
        assert!(registry.contains("foo"));
        assert!(registry.ptr_eq(&other));
        assert!(!registry.ptr_eq(&Registry::new()));
    }
}
