//! Owned model of the lazy module registry.
//!
//! [`ModuleRegistry`] follows the same contract as the Lua `LoadModule`
//! prelude: a factory runs at most once per name once it has produced a
//! value, unknown names yield `None`, and nothing guards against cycles.

use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::Rc;

/// Deferred module constructor. Receives the registry so it can load the
/// modules it depends on.
pub type Factory<V> = Rc<dyn Fn(&mut ModuleRegistry<V>) -> Option<V>>;

struct RegistryEntry<V> {
    factory: Factory<V>,
    cached: Option<V>,
}

/// Name to memoized module value map.
///
/// Single-threaded by construction: factories are `Rc`, so the registry is
/// neither `Send` nor `Sync`.
pub struct ModuleRegistry<V> {
    entries: FxHashMap<String, RegistryEntry<V>>,
}

impl<V> Default for ModuleRegistry<V> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<V> fmt::Debug for ModuleRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ModuleRegistry")
            .field("modules", &names)
            .finish()
    }
}

impl<V: Clone> ModuleRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any previous entry and its
    /// cached value.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&mut ModuleRegistry<V>) -> Option<V> + 'static,
    {
        self.entries.insert(
            name.into(),
            RegistryEntry {
                factory: Rc::new(factory),
                cached: None,
            },
        );
    }

    /// Resolve `name`, running its factory on first use.
    ///
    /// A factory that yields `None` leaves the entry uncached, so the next
    /// load runs it again. A load of a name whose factory is still running
    /// also runs it again; circular dependencies recurse without bound.
    pub fn load(&mut self, name: &str) -> Option<V> {
        let entry = self.entries.get(name)?;
        if let Some(value) = &entry.cached {
            return Some(value.clone());
        }

        let factory = Rc::clone(&entry.factory);
        let result = factory(self);

        if let Some(value) = &result {
            if let Some(entry) = self.entries.get_mut(name) {
                entry.cached = Some(value.clone());
            }
        }
        result
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|entry| entry.cached.is_some())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_factory(
        counter: &Rc<Cell<usize>>,
        value: &'static str,
    ) -> impl Fn(&mut ModuleRegistry<Rc<String>>) -> Option<Rc<String>> + 'static {
        let counter = Rc::clone(counter);
        move |_| {
            counter.set(counter.get() + 1);
            Some(Rc::new(value.to_string()))
        }
    }

    #[test]
    fn test_load_runs_factory_once() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = ModuleRegistry::new();
        registry.register("Toggle", counting_factory(&calls, "toggle"));

        let first = registry.load("Toggle").unwrap();
        let second = registry.load("Toggle").unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
        assert!(registry.is_cached("Toggle"));
    }

    #[test]
    fn test_unknown_module_is_none() {
        let mut registry: ModuleRegistry<Rc<String>> = ModuleRegistry::new();
        assert!(registry.load("DoesNotExist").is_none());
        assert!(!registry.contains("DoesNotExist"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_nil_result_is_not_cached() {
        let calls = Rc::new(Cell::new(0));
        let mut registry: ModuleRegistry<i32> = ModuleRegistry::new();
        let counter = Rc::clone(&calls);
        registry.register("Empty", move |_| {
            counter.set(counter.get() + 1);
            None
        });

        assert_eq!(registry.load("Empty"), None);
        assert_eq!(registry.load("Empty"), None);
        assert_eq!(calls.get(), 2);
        assert!(!registry.is_cached("Empty"));
    }

    #[test]
    fn test_factory_loads_dependency_through_registry() {
        let toggle_calls = Rc::new(Cell::new(0));
        let mut registry: ModuleRegistry<Rc<String>> = ModuleRegistry::new();
        registry.register("Toggle", counting_factory(&toggle_calls, "toggle"));
        registry.register("Window", |registry| {
            let toggle = registry.load("Toggle")?;
            let again = registry.load("Toggle")?;
            assert!(Rc::ptr_eq(&toggle, &again));
            Some(Rc::new(format!("window({toggle})")))
        });

        let window = registry.load("Window").unwrap();
        assert_eq!(window.as_str(), "window(toggle)");
        assert_eq!(toggle_calls.get(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_reentrant_load_reinvokes_factory() {
        let calls = Rc::new(Cell::new(0));
        let mut registry: ModuleRegistry<usize> = ModuleRegistry::new();
        let counter = Rc::clone(&calls);
        registry.register("Loop", move |registry| {
            counter.set(counter.get() + 1);
            // Bounded here so the test terminates; real cycles never stop.
            if counter.get() < 3 {
                registry.load("Loop");
            }
            Some(counter.get())
        });

        assert_eq!(registry.load("Loop"), Some(3));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_register_replaces_cached_entry() {
        let mut registry: ModuleRegistry<i32> = ModuleRegistry::new();
        registry.register("Value", |_| Some(1));
        assert_eq!(registry.load("Value"), Some(1));

        registry.register("Value", |_| Some(2));
        assert!(!registry.is_cached("Value"));
        assert_eq!(registry.load("Value"), Some(2));
    }
}
