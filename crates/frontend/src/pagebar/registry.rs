//! Explicit mapping from a container to the page bar attached to it.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use super::controller::Detachable;

/// Page bars owned by the composing UI, keyed by container.
///
/// Attaching to a key that already holds a page bar detaches the old one
/// first, so its late responses are ignored.
pub struct PageBarRegistry<K, E: Detachable> {
    entries: HashMap<K, E>,
}

impl<K, E: Detachable> Default for PageBarRegistry<K, E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, E> PageBarRegistry<K, E>
where
    K: Eq + Hash,
    E: Detachable,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `entry` under `key`, returning the detached previous entry.
    pub fn attach(&mut self, key: K, entry: E) -> Option<E> {
        let previous = self.entries.insert(key, entry);
        if let Some(old) = &previous {
            old.detach();
        }
        previous
    }

    pub fn get(&self, key: &K) -> Option<&E> {
        self.entries.get(key)
    }

    /// Detach and drop the entry under `key`. Returns whether one existed.
    pub fn detach(&mut self, key: &K) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                entry.detach();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, E: Detachable> Drop for PageBarRegistry<K, E> {
    fn drop(&mut self) {
        for entry in self.entries.values() {
            entry.detach();
        }
    }
}

/// Sole owner of a shared page bar; detaches it when dropped.
///
/// Event handlers and in-flight switches may still hold clones of the
/// `Rc`. Once the guard is gone their responses are dropped.
pub struct DetachGuard<E: Detachable> {
    inner: Rc<E>,
}

impl<E: Detachable> DetachGuard<E> {
    pub fn new(inner: Rc<E>) -> Self {
        Self { inner }
    }

    pub fn get(&self) -> &Rc<E> {
        &self.inner
    }
}

impl<E: Detachable> Detachable for DetachGuard<E> {
    fn detach(&self) {
        self.inner.detach();
    }
}

impl<E: Detachable> Drop for DetachGuard<E> {
    fn drop(&mut self) {
        self.inner.detach();
    }
}
