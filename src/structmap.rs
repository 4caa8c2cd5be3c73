//! Associative container keyed by structural identity

use delegate::delegate;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Objects providing a value-based identity.
///
/// Two objects with the same identity are considered as the same key by a [StructMap],
/// even if they are distinct instances.
pub trait Identity {
    type Id: Clone + Eq + Hash + Debug;

    fn identity(&self) -> Self::Id;
}

/// A map where keys collide if they have the same [Identity].
///
/// Each entry retains the key instance used in the most recent [set](StructMap::set) call
/// along with its value. Entries are iterated in the order in which their identity was first inserted.
///
/// ```
/// use fsmkit::{BitVector, StructMap};
/// # use fsmkit::FsmError;
/// # fn main() -> Result<(), FsmError> {
///
/// let mut map = StructMap::default();
/// map.set(BitVector::new(1, 2)?, "first");
/// map.set(BitVector::new(1, 2)?, "second");
/// map.set(BitVector::new(1, 1)?, "narrow");
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&"01".parse()?), Some(&"second"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct StructMap<K: Identity, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K::Id, usize>,
}

impl<K: Identity, V> Default for StructMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Identity, V> StructMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    delegate! {
        to self.entries {
            /// Number of distinct identities in the map
            pub fn len(&self) -> usize;
            /// Return whether the map has no entry
            pub fn is_empty(&self) -> bool;
        }
    }

    /// Insert or overwrite the value associated to the identity of the key.
    ///
    /// The key instance replaces the previous representative, the previous value is returned.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key.identity()) {
            Some(&pos) => {
                let (_, old) = std::mem::replace(&mut self.entries[pos], (key, value));
                Some(old)
            }
            None => {
                self.index.insert(key.identity(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(&key.identity()).map(|&pos| &self.entries[pos].1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.index.get(&key.identity()) {
            Some(&pos) => Some(&mut self.entries[pos].1),
            None => None,
        }
    }

    /// Test if a structurally equal key was set
    pub fn has(&self, key: &K) -> bool {
        self.index.contains_key(&key.identity())
    }

    /// Retrieve the value for this identity, inserting a new one if needed.
    ///
    /// An existing entry keeps its representative key.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, f: F) -> &mut V {
        let pos = match self.index.get(&key.identity()) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.index.insert(key.identity(), pos);
                self.entries.push((key, f()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    /// Iterate over the representative keys and their values
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Identity, V> FromIterator<(K, V)> for StructMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}
