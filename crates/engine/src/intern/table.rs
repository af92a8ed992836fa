use std::borrow::Borrow;
use std::hash::Hash;

use indexmap::IndexSet;

/// Dense id handed out by an [`InternTable`].
pub type Id = u32;

/// Insertion-ordered deduplicator.
///
/// Backed by an `IndexSet`, so ids are positions: contiguous from 0, fixed at
/// first insertion, and iteration is id-ascending. Equality is whatever `K`
/// says: structural for tuples and shapes.
#[derive(Debug, Clone)]
pub struct InternTable<K> {
    entries: IndexSet<K>,
}

impl<K: Hash + Eq> InternTable<K> {
    pub fn new() -> Self {
        Self {
            entries: IndexSet::new(),
        }
    }

    /// A table whose first ids are taken by `seed`, in order.
    pub fn seeded<I: IntoIterator<Item = K>>(seed: I) -> Self {
        let mut table = Self::new();
        for key in seed {
            table.intern(key);
        }
        table
    }

    /// Id of `key`, inserting it at the end if unseen.
    pub fn intern(&mut self, key: K) -> Id {
        let (index, _) = self.entries.insert_full(key);
        index as Id
    }

    /// Like [`intern`](Self::intern) but only clones `key` on first sight.
    pub fn intern_ref<Q>(&mut self, key: &Q) -> Id
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        match self.entries.get_index_of(key) {
            Some(index) => index as Id,
            None => self.intern(key.to_owned()),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<Id>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get_index_of(key).map(|index| index as Id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in id order.
    pub fn iter(&self) -> indexmap::set::Iter<'_, K> {
        self.entries.iter()
    }
}

impl<K: Hash + Eq> Default for InternTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K> IntoIterator for &'a InternTable<K> {
    type Item = &'a K;
    type IntoIter = indexmap::set::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
