//! Insertion-ordered, id-keyed record collections.

use crate::error::Result;
use crate::record::{Patch, Record};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// An id-keyed collection of records, iterated in insertion order.
///
/// Batched operations check every id before touching the collection, so a failing batch leaves
/// the data set unchanged.
#[derive(Debug, Clone)]
pub struct DataSet<T: Record> {
    items: IndexMap<String, T>,
}

impl<T: Record> Default for DataSet<T> {
    fn default() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }
}

impl<T: Record> DataSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    /// Looks up several ids at once; missing ids are skipped.
    pub fn get_many<'a, I>(&self, ids: I) -> Vec<&T>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter().filter_map(|id| self.items.get(id)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn filter<F>(&self, mut pred: F) -> Vec<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.items.values().filter(|r| pred(r)).collect()
    }

    pub fn add(&mut self, record: T) -> Result<()> {
        self.try_insert(record)
            .map_err(|rejected| T::KIND.duplicate(rejected.id()))
    }

    /// Inserts `record` unless its id is taken, in which case the record is handed back.
    pub fn try_insert(&mut self, record: T) -> std::result::Result<(), T> {
        if self.items.contains_key(record.id()) {
            return Err(record);
        }
        self.items.insert(record.id().to_string(), record);
        Ok(())
    }

    pub fn add_all(&mut self, records: Vec<T>) -> Result<()> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for r in &records {
            if self.items.contains_key(r.id()) || !seen.insert(r.id()) {
                return Err(T::KIND.duplicate(r.id()));
            }
        }
        for r in records {
            self.items.insert(r.id().to_string(), r);
        }
        Ok(())
    }

    /// Applies partial updates. Every patch must name an existing record.
    pub fn update(&mut self, patches: &[T::Patch]) -> Result<()> {
        if let Some(p) = patches.iter().find(|p| !self.items.contains_key(p.id())) {
            return Err(T::KIND.unknown(p.id()));
        }
        for p in patches {
            if let Some(record) = self.items.get_mut(p.id()) {
                record.apply(p);
            }
        }
        Ok(())
    }

    /// Removes the given ids and returns the removed records in request order. Ids that are not
    /// present are ignored.
    pub fn remove<'a, I>(&mut self, ids: I) -> Vec<T>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .filter_map(|id| self.items.shift_remove(id))
            .collect()
    }
}

/// Collects like a map: when an id repeats, the later record replaces the earlier one but keeps
/// its position. Use [`DataSet::add_all`] to reject duplicates instead.
impl<T: Record> FromIterator<T> for DataSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut items = IndexMap::new();
        for r in iter {
            items.insert(r.id().to_string(), r);
        }
        Self { items }
    }
}
