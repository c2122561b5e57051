//! Bounded least-recently-used map from MeX source to finished LaTeX.

use std::collections::{HashMap, VecDeque};

/// Default number of entries kept by a transpiler.
pub const DEFAULT_CAPACITY: usize = 256;

/// LRU cache. `order` holds keys from most to least recently used.
#[derive(Debug, Clone)]
pub struct CacheMap {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
    capacity: usize,
}

impl Default for CacheMap {
    fn default() -> Self {
        CacheMap::new(DEFAULT_CAPACITY)
    }
}

impl CacheMap {
    pub fn new(capacity: usize) -> Self {
        CacheMap {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn promote(&mut self, key: &str) {
        if let Some(index) = self.order.iter().position(|k| k == key)
            && let Some(k) = self.order.remove(index)
        {
            self.order.push_front(k);
        }
    }

    /// Looks up `key` and marks it most recently used on a hit.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        if !self.entries.contains_key(key) {
            return None;
        }
        self.promote(key);
        self.entries.get(key).map(String::as_str)
    }

    /// Stores `value`, marks `key` most recently used, and evicts the least
    /// recently used entry once the map holds more than `capacity` entries.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }

        let key = key.into();
        if self.entries.insert(key.clone(), value.into()).is_some() {
            self.promote(&key);
        } else {
            self.order.push_front(key);
        }

        while self.entries.len() > self.capacity {
            match self.order.pop_back() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
