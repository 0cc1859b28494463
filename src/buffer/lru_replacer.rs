// Functionality: The buffer pool manager must maintain a LRU list to collect
// all the pages that are unpinned and ready to be swapped.

use crate::buffer::replacer::Replacer;
use crate::common::newable::Newable;
use std::clone::Clone;
use std::cmp::Eq;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::default::Default;
use std::hash::Hash;

pub struct LRUReplacer<T>
where
    T: Clone + Eq + Hash,
{
    forward: HashMap<T, u32>,
    backward: BTreeMap<u32, T>,
    clock: u32,
}

impl<T> Default for LRUReplacer<T>
where
    T: Clone + Eq + Hash,
{
    fn default() -> Self {
        LRUReplacer {
            forward: HashMap::new(),
            backward: BTreeMap::new(),
            clock: 0,
        }
    }
}

impl<T> Newable for LRUReplacer<T>
where
    T: Clone + Eq + Hash,
{
    fn new() -> Self {
        Self::default()
    }
}

impl<T> Replacer<T> for LRUReplacer<T>
where
    T: Clone + Eq + Hash,
{
    fn insert(&mut self, val: T) {
        match self.forward.get(&val) {
            None => (),
            Some(c) => {
                self.backward.remove(c);
            }
        }
        self.forward.insert(val.clone(), self.clock);
        self.backward.insert(self.clock, val);
        self.clock += 1;
    }

    fn erase(&mut self, val: &T) -> bool {
        match self.forward.remove(val) {
            None => false,
            Some(ref c) => {
                self.backward.remove(c);
                true
            }
        }
    }

    fn victim(&mut self) -> Option<T> {
        let (front_key, front_val) = match self.backward.iter().nth(0) {
            None => (None, None),
            Some((key, val)) => (Some(*key), Some(val)),
        };
        match front_val {
            None => (),
            Some(val) => {
                self.forward.remove(val);
            }
        }
        match front_key {
            None => None,
            Some(ref key) => self.backward.remove(key),
        }
    }

    fn size(&self) -> usize {
        self.forward.len()
    }
}
