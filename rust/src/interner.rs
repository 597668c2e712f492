//! Dense integer IDs for task ID strings.
//!
//! The per-call arena is a set of `Vec`s indexed by these IDs, assigned in
//! input order.

use rustc_hash::FxHashMap;

/// Interned task ID.
pub type TaskIdInt = u32;

/// Bidirectional mapping between task ID strings and dense integers.
#[derive(Debug, Clone, Default)]
pub struct TaskIdInterner {
    to_int: FxHashMap<String, TaskIdInt>,
    from_int: Vec<String>,
}

impl TaskIdInterner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
        }
    }

    /// Assign the next integer ID to `s`.
    /// Returns `None` if `s` was already interned.
    pub fn insert(&mut self, s: &str) -> Option<TaskIdInt> {
        if self.to_int.contains_key(s) {
            return None;
        }
        let id = self.from_int.len() as TaskIdInt;
        self.from_int.push(s.to_string());
        self.to_int.insert(s.to_string(), id);
        Some(id)
    }

    #[inline]
    pub fn get(&self, s: &str) -> Option<TaskIdInt> {
        self.to_int.get(s).copied()
    }

    #[inline]
    pub fn resolve(&self, id: TaskIdInt) -> Option<&str> {
        self.from_int.get(id as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.from_int.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_int.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_resolve() {
        let mut interner = TaskIdInterner::with_capacity(4);

        let a = interner.insert("task_a").unwrap();
        let b = interner.insert("task_b").unwrap();

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(interner.resolve(a), Some("task_a"));
        assert_eq!(interner.get("task_b"), Some(b));
        assert_eq!(interner.get("nonexistent"), None);
        assert_eq!(interner.resolve(7), None);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut interner = TaskIdInterner::default();
        assert!(interner.insert("a").is_some());
        assert!(interner.insert("a").is_none());
        assert_eq!(interner.len(), 1);
    }
}
