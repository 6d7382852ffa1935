//! Arena keys for stable back-references into owning collections
//!
//! Objects, lights and materials live in generational slot maps. Animators and game
//! targets hold keys rather than references; a key stops resolving once its entry is
//! removed, so stale back-references turn into `None` instead of dangling.

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Key of a drawable object in a scene's object arena
    pub struct ObjectKey;

    /// Key of a light in a light set
    pub struct LightKey;

    /// Key of a material in a material library
    pub struct MaterialKey;
}

/// Slot map paired with an insertion-order index.
///
/// Slot maps iterate in slot order, which stops matching insertion order after a
/// removal frees a slot. Draw order and light order are semantically significant,
/// so the order is kept explicitly.
#[derive(Debug, Clone)]
pub struct OrderedArena<K: slotmap::Key, V> {
    items: SlotMap<K, V>,
    order: Vec<K>,
}

impl<K: slotmap::Key, V> OrderedArena<K, V> {
    /// Create an empty arena
    pub fn new() -> Self {
        Self {
            items: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Append a value and return its key
    pub fn insert(&mut self, value: V) -> K {
        let key = self.items.insert(value);
        self.order.push(key);
        key
    }

    /// Remove a value, invalidating its key
    pub fn remove(&mut self, key: K) -> Option<V> {
        let value = self.items.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(value)
    }

    /// Look up a value by key
    pub fn get(&self, key: K) -> Option<&V> {
        self.items.get(key)
    }

    /// Look up a value mutably by key
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.items.get_mut(key)
    }

    /// Whether the key still resolves
    pub fn contains_key(&self, key: K) -> bool {
        self.items.contains_key(key)
    }

    /// Key at a position in insertion order
    pub fn key_at(&self, index: usize) -> Option<K> {
        self.order.get(index).copied()
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.items.clear();
        self.order.clear();
    }

    /// Values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.items.get(*key).map(|value| (*key, value)))
    }
}

impl<K: slotmap::Key, V> Default for OrderedArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_survives_removal_and_reuse() {
        let mut arena: OrderedArena<ObjectKey, &str> = OrderedArena::new();
        let a = arena.insert("a");
        let _b = arena.insert("b");
        arena.remove(a);
        let _c = arena.insert("c");

        let values: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!["b", "c"]);
    }

    #[test]
    fn test_removed_key_no_longer_resolves() {
        let mut arena: OrderedArena<LightKey, u32> = OrderedArena::new();
        let key = arena.insert(7);
        assert_eq!(arena.remove(key), Some(7));
        assert!(arena.get(key).is_none());
        assert!(arena.remove(key).is_none());
        assert!(arena.is_empty());
    }
}
