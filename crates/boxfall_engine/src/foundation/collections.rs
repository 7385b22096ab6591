//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a body registered in a physics world
    pub struct BodyHandle;
}

/// Slot map keyed by body handles
pub type BodyMap<T> = SlotMap<BodyHandle, T>;

/// Slot map paired with an insertion-order list
///
/// Slot maps hand out stable keys but do not iterate in insertion order,
/// so the order is kept separately. Entries are never removed.
#[derive(Debug, Clone)]
pub struct OrderedBodyMap<T> {
    items: BodyMap<T>,
    order: Vec<BodyHandle>,
}

impl<T> OrderedBodyMap<T> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            items: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Append an item and return its handle
    pub fn push(&mut self, item: T) -> BodyHandle {
        let handle = self.items.insert(item);
        self.order.push(handle);
        handle
    }

    /// Get an item by handle
    pub fn get(&self, handle: BodyHandle) -> Option<&T> {
        self.items.get(handle)
    }

    /// Handles in insertion order
    pub fn handles(&self) -> &[BodyHandle] {
        &self.order
    }

    /// Iterate items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &T)> + '_ {
        self.order
            .iter()
            .filter_map(move |&handle| self.items.get(handle).map(|item| (handle, item)))
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<T> Default for OrderedBodyMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let mut map = OrderedBodyMap::new();
        let a = map.push("a");
        let b = map.push("b");
        let c = map.push("c");

        assert_eq!(map.handles(), &[a, b, c]);
        let values: Vec<_> = map.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!["a", "b", "c"]);
        assert_eq!(map.get(b), Some(&"b"));
        assert_eq!(map.len(), 3);
    }
}
