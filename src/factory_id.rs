#[cfg(not(feature = "unchecked"))]
use std::sync::atomic::{AtomicUsize, Ordering};

/// Global factory counter. Handles remember the id of the factory that
/// issued them, so an element from one factory is never mistaken for a
/// slot in another factory's arena. Wrap-around would only cause false
/// positives in that ownership check.
#[cfg(not(feature = "unchecked"))]
static FACTORY_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A unique identifier for a factory instance.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct FactoryId(#[cfg(not(feature = "unchecked"))] usize);

impl FactoryId {
    /// Create a new unique factory identifier.
    pub fn new() -> Self {
        #[cfg(feature = "unchecked")]
        {
            FactoryId()
        }
        #[cfg(not(feature = "unchecked"))]
        {
            let id = FACTORY_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
            FactoryId(id)
        }
    }

    /// Whether an element stamped with `other` may be used with this factory.
    /// Always true when ownership checks are compiled out.
    pub fn owns(self, other: FactoryId) -> bool {
        self == other
    }
}

impl Default for FactoryId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(feature = "unchecked")))]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct() {
        let a = FactoryId::new();
        let b = FactoryId::new();
        assert_ne!(a, b);
        assert!(a.owns(a));
        assert!(!a.owns(b));
    }
}
