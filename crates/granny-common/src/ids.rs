//! ID types for run-scoped objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an item placed in the house for one run.
///
/// Ids are assigned in item-type order when the run's spawns are generated
/// and display as `item-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates an item id from its index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId::new(0).to_string(), "item-0");
        assert_eq!(ItemId::new(9).to_string(), "item-9");
    }

    #[test]
    fn test_item_id_ordering() {
        assert!(ItemId::new(1) < ItemId::new(2));
        assert_eq!(ItemId::new(4).raw(), 4);
    }
}
