use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Names of the items every fresh list starts with.
pub const DEFAULT_ITEM_NAMES: [&str; 3] = ["Buy Food", "Cook Food", "Eat Food"];

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
}

impl Item {
    /// Create an item with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Build a new copy of the default items.
///
/// Every call yields new ids, so seeding the Today list and seeding any
/// number of named lists never share item identity.
pub fn default_items() -> Vec<Item> {
    DEFAULT_ITEM_NAMES.iter().map(|name| Item::new(*name)).collect()
}
