use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Item;

/// Title of the built-in list backed by the flat items collection.
pub const TODAY: &str = "Today";

/// A named to-do list with its own embedded items.
///
/// Names are unique and stored in normalized form. Lists are never deleted;
/// they only grow or shrink through item mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoList {
    pub id: Uuid,
    pub name: String,
    /// Embedded items in display order. New items are appended.
    pub items: Vec<Item>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalize a user-supplied list name by upper-casing its first character.
///
/// The rest of the name is left untouched, so `"errands"` and `"Errands"`
/// resolve to the same list while `"eRRANDS"` becomes `"ERRANDS"`.
pub fn normalize_list_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether a name addresses the built-in Today list.
pub fn is_today(name: &str) -> bool {
    name == TODAY
}
