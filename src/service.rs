//! List resolution and item mutations.
//!
//! [`ListService`] decides which backing collection a request touches: the
//! flat items collection for [`TODAY`], or a named [`TodoList`] document for
//! everything else. Every write is confirmed by the store before the service
//! returns, so a redirect issued afterwards always shows persisted state.

use uuid::Uuid;

use crate::db::Database;
use crate::models::*;

/// Normalized name that addresses the about page rather than a list.
const ABOUT: &str = "About";
pub const ABOUT_PATH: &str = "/about";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("List not found: {0}")]
    ListNotFound(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome of resolving a list for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPage {
    /// The list exists; render it.
    Show { title: String, items: Vec<Item> },
    /// The list was just seeded or lives elsewhere; fetch it again at this path.
    Redirect(String),
}

#[derive(Clone)]
pub struct ListService {
    db: Database,
}

impl ListService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Seed the Today list with fresh default items if it is empty.
    pub fn seed_today(&self) -> ServiceResult<bool> {
        let seeded = self.db.seed_items_if_empty(&default_items())?;
        if seeded {
            tracing::info!("Seeded {} default items into {}", DEFAULT_ITEM_NAMES.len(), TODAY);
        }
        Ok(seeded)
    }

    /// Resolve the built-in Today list.
    ///
    /// An empty collection is seeded first and the caller is sent back to
    /// `/` to see the result.
    pub fn default_list(&self) -> ServiceResult<ListPage> {
        let items = self.db.get_all_items()?;
        if !items.is_empty() {
            return Ok(ListPage::Show {
                title: TODAY.to_string(),
                items,
            });
        }

        self.seed_today()?;
        Ok(ListPage::Redirect(list_path(TODAY)))
    }

    /// Resolve a named list, creating it on first request.
    pub fn named_list(&self, raw_name: &str) -> ServiceResult<ListPage> {
        let name = normalize_list_name(raw_name);

        // The Today list has exactly one home.
        if is_today(&name) {
            return Ok(ListPage::Redirect(list_path(TODAY)));
        }
        if name == ABOUT {
            return Ok(ListPage::Redirect(ABOUT_PATH.to_string()));
        }

        if let Some(list) = self.db.get_list_by_name(&name)? {
            return Ok(ListPage::Show {
                title: list.name,
                items: list.items,
            });
        }

        if self.db.create_list_if_absent(&name, &default_items())? {
            tracing::info!("Created list '{}'", name);
        }
        Ok(ListPage::Redirect(list_path(&name)))
    }

    /// Add an item to a list and return the path of that list.
    ///
    /// `list_name` is matched exactly; it is the title the list was rendered
    /// with, not raw user input.
    pub fn add_item(&self, name: &str, list_name: &str) -> ServiceResult<String> {
        let item = Item::new(name);

        if is_today(list_name) {
            self.db.insert_item(&item)?;
        } else if self.db.append_list_item(list_name, item)?.is_none() {
            return Err(ServiceError::ListNotFound(list_name.to_string()));
        }

        Ok(list_path(list_name))
    }

    /// Remove an item from a list and return the path of that list.
    ///
    /// Unknown ids, malformed ids, and unknown lists are all no-ops.
    pub fn delete_item(&self, item_id: &str, list_name: &str) -> ServiceResult<String> {
        let path = list_path(list_name);

        let Ok(id) = Uuid::parse_str(item_id.trim()) else {
            tracing::debug!("Ignoring delete of malformed item id '{}'", item_id);
            return Ok(path);
        };

        let removed = if is_today(list_name) {
            self.db.delete_item(id)?
        } else {
            self.db.pull_list_item(list_name, id)?
        };

        if !removed {
            tracing::debug!("No item {} in list '{}'", id, list_name);
        }

        Ok(path)
    }
}

/// URL path at which a list is displayed.
pub fn list_path(list_name: &str) -> String {
    if is_today(list_name) {
        "/".to_string()
    } else {
        format!("/{}", urlencoding::encode(list_name))
    }
}
