mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::models::*;

/// Handle to the document store. Cheap to clone; all clones share one
/// connection, so every operation below is serialized.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Path used when no database location is configured.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "todolist")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("todolist.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    // ============================================================
    // Item operations (the Today list)
    // ============================================================

    /// All items in insertion order.
    pub fn get_all_items(&self) -> Result<Vec<Item>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name FROM items ORDER BY seq")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name)| -> Result<Item> {
                let id = parse_uuid(&id).with_context(|| format!("Corrupt item '{}'", name))?;
                Ok(Item { id, name })
            })
            .collect()
    }

    pub fn insert_item(&self, item: &Item) -> Result<()> {
        let conn = self.lock()?;
        insert_item_row(&conn, item)
    }

    /// Insert `items` only if the collection is currently empty.
    ///
    /// The emptiness check and the inserts share one transaction under the
    /// connection lock, so two racing first visits seed exactly once.
    /// Returns whether anything was inserted.
    pub fn seed_items_if_empty(&self, items: &[Item]) -> Result<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let count: i64 = tx.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(false);
        }

        for item in items {
            insert_item_row(&tx, item)?;
        }
        tx.commit()?;

        Ok(true)
    }

    /// Delete an item by id. Returns false when nothing matched.
    pub fn delete_item(&self, id: Uuid) -> Result<bool> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM items WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // List operations
    // ============================================================

    pub fn get_list_by_name(&self, name: &str) -> Result<Option<TodoList>> {
        let conn = self.lock()?;
        select_list(&conn, name)
    }

    /// Create a list unless one with the same name already exists.
    ///
    /// Returns whether a new list was created. An existing list is left
    /// untouched.
    pub fn create_list_if_absent(&self, name: &str, items: &[Item]) -> Result<bool> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();

        let rows = conn.execute(
            "INSERT INTO lists (id, name, items, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(name) DO NOTHING",
            (
                Uuid::new_v4().to_string(),
                name,
                serde_json::to_string(items)?,
                &now,
                &now,
            ),
        )?;

        Ok(rows > 0)
    }

    /// Append an item to the end of a list.
    ///
    /// Returns the updated list, or `None` if no list has that name.
    pub fn append_list_item(&self, name: &str, item: Item) -> Result<Option<TodoList>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let Some(mut list) = select_list(&tx, name)? else {
            return Ok(None);
        };

        list.items.push(item);
        list.updated_at = Utc::now();
        save_list_items(&tx, &list)?;
        tx.commit()?;

        Ok(Some(list))
    }

    /// Pull the item with `item_id` out of a list.
    ///
    /// Returns false when either the list or the item does not exist.
    pub fn pull_list_item(&self, name: &str, item_id: Uuid) -> Result<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let Some(mut list) = select_list(&tx, name)? else {
            return Ok(false);
        };

        let before = list.items.len();
        list.items.retain(|item| item.id != item_id);
        if list.items.len() == before {
            return Ok(false);
        }

        list.updated_at = Utc::now();
        save_list_items(&tx, &list)?;
        tx.commit()?;

        Ok(true)
    }
}

fn insert_item_row(conn: &Connection, item: &Item) -> Result<()> {
    conn.execute(
        "INSERT INTO items (id, name, created_at) VALUES (?, ?, ?)",
        (item.id.to_string(), &item.name, Utc::now().to_rfc3339()),
    )?;
    Ok(())
}

fn select_list(conn: &Connection, name: &str) -> Result<Option<TodoList>> {
    let row = conn
        .query_row(
            "SELECT id, name, items, created_at, updated_at FROM lists WHERE name = ?",
            [name],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        )
        .optional()?;

    let Some((id, name, items_json, created_at, updated_at)) = row else {
        return Ok(None);
    };

    let items: Vec<Item> = serde_json::from_str(&items_json)
        .with_context(|| format!("Corrupt item documents in list '{}'", name))?;

    let context = || format!("Corrupt list '{}'", name);
    let id = parse_uuid(&id).with_context(context)?;
    let created_at = parse_datetime(&created_at).with_context(context)?;
    let updated_at = parse_datetime(&updated_at).with_context(context)?;

    Ok(Some(TodoList {
        id,
        name,
        items,
        created_at,
        updated_at,
    }))
}

fn save_list_items(conn: &Connection, list: &TodoList) -> Result<()> {
    conn.execute(
        "UPDATE lists SET items = ?, updated_at = ? WHERE id = ?",
        (
            serde_json::to_string(&list.items)?,
            list.updated_at.to_rfc3339(),
            list.id.to_string(),
        ),
    )?;
    Ok(())
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).with_context(|| format!("Invalid id '{}'", s))
}

fn parse_datetime(s: &str) -> Result<chrono::DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid timestamp '{}'", s))
}
