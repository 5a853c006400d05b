//! Domain models for to-do lists.
//!
//! # Core Concepts
//!
//! - [`Item`]: A single to-do entry. Items either live in the flat items
//!   collection (which *is* the built-in [`TODAY`] list) or are embedded in
//!   exactly one [`TodoList`].
//! - [`TodoList`]: A named list that owns its own ordered copy of items.
//!   Lists are created lazily the first time their name is requested.
//!
//! List names are always looked up in normalized form, see
//! [`normalize_list_name`].

mod item;
mod list;

pub use item::*;
pub use list::*;
