//! Todo items and the ordered collection that holds them
//!
//! [`TodoList`] is the positional collection: every operation addresses
//! items by index, and a failing operation leaves the list untouched.
//! Newest items live at index 0.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoError};

/// Stable identifier assigned to an item when it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

impl TodoItem {
    /// Create an item; the title is trimmed
    pub fn new(id: TodoId, title: impl Into<String>, completed: bool) -> Self {
        let title = title.into();
        Self {
            id,
            title: title.trim().to_string(),
            completed,
        }
    }

    /// Whether the item is still active
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Ordered collection of todo items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from items in display order
    pub fn from_items(items: Vec<TodoItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    /// Position of the item with this id
    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn get_by_id(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(TodoError::OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Insert at index 0, shifting every existing item down by one
    pub fn prepend(&mut self, item: TodoItem) -> Result<()> {
        if item.title.trim().is_empty() {
            return Err(TodoError::InvalidInput("title cannot be empty".into()));
        }
        self.items.insert(0, item);
        Ok(())
    }

    /// Set the completion flag of the item at `index`
    ///
    /// Returns the previous value.
    pub fn set_completed(&mut self, index: usize, value: bool) -> Result<bool> {
        self.check_index(index)?;
        let item = &mut self.items[index];
        Ok(std::mem::replace(&mut item.completed, value))
    }

    /// Remove and return the item at `index`
    pub fn remove(&mut self, index: usize) -> Result<TodoItem> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Move the item at `from` to position `to`
    ///
    /// Items between the two positions shift by one; this is a move, not a
    /// swap. `from == to` is a no-op.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        Ok(())
    }

    /// Remove every item matching `predicate`, keeping survivors in order
    ///
    /// Returns how many items were removed.
    pub fn filter_remove<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&TodoItem) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        before - self.items.len()
    }

    /// Count items matching `predicate`
    pub fn count<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&TodoItem) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).count()
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
