//! Session-scoped todo store with change subscriptions
//!
//! The store owns the [`TodoList`], hands out ids, and tells subscribers
//! when the collection changed. Views hold a reference to the store and read
//! through it; they never get mutable access to the list itself.
//!
//! # Example
//!
//! ```
//! use todo_core::{Change, TodoStore};
//!
//! let mut store = TodoStore::new();
//! let changes = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
//! let sink = changes.clone();
//! store.subscribe(move |event| sink.borrow_mut().push(event.change.clone()));
//!
//! let id = store.create("Buy milk", false).unwrap();
//! store.toggle_id(id).unwrap();
//!
//! assert_eq!(store.items_left(), 0);
//! assert_eq!(changes.borrow().len(), 2);
//! assert!(matches!(changes.borrow()[0], Change::Prepended { .. }));
//! ```

use std::fmt;

use tracing::{debug, warn};

use crate::error::{Result, TodoError};
use crate::todo::{TodoId, TodoItem, TodoList};

/// What a successful mutation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Prepended { id: TodoId },
    CompletedSet { id: TodoId, completed: bool },
    Removed { id: TodoId },
    Reordered { from: usize, to: usize },
    BulkRemoved { count: usize },
}

/// Notification delivered to subscribers after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    /// Store revision after the change
    pub revision: u64,
    pub change: Change,
}

/// Handle returned by [`TodoStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&StoreEvent)>;

/// Owner of the todo collection
pub struct TodoStore {
    list: TodoList,
    next_id: u64,
    revision: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoStore")
            .field("list", &self.list)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            list: TodoList::new(),
            next_id: 0,
            revision: 0,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a store seeded with `(title, completed)` pairs in display order
    ///
    /// Blank titles are skipped.
    pub fn with_items<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = (T, bool)>,
        T: Into<String>,
    {
        let mut store = Self::new();
        let mut seeded = Vec::new();
        for (title, completed) in items {
            let item = TodoItem::new(store.allocate_id(), title, completed);
            if !item.title.is_empty() {
                seeded.push(item);
            }
        }
        store.list = TodoList::from_items(seeded);
        store
    }

    fn allocate_id(&mut self) -> TodoId {
        let id = TodoId(self.next_id);
        // Once exhausted, the repeated id is refused by `prepend`
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    // ===== Reads =====

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn items(&self) -> &[TodoItem] {
        self.list.items()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.list.get_by_id(id)
    }

    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.list.position(id)
    }

    /// Incremented on every successful mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: FnMut(&TodoItem) -> bool,
    {
        self.list.count(predicate)
    }

    /// Number of items not yet completed
    pub fn items_left(&self) -> usize {
        self.list.count(TodoItem::is_active)
    }

    pub fn completed_count(&self) -> usize {
        self.list.count(|item| item.completed)
    }

    // ===== Subscriptions =====

    /// Register an observer called after every successful mutation
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn commit(&mut self, change: Change) {
        self.revision += 1;
        debug!(revision = self.revision, ?change, "todo store changed");
        let event = StoreEvent {
            revision: self.revision,
            change,
        };
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }

    fn logged<T>(op: &'static str, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            warn!(op, error = %e, "todo store operation rejected");
        }
        result
    }

    fn require(&self, id: TodoId) -> Result<usize> {
        self.list.position(id).ok_or(TodoError::UnknownId(id))
    }

    // ===== Positional mutations =====

    /// Create a new item at the head of the list
    pub fn create(&mut self, title: impl Into<String>, completed: bool) -> Result<TodoId> {
        let title = title.into();
        if title.trim().is_empty() {
            return Self::logged(
                "create",
                Err(TodoError::InvalidInput("title cannot be empty".into())),
            );
        }
        let item = TodoItem::new(self.allocate_id(), title, completed);
        let id = item.id;
        self.prepend(item)?;
        Ok(id)
    }

    /// Insert an existing item at index 0
    ///
    /// Fails if the title is blank or the id is already present.
    pub fn prepend(&mut self, item: TodoItem) -> Result<()> {
        if self.list.position(item.id).is_some() {
            return Self::logged(
                "prepend",
                Err(TodoError::InvalidInput(format!("duplicate id {}", item.id))),
            );
        }
        let id = item.id;
        Self::logged("prepend", self.list.prepend(item))?;
        // Keep freshly allocated ids clear of externally built items
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.commit(Change::Prepended { id });
        Ok(())
    }

    pub fn set_completed(&mut self, index: usize, value: bool) -> Result<()> {
        let previous = Self::logged("set_completed", self.list.set_completed(index, value))?;
        if previous != value {
            let id = self.list.items()[index].id;
            self.commit(Change::CompletedSet {
                id,
                completed: value,
            });
        }
        Ok(())
    }

    /// Flip the completion flag at `index`; returns the new value
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let current = match self.list.get(index) {
            Some(item) => item.completed,
            None => {
                return Self::logged(
                    "toggle",
                    Err(TodoError::OutOfRange {
                        index,
                        len: self.list.len(),
                    }),
                )
            }
        };
        self.set_completed(index, !current)?;
        Ok(!current)
    }

    pub fn remove(&mut self, index: usize) -> Result<TodoItem> {
        let item = Self::logged("remove", self.list.remove(index))?;
        self.commit(Change::Removed { id: item.id });
        Ok(item)
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        Self::logged("reorder", self.list.reorder(from, to))?;
        if from != to {
            self.commit(Change::Reordered { from, to });
        }
        Ok(())
    }

    /// Remove every item matching `predicate`; returns the number removed
    pub fn filter_remove<F>(&mut self, predicate: F) -> usize
    where
        F: FnMut(&TodoItem) -> bool,
    {
        let count = self.list.filter_remove(predicate);
        if count > 0 {
            self.commit(Change::BulkRemoved { count });
        }
        count
    }

    pub fn clear_completed(&mut self) -> usize {
        self.filter_remove(|item| item.completed)
    }

    // ===== Id-addressed mutations =====

    pub fn toggle_id(&mut self, id: TodoId) -> Result<bool> {
        let index = Self::logged("toggle", self.require(id))?;
        self.toggle(index)
    }

    pub fn remove_id(&mut self, id: TodoId) -> Result<TodoItem> {
        let index = Self::logged("remove", self.require(id))?;
        self.remove(index)
    }

    /// Move the item with `id` to collection position `to`
    pub fn move_id(&mut self, id: TodoId, to: usize) -> Result<()> {
        let from = Self::logged("reorder", self.require(id))?;
        self.reorder(from, to)
    }
}
