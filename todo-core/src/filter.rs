//! Filter projection over the collection

use serde::{Deserialize, Serialize};

use crate::todo::TodoItem;

/// View-only selection lens over the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Every filter, in tab order
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, item: &TodoItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !item.completed,
            Filter::Completed => item.completed,
        }
    }

    /// The subsequence of `items` this filter shows, in collection order
    pub fn project<'a, I>(self, items: I) -> Vec<&'a TodoItem>
    where
        I: IntoIterator<Item = &'a TodoItem>,
    {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }

    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }
}
