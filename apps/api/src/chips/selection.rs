use serde::Serialize;

use crate::models::{Field, Item};

/// Where a selection sits relative to its field's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Empty,
    Partial,
    Full,
}

/// Result of an add. Only `Added` and `Replaced` change the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Single-select field: the previous item was swapped out.
    Replaced(Item),
    Duplicate,
    /// Soft cap: the field is full and the item was ignored.
    AtLimit,
}

impl AddOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, AddOutcome::Added | AddOutcome::Replaced(_))
    }
}

/// Ordered, id-unique list of items chosen for one field.
///
/// Invariants: no two items share an id, and `len() <= field.limit()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    field: Field,
    items: Vec<Item>,
}

impl Selection {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            items: Vec::with_capacity(field.limit()),
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.field.limit()
    }

    pub fn phase(&self) -> Phase {
        if self.items.is_empty() {
            Phase::Empty
        } else if self.is_full() {
            Phase::Full
        } else {
            Phase::Partial
        }
    }

    pub fn add(&mut self, item: Item) -> AddOutcome {
        if self.contains(item.id) {
            return AddOutcome::Duplicate;
        }

        if self.field.is_single_select() {
            let previous = self.items.pop();
            self.items.push(item);
            return match previous {
                Some(prev) => AddOutcome::Replaced(prev),
                None => AddOutcome::Added,
            };
        }

        if self.is_full() {
            return AddOutcome::AtLimit;
        }

        self.items.push(item);
        AddOutcome::Added
    }

    /// Removes the item with `id`, returning it if it was selected.
    pub fn remove(&mut self, id: i64) -> Option<Item> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Value written to the hidden form field.
    pub fn ids_csv(&self) -> String {
        self.items
            .iter()
            .map(|item| item.id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
