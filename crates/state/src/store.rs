//! Keyed entity collections.

use serde::{Deserialize, Serialize};
use sublime_core::{Goal, GoalId, Habit, HabitId, Quest, QuestId, TimeBlock, TimeBlockId};

/// An entity with a stable identifier.
pub trait Entity: Clone {
    /// Identifier type
    type Id: Copy + Eq + std::fmt::Debug + std::fmt::Display;

    /// The entity's identifier.
    fn id(&self) -> Self::Id;
}

impl Entity for Habit {
    type Id = HabitId;
    fn id(&self) -> HabitId {
        self.id
    }
}

impl Entity for Goal {
    type Id = GoalId;
    fn id(&self) -> GoalId {
        self.id
    }
}

impl Entity for Quest {
    type Id = QuestId;
    fn id(&self) -> QuestId {
        self.id
    }
}

impl Entity for TimeBlock {
    type Id = TimeBlockId;
    fn id(&self) -> TimeBlockId {
        self.id
    }
}

/// An ordered collection of entities. Newly created entities go first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Collection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing items, keeping their order.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    /// All items in order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterate in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up by id.
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Insert at the front.
    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Append at the back, keeping order.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    /// Replace the item with the same id. Returns false if absent.
    pub fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    /// Remove by id.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
