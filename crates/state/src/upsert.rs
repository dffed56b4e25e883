//! Explicit create-or-update input.

/// Either a new entity's draft or an edited existing entity.
///
/// The caller decides which; stores never inspect the payload to guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upsert<D, E> {
    /// Create a new entity from a draft
    Create(D),
    /// Replace the entity with the same id
    Update(E),
}
