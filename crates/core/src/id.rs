//! Unique identifiers for SublimeQuest entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Ulid);

        impl $name {
            /// Generate a new identifier.
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ulid::DecodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a Habit
    HabitId
);

entity_id!(
    /// Unique identifier for a Goal
    GoalId
);

entity_id!(
    /// Unique identifier for a Milestone inside a Goal
    MilestoneId
);

entity_id!(
    /// Unique identifier for a TimeBlock
    TimeBlockId
);

entity_id!(
    /// Unique identifier for a Quest
    QuestId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = HabitId::new();
        let b = HabitId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_display_roundtrips_through_from_str() {
        let id = QuestId::new();
        let parsed: QuestId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-ulid".parse::<QuestId>().is_err());
    }
}
