//! Habit model - a recurring activity completed at most once per day.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, require_text, Result};
use crate::id::HabitId;
use crate::Date;

/// A tracked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier
    pub id: HabitId,

    /// Short name
    pub name: String,

    /// Why the habit matters
    pub description: String,

    /// Points (and XP) granted per completion
    pub sp_value: u32,

    /// Consecutive completions, never negative
    pub streak: u32,

    /// Days on which the habit was completed
    pub completed_on: BTreeSet<Date>,
}

impl Habit {
    /// Build a fresh habit from a draft: zero streak, no completions.
    pub fn from_draft(draft: HabitDraft) -> Self {
        Self {
            id: HabitId::new(),
            name: draft.name,
            description: draft.description,
            sp_value: draft.sp_value,
            streak: 0,
            completed_on: BTreeSet::new(),
        }
    }

    /// Whether the habit was completed on `date`.
    pub fn is_completed_on(&self, date: Date) -> bool {
        self.completed_on.contains(&date)
    }

    /// Check the user-editable fields.
    pub fn validate(&self) -> Result<()> {
        require_text(&self.name, "habit name")?;
        require_positive(self.sp_value, "habit SP value")
    }
}

/// User input for a new habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDraft {
    /// Short name
    pub name: String,
    /// Why the habit matters
    pub description: String,
    /// Points granted per completion
    pub sp_value: u32,
}

impl HabitDraft {
    /// Create a draft.
    pub fn new(name: impl Into<String>, description: impl Into<String>, sp_value: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sp_value,
        }
    }

    /// Check the draft before it becomes a habit.
    pub fn validate(&self) -> Result<()> {
        require_text(&self.name, "habit name")?;
        require_positive(self.sp_value, "habit SP value")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    #[test]
    fn test_from_draft_defaults() {
        let habit = Habit::from_draft(HabitDraft::new("Stretch", "Loosen up", 10));
        assert_eq!(habit.streak, 0);
        assert!(habit.completed_on.is_empty());
        assert_eq!(habit.sp_value, 10);
    }

    #[test]
    fn test_validate_rejects_blank_name_and_zero_value() {
        assert_eq!(
            HabitDraft::new("  ", "", 10).validate(),
            Err(ValidationError::EmptyField("habit name"))
        );
        assert_eq!(
            HabitDraft::new("Read", "", 0).validate(),
            Err(ValidationError::NonPositive("habit SP value"))
        );
    }

    #[test]
    fn test_completed_on_serializes_as_date_strings() {
        let mut habit = Habit::from_draft(HabitDraft::new("Read", "", 5));
        habit.completed_on.insert(Date::from_ymd_opt(2024, 3, 9).unwrap());
        let json = serde_json::to_value(&habit).unwrap();
        assert_eq!(json["completedOn"][0], "2024-03-09");
        assert_eq!(json["spValue"], 5);
    }
}
