//! SublimeQuest core data models.
//!
//! This crate defines the entities the progression engine rewards:
//! habits, goals with milestones, scheduled time blocks and quests,
//! plus the avatar they level up.

#![warn(missing_docs)]

// Core identities
mod id;
mod error;

// Progression
mod avatar;

// Tracked entities
mod habit;
mod goal;
mod schedule;
mod quest;

// Generated content
mod suggestion;

// Re-exports
pub use id::*;
pub use error::{ValidationError, Result};

pub use avatar::{Avatar, BASE_XP_TO_NEXT_LEVEL};
pub use habit::{Habit, HabitDraft};
pub use goal::{Goal, GoalDraft, GoalHorizon, Milestone};
pub use schedule::{TimeBlock, TimeBlockDraft, TimeBlockKind};
pub use quest::{Quest, QuestDraft, QuestKind};
pub use suggestion::{HabitSuggestion, QuestSuggestion, SUGGESTED_HABIT_SP};

/// Calendar day, serialized as `YYYY-MM-DD`.
pub type Date = chrono::NaiveDate;

/// Today's date in UTC.
pub fn today() -> Date {
    chrono::Utc::now().date_naive()
}
