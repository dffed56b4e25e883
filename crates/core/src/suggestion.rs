//! Suggested habits and quests produced by an external generator.

use serde::{Deserialize, Serialize};

use crate::habit::Habit;
use crate::id::{HabitId, QuestId};
use crate::quest::{Quest, QuestKind};

/// SP value given to every accepted habit suggestion.
pub const SUGGESTED_HABIT_SP: u32 = 15;

const DEFAULT_HABIT_NAME: &str = "New Habit";
const DEFAULT_HABIT_DESCRIPTION: &str = "A helpful new habit.";

/// A habit proposed by the generator. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSuggestion {
    /// Proposed name
    #[serde(default)]
    pub name: Option<String>,
    /// Proposed description
    #[serde(default)]
    pub description: Option<String>,
}

impl HabitSuggestion {
    /// Turn the suggestion into a tracked habit, filling gaps with defaults.
    pub fn into_habit(self) -> Habit {
        Habit {
            id: HabitId::new(),
            name: non_blank(self.name).unwrap_or_else(|| DEFAULT_HABIT_NAME.to_string()),
            description: non_blank(self.description)
                .unwrap_or_else(|| DEFAULT_HABIT_DESCRIPTION.to_string()),
            sp_value: SUGGESTED_HABIT_SP,
            streak: 0,
            completed_on: Default::default(),
        }
    }
}

/// A quest proposed by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestSuggestion {
    /// Proposed title
    pub title: String,
    /// Proposed description
    pub description: String,
    /// Proposed reward
    pub reward: u32,
    /// Always generic for generated quests
    #[serde(rename = "type", default)]
    pub kind: QuestKind,
}

impl QuestSuggestion {
    /// Turn the suggestion into an open quest. Generated quests never need a guided flow.
    pub fn into_quest(self) -> Quest {
        Quest {
            id: QuestId::new(),
            title: self.title,
            description: self.description,
            reward: self.reward,
            completed: false,
            kind: QuestKind::Generic,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
