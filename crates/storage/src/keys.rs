//! Keys of the persisted state slices.

/// One persisted slice of application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateKey {
    /// Avatar level and XP
    Avatar,
    /// Sublime Point balance
    Points,
    /// Habit collection
    Habits,
    /// Long-term goals
    LongTermGoals,
    /// Short-term goals
    ShortTermGoals,
    /// Time blocks by date
    Schedules,
    /// Quest collection
    Quests,
}

impl StateKey {
    /// Storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKey::Avatar => "sublime_avatar",
            StateKey::Points => "sublime_points",
            StateKey::Habits => "sublime_habits",
            StateKey::LongTermGoals => "sublime_goals",
            StateKey::ShortTermGoals => "sublime_short_term_goals",
            StateKey::Schedules => "sublime_schedules",
            StateKey::Quests => "sublime_quests",
        }
    }
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
