//! Point/XP deltas produced by toggles.

use sublime_core::GoalHorizon;

/// What kind of entity produced a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewardSource {
    /// Habit completion for a day
    Habit,
    /// Goal milestone
    Milestone,
    /// Scheduled time block
    TimeBlock,
    /// Quest
    Quest,
}

/// A signed change to the point balance and avatar XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    /// Producer of the reward
    pub source: RewardSource,
    /// Point delta
    pub points: i64,
    /// XP delta
    pub xp: i64,
}

impl Reward {
    /// Positive reward when `completed`, the exact negation otherwise.
    pub fn signed(source: RewardSource, completed: bool, points: u32, xp: u32) -> Self {
        let sign = if completed { 1 } else { -1 };
        Self {
            source,
            points: sign * points as i64,
            xp: sign * xp as i64,
        }
    }
}

/// Fixed per-milestone payout of a goal collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardTable {
    /// Points per milestone
    pub points: u32,
    /// XP per milestone
    pub xp: u32,
}

impl RewardTable {
    /// Long-term goal milestones.
    pub const LONG_TERM: RewardTable = RewardTable { points: 50, xp: 25 };

    /// Short-term goal milestones.
    pub const SHORT_TERM: RewardTable = RewardTable { points: 30, xp: 15 };

    /// Table for a goal collection.
    pub fn for_horizon(horizon: GoalHorizon) -> Self {
        match horizon {
            GoalHorizon::LongTerm => Self::LONG_TERM,
            GoalHorizon::ShortTerm => Self::SHORT_TERM,
        }
    }
}
