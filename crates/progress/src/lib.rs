//! Progression (reward economy)
//!
//! Avatar leveling, the Sublime Point balance, and the toggle
//! coordinators that turn completions into point and XP deltas.

#![warn(missing_docs)]

pub mod engine;
pub mod points;
pub mod reward;
pub mod toggle;
pub mod quest_flow;

pub use engine::{add_experience, Progression, PlayerProgress};
pub use points::{PointBalance, PointPolicy, STARTING_POINTS};
pub use reward::{Reward, RewardSource, RewardTable};
pub use toggle::{toggle_habit, toggle_milestone, toggle_quest, toggle_time_block, Toggled};
pub use quest_flow::{QuestFlow, StartOutcome};
