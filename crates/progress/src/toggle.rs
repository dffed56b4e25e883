//! Toggle coordinators: completion flips and the rewards they earn.
//!
//! Each coordinator is pure. It returns the updated entity together with
//! the reward to hand to [`PlayerProgress::apply`](crate::PlayerProgress::apply),
//! so the caller commits both or neither.

use sublime_core::{Date, Goal, Habit, MilestoneId, Quest, TimeBlock, TimeBlockId};

use crate::reward::{Reward, RewardSource, RewardTable};

/// An entity after a toggle, with the reward that toggle earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled<T> {
    /// Updated entity
    pub entity: T,
    /// Points/XP delta to apply
    pub reward: Reward,
    /// Completion state after the toggle
    pub completed: bool,
}

/// Complete or un-complete a habit for `date`.
///
/// Completing inserts the date and raises the streak; un-completing removes
/// it and lowers the streak, floored at 0. Points and XP both move by the
/// habit's SP value.
pub fn toggle_habit(habit: &Habit, date: Date) -> Toggled<Habit> {
    let was_completed = habit.is_completed_on(date);
    let mut entity = habit.clone();

    if was_completed {
        entity.completed_on.remove(&date);
        entity.streak = entity.streak.saturating_sub(1);
    } else {
        entity.completed_on.insert(date);
        entity.streak = entity.streak.saturating_add(1);
    }

    Toggled {
        reward: Reward::signed(RewardSource::Habit, !was_completed, habit.sp_value, habit.sp_value),
        entity,
        completed: !was_completed,
    }
}

/// Flip a milestone inside its goal. `None` if the goal has no such milestone.
pub fn toggle_milestone(
    goal: &Goal,
    milestone_id: MilestoneId,
    table: RewardTable,
) -> Option<Toggled<Goal>> {
    let mut entity = goal.clone();
    let milestone = entity.milestones.iter_mut().find(|m| m.id == milestone_id)?;
    milestone.completed = !milestone.completed;
    let completed = milestone.completed;

    Some(Toggled {
        entity,
        reward: Reward::signed(RewardSource::Milestone, completed, table.points, table.xp),
        completed,
    })
}

/// Flip a block within one day's schedule. `None` if the block is not there.
pub fn toggle_time_block(blocks: &[TimeBlock], block_id: TimeBlockId) -> Option<Toggled<Vec<TimeBlock>>> {
    let mut entity = blocks.to_vec();
    let block = entity.iter_mut().find(|b| b.id == block_id)?;
    block.completed = !block.completed;
    let completed = block.completed;
    let reward = Reward::signed(RewardSource::TimeBlock, completed, block.sp_value, block.sp_value);

    Some(Toggled { entity, reward, completed })
}

/// Flip a quest's completion.
pub fn toggle_quest(quest: &Quest) -> Toggled<Quest> {
    let mut entity = quest.clone();
    entity.completed = !quest.completed;

    Toggled {
        reward: Reward::signed(RewardSource::Quest, entity.completed, quest.reward, quest.reward),
        completed: entity.completed,
        entity,
    }
}
