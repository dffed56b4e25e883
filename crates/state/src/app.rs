//! The application controller.
//!
//! [`SublimeApp`] owns the whole [`AppState`] and exposes one synchronous
//! entry point per user event. Every toggle computes its result with a
//! pure coordinator, applies the reward, and writes the entity back in the
//! same call, so callers never observe a half-applied toggle. Persistence
//! happens afterwards through [`SublimeApp::flush`].

use std::collections::BTreeSet;

use sublime_core::{
    Avatar, Date, Goal, GoalDraft, GoalHorizon, GoalId, Habit, HabitDraft, HabitId,
    HabitSuggestion, MilestoneId, Quest, QuestDraft, QuestId, QuestSuggestion, TimeBlock,
    TimeBlockDraft, TimeBlockId, ValidationError,
};
use sublime_progress::{
    toggle_habit, toggle_milestone, toggle_quest, toggle_time_block, PlayerProgress, PointBalance,
    PointPolicy, QuestFlow, Reward, RewardTable, StartOutcome, Toggled,
};
use sublime_storage::{Persistence, StateKey, Storage};
use tracing::{debug, info};

use crate::schedule::Schedule;
use crate::seed;
use crate::store::Collection;
use crate::upsert::Upsert;

/// Everything the app tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Avatar and point balance
    pub progress: PlayerProgress,
    /// Habits
    pub habits: Collection<Habit>,
    /// Long-term goals
    pub long_term_goals: Collection<Goal>,
    /// Short-term goals
    pub short_term_goals: Collection<Goal>,
    /// Time blocks by day
    pub schedule: Schedule,
    /// Quests
    pub quests: Collection<Quest>,
}

impl AppState {
    /// A blank state: default avatar, zero points, no entities.
    pub fn empty() -> Self {
        Self {
            progress: PlayerProgress::default(),
            habits: Collection::new(),
            long_term_goals: Collection::new(),
            short_term_goals: Collection::new(),
            schedule: Schedule::new(),
            quests: Collection::new(),
        }
    }

    /// First-run state with sample content scheduled on `today`.
    pub fn seeded(today: Date) -> Self {
        Self {
            progress: PlayerProgress::new(Avatar::default(), PointBalance::starting()),
            habits: seed::habits(),
            long_term_goals: seed::long_term_goals(),
            short_term_goals: seed::short_term_goals(),
            schedule: seed::schedule(today),
            quests: seed::quests(),
        }
    }

    /// Load every slice, substituting first-run content for missing ones.
    pub async fn load<S: Storage>(persistence: &mut Persistence<S>, today: Date) -> Self {
        let avatar = persistence.get(StateKey::Avatar, Avatar::default()).await;
        let points = persistence.get(StateKey::Points, PointBalance::starting()).await;
        let habits = persistence.get(StateKey::Habits, seed::habits()).await;
        let long_term_goals = persistence
            .get(StateKey::LongTermGoals, seed::long_term_goals())
            .await;
        let short_term_goals = persistence
            .get(StateKey::ShortTermGoals, seed::short_term_goals())
            .await;
        let schedule = persistence.get(StateKey::Schedules, seed::schedule(today)).await;
        let quests = persistence.get(StateKey::Quests, seed::quests()).await;

        Self {
            progress: PlayerProgress::new(avatar, points),
            habits,
            long_term_goals,
            short_term_goals,
            schedule,
            quests,
        }
    }

    /// Goal collection for a horizon.
    pub fn goals(&self, horizon: GoalHorizon) -> &Collection<Goal> {
        match horizon {
            GoalHorizon::LongTerm => &self.long_term_goals,
            GoalHorizon::ShortTerm => &self.short_term_goals,
        }
    }

    fn goals_mut(&mut self, horizon: GoalHorizon) -> &mut Collection<Goal> {
        match horizon {
            GoalHorizon::LongTerm => &mut self.long_term_goals,
            GoalHorizon::ShortTerm => &mut self.short_term_goals,
        }
    }
}

fn goals_key(horizon: GoalHorizon) -> StateKey {
    match horizon {
        GoalHorizon::LongTerm => StateKey::LongTermGoals,
        GoalHorizon::ShortTerm => StateKey::ShortTermGoals,
    }
}

/// What a successful toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleReport {
    /// Applied points/XP delta
    pub reward: Reward,
    /// Completion state after the toggle
    pub completed: bool,
    /// Levels the avatar gained
    pub levels_gained: u32,
}

/// What starting a quest did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestStart {
    /// The quest was already done; nothing changed.
    AlreadyCompleted,
    /// A generic quest completed on the spot.
    Completed(ToggleReport),
    /// A guided quest is now active and waits for confirmation.
    AwaitingGuidedFlow,
}

/// Single owner and writer of the application state.
pub struct SublimeApp {
    state: AppState,
    policy: PointPolicy,
    quest_flow: QuestFlow,
    dirty: BTreeSet<StateKey>,
}

impl SublimeApp {
    /// Wrap a loaded state.
    pub fn new(state: AppState, policy: PointPolicy) -> Self {
        Self {
            state,
            policy,
            quest_flow: QuestFlow::Idle,
            dirty: BTreeSet::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Current avatar.
    pub fn avatar(&self) -> Avatar {
        self.state.progress.avatar
    }

    /// Current point balance.
    pub fn points(&self) -> PointBalance {
        self.state.progress.points
    }

    /// Point clamping policy in force.
    pub fn policy(&self) -> PointPolicy {
        self.policy
    }

    /// Guided quest flow state.
    pub fn quest_flow(&self) -> QuestFlow {
        self.quest_flow
    }

    /// The quest awaiting guided completion, if any.
    pub fn active_quest(&self) -> Option<&Quest> {
        self.quest_flow.active().and_then(|id| self.state.quests.get(id))
    }

    /// Slices changed since the last flush.
    pub fn dirty_keys(&self) -> impl Iterator<Item = StateKey> + '_ {
        self.dirty.iter().copied()
    }

    /// Whether anything awaits a flush.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Write every changed slice.
    pub async fn flush<S: Storage>(&mut self, persistence: &mut Persistence<S>) {
        let dirty = std::mem::take(&mut self.dirty);
        for key in dirty {
            match key {
                StateKey::Avatar => persistence.set(key, &self.state.progress.avatar).await,
                StateKey::Points => persistence.set(key, &self.state.progress.points).await,
                StateKey::Habits => persistence.set(key, &self.state.habits).await,
                StateKey::LongTermGoals => persistence.set(key, &self.state.long_term_goals).await,
                StateKey::ShortTermGoals => persistence.set(key, &self.state.short_term_goals).await,
                StateKey::Schedules => persistence.set(key, &self.state.schedule).await,
                StateKey::Quests => persistence.set(key, &self.state.quests).await,
            }
            debug!("Flushed {}", key);
        }
    }

    fn apply<T>(&mut self, toggled: &Toggled<T>, entity_key: StateKey) -> ToggleReport {
        let levels_gained = self.state.progress.apply(&toggled.reward, self.policy);
        self.dirty.insert(StateKey::Points);
        self.dirty.insert(StateKey::Avatar);
        self.dirty.insert(entity_key);
        ToggleReport {
            reward: toggled.reward,
            completed: toggled.completed,
            levels_gained,
        }
    }

    // === Toggles ===

    /// Complete or un-complete a habit for `date`. `None` if the habit is unknown.
    pub fn toggle_habit(&mut self, habit_id: HabitId, date: Date) -> Option<ToggleReport> {
        let toggled = toggle_habit(self.state.habits.get(habit_id)?, date);
        let report = self.apply(&toggled, StateKey::Habits);
        self.state.habits.replace(toggled.entity);
        debug!("Habit {} on {} -> completed={}", habit_id, date, report.completed);
        Some(report)
    }

    /// Flip a milestone. `None` if the goal or milestone is unknown.
    pub fn toggle_milestone(
        &mut self,
        horizon: GoalHorizon,
        goal_id: GoalId,
        milestone_id: MilestoneId,
    ) -> Option<ToggleReport> {
        let goal = self.state.goals(horizon).get(goal_id)?;
        let toggled = toggle_milestone(goal, milestone_id, RewardTable::for_horizon(horizon))?;
        let report = self.apply(&toggled, goals_key(horizon));
        self.state.goals_mut(horizon).replace(toggled.entity);
        debug!("Milestone {} of {} goal {} -> completed={}", milestone_id, horizon, goal_id, report.completed);
        Some(report)
    }

    /// Flip a time block on `date`. `None` if the block is unknown.
    pub fn toggle_time_block(&mut self, date: Date, block_id: TimeBlockId) -> Option<ToggleReport> {
        let toggled = toggle_time_block(self.state.schedule.blocks_for(date), block_id)?;
        let report = self.apply(&toggled, StateKey::Schedules);
        self.state.schedule.set_day(date, toggled.entity);
        debug!("Time block {} on {} -> completed={}", block_id, date, report.completed);
        Some(report)
    }

    /// Flip a quest. `None` if the quest is unknown.
    pub fn toggle_quest(&mut self, quest_id: QuestId) -> Option<ToggleReport> {
        let toggled = toggle_quest(self.state.quests.get(quest_id)?);
        let report = self.apply(&toggled, StateKey::Quests);
        self.state.quests.replace(toggled.entity);
        self.quest_flow.on_toggled(quest_id, report.completed);
        debug!("Quest {} -> completed={}", quest_id, report.completed);
        Some(report)
    }

    // === Quest flow ===

    /// Start a quest. Generic quests complete immediately; breathing quests
    /// become the active quest. `None` if the quest is unknown.
    pub fn start_quest(&mut self, quest_id: QuestId) -> Option<QuestStart> {
        let quest = self.state.quests.get(quest_id)?;
        let started = match self.quest_flow.start(quest) {
            StartOutcome::AlreadyCompleted => QuestStart::AlreadyCompleted,
            StartOutcome::CompleteNow => QuestStart::Completed(self.toggle_quest(quest_id)?),
            StartOutcome::AwaitGuidedFlow => QuestStart::AwaitingGuidedFlow,
        };
        Some(started)
    }

    /// The guided flow finished: complete the quest. `None` if it is unknown
    /// or already completed.
    pub fn confirm_quest(&mut self, quest_id: QuestId) -> Option<ToggleReport> {
        if self.state.quests.get(quest_id)?.completed {
            return None;
        }
        let report = self.toggle_quest(quest_id)?;
        info!("Quest {} completed via guided flow", quest_id);
        Some(report)
    }

    /// Abandon the guided flow without completing anything.
    pub fn cancel_quest(&mut self) -> Option<QuestId> {
        let cancelled = self.quest_flow.cancel();
        if let Some(id) = cancelled {
            debug!("Cancelled guided flow for quest {}", id);
        }
        cancelled
    }

    // === Habits ===

    /// Create or edit a habit. Returns the habit's id, or `None` when an
    /// update targets an unknown habit.
    pub fn upsert_habit(
        &mut self,
        input: Upsert<HabitDraft, Habit>,
    ) -> Result<Option<HabitId>, ValidationError> {
        let id = match input {
            Upsert::Create(draft) => {
                draft.validate()?;
                let habit = Habit::from_draft(draft);
                let id = habit.id;
                self.state.habits.prepend(habit);
                Some(id)
            }
            Upsert::Update(habit) => {
                habit.validate()?;
                let id = habit.id;
                self.state.habits.replace(habit).then_some(id)
            }
        };
        if id.is_some() {
            self.dirty.insert(StateKey::Habits);
        }
        Ok(id)
    }

    /// Delete a habit. Returns whether it existed.
    pub fn delete_habit(&mut self, habit_id: HabitId) -> bool {
        let removed = self.state.habits.remove(habit_id).is_some();
        if removed {
            self.dirty.insert(StateKey::Habits);
        }
        removed
    }

    /// Append generated habits. Returns how many were added.
    pub fn accept_habit_suggestions(&mut self, suggestions: Vec<HabitSuggestion>) -> usize {
        let added = suggestions.len();
        if added > 0 {
            self.state
                .habits
                .extend(suggestions.into_iter().map(HabitSuggestion::into_habit));
            self.dirty.insert(StateKey::Habits);
            info!("Added {} suggested habits", added);
        }
        added
    }

    // === Goals ===

    /// Create or edit a goal in the given collection.
    pub fn upsert_goal(
        &mut self,
        horizon: GoalHorizon,
        input: Upsert<GoalDraft, Goal>,
    ) -> Result<Option<GoalId>, ValidationError> {
        let goals = self.state.goals_mut(horizon);
        let id = match input {
            Upsert::Create(draft) => {
                draft.validate()?;
                let goal = Goal::from_draft(draft);
                let id = goal.id;
                goals.prepend(goal);
                Some(id)
            }
            Upsert::Update(goal) => {
                goal.validate()?;
                let id = goal.id;
                goals.replace(goal).then_some(id)
            }
        };
        if id.is_some() {
            self.dirty.insert(goals_key(horizon));
        }
        Ok(id)
    }

    /// Delete a goal with all its milestones.
    pub fn delete_goal(&mut self, horizon: GoalHorizon, goal_id: GoalId) -> bool {
        let removed = self.state.goals_mut(horizon).remove(goal_id).is_some();
        if removed {
            self.dirty.insert(goals_key(horizon));
        }
        removed
    }

    /// Append a milestone to a goal. `None` if the goal is unknown.
    pub fn add_milestone(
        &mut self,
        horizon: GoalHorizon,
        goal_id: GoalId,
        name: impl Into<String>,
    ) -> Result<Option<MilestoneId>, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField("milestone name"));
        }
        let Some(mut goal) = self.state.goals(horizon).get(goal_id).cloned() else {
            return Ok(None);
        };
        let id = goal.add_milestone(name);
        self.state.goals_mut(horizon).replace(goal);
        self.dirty.insert(goals_key(horizon));
        Ok(Some(id))
    }

    /// Remove a milestone from a goal without touching points or XP.
    pub fn remove_milestone(
        &mut self,
        horizon: GoalHorizon,
        goal_id: GoalId,
        milestone_id: MilestoneId,
    ) -> bool {
        let Some(mut goal) = self.state.goals(horizon).get(goal_id).cloned() else {
            return false;
        };
        if !goal.remove_milestone(milestone_id) {
            return false;
        }
        self.state.goals_mut(horizon).replace(goal);
        self.dirty.insert(goals_key(horizon));
        true
    }

    // === Schedule ===

    /// Create or edit a time block on `date`.
    pub fn upsert_time_block(
        &mut self,
        date: Date,
        input: Upsert<TimeBlockDraft, TimeBlock>,
    ) -> Result<Option<TimeBlockId>, ValidationError> {
        let id = match input {
            Upsert::Create(draft) => {
                draft.validate()?;
                let block = TimeBlock::from_draft(draft);
                let id = block.id;
                self.state.schedule.insert(date, block);
                Some(id)
            }
            Upsert::Update(block) => {
                block.validate()?;
                let id = block.id;
                self.state.schedule.replace(date, block).then_some(id)
            }
        };
        if id.is_some() {
            self.dirty.insert(StateKey::Schedules);
        }
        Ok(id)
    }

    /// Delete a time block from `date`.
    pub fn delete_time_block(&mut self, date: Date, block_id: TimeBlockId) -> bool {
        let removed = self.state.schedule.remove(date, block_id).is_some();
        if removed {
            self.dirty.insert(StateKey::Schedules);
        }
        removed
    }

    // === Quests ===

    /// Create or edit a quest.
    pub fn upsert_quest(
        &mut self,
        input: Upsert<QuestDraft, Quest>,
    ) -> Result<Option<QuestId>, ValidationError> {
        let id = match input {
            Upsert::Create(draft) => {
                draft.validate()?;
                let quest = Quest::from_draft(draft);
                let id = quest.id;
                self.state.quests.prepend(quest);
                Some(id)
            }
            Upsert::Update(quest) => {
                quest.validate()?;
                let id = quest.id;
                self.state.quests.replace(quest).then_some(id)
            }
        };
        if id.is_some() {
            self.dirty.insert(StateKey::Quests);
        }
        Ok(id)
    }

    /// Delete a quest, abandoning its guided flow if it was active.
    pub fn delete_quest(&mut self, quest_id: QuestId) -> bool {
        let removed = self.state.quests.remove(quest_id).is_some();
        if removed {
            self.quest_flow.forget(quest_id);
            self.dirty.insert(StateKey::Quests);
        }
        removed
    }

    /// Append generated quests. Returns how many were added.
    pub fn accept_quest_suggestions(&mut self, suggestions: Vec<QuestSuggestion>) -> usize {
        let added = suggestions.len();
        if added > 0 {
            self.state
                .quests
                .extend(suggestions.into_iter().map(QuestSuggestion::into_quest));
            self.dirty.insert(StateKey::Quests);
            info!("Added {} suggested quests", added);
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sublime_core::QuestKind;

    fn today() -> Date {
        Date::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn test_toggle_marks_slices_dirty() {
        let mut app = SublimeApp::new(AppState::seeded(today()), PointPolicy::ClampAll);
        let habit_id = app.state().habits.items()[0].id;
        assert!(!app.is_dirty());

        app.toggle_habit(habit_id, today()).unwrap();
        let dirty: Vec<_> = app.dirty_keys().collect();
        assert_eq!(dirty, [StateKey::Avatar, StateKey::Points, StateKey::Habits]);
    }

    #[test]
    fn test_unknown_ids_leave_state_untouched() {
        let mut app = SublimeApp::new(AppState::seeded(today()), PointPolicy::ClampAll);
        let before = app.state().clone();

        assert!(app.toggle_habit(HabitId::new(), today()).is_none());
        assert!(app.toggle_quest(QuestId::new()).is_none());
        assert!(app.start_quest(QuestId::new()).is_none());
        assert!(app.toggle_time_block(today(), TimeBlockId::new()).is_none());
        let goal_id = app.state().long_term_goals.items()[0].id;
        assert!(app.toggle_milestone(GoalHorizon::LongTerm, goal_id, MilestoneId::new()).is_none());
        assert!(app.toggle_milestone(GoalHorizon::ShortTerm, goal_id, MilestoneId::new()).is_none());

        assert_eq!(app.state(), &before);
        assert!(!app.is_dirty());
    }

    #[test]
    fn test_invalid_draft_rejected_without_mutation() {
        let mut app = SublimeApp::new(AppState::empty(), PointPolicy::ClampAll);
        let err = app
            .upsert_time_block(
                today(),
                Upsert::Create(TimeBlockDraft::new(
                    "Late",
                    "11:00",
                    "10:00",
                    sublime_core::TimeBlockKind::Rest,
                    5,
                )),
            )
            .unwrap_err();
        assert!(matches!(err, ValidationError::StartNotBeforeEnd { .. }));
        assert!(app.state().schedule.blocks_for(today()).is_empty());
        assert!(!app.is_dirty());
    }

    #[test]
    fn test_breathing_quest_flow() {
        let mut app = SublimeApp::new(AppState::seeded(today()), PointPolicy::ClampAll);
        let breathing = app
            .state()
            .quests
            .iter()
            .find(|q| q.kind == QuestKind::Breathing)
            .unwrap()
            .id;
        let points = app.points().value();

        assert_eq!(app.start_quest(breathing), Some(QuestStart::AwaitingGuidedFlow));
        assert_eq!(app.active_quest().map(|q| q.id), Some(breathing));
        assert_eq!(app.points().value(), points);

        let report = app.confirm_quest(breathing).unwrap();
        assert!(report.completed);
        assert_eq!(app.points().value(), points + 25);
        assert_eq!(app.quest_flow(), QuestFlow::Idle);

        assert!(app.confirm_quest(breathing).is_none());
        assert_eq!(app.start_quest(breathing), Some(QuestStart::AlreadyCompleted));
    }

    #[test]
    fn test_deleting_active_quest_cancels_flow() {
        let mut app = SublimeApp::new(AppState::seeded(today()), PointPolicy::ClampAll);
        let breathing = app.state().quests.items()[0].id;
        app.start_quest(breathing);
        assert!(app.delete_quest(breathing));
        assert_eq!(app.quest_flow(), QuestFlow::Idle);
        assert!(app.cancel_quest().is_none());
    }
}
