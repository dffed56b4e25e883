//! Guided-completion state for quests.
//!
//! At most one quest is in progress at a time. Generic quests complete
//! the moment they start; breathing quests park here until the guided
//! exercise confirms or the user cancels.

use sublime_core::{Quest, QuestId};
use tracing::{debug, info};

/// Quest flow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestFlow {
    /// No quest in progress
    #[default]
    Idle,
    /// A guided quest awaits confirmation
    Active(QuestId),
}

/// What the caller must do after [`QuestFlow::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The quest is already done; nothing happens.
    AlreadyCompleted,
    /// Toggle the quest now.
    CompleteNow,
    /// Wait for the guided flow to confirm.
    AwaitGuidedFlow,
}

impl QuestFlow {
    /// The quest in progress, if any.
    pub fn active(&self) -> Option<QuestId> {
        match self {
            QuestFlow::Idle => None,
            QuestFlow::Active(id) => Some(*id),
        }
    }

    /// Start a quest.
    pub fn start(&mut self, quest: &Quest) -> StartOutcome {
        if quest.completed {
            return StartOutcome::AlreadyCompleted;
        }
        if !quest.kind.is_guided() {
            return StartOutcome::CompleteNow;
        }
        if let QuestFlow::Active(previous) = self {
            if *previous != quest.id {
                debug!("Replacing active quest {} with {}", previous, quest.id);
            }
        }
        info!("Quest {} awaiting guided completion", quest.id);
        *self = QuestFlow::Active(quest.id);
        StartOutcome::AwaitGuidedFlow
    }

    /// Record a toggle. Completing the active quest returns the flow to idle.
    pub fn on_toggled(&mut self, quest_id: QuestId, completed: bool) {
        if completed && self.active() == Some(quest_id) {
            *self = QuestFlow::Idle;
        }
    }

    /// Abandon the guided flow. Returns the quest that was active.
    pub fn cancel(&mut self) -> Option<QuestId> {
        let active = self.active();
        *self = QuestFlow::Idle;
        active
    }

    /// Drop the flow if it points at a quest that no longer exists.
    pub fn forget(&mut self, quest_id: QuestId) {
        if self.active() == Some(quest_id) {
            *self = QuestFlow::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sublime_core::{QuestDraft, QuestKind};

    fn quest(kind: QuestKind) -> Quest {
        Quest::from_draft(QuestDraft::new("Reset", "Breathe", 25, kind))
    }

    #[test]
    fn test_generic_completes_now() {
        let mut flow = QuestFlow::Idle;
        assert_eq!(flow.start(&quest(QuestKind::Generic)), StartOutcome::CompleteNow);
        assert_eq!(flow, QuestFlow::Idle);
    }

    #[test]
    fn test_breathing_waits_then_completes() {
        let q = quest(QuestKind::Breathing);
        let mut flow = QuestFlow::Idle;
        assert_eq!(flow.start(&q), StartOutcome::AwaitGuidedFlow);
        assert_eq!(flow.active(), Some(q.id));

        flow.on_toggled(q.id, true);
        assert_eq!(flow, QuestFlow::Idle);
    }

    #[test]
    fn test_completed_quest_does_not_start() {
        let mut q = quest(QuestKind::Breathing);
        q.completed = true;
        let mut flow = QuestFlow::Idle;
        assert_eq!(flow.start(&q), StartOutcome::AlreadyCompleted);
        assert_eq!(flow.active(), None);
    }

    #[test]
    fn test_cancel_and_forget() {
        let q = quest(QuestKind::Breathing);
        let mut flow = QuestFlow::Idle;
        flow.start(&q);
        assert_eq!(flow.cancel(), Some(q.id));
        assert_eq!(flow.cancel(), None);

        flow.start(&q);
        flow.forget(QuestId::new());
        assert_eq!(flow.active(), Some(q.id));
        flow.forget(q.id);
        assert_eq!(flow, QuestFlow::Idle);
    }

    #[test]
    fn test_toggle_of_other_quest_keeps_flow() {
        let q = quest(QuestKind::Breathing);
        let mut flow = QuestFlow::Idle;
        flow.start(&q);
        flow.on_toggled(QuestId::new(), true);
        assert_eq!(flow.active(), Some(q.id));
        flow.on_toggled(q.id, false);
        assert_eq!(flow.active(), Some(q.id));
    }
}
