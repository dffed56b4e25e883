//! Goal model - an objective broken into milestones.

use serde::{Deserialize, Serialize};

use crate::error::{require_text, Result};
use crate::id::{GoalId, MilestoneId};

/// A goal with an ordered list of milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal name
    pub name: String,

    /// Detailed description
    pub description: String,

    /// Milestones, in display order
    pub milestones: Vec<Milestone>,
}

/// A binary sub-task of a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique identifier
    pub id: MilestoneId,

    /// Milestone name
    pub name: String,

    /// Whether the milestone is done
    pub completed: bool,
}

impl Milestone {
    /// Create an open milestone.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MilestoneId::new(),
            name: name.into(),
            completed: false,
        }
    }
}

/// Which goal collection a goal lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalHorizon {
    /// Long-term goals
    LongTerm,
    /// Short-term goals
    ShortTerm,
}

impl GoalHorizon {
    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalHorizon::LongTerm => "long-term",
            GoalHorizon::ShortTerm => "short-term",
        }
    }
}

impl std::fmt::Display for GoalHorizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GoalHorizon {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long-term" | "long" => Ok(GoalHorizon::LongTerm),
            "short-term" | "short" => Ok(GoalHorizon::ShortTerm),
            other => Err(format!("unknown goal horizon: {}", other)),
        }
    }
}

impl Goal {
    /// Build a fresh goal from a draft with no milestones.
    pub fn from_draft(draft: GoalDraft) -> Self {
        Self {
            id: GoalId::new(),
            name: draft.name,
            description: draft.description,
            milestones: Vec::new(),
        }
    }

    /// Look up a milestone.
    pub fn milestone(&self, id: MilestoneId) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    /// Share of completed milestones, 0-100. A goal without milestones is at 0.
    pub fn completion_percentage(&self) -> f32 {
        if self.milestones.is_empty() {
            return 0.0;
        }
        let done = self.milestones.iter().filter(|m| m.completed).count();
        (done as f32 / self.milestones.len() as f32) * 100.0
    }

    /// Append a new open milestone and return its id.
    pub fn add_milestone(&mut self, name: impl Into<String>) -> MilestoneId {
        let milestone = Milestone::new(name);
        let id = milestone.id;
        self.milestones.push(milestone);
        id
    }

    /// Rename a milestone. Returns false if it does not exist.
    pub fn rename_milestone(&mut self, id: MilestoneId, name: impl Into<String>) -> bool {
        match self.milestones.iter_mut().find(|m| m.id == id) {
            Some(m) => {
                m.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Remove a milestone. Returns false if it does not exist.
    pub fn remove_milestone(&mut self, id: MilestoneId) -> bool {
        let before = self.milestones.len();
        self.milestones.retain(|m| m.id != id);
        self.milestones.len() != before
    }

    /// Check the user-editable fields.
    pub fn validate(&self) -> Result<()> {
        require_text(&self.name, "goal name")?;
        for milestone in &self.milestones {
            require_text(&milestone.name, "milestone name")?;
        }
        Ok(())
    }
}

/// User input for a new goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDraft {
    /// Goal name
    pub name: String,
    /// Detailed description
    pub description: String,
}

impl GoalDraft {
    /// Create a draft.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Check the draft before it becomes a goal.
    pub fn validate(&self) -> Result<()> {
        require_text(&self.name, "goal name")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal_with(milestones: &[(&str, bool)]) -> Goal {
        let mut goal = Goal::from_draft(GoalDraft::new("Ship it", ""));
        for (name, done) in milestones {
            let id = goal.add_milestone(*name);
            if *done {
                goal.milestones.iter_mut().find(|m| m.id == id).unwrap().completed = true;
            }
        }
        goal
    }

    #[test]
    fn test_completion_percentage() {
        assert_eq!(goal_with(&[]).completion_percentage(), 0.0);
        assert_eq!(goal_with(&[("a", true), ("b", false)]).completion_percentage(), 50.0);
        assert_eq!(goal_with(&[("a", true)]).completion_percentage(), 100.0);
    }

    #[test]
    fn test_milestone_editing() {
        let mut goal = goal_with(&[("a", false)]);
        let id = goal.add_milestone("b");
        assert_eq!(goal.milestones.len(), 2);
        assert_eq!(goal.milestones[1].name, "b");
        assert!(!goal.milestones[1].completed);

        assert!(goal.rename_milestone(id, "c"));
        assert_eq!(goal.milestone(id).unwrap().name, "c");

        assert!(goal.remove_milestone(id));
        assert!(!goal.remove_milestone(id));
        assert!(!goal.rename_milestone(id, "d"));
        assert_eq!(goal.milestones.len(), 1);
    }

    #[test]
    fn test_horizon_serialization() {
        assert_eq!(serde_json::to_string(&GoalHorizon::LongTerm).unwrap(), "\"long-term\"");
        assert_eq!(GoalHorizon::ShortTerm.to_string(), "short-term");
    }

    #[test]
    fn test_horizon_parse() {
        assert_eq!("long-term".parse::<GoalHorizon>().unwrap(), GoalHorizon::LongTerm);
        assert_eq!("Short".parse::<GoalHorizon>().unwrap(), GoalHorizon::ShortTerm);
        assert!("someday".parse::<GoalHorizon>().is_err());
    }
}
