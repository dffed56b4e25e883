//! Quest model - a one-off rewarded challenge.

use serde::{Deserialize, Serialize};

use crate::error::{require_text, Result};
use crate::id::QuestId;

/// A quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Unique identifier
    pub id: QuestId,

    /// Quest title
    pub title: String,

    /// What the quest asks for
    pub description: String,

    /// Points (and XP) granted on completion
    pub reward: u32,

    /// Whether the quest is done
    pub completed: bool,

    /// How the quest is completed
    #[serde(rename = "type")]
    pub kind: QuestKind,
}

/// How a quest is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestKind {
    /// Requires a guided breathing exercise before completion
    Breathing,
    /// Completes as soon as it is started
    #[default]
    Generic,
}

impl QuestKind {
    /// Whether completion waits on an external guided flow.
    pub fn is_guided(&self) -> bool {
        matches!(self, QuestKind::Breathing)
    }

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestKind::Breathing => "breathing",
            QuestKind::Generic => "generic",
        }
    }
}

impl std::fmt::Display for QuestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QuestKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breathing" => Ok(QuestKind::Breathing),
            "generic" => Ok(QuestKind::Generic),
            other => Err(format!("unknown quest type: {}", other)),
        }
    }
}

impl Quest {
    /// Build a fresh, not completed quest from a draft.
    pub fn from_draft(draft: QuestDraft) -> Self {
        Self {
            id: QuestId::new(),
            title: draft.title,
            description: draft.description,
            reward: draft.reward,
            completed: false,
            kind: draft.kind,
        }
    }

    /// Check the user-editable fields.
    pub fn validate(&self) -> Result<()> {
        require_text(&self.title, "quest title")?;
        require_text(&self.description, "quest description")
    }
}

/// User input for a new quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDraft {
    /// Quest title
    pub title: String,
    /// What the quest asks for
    pub description: String,
    /// Points granted on completion
    pub reward: u32,
    /// How the quest is completed
    #[serde(rename = "type", default)]
    pub kind: QuestKind,
}

impl QuestDraft {
    /// Create a draft.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        reward: u32,
        kind: QuestKind,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            reward,
            kind,
        }
    }

    /// Check the draft before it becomes a quest.
    pub fn validate(&self) -> Result<()> {
        require_text(&self.title, "quest title")?;
        require_text(&self.description, "quest description")
    }
}
