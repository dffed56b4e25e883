//! Time block model - a scheduled interval on a given day.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{require_text, Result, ValidationError};
use crate::id::TimeBlockId;

/// A scheduled block of time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    /// Unique identifier
    pub id: TimeBlockId,

    /// What the block is for
    pub title: String,

    /// Start, `HH:MM`
    pub start_time: String,

    /// End, `HH:MM`
    pub end_time: String,

    /// Category
    #[serde(rename = "type")]
    pub kind: TimeBlockKind,

    /// Whether the block was completed
    pub completed: bool,

    /// Points (and XP) granted on completion
    pub sp_value: u32,
}

/// Category of a time block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeBlockKind {
    /// Focused work
    DeepWork,
    /// Study
    Learning,
    /// Breaks
    Rest,
    /// Planning sessions
    Planning,
    /// Personal time
    Personal,
}

impl TimeBlockKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBlockKind::DeepWork => "deep-work",
            TimeBlockKind::Learning => "learning",
            TimeBlockKind::Rest => "rest",
            TimeBlockKind::Planning => "planning",
            TimeBlockKind::Personal => "personal",
        }
    }
}

impl std::str::FromStr for TimeBlockKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deep-work" => Ok(TimeBlockKind::DeepWork),
            "learning" => Ok(TimeBlockKind::Learning),
            "rest" => Ok(TimeBlockKind::Rest),
            "planning" => Ok(TimeBlockKind::Planning),
            "personal" => Ok(TimeBlockKind::Personal),
            other => Err(format!("unknown time block type: {}", other)),
        }
    }
}

impl std::fmt::Display for TimeBlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TimeBlock {
    /// Build a fresh, not completed block from a draft.
    pub fn from_draft(draft: TimeBlockDraft) -> Self {
        Self {
            id: TimeBlockId::new(),
            title: draft.title,
            start_time: draft.start_time,
            end_time: draft.end_time,
            kind: draft.kind,
            completed: false,
            sp_value: draft.sp_value,
        }
    }

    /// Check title and time window.
    pub fn validate(&self) -> Result<()> {
        validate_window(&self.title, &self.start_time, &self.end_time)
    }
}

/// User input for a new time block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlockDraft {
    /// What the block is for
    pub title: String,
    /// Start, `HH:MM`
    pub start_time: String,
    /// End, `HH:MM`
    pub end_time: String,
    /// Category
    #[serde(rename = "type")]
    pub kind: TimeBlockKind,
    /// Points granted on completion
    pub sp_value: u32,
}

impl TimeBlockDraft {
    /// Create a draft.
    pub fn new(
        title: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        kind: TimeBlockKind,
        sp_value: u32,
    ) -> Self {
        Self {
            title: title.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            kind,
            sp_value,
        }
    }

    /// Check title and time window.
    pub fn validate(&self) -> Result<()> {
        validate_window(&self.title, &self.start_time, &self.end_time)
    }
}

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid clock regex"))
}

// Zero-padded HH:MM compares correctly as plain strings.
fn validate_window(title: &str, start: &str, end: &str) -> Result<()> {
    require_text(title, "time block title")?;
    for time in [start, end] {
        if !clock_pattern().is_match(time) {
            return Err(ValidationError::InvalidTime(time.to_string()));
        }
    }
    if start >= end {
        return Err(ValidationError::StartNotBeforeEnd {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(start: &str, end: &str) -> TimeBlockDraft {
        TimeBlockDraft::new("Focus", start, end, TimeBlockKind::DeepWork, 20)
    }

    #[test]
    fn test_valid_window() {
        assert!(draft("09:00", "11:30").validate().is_ok());
        assert!(draft("00:00", "23:59").validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_times() {
        assert_eq!(
            draft("9:00", "11:00").validate(),
            Err(ValidationError::InvalidTime("9:00".to_string()))
        );
        assert_eq!(
            draft("09:00", "24:00").validate(),
            Err(ValidationError::InvalidTime("24:00".to_string()))
        );
    }

    #[test]
    fn test_rejects_start_not_before_end() {
        assert!(matches!(
            draft("10:00", "10:00").validate(),
            Err(ValidationError::StartNotBeforeEnd { .. })
        ));
        assert!(matches!(
            draft("11:00", "10:00").validate(),
            Err(ValidationError::StartNotBeforeEnd { .. })
        ));
    }

    #[test]
    fn test_kind_wire_names() {
        let block = TimeBlock::from_draft(draft("09:00", "10:00"));
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "deep-work");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["completed"], false);
        assert_eq!("learning".parse::<TimeBlockKind>(), Ok(TimeBlockKind::Learning));
        assert!("nap".parse::<TimeBlockKind>().is_err());
    }
}
