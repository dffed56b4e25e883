//! Sublime Point balance and the clamping policy.

use serde::{Deserialize, Serialize};

use crate::reward::RewardSource;

/// Starting balance for a new player.
pub const STARTING_POINTS: i64 = 50;

/// The process-wide Sublime Point balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointBalance(i64);

impl PointBalance {
    /// Wrap a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Balance a new player starts with.
    pub fn starting() -> Self {
        Self(STARTING_POINTS)
    }

    /// Raw value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Add a delta, optionally flooring the result at zero.
    pub fn apply(self, delta: i64, clamp: bool) -> Self {
        let next = self.0.saturating_add(delta);
        Self(if clamp { next.max(0) } else { next })
    }
}

impl std::fmt::Display for PointBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Which rewards are floored at zero when applied to the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointPolicy {
    /// Every source clamps at zero.
    #[default]
    ClampAll,
    /// Milestones and quests clamp; habits and time blocks apply raw deltas.
    Legacy,
}

impl PointPolicy {
    /// Whether a reward from `source` is clamped at zero.
    pub fn clamps(&self, source: RewardSource) -> bool {
        match self {
            PointPolicy::ClampAll => true,
            PointPolicy::Legacy => matches!(source, RewardSource::Milestone | RewardSource::Quest),
        }
    }
}

impl std::str::FromStr for PointPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clamp-all" => Ok(PointPolicy::ClampAll),
            "legacy" => Ok(PointPolicy::Legacy),
            other => Err(format!("unknown point policy: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_clamps_when_asked() {
        let balance = PointBalance::new(20);
        assert_eq!(balance.apply(-50, true).value(), 0);
        assert_eq!(balance.apply(-50, false).value(), -30);
        assert_eq!(balance.apply(15, true).value(), 35);
    }

    #[test]
    fn test_policy_clamping() {
        assert!(PointPolicy::ClampAll.clamps(RewardSource::Habit));
        assert!(PointPolicy::ClampAll.clamps(RewardSource::TimeBlock));
        assert!(!PointPolicy::Legacy.clamps(RewardSource::Habit));
        assert!(!PointPolicy::Legacy.clamps(RewardSource::TimeBlock));
        assert!(PointPolicy::Legacy.clamps(RewardSource::Milestone));
        assert!(PointPolicy::Legacy.clamps(RewardSource::Quest));
    }

    #[test]
    fn test_balance_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&PointBalance::starting()).unwrap(), "50");
        assert_eq!("legacy".parse::<PointPolicy>(), Ok(PointPolicy::Legacy));
    }
}
