//! Avatar leveling and reward application.

use serde::{Deserialize, Serialize};
use sublime_core::Avatar;
use tracing::{debug, info};

use crate::points::{PointBalance, PointPolicy};
use crate::reward::Reward;

/// Result of adding experience to an avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    /// The updated avatar
    pub avatar: Avatar,
    /// Levels gained by this update
    pub levels_gained: u32,
}

/// Add `xp_delta` (possibly negative) to an avatar.
///
/// Overflowing XP rolls into new levels, each one raising the threshold
/// to `floor(threshold * 1.5)`. Negative XP never removes a level: the
/// remainder is clamped to 0 within the current one. On return
/// `0 <= current_xp < xp_to_next_level`.
///
/// The arithmetic saturates: the threshold stops growing at `u64::MAX`
/// and the level stops at `u32::MAX`, so stored extremes never panic.
pub fn add_experience(avatar: &Avatar, xp_delta: i64) -> Progression {
    let mut xp = (i128::from(avatar.current_xp) + i128::from(xp_delta)).max(0) as u128;
    let mut level = avatar.level.max(1);
    let mut threshold = u128::from(avatar.xp_to_next_level.max(1));
    let mut levels_gained: u32 = 0;

    while xp >= threshold {
        xp -= threshold;
        if level < u32::MAX {
            level += 1;
            levels_gained += 1;
        }
        threshold = (threshold * 3 / 2).min(u128::from(u64::MAX));
    }

    // xp < threshold <= u64::MAX
    Progression {
        avatar: Avatar {
            level,
            current_xp: xp as u64,
            xp_to_next_level: threshold as u64,
        },
        levels_gained,
    }
}

/// The avatar together with the point balance: everything a reward touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerProgress {
    /// Leveling avatar
    pub avatar: Avatar,
    /// Sublime Points
    pub points: PointBalance,
}

impl PlayerProgress {
    /// Create from stored parts.
    pub fn new(avatar: Avatar, points: PointBalance) -> Self {
        Self { avatar, points }
    }

    /// Apply a reward: points first, then XP. Returns levels gained.
    pub fn apply(&mut self, reward: &Reward, policy: PointPolicy) -> u32 {
        let clamp = policy.clamps(reward.source);
        self.points = self.points.apply(reward.points, clamp);

        let progression = add_experience(&self.avatar, reward.xp);
        self.avatar = progression.avatar;

        debug!(
            "Applied {:?} reward: {:+} SP, {:+} XP -> {} SP",
            reward.source, reward.points, reward.xp, self.points
        );
        if progression.levels_gained > 0 {
            info!("Level up! Now level {}", self.avatar.level);
        }
        progression.levels_gained
    }
}
