//! Avatar model - the leveling character fed by XP.

use serde::{Deserialize, Serialize};

/// XP threshold for the first level-up.
pub const BASE_XP_TO_NEXT_LEVEL: u64 = 100;

/// The player's avatar.
///
/// After every update `current_xp < xp_to_next_level` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Avatar {
    /// Current level, starting at 1
    pub level: u32,

    /// XP accumulated inside the current level
    #[serde(rename = "currentXP")]
    pub current_xp: u64,

    /// XP needed to reach the next level
    #[serde(rename = "xpToNextLevel")]
    pub xp_to_next_level: u64,
}

impl Avatar {
    /// Fill ratio of the XP bar, 0-100.
    pub fn progress_percentage(&self) -> f32 {
        if self.xp_to_next_level == 0 {
            return 0.0;
        }
        (self.current_xp as f32 / self.xp_to_next_level as f32) * 100.0
    }
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            level: 1,
            current_xp: 0,
            xp_to_next_level: BASE_XP_TO_NEXT_LEVEL,
        }
    }
}
