//! Time blocks keyed by calendar day.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sublime_core::{Date, TimeBlock, TimeBlockId};

/// Every day's time blocks, each day ordered by start time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    days: BTreeMap<Date, Vec<TimeBlock>>,
}

impl Schedule {
    /// Create an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks scheduled on `date`, earliest first. Empty for unknown days.
    pub fn blocks_for(&self, date: Date) -> &[TimeBlock] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Add a block to `date`.
    pub fn insert(&mut self, date: Date, block: TimeBlock) {
        let blocks = self.days.entry(date).or_default();
        blocks.push(block);
        sort_by_start(blocks);
    }

    /// Replace the block with the same id on `date`. Returns false if absent.
    pub fn replace(&mut self, date: Date, block: TimeBlock) -> bool {
        let Some(blocks) = self.days.get_mut(&date) else {
            return false;
        };
        let Some(existing) = blocks.iter_mut().find(|b| b.id == block.id) else {
            return false;
        };
        *existing = block;
        sort_by_start(blocks);
        true
    }

    /// Remove a block from `date`.
    pub fn remove(&mut self, date: Date, block_id: TimeBlockId) -> Option<TimeBlock> {
        let blocks = self.days.get_mut(&date)?;
        let index = blocks.iter().position(|b| b.id == block_id)?;
        let removed = blocks.remove(index);
        if blocks.is_empty() {
            self.days.remove(&date);
        }
        Some(removed)
    }

    /// Overwrite a whole day, e.g. with the output of a toggle.
    pub fn set_day(&mut self, date: Date, mut blocks: Vec<TimeBlock>) {
        if blocks.is_empty() {
            self.days.remove(&date);
        } else {
            sort_by_start(&mut blocks);
            self.days.insert(date, blocks);
        }
    }
}

// Stable: blocks sharing a start time keep insertion order.
fn sort_by_start(blocks: &mut [TimeBlock]) {
    blocks.sort_by(|a, b| a.start_time.cmp(&b.start_time));
}
