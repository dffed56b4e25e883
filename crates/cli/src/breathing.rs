//! Guided breathing session for breathing quests.

use std::time::Duration;

use tokio::time::sleep;

/// One step of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub name: &'static str,
    pub seconds: u64,
}

pub const PHASES: [Phase; 3] = [
    Phase { name: "Breathe In", seconds: 4 },
    Phase { name: "Hold", seconds: 4 },
    Phase { name: "Breathe Out", seconds: 6 },
];

/// Cycles in a full session.
pub const TOTAL_REPS: u32 = 5;

/// Run `reps` cycles, calling `on_phase` as each phase begins.
pub async fn run(reps: u32, mut on_phase: impl FnMut(u32, Phase)) {
    for rep in 1..=reps {
        for phase in PHASES {
            on_phase(rep, phase);
            sleep(Duration::from_secs(phase.seconds)).await;
        }
    }
}

/// Wall-clock length of a session.
pub fn session_length(reps: u32) -> Duration {
    let cycle: u64 = PHASES.iter().map(|p| p.seconds).sum();
    Duration::from_secs(cycle * u64::from(reps))
}
