//! First-run sample data.

use sublime_core::{
    Date, Goal, GoalDraft, Habit, HabitDraft, Quest, QuestDraft, QuestKind, TimeBlock,
    TimeBlockDraft, TimeBlockKind,
};

use crate::schedule::Schedule;
use crate::store::Collection;

fn habit(name: &str, description: &str, sp_value: u32, streak: u32) -> Habit {
    let mut habit = Habit::from_draft(HabitDraft::new(name, description, sp_value));
    habit.streak = streak;
    habit
}

fn goal(name: &str, description: &str, milestones: [&str; 3]) -> Goal {
    let mut goal = Goal::from_draft(GoalDraft::new(name, description));
    for name in milestones {
        goal.add_milestone(name);
    }
    goal.milestones[0].completed = true;
    goal
}

/// Sample habits.
pub fn habits() -> Collection<Habit> {
    Collection::from_vec(vec![
        habit("Meditate 10 mins", "Find clarity and focus for the day.", 10, 3),
        habit("Read AI Research", "Stay on top of the latest trends in AI.", 20, 7),
        habit("Write Business Ideas", "Cultivate creativity and find new opportunities.", 15, 1),
    ])
}

/// Sample long-term goals.
pub fn long_term_goals() -> Collection<Goal> {
    Collection::from_vec(vec![goal(
        "Prototype AI for Airports Solution",
        "Develop a working prototype for an innovative airport AI system.",
        [
            "Brainstorm 5 core ideas",
            "Outline prototype features",
            "Develop proof-of-concept",
        ],
    )])
}

/// Sample short-term goals.
pub fn short_term_goals() -> Collection<Goal> {
    Collection::from_vec(vec![goal(
        "Finalize Q3 Project Plan",
        "Outline all tasks, assign resources, and set deadlines for the upcoming quarter.",
        [
            "Draft initial task list",
            "Get feedback from team leads",
            "Publish final plan",
        ],
    )])
}

/// Sample schedule for `today`.
pub fn schedule(today: Date) -> Schedule {
    let mut schedule = Schedule::new();
    schedule.insert(
        today,
        TimeBlock::from_draft(TimeBlockDraft::new(
            "Deep Work: AI Prototype",
            "09:00",
            "11:30",
            TimeBlockKind::DeepWork,
            25,
        )),
    );
    let mut reading = TimeBlock::from_draft(TimeBlockDraft::new(
        "Read AI Research",
        "12:00",
        "13:00",
        TimeBlockKind::Learning,
        15,
    ));
    reading.completed = true;
    schedule.insert(today, reading);
    schedule
}

/// Sample quests.
pub fn quests() -> Collection<Quest> {
    Collection::from_vec(vec![
        Quest::from_draft(QuestDraft::new(
            "Recovery Quest: Quick Reset",
            "Feeling off track? Complete a 5-minute breathing exercise to regain focus and protect your streaks.",
            25,
            QuestKind::Breathing,
        )),
        Quest::from_draft(QuestDraft::new(
            "Planning Blitz",
            "Spend 15 uninterrupted minutes planning your next big project milestone.",
            30,
            QuestKind::Generic,
        )),
    ])
}
