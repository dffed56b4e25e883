use sublime_core::{
    Avatar, Date, GoalDraft, GoalHorizon, GoalId, HabitDraft, HabitId, HabitSuggestion,
    QuestDraft, QuestId, QuestKind, QuestSuggestion, TimeBlockDraft, TimeBlockId, TimeBlockKind,
};
use sublime_progress::{PlayerProgress, PointBalance, PointPolicy};
use sublime_state::{AppState, QuestStart, SublimeApp, Upsert};
use sublime_storage::{MemoryStorage, Persistence, StateKey, Storage};

fn day() -> Date {
    Date::from_ymd_opt(2024, 9, 14).unwrap()
}

fn empty_app(points: i64) -> SublimeApp {
    let mut state = AppState::empty();
    state.progress = PlayerProgress::new(Avatar::default(), PointBalance::new(points));
    SublimeApp::new(state, PointPolicy::ClampAll)
}

fn add_habit(app: &mut SublimeApp, sp_value: u32) -> HabitId {
    app.upsert_habit(Upsert::Create(HabitDraft::new("Meditate", "Focus", sp_value)))
        .unwrap()
        .unwrap()
}

fn add_goal_with_milestone(app: &mut SublimeApp, horizon: GoalHorizon) -> (GoalId, sublime_core::MilestoneId) {
    let goal_id = app
        .upsert_goal(horizon, Upsert::Create(GoalDraft::new("Prototype", "Build it")))
        .unwrap()
        .unwrap();
    let milestone_id = app.add_milestone(horizon, goal_id, "Outline").unwrap().unwrap();
    (goal_id, milestone_id)
}

#[test]
fn habit_toggle_pair_restores_points_and_streak() {
    for policy in [PointPolicy::ClampAll, PointPolicy::Legacy] {
        let mut state = AppState::empty();
        state.progress.points = PointBalance::new(50);
        let mut app = SublimeApp::new(state, policy);
        let id = add_habit(&mut app, 20);
        let before_streak = app.state().habits.get(id).unwrap().streak;

        let on = app.toggle_habit(id, day()).unwrap();
        assert!(on.completed);
        assert_eq!(app.points().value(), 70);
        assert_eq!(app.avatar().current_xp, 20);
        assert!(app.state().habits.get(id).unwrap().is_completed_on(day()));

        let off = app.toggle_habit(id, day()).unwrap();
        assert!(!off.completed);
        assert_eq!(app.points().value(), 50);
        assert_eq!(app.state().habits.get(id).unwrap().streak, before_streak);
        assert!(!app.state().habits.get(id).unwrap().is_completed_on(day()));
    }
}

#[test]
fn long_term_milestone_rewards_fifty_points_and_twenty_five_xp() {
    let mut app = empty_app(100);
    let (goal_id, milestone_id) = add_goal_with_milestone(&mut app, GoalHorizon::LongTerm);

    let on = app.toggle_milestone(GoalHorizon::LongTerm, goal_id, milestone_id).unwrap();
    assert_eq!((on.reward.points, on.reward.xp), (50, 25));
    assert_eq!(app.points().value(), 150);
    assert_eq!(app.avatar().current_xp, 25);

    let off = app.toggle_milestone(GoalHorizon::LongTerm, goal_id, milestone_id).unwrap();
    assert_eq!((off.reward.points, off.reward.xp), (-50, -25));
    assert_eq!(app.points().value(), 100);
    assert_eq!(app.avatar().current_xp, 0);
}

#[test]
fn short_term_milestone_uses_its_own_table() {
    let mut app = empty_app(0);
    let (goal_id, milestone_id) = add_goal_with_milestone(&mut app, GoalHorizon::ShortTerm);
    let on = app.toggle_milestone(GoalHorizon::ShortTerm, goal_id, milestone_id).unwrap();
    assert_eq!((on.reward.points, on.reward.xp), (30, 15));
    assert!(app
        .toggle_milestone(GoalHorizon::LongTerm, goal_id, milestone_id)
        .is_none());
}

#[test]
fn quest_and_milestone_toggles_never_drive_points_negative() {
    let mut app = empty_app(10);
    let quest_id = app
        .upsert_quest(Upsert::Create(QuestDraft::new("Blitz", "Plan", 30, QuestKind::Generic)))
        .unwrap()
        .unwrap();

    // Complete, spend the balance down, then un-complete.
    app.toggle_quest(quest_id).unwrap();
    assert_eq!(app.points().value(), 40);
    let mut state = app.state().clone();
    state.progress.points = PointBalance::new(5);
    let mut app = SublimeApp::new(state, PointPolicy::Legacy);

    app.toggle_quest(quest_id).unwrap();
    assert_eq!(app.points().value(), 0);

    let (goal_id, milestone_id) = add_goal_with_milestone(&mut app, GoalHorizon::LongTerm);
    let mut goal = app.state().long_term_goals.get(goal_id).unwrap().clone();
    goal.milestones[0].completed = true;
    app.upsert_goal(GoalHorizon::LongTerm, Upsert::Update(goal)).unwrap();

    app.toggle_milestone(GoalHorizon::LongTerm, goal_id, milestone_id).unwrap();
    assert_eq!(app.points().value(), 0);
}

#[test]
fn legacy_policy_lets_habits_and_time_blocks_go_negative() {
    let mut state = AppState::empty();
    state.progress.points = PointBalance::new(0);
    let mut app = SublimeApp::new(state, PointPolicy::Legacy);

    let id = add_habit(&mut app, 10);
    let mut habit = app.state().habits.get(id).unwrap().clone();
    habit.completed_on.insert(day());
    app.upsert_habit(Upsert::Update(habit)).unwrap();

    app.toggle_habit(id, day()).unwrap();
    assert_eq!(app.points().value(), -10);

    let block_id = app
        .upsert_time_block(
            day(),
            Upsert::Create(TimeBlockDraft::new("Focus", "09:00", "10:00", TimeBlockKind::DeepWork, 15)),
        )
        .unwrap()
        .unwrap();
    let mut block = app.state().schedule.blocks_for(day())[0].clone();
    block.completed = true;
    app.upsert_time_block(day(), Upsert::Update(block)).unwrap();

    let off = app.toggle_time_block(day(), block_id).unwrap();
    assert!(!off.completed);
    assert_eq!(app.points().value(), -25);

    let mut clamped = SublimeApp::new(app.state().clone(), PointPolicy::ClampAll);
    clamped.toggle_habit(id, day()).unwrap();
    clamped.toggle_habit(id, day()).unwrap();
    assert_eq!(clamped.points().value(), 0);
}

#[test]
fn time_block_toggle_rewards_its_sp_value() {
    let mut app = empty_app(0);
    let block_id = app
        .upsert_time_block(
            day(),
            Upsert::Create(TimeBlockDraft::new("Focus", "09:00", "11:30", TimeBlockKind::DeepWork, 25)),
        )
        .unwrap()
        .unwrap();

    let on = app.toggle_time_block(day(), block_id).unwrap();
    assert!(on.completed);
    assert_eq!(app.points().value(), 25);
    assert!(app.state().schedule.blocks_for(day())[0].completed);

    app.toggle_time_block(day(), block_id).unwrap();
    assert_eq!(app.points().value(), 0);
    assert_eq!(app.avatar().current_xp, 0);
}

#[test]
fn time_blocks_are_ordered_by_start_time() {
    let mut app = empty_app(0);
    for start in ["09:00", "08:00", "10:00"] {
        let end = format!("{}:30", &start[..2]);
        app.upsert_time_block(
            day(),
            Upsert::Create(TimeBlockDraft::new("Block", start, end, TimeBlockKind::Planning, 5)),
        )
        .unwrap();
    }
    let starts: Vec<_> = app
        .state()
        .schedule
        .blocks_for(day())
        .iter()
        .map(|b| b.start_time.as_str())
        .collect();
    assert_eq!(starts, ["08:00", "09:00", "10:00"]);
}

#[test]
fn leveling_through_toggles() {
    let mut app = empty_app(0);
    let id = app
        .upsert_quest(Upsert::Create(QuestDraft::new("Marathon", "Run", 250, QuestKind::Generic)))
        .unwrap()
        .unwrap();

    let Some(QuestStart::Completed(report)) = app.start_quest(id) else {
        panic!("generic quest should complete on start");
    };
    assert!(report.completed);
    assert_eq!((report.reward.points, report.reward.xp), (250, 250));
    assert_eq!(report.levels_gained, 2);
    assert_eq!(
        app.avatar(),
        Avatar { level: 3, current_xp: 0, xp_to_next_level: 225 }
    );
    assert!(app.state().quests.get(id).unwrap().completed);
}

#[test]
fn create_prepends_and_update_replaces() {
    let mut app = empty_app(0);
    let first = add_habit(&mut app, 10);
    let second = add_habit(&mut app, 15);
    assert_eq!(app.state().habits.items()[0].id, second);
    assert_eq!(app.state().habits.items()[1].id, first);

    let mut edited = app.state().habits.get(first).unwrap().clone();
    edited.name = "Meditate 20 mins".to_string();
    assert_eq!(app.upsert_habit(Upsert::Update(edited)).unwrap(), Some(first));
    assert_eq!(app.state().habits.get(first).unwrap().name, "Meditate 20 mins");
    assert_eq!(app.points().value(), 0);

    let mut stranger = app.state().habits.get(first).unwrap().clone();
    stranger.id = HabitId::new();
    assert_eq!(app.upsert_habit(Upsert::Update(stranger)).unwrap(), None);
    assert_eq!(app.state().habits.len(), 2);
}

#[test]
fn deleting_unknown_ids_changes_nothing() {
    let mut app = SublimeApp::new(AppState::seeded(day()), PointPolicy::ClampAll);
    let before = app.state().clone();

    assert!(!app.delete_habit(HabitId::new()));
    assert!(!app.delete_goal(GoalHorizon::LongTerm, GoalId::new()));
    assert!(!app.delete_goal(GoalHorizon::ShortTerm, GoalId::new()));
    assert!(!app.delete_time_block(day(), TimeBlockId::new()));
    assert!(!app.delete_quest(QuestId::new()));

    assert_eq!(app.state(), &before);
    assert!(!app.is_dirty());
}

#[test]
fn empty_suggestions_leave_collections_unchanged() {
    let mut app = SublimeApp::new(AppState::seeded(day()), PointPolicy::ClampAll);
    let habits = app.state().habits.len();
    let quests = app.state().quests.len();

    assert_eq!(app.accept_habit_suggestions(Vec::new()), 0);
    assert_eq!(app.accept_quest_suggestions(Vec::new()), 0);
    assert_eq!(app.state().habits.len(), habits);
    assert_eq!(app.state().quests.len(), quests);
}

#[test]
fn suggestions_are_appended() {
    let mut app = SublimeApp::new(AppState::seeded(day()), PointPolicy::ClampAll);
    let added = app.accept_habit_suggestions(vec![HabitSuggestion {
        name: Some("Sketch".to_string()),
        description: None,
    }]);
    assert_eq!(added, 1);
    let last = app.state().habits.items().last().unwrap();
    assert_eq!(last.name, "Sketch");
    assert_eq!(last.sp_value, 15);

    app.accept_quest_suggestions(vec![QuestSuggestion {
        title: "Tutorial".to_string(),
        description: "Two hours".to_string(),
        reward: 60,
        kind: QuestKind::Generic,
    }]);
    let last = app.state().quests.items().last().unwrap();
    assert_eq!(last.title, "Tutorial");
    assert!(!last.completed);
}

#[tokio::test]
async fn first_run_seeds_then_flush_and_reload_roundtrips() {
    let mut persistence = Persistence::new(MemoryStorage::new());
    let state = AppState::load(&mut persistence, day()).await;
    assert_eq!(state.progress.points.value(), 50);
    assert_eq!(state.habits.len(), 3);
    assert_eq!(state.schedule.blocks_for(day()).len(), 2);

    let mut app = SublimeApp::new(state, PointPolicy::ClampAll);
    let habit_id = app.state().habits.items()[0].id;
    app.toggle_habit(habit_id, day()).unwrap();
    app.flush(&mut persistence).await;
    assert!(!app.is_dirty());

    let keys = persistence.primary().keys().await.unwrap();
    assert_eq!(keys, ["sublime_avatar", "sublime_habits", "sublime_points"]);

    let reloaded = AppState::load(&mut persistence, day()).await;
    assert_eq!(reloaded.progress, app.state().progress);
    assert_eq!(reloaded.habits, app.state().habits);
    assert!(reloaded.habits.get(habit_id).unwrap().is_completed_on(day()));
}

#[tokio::test]
async fn corrupted_slice_falls_back_to_default() {
    let mut store = MemoryStorage::new();
    store.write(StateKey::Points.as_str(), "not json").await.unwrap();
    store.write(StateKey::Habits.as_str(), "[]").await.unwrap();
    let mut persistence = Persistence::new(store);

    let state = AppState::load(&mut persistence, day()).await;
    assert_eq!(state.progress.points.value(), 50);
    assert!(state.habits.is_empty());
}
