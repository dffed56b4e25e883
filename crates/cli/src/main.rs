//! SublimeQuest CLI - level up through habits, goals and quests.

mod breathing;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Duration;
use clap::{Parser, Subcommand};
use sublime_ai::{build_source, SuggestionConfig};
use sublime_core::{
    today, Date, GoalDraft, GoalHorizon, GoalId, HabitDraft, HabitId, MilestoneId, QuestDraft,
    QuestId, QuestKind, TimeBlockDraft, TimeBlockId, TimeBlockKind,
};
use sublime_progress::PointPolicy;
use sublime_state::{AppConfig, AppState, QuestStart, SublimeApp, ToggleReport, Upsert};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sublime")]
#[command(about = "Gamified habit, goal and quest tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding saved progress
    #[arg(short, long, global = true, default_value = ".sublime")]
    data_dir: PathBuf,

    /// Day to act on (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    date: Option<Date>,

    /// Forget saved entries older than this many days
    #[arg(long, global = true)]
    max_age_days: Option<i64>,

    /// Byte cap for saved data
    #[arg(long, global = true)]
    quota_bytes: Option<u64>,

    /// Point clamping policy (clamp-all or legacy)
    #[arg(long, global = true, default_value = "clamp-all")]
    point_policy: PointPolicy,

    /// Suggestion proxy endpoint
    #[arg(long, global = true, env = "SUBLIME_SUGGEST_URL")]
    suggest_url: Option<String>,

    /// Gemini API key for direct suggestions
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model
    #[arg(long, global = true, default_value = "gemini-2.5-flash")]
    model: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show avatar, points and today's overview
    Status,
    /// Manage habits
    #[command(subcommand)]
    Habit(HabitCommand),
    /// Manage goals and their milestones
    #[command(subcommand)]
    Goal(GoalCommand),
    /// Manage the time blocks of a day
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// Manage quests
    #[command(subcommand)]
    Quest(QuestCommand),
    /// Ask for generated habits or quests
    #[command(subcommand)]
    Suggest(SuggestCommand),
}

#[derive(Subcommand)]
enum HabitCommand {
    /// Add a habit
    Add {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Points per completion
        #[arg(long, default_value = "10")]
        sp: u32,
    },
    /// List habits
    List,
    /// Toggle a habit's completion for the day
    Toggle { id: HabitId },
    /// Edit a habit
    Edit {
        id: HabitId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        sp: Option<u32>,
    },
    /// Delete a habit
    Delete { id: HabitId },
}

#[derive(Subcommand)]
enum GoalCommand {
    /// Add a goal
    Add {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "long-term")]
        horizon: GoalHorizon,
    },
    /// List goals
    List {
        /// Only this collection
        #[arg(long)]
        horizon: Option<GoalHorizon>,
    },
    /// Edit a goal
    Edit {
        id: GoalId,
        #[arg(long, default_value = "long-term")]
        horizon: GoalHorizon,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a goal and its milestones
    Delete {
        id: GoalId,
        #[arg(long, default_value = "long-term")]
        horizon: GoalHorizon,
    },
    /// Add a milestone to a goal
    AddMilestone {
        goal: GoalId,
        name: String,
        #[arg(long, default_value = "long-term")]
        horizon: GoalHorizon,
    },
    /// Rename a milestone
    RenameMilestone {
        goal: GoalId,
        milestone: MilestoneId,
        name: String,
        #[arg(long, default_value = "long-term")]
        horizon: GoalHorizon,
    },
    /// Remove a milestone
    RemoveMilestone {
        goal: GoalId,
        milestone: MilestoneId,
        #[arg(long, default_value = "long-term")]
        horizon: GoalHorizon,
    },
    /// Toggle a milestone's completion
    Toggle {
        goal: GoalId,
        milestone: MilestoneId,
        #[arg(long, default_value = "long-term")]
        horizon: GoalHorizon,
    },
}

#[derive(Subcommand)]
enum ScheduleCommand {
    /// Add a time block
    Add {
        title: String,
        /// Start time (HH:MM)
        start: String,
        /// End time (HH:MM)
        end: String,
        #[arg(long, default_value = "deep-work")]
        kind: TimeBlockKind,
        #[arg(long, default_value = "10")]
        sp: u32,
    },
    /// List the day's time blocks
    List,
    /// Toggle a time block's completion
    Toggle { id: TimeBlockId },
    /// Edit a time block
    Edit {
        id: TimeBlockId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        kind: Option<TimeBlockKind>,
        #[arg(long)]
        sp: Option<u32>,
    },
    /// Delete a time block
    Delete { id: TimeBlockId },
}

#[derive(Subcommand)]
enum QuestCommand {
    /// Add a quest
    Add {
        title: String,
        description: String,
        #[arg(long, default_value = "25")]
        reward: u32,
        #[arg(long, default_value = "generic")]
        kind: QuestKind,
    },
    /// List quests
    List,
    /// Start a quest
    Start {
        id: QuestId,
        /// Skip the guided session; confirm it later
        #[arg(long)]
        no_guide: bool,
    },
    /// Confirm a guided quest was finished
    Confirm { id: QuestId },
    /// Toggle a quest's completion
    Toggle { id: QuestId },
    /// Edit a quest
    Edit {
        id: QuestId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        reward: Option<u32>,
    },
    /// Delete a quest
    Delete { id: QuestId },
}

#[derive(Subcommand)]
enum SuggestCommand {
    /// Suggest habits for the long-term goals
    Habits,
    /// Suggest quests from goals and habits
    Quests,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = AppConfig {
        data_dir: cli.data_dir,
        entry_max_age: cli.max_age_days.map(Duration::days),
        quota_bytes: cli.quota_bytes,
        point_policy: cli.point_policy,
    };
    let suggestions = SuggestionConfig {
        endpoint: cli.suggest_url,
        api_key: cli.api_key,
        model: cli.model,
        ..SuggestionConfig::default()
    };
    let date = cli.date.unwrap_or_else(today);

    let mut persistence = config
        .open()
        .await
        .with_context(|| format!("Failed to open {}", config.data_dir.display()))?;
    let state = AppState::load(&mut persistence, date).await;
    let mut app = SublimeApp::new(state, config.point_policy);

    let result = match cli.command {
        Commands::Status => {
            print_status(&app, date);
            Ok(())
        }
        Commands::Habit(cmd) => habit(&mut app, cmd, date),
        Commands::Goal(cmd) => goal(&mut app, cmd),
        Commands::Schedule(cmd) => schedule(&mut app, cmd, date),
        Commands::Quest(cmd) => quest(&mut app, cmd).await,
        Commands::Suggest(cmd) => suggest(&mut app, cmd, &suggestions).await,
    };

    app.flush(&mut persistence).await;
    result
}

fn habit(app: &mut SublimeApp, cmd: HabitCommand, date: Date) -> Result<()> {
    match cmd {
        HabitCommand::Add { name, description, sp } => {
            let id = app.upsert_habit(Upsert::Create(HabitDraft::new(name, description, sp)))?;
            if let Some(id) = id {
                println!("Added habit: {}", id);
            }
        }
        HabitCommand::List => {
            let habits = &app.state().habits;
            println!("Habits ({})", habits.len());
            for h in habits.iter() {
                println!(
                    "  {} | {} | {} SP | streak {} - {}",
                    h.id,
                    checkbox(h.is_completed_on(date)),
                    h.sp_value,
                    h.streak,
                    h.name,
                );
            }
        }
        HabitCommand::Toggle { id } => {
            let Some(report) = app.toggle_habit(id, date) else {
                bail!("Habit {} not found", id);
            };
            print_toggle("habit", &report);
        }
        HabitCommand::Edit { id, name, description, sp } => {
            let Some(mut habit) = app.state().habits.get(id).cloned() else {
                bail!("Habit {} not found", id);
            };
            if let Some(name) = name {
                habit.name = name;
            }
            if let Some(description) = description {
                habit.description = description;
            }
            if let Some(sp) = sp {
                habit.sp_value = sp;
            }
            app.upsert_habit(Upsert::Update(habit))?;
            println!("Updated habit: {}", id);
        }
        HabitCommand::Delete { id } => report_delete("Habit", id, app.delete_habit(id)),
    }
    Ok(())
}

fn goal(app: &mut SublimeApp, cmd: GoalCommand) -> Result<()> {
    match cmd {
        GoalCommand::Add { name, description, horizon } => {
            let id = app.upsert_goal(horizon, Upsert::Create(GoalDraft::new(name, description)))?;
            if let Some(id) = id {
                println!("Added {} goal: {}", horizon, id);
            }
        }
        GoalCommand::List { horizon } => {
            let horizons = match horizon {
                Some(h) => vec![h],
                None => vec![GoalHorizon::LongTerm, GoalHorizon::ShortTerm],
            };
            for horizon in horizons {
                let goals = app.state().goals(horizon);
                println!("Goals: {} ({})", horizon, goals.len());
                for g in goals.iter() {
                    println!("  {} | {:>3.0}% - {}", g.id, g.completion_percentage(), g.name);
                    for m in &g.milestones {
                        println!("      {} {} - {}", checkbox(m.completed), m.id, m.name);
                    }
                }
            }
        }
        GoalCommand::Edit { id, horizon, name, description } => {
            let Some(mut goal) = app.state().goals(horizon).get(id).cloned() else {
                bail!("Goal {} not found", id);
            };
            if let Some(name) = name {
                goal.name = name;
            }
            if let Some(description) = description {
                goal.description = description;
            }
            app.upsert_goal(horizon, Upsert::Update(goal))?;
            println!("Updated goal: {}", id);
        }
        GoalCommand::Delete { id, horizon } => {
            report_delete("Goal", id, app.delete_goal(horizon, id))
        }
        GoalCommand::AddMilestone { goal, name, horizon } => {
            let Some(id) = app.add_milestone(horizon, goal, name)? else {
                bail!("Goal {} not found", goal);
            };
            println!("Added milestone: {}", id);
        }
        GoalCommand::RenameMilestone { goal, milestone, name, horizon } => {
            let Some(mut updated) = app.state().goals(horizon).get(goal).cloned() else {
                bail!("Goal {} not found", goal);
            };
            if !updated.rename_milestone(milestone, name) {
                bail!("Milestone {} not found", milestone);
            }
            app.upsert_goal(horizon, Upsert::Update(updated))?;
            println!("Renamed milestone: {}", milestone);
        }
        GoalCommand::RemoveMilestone { goal, milestone, horizon } => {
            report_delete("Milestone", milestone, app.remove_milestone(horizon, goal, milestone))
        }
        GoalCommand::Toggle { goal, milestone, horizon } => {
            let Some(report) = app.toggle_milestone(horizon, goal, milestone) else {
                bail!("Milestone {} not found in goal {}", milestone, goal);
            };
            print_toggle("milestone", &report);
        }
    }
    Ok(())
}

fn schedule(app: &mut SublimeApp, cmd: ScheduleCommand, date: Date) -> Result<()> {
    match cmd {
        ScheduleCommand::Add { title, start, end, kind, sp } => {
            let draft = TimeBlockDraft::new(title, start, end, kind, sp);
            if let Some(id) = app.upsert_time_block(date, Upsert::Create(draft))? {
                println!("Added time block: {}", id);
            }
        }
        ScheduleCommand::List => {
            let blocks = app.state().schedule.blocks_for(date);
            println!("Schedule for {} ({})", date, blocks.len());
            for b in blocks {
                println!(
                    "  {} | {} | {}-{} | {} | {} SP - {}",
                    b.id,
                    checkbox(b.completed),
                    b.start_time,
                    b.end_time,
                    b.kind,
                    b.sp_value,
                    b.title,
                );
            }
        }
        ScheduleCommand::Toggle { id } => {
            let Some(report) = app.toggle_time_block(date, id) else {
                bail!("Time block {} not found on {}", id, date);
            };
            print_toggle("time block", &report);
        }
        ScheduleCommand::Edit { id, title, start, end, kind, sp } => {
            let Some(mut block) = app
                .state()
                .schedule
                .blocks_for(date)
                .iter()
                .find(|b| b.id == id)
                .cloned()
            else {
                bail!("Time block {} not found on {}", id, date);
            };
            if let Some(title) = title {
                block.title = title;
            }
            if let Some(start) = start {
                block.start_time = start;
            }
            if let Some(end) = end {
                block.end_time = end;
            }
            if let Some(kind) = kind {
                block.kind = kind;
            }
            if let Some(sp) = sp {
                block.sp_value = sp;
            }
            app.upsert_time_block(date, Upsert::Update(block))?;
            println!("Updated time block: {}", id);
        }
        ScheduleCommand::Delete { id } => {
            report_delete("Time block", id, app.delete_time_block(date, id))
        }
    }
    Ok(())
}

async fn quest(app: &mut SublimeApp, cmd: QuestCommand) -> Result<()> {
    match cmd {
        QuestCommand::Add { title, description, reward, kind } => {
            let draft = QuestDraft::new(title, description, reward, kind);
            if let Some(id) = app.upsert_quest(Upsert::Create(draft))? {
                println!("Added quest: {}", id);
            }
        }
        QuestCommand::List => {
            let quests = &app.state().quests;
            println!("Quests ({})", quests.len());
            for q in quests.iter() {
                println!(
                    "  {} | {} | {} | {} SP - {}",
                    q.id,
                    checkbox(q.completed),
                    q.kind,
                    q.reward,
                    q.title,
                );
            }
        }
        QuestCommand::Start { id, no_guide } => match app.start_quest(id) {
            None => bail!("Quest {} not found", id),
            Some(QuestStart::AlreadyCompleted) => println!("Quest already completed"),
            Some(QuestStart::Completed(report)) => print_toggle("quest", &report),
            Some(QuestStart::AwaitingGuidedFlow) if no_guide => {
                println!("Run `sublime quest confirm {}` once the exercise is done", id);
            }
            Some(QuestStart::AwaitingGuidedFlow) => guided_breathing(app, id).await,
        },
        QuestCommand::Confirm { id } => {
            let Some(report) = app.confirm_quest(id) else {
                bail!("Quest {} not found or already completed", id);
            };
            print_toggle("quest", &report);
        }
        QuestCommand::Toggle { id } => {
            let Some(report) = app.toggle_quest(id) else {
                bail!("Quest {} not found", id);
            };
            print_toggle("quest", &report);
        }
        QuestCommand::Edit { id, title, description, reward } => {
            let Some(mut quest) = app.state().quests.get(id).cloned() else {
                bail!("Quest {} not found", id);
            };
            if let Some(title) = title {
                quest.title = title;
            }
            if let Some(description) = description {
                quest.description = description;
            }
            if let Some(reward) = reward {
                quest.reward = reward;
            }
            app.upsert_quest(Upsert::Update(quest))?;
            println!("Updated quest: {}", id);
        }
        QuestCommand::Delete { id } => report_delete("Quest", id, app.delete_quest(id)),
    }
    Ok(())
}

async fn guided_breathing(app: &mut SublimeApp, quest_id: QuestId) {
    println!(
        "Guided breathing: {} cycles, about {}s. Press Ctrl-C to stop.",
        breathing::TOTAL_REPS,
        breathing::session_length(breathing::TOTAL_REPS).as_secs(),
    );
    let session = breathing::run(breathing::TOTAL_REPS, |rep, phase| {
        println!(
            "  [{}/{}] {} ({}s)",
            rep,
            breathing::TOTAL_REPS,
            phase.name,
            phase.seconds
        );
    });

    tokio::select! {
        _ = session => {
            if let Some(report) = app.confirm_quest(quest_id) {
                print_toggle("quest", &report);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            app.cancel_quest();
            println!("Session stopped, quest left open");
        }
    }
}

async fn suggest(app: &mut SublimeApp, cmd: SuggestCommand, config: &SuggestionConfig) -> Result<()> {
    let source = build_source(config);
    let goals = app.state().long_term_goals.items().to_vec();

    let added = match cmd {
        SuggestCommand::Habits => {
            let habits = source.suggest_habits(&goals).await;
            app.accept_habit_suggestions(habits)
        }
        SuggestCommand::Quests => {
            let habits = app.state().habits.items().to_vec();
            let quests = source.suggest_quests(&goals, &habits).await;
            app.accept_quest_suggestions(quests)
        }
    };

    info!("Accepted {} suggestions", added);
    if added == 0 {
        println!("No suggestions available right now");
    } else {
        println!("Added {} suggestions", added);
    }
    Ok(())
}

fn print_status(app: &SublimeApp, date: Date) {
    let avatar = app.avatar();
    let state = app.state();

    println!("SublimeQuest Status");
    println!(
        "  Level {} | {}/{} XP ({:.0}%)",
        avatar.level,
        avatar.current_xp,
        avatar.xp_to_next_level,
        avatar.progress_percentage(),
    );
    println!("  Sublime Points: {}", app.points());

    let done_habits = state.habits.iter().filter(|h| h.is_completed_on(date)).count();
    println!("  Habits done on {}: {}/{}", date, done_habits, state.habits.len());

    let blocks = state.schedule.blocks_for(date);
    let done_blocks = blocks.iter().filter(|b| b.completed).count();
    println!("  Time blocks done: {}/{}", done_blocks, blocks.len());

    let open_quests = state.quests.iter().filter(|q| !q.completed).count();
    println!("  Open quests: {}", open_quests);

    for horizon in [GoalHorizon::LongTerm, GoalHorizon::ShortTerm] {
        for g in state.goals(horizon).iter() {
            println!("  [{}] {:>3.0}% {}", horizon, g.completion_percentage(), g.name);
        }
    }
}

fn print_toggle(label: &str, report: &ToggleReport) {
    let verb = if report.completed { "Completed" } else { "Reopened" };
    println!(
        "{} {} ({:+} SP, {:+} XP)",
        verb, label, report.reward.points, report.reward.xp
    );
    if report.levels_gained > 0 {
        println!("Level up! +{}", report.levels_gained);
    }
}

fn report_delete(kind: &str, id: impl std::fmt::Display, removed: bool) {
    if removed {
        println!("Deleted {}: {}", kind.to_lowercase(), id);
    } else {
        println!("{} {} not found", kind, id);
    }
}

fn checkbox(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_add_requires_description() {
        assert!(Cli::try_parse_from(["sublime", "quest", "add", "Walk"]).is_err());

        let cli = Cli::try_parse_from(["sublime", "quest", "add", "Walk", "Around the block"]).unwrap();
        let Commands::Quest(QuestCommand::Add { title, description, reward, kind }) = cli.command else {
            panic!("expected quest add");
        };
        let draft = QuestDraft::new(title, description, reward, kind);
        assert!(draft.validate().is_ok());
        assert_eq!(draft.reward, 25);
    }

    #[test]
    fn test_global_flags_parse() {
        let cli = Cli::try_parse_from([
            "sublime",
            "habit",
            "list",
            "--date",
            "2024-09-14",
            "--point-policy",
            "legacy",
        ])
        .unwrap();
        assert_eq!(cli.date, Date::from_ymd_opt(2024, 9, 14));
        assert_eq!(cli.point_policy, PointPolicy::Legacy);
        assert!(matches!(cli.command, Commands::Habit(HabitCommand::List)));
    }
}
