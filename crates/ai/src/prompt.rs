//! Prompts, response schemas and response parsing.

use serde::Deserialize;
use serde_json::{json, Value};
use sublime_core::{Goal, Habit, HabitSuggestion, QuestSuggestion};

/// Prompt asking for habits that serve `goals`.
pub fn habit_prompt(goals: &[Goal]) -> String {
    let goal_lines = goals
        .iter()
        .map(|g| format!("- {}: {}", g.name, g.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the following long-term goals, suggest 3-5 new daily or weekly habits that would help achieve them.\n\
         The habits should be specific, actionable, and small enough to be incorporated into a daily routine.\n\
         Avoid suggesting habits the user might already be doing. Focus on creative or supportive habits.\n\
         \n\
         My Goals:\n\
         {}\n\
         \n\
         Provide the habits in the specified JSON format.\n",
        goal_lines
    )
}

/// Prompt asking for one-off quests beyond the current `habits`.
pub fn quest_prompt(goals: &[Goal], habits: &[Habit]) -> String {
    let goal_lines = goals
        .iter()
        .map(|g| format!("- {}", g.name))
        .collect::<Vec<_>>()
        .join("\n");
    let habit_lines = habits
        .iter()
        .map(|h| format!("- {}", h.name))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the following long-term goals and daily habits, suggest 2-3 unique, one-time \"quests\".\n\
         A quest should be a specific, short-term challenge that pushes the user slightly beyond their routine to accelerate progress.\n\
         For example, if a goal is 'Learn a new skill', a quest could be 'Complete a 2-hour tutorial on the topic'.\n\
         Avoid suggesting things that are already listed as habits.\n\
         \n\
         My Goals:\n\
         {}\n\
         \n\
         My Habits:\n\
         {}\n\
         \n\
         Provide the quests in the specified JSON format. The quest 'type' must be 'generic'.\n",
        goal_lines, habit_lines
    )
}

/// Structured-output schema for habit suggestions.
pub fn habit_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "habits": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {
                            "type": "STRING",
                            "description": "A short, actionable name for the habit (e.g., 'Meditate for 10 minutes')."
                        },
                        "description": {
                            "type": "STRING",
                            "description": "A brief explanation of why this habit is beneficial for the user's goals."
                        }
                    },
                    "required": ["name", "description"]
                }
            }
        },
        "required": ["habits"]
    })
}

/// Structured-output schema for quest suggestions.
pub fn quest_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "quests": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": "A short, engaging title for the quest (e.g., 'The 5-Minute Mind Reset')."
                        },
                        "description": {
                            "type": "STRING",
                            "description": "A brief, motivating description of the quest and its purpose."
                        },
                        "reward": {
                            "type": "INTEGER",
                            "description": "An appropriate SP reward value for completing the quest, usually between 20 and 100."
                        },
                        "type": {
                            "type": "STRING",
                            "description": "The type of quest. Must be 'generic'.",
                            "enum": ["generic"]
                        }
                    },
                    "required": ["title", "description", "reward", "type"]
                }
            }
        },
        "required": ["quests"]
    })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HabitsEnvelope {
    #[serde(default)]
    pub habits: Vec<HabitSuggestion>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuestsEnvelope {
    #[serde(default)]
    pub quests: Vec<QuestSuggestion>,
}

/// Parse a `{"habits": [...]}` document. A missing array means no suggestions.
pub fn parse_habits(text: &str) -> serde_json::Result<Vec<HabitSuggestion>> {
    Ok(serde_json::from_str::<HabitsEnvelope>(text.trim())?.habits)
}

/// Parse a `{"quests": [...]}` document. A missing array means no suggestions.
pub fn parse_quests(text: &str) -> serde_json::Result<Vec<QuestSuggestion>> {
    Ok(serde_json::from_str::<QuestsEnvelope>(text.trim())?.quests)
}
