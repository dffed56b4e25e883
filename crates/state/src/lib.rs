//! Application state (entity stores and controller)
//!
//! Holds every collection plus the player's progress in one owned
//! [`AppState`], mutated only through [`SublimeApp`]'s per-event methods.

#![warn(missing_docs)]

pub mod store;
pub mod schedule;
pub mod upsert;
pub mod config;
pub mod seed;
pub mod app;

pub use store::{Collection, Entity};
pub use schedule::Schedule;
pub use upsert::Upsert;
pub use config::AppConfig;
pub use app::{AppState, QuestStart, SublimeApp, ToggleReport};
