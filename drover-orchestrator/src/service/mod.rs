//! Service Module
//!
//! Business logic layer for the orchestrator.
//! Services sit between the HTTP handlers and the scheduler backend.

pub mod bot;

pub use bot::{BotError, BotService, DeleteOutcome};
