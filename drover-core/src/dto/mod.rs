//! Data Transfer Objects for the control API
//!
//! Request and response bodies shared by the orchestrator (server side) and
//! the client crate.

pub mod bot;
