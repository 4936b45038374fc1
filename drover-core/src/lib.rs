//! Drover Core
//!
//! Core types and abstractions for the Drover bot launcher.
//!
//! This crate contains:
//! - Domain types: job identities, trading symbols, workload specs and job status
//! - DTOs: Data transfer objects for the control API
//! - Errors shared by every service (configuration validation)

pub mod domain;
pub mod dto;
pub mod error;

pub use error::ConfigurationError;
