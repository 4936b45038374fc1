//! Core domain types
//!
//! This module contains the core domain structures used across Drover services.
//! The orchestrator uses them to build and track jobs, the worker uses the
//! symbol type to talk to the exchange.

pub mod identity;
pub mod job;
pub mod symbol;
pub mod workload;
