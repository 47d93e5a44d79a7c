//! Use-case orchestration.
//!
//! # Responsibility
//! - Sequence store mutation, persistence, rendering and remote calls for
//!   each user action.
//! - Keep render and remote collaborators decoupled from storage details.

pub mod exit_log_service;
