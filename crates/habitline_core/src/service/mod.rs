//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Emit change notifications so UI layers can refresh after mutations.
//! - Keep UI layers decoupled from storage details.

pub mod notify;
pub mod tracker_service;
