//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the habit store.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes validate entities before touching SQL.
//! - Every mutation commits as a single transaction; a failed operation
//!   leaves no partial state behind.
//! - Repository APIs return semantic errors (`HabitNotFound`,
//!   `DuplicateRecord`, ...) in addition to DB transport errors.

pub mod habit_repo;
