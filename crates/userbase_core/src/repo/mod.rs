//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Keep SQL inside the persistence boundary.
//! - Report semantic errors (`NotFound`, `NotPersisted`) next to driver errors.

pub mod user_repo;
