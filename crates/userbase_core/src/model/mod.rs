//! Domain records persisted by the core.
//!
//! # Invariants
//! - Records are valid from construction onward; storage never repairs them.

pub mod user;
