//! Core of the userbase demo: a validated `User` entity persisted to SQLite.
//! Field constraints live in `model`; storage only ever sees valid records.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{close_db, open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::user::{
    User, UserDraft, UserField, UserId, UserValidationError, PASSWORD_MAX_CHARS,
    USERNAME_MAX_CHARS,
};
pub use repo::user_repo::{
    RepoError, RepoResult, SqliteUserRepository, UserListQuery, UserRepository,
};
pub use service::user_service::{persist_user, UserService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
