//! User use-case service and transactional save.
//!
//! # Responsibility
//! - Run the create/begin/register/commit sequence for new users.
//! - Offer CRUD entry points that never bypass repository contracts.
//!
//! # Invariants
//! - A user gets an id only when its insert transaction commits.
//! - Log events carry identifiers and timings, never usernames or passwords.

use crate::model::user::{User, UserField, UserId};
use crate::repo::user_repo::{
    RepoError, RepoResult, SqliteUserRepository, UserListQuery, UserRepository,
};
use log::{error, info};
use rusqlite::{Connection, TransactionBehavior};
use std::time::Instant;

/// Saves a new user inside its own write transaction.
///
/// The generated id is visible on `user` after this returns `Ok`. On any
/// failure the transaction rolls back and `user` stays unsaved.
///
/// # Errors
/// - `AlreadyPersisted` when `user` already carries an id.
/// - `Db` for storage failures such as a duplicate username.
pub fn persist_user(conn: &mut Connection, user: &mut User) -> RepoResult<UserId> {
    let started_at = Instant::now();
    info!("event=user_persist module=service status=start");

    // Checked before BEGIN so a storage failure can never unset a real id.
    if let Some(id) = user.id() {
        error!("event=user_persist module=service status=error error_code=already_persisted user_id={id}");
        return Err(RepoError::AlreadyPersisted(id));
    }

    let result = insert_and_commit(conn, user);
    match &result {
        Ok(id) => info!(
            "event=user_persist module=service status=ok user_id={} duration_ms={}",
            id,
            started_at.elapsed().as_millis()
        ),
        Err(err) => {
            user.clear_id();
            error!(
                "event=user_persist module=service status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
        }
    }

    result
}

fn insert_and_commit(conn: &mut Connection, user: &mut User) -> RepoResult<UserId> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let id = SqliteUserRepository::new(&tx).create_user(user)?;
    tx.commit()?;
    Ok(id)
}

/// Use-case wrapper around a user repository.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new user; the generated id is written back into `user`.
    pub fn register(&self, user: &mut User) -> RepoResult<UserId> {
        self.repo.create_user(user)
    }

    pub fn get(&self, id: UserId) -> RepoResult<Option<User>> {
        self.repo.get_user(id)
    }

    pub fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.repo.find_by_username(username)
    }

    pub fn list(&self, query: &UserListQuery) -> RepoResult<Vec<User>> {
        self.repo.list_users(query)
    }

    /// Replaces all stored columns of a saved user.
    pub fn update(&self, user: &User) -> RepoResult<()> {
        self.repo.update_user(user)
    }

    /// Validates and stores a new password for an existing user.
    ///
    /// Validation runs before any storage access, so an over-length value
    /// fails with `Validation` even when `id` does not exist.
    pub fn change_password(&self, id: UserId, password: impl Into<String>) -> RepoResult<User> {
        let password = password.into();
        UserField::Password.validate(&password)?;

        let mut user = self.repo.get_user(id)?.ok_or(RepoError::NotFound(id))?;
        user.set_password(password)?;
        self.repo.update_user(&user)?;
        Ok(user)
    }

    pub fn delete(&self, id: UserId) -> RepoResult<()> {
        self.repo.delete_user(id)
    }
}
