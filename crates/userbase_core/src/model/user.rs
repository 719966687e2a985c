//! User account domain model.
//!
//! # Responsibility
//! - Define the `users` record and its construction paths.
//! - Guard username/password constraints on every mutation path.
//!
//! # Invariants
//! - A `User` never holds an absent or over-length username/password.
//! - `id` is `None` until storage assigns a surrogate key.
//! - Equality and hashing depend only on identity, never on field values.
//!
//! # See also
//! - crates/userbase_core/src/db/migrations/0001_users.sql

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Maximum username length in characters (`users.username`).
pub const USERNAME_MAX_CHARS: usize = 20;
/// Maximum password length in characters (`users.password`).
pub const PASSWORD_MAX_CHARS: usize = 60;

/// Surrogate primary key assigned by storage on first save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Constrained text fields of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Username,
    Password,
}

impl UserField {
    /// Maximum accepted length in characters.
    pub fn max_chars(self) -> usize {
        match self {
            Self::Username => USERNAME_MAX_CHARS,
            Self::Password => PASSWORD_MAX_CHARS,
        }
    }

    /// Checks `value` against this field's length limit.
    pub fn validate(self, value: &str) -> Result<(), UserValidationError> {
        check_length(self, value)
    }
}

impl Display for UserField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Username => f.write_str("username"),
            Self::Password => f.write_str("password"),
        }
    }
}

/// Validation failure raised at construction or mutation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Required field was not supplied.
    Missing { field: UserField },
    /// Field exceeds its column length.
    TooLong {
        field: UserField,
        max: usize,
        actual: usize,
    },
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} field cannot be absent"),
            Self::TooLong { field, max, actual } => write!(
                f,
                "{field} field cannot be greater than {max} characters (got {actual})"
            ),
        }
    }
}

impl Error for UserValidationError {}

/// Persisted user account.
///
/// Construct with [`User::new`], [`User::with_creation_date`],
/// [`User::restore`], or by completing a [`UserDraft`]. Every path runs the
/// same field checks, so no partially valid value is ever observable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "UserDraft")]
pub struct User {
    id: Option<UserId>,
    username: String,
    password: String,
    creation_date: Option<NaiveDate>,
}

impl User {
    /// Starts an empty draft (no identity, no fields).
    pub fn draft() -> UserDraft {
        UserDraft::default()
    }

    /// Creates an unsaved user without a creation date.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Self::with_creation_date(username, password, None)
    }

    /// Creates an unsaved user with an explicit creation date.
    pub fn with_creation_date(
        username: impl Into<String>,
        password: impl Into<String>,
        creation_date: Option<NaiveDate>,
    ) -> Result<Self, UserValidationError> {
        let username = username.into();
        let password = password.into();
        check_length(UserField::Username, &username)?;
        check_length(UserField::Password, &password)?;

        Ok(Self {
            id: None,
            username,
            password,
            creation_date,
        })
    }

    /// Rebuilds a stored user from all four columns.
    ///
    /// Used by read paths; stored values are re-validated rather than trusted.
    pub fn restore(
        id: UserId,
        username: impl Into<String>,
        password: impl Into<String>,
        creation_date: Option<NaiveDate>,
    ) -> Result<Self, UserValidationError> {
        let mut user = Self::with_creation_date(username, password, creation_date)?;
        user.id = Some(id);
        Ok(user)
    }

    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn creation_date(&self) -> Option<NaiveDate> {
        self.creation_date
    }

    /// Returns whether storage has assigned an identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Replaces the username; the previous value is kept on error.
    pub fn set_username(&mut self, value: impl Into<String>) -> Result<(), UserValidationError> {
        let value = value.into();
        check_length(UserField::Username, &value)?;
        self.username = value;
        Ok(())
    }

    /// Replaces the password; the previous value is kept on error.
    pub fn set_password(&mut self, value: impl Into<String>) -> Result<(), UserValidationError> {
        let value = value.into();
        check_length(UserField::Password, &value)?;
        self.password = value;
        Ok(())
    }

    pub fn set_creation_date(&mut self, value: Option<NaiveDate>) {
        self.creation_date = value;
    }

    /// Assigns identity. Reserved for storage and reconstruction code.
    pub fn set_id(&mut self, id: UserId) {
        self.id = Some(id);
    }

    /// Drops identity, returning the record to the unsaved state.
    pub fn clear_id(&mut self) {
        self.id = None;
    }
}

impl PartialEq for User {
    /// Same object, or both persisted with the same id.
    ///
    /// Two unsaved users are distinct even when every field matches.
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("User{id=")?;
        match self.id {
            Some(id) => write!(f, "{id}")?,
            None => f.write_str("none")?,
        }
        write!(
            f,
            ", username='{}', password='{}', creation_date=",
            self.username, self.password
        )?;
        match self.creation_date {
            Some(date) => write!(f, "{date}")?,
            None => f.write_str("none")?,
        }
        f.write_str("}")
    }
}

/// Loosely-typed user shape where any field may be absent.
///
/// Covers the "empty" and "identity only" construction paths and serde input.
/// Becomes a [`User`] only through [`UserDraft::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub creation_date: Option<NaiveDate>,
}

impl UserDraft {
    /// Draft carrying only identity, as used for reconstruction stubs.
    pub fn with_id(id: UserId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn username(mut self, value: Option<String>) -> Self {
        self.username = value;
        self
    }

    pub fn password(mut self, value: Option<String>) -> Self {
        self.password = value;
        self
    }

    pub fn creation_date(mut self, value: Option<NaiveDate>) -> Self {
        self.creation_date = value;
        self
    }

    /// Validates every field and produces a [`User`].
    ///
    /// # Errors
    /// - `Missing` when username or password is absent (username checked first).
    /// - `TooLong` when a present value exceeds its limit.
    pub fn build(self) -> Result<User, UserValidationError> {
        let username = self.username.ok_or(UserValidationError::Missing {
            field: UserField::Username,
        })?;
        let password = self.password.ok_or(UserValidationError::Missing {
            field: UserField::Password,
        })?;

        let mut user = User::with_creation_date(username, password, self.creation_date)?;
        user.id = self.id;
        Ok(user)
    }
}

impl TryFrom<UserDraft> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDraft) -> Result<Self, Self::Error> {
        value.build()
    }
}

fn check_length(field: UserField, value: &str) -> Result<(), UserValidationError> {
    let actual = value.chars().count();
    let max = field.max_chars();
    if actual > max {
        return Err(UserValidationError::TooLong { field, max, actual });
    }
    Ok(())
}
