//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Register, load, replace and delete rows in `users`.
//! - Hand generated surrogate keys back to the in-memory record.
//!
//! # Invariants
//! - Writes only accept already-validated `User` values.
//! - Read paths re-validate stored rows instead of masking bad data.
//! - Storage failures (including UNIQUE on `username`) surface as `Db` as-is.

use crate::db::DbError;
use crate::model::user::{User, UserId, UserValidationError};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const USER_SELECT_SQL: &str = "SELECT id, username, password, creation_date FROM users";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user persistence and lookups.
#[derive(Debug)]
pub enum RepoError {
    Validation(UserValidationError),
    Db(DbError),
    NotFound(UserId),
    /// Update/delete requested for a record without identity.
    NotPersisted,
    /// Insert requested for a record that already has identity.
    AlreadyPersisted(UserId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::NotPersisted => f.write_str("user has not been saved yet"),
            Self::AlreadyPersisted(id) => write!(f, "user already saved with id {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted user data: {message}"),
        }
    }
}

impl Error for RepoError {
    // Wrapped errors already provide the message, so skip straight to their cause.
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => err.source(),
            Self::Db(err) => err.source(),
            _ => None,
        }
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Pagination options for listing users (ordered by `id ASC`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Persistence-context operations over `users`.
pub trait UserRepository {
    /// Inserts `user` and writes the generated id back into it.
    fn create_user(&self, user: &mut User) -> RepoResult<UserId>;
    /// Replaces all columns of an existing row.
    fn update_user(&self, user: &User) -> RepoResult<()>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    fn list_users(&self, query: &UserListQuery) -> RepoResult<Vec<User>>;
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
///
/// Accepts any connection handle, including an open `rusqlite::Transaction`
/// (via deref), so callers decide the transaction boundary.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &mut User) -> RepoResult<UserId> {
        if let Some(id) = user.id() {
            return Err(RepoError::AlreadyPersisted(id));
        }

        self.conn.execute(
            "INSERT INTO users (username, password, creation_date)
             VALUES (?1, ?2, ?3);",
            params![user.username(), user.password(), user.creation_date()],
        )?;

        let id = UserId::new(self.conn.last_insert_rowid());
        user.set_id(id);
        Ok(id)
    }

    fn update_user(&self, user: &User) -> RepoResult<()> {
        let id = user.id().ok_or(RepoError::NotPersisted)?;

        let changed = self.conn.execute(
            "UPDATE users
             SET
                username = ?1,
                password = ?2,
                creation_date = ?3
             WHERE id = ?4;",
            params![
                user.username(),
                user.password(),
                user.creation_date(),
                id.get()
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.query_one(&format!("{USER_SELECT_SQL} WHERE id = ?1;"), Value::Integer(id.get()))
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.query_one(
            &format!("{USER_SELECT_SQL} WHERE username = ?1;"),
            Value::Text(username.to_string()),
        )
    }

    fn list_users(&self, query: &UserListQuery) -> RepoResult<Vec<User>> {
        let mut sql = format!("{USER_SELECT_SQL} ORDER BY id ASC");
        let mut bind_values: Vec<Value> = Vec::new();

        match (query.limit, query.offset) {
            (Some(limit), 0) => {
                sql.push_str(" LIMIT ?");
                bind_values.push(Value::Integer(i64::from(limit)));
            }
            (Some(limit), offset) => {
                sql.push_str(" LIMIT ? OFFSET ?");
                bind_values.push(Value::Integer(i64::from(limit)));
                bind_values.push(Value::Integer(i64::from(offset)));
            }
            (None, 0) => {}
            (None, offset) => {
                sql.push_str(" LIMIT -1 OFFSET ?");
                bind_values.push(Value::Integer(i64::from(offset)));
            }
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id.get()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

impl SqliteUserRepository<'_> {
    fn query_one(&self, sql: &str, key: Value) -> RepoResult<Option<User>> {
        let mut stmt = self.conn.prepare(sql)?;
        let row = stmt
            .query_row([key], |row| Ok(read_columns(row)))
            .optional()?;

        match row {
            Some(columns) => Ok(Some(columns?.into_user()?)),
            None => Ok(None),
        }
    }
}

/// Raw column values of one `users` row.
struct UserColumns {
    id: i64,
    username: String,
    password: String,
    creation_date: Option<NaiveDate>,
}

impl UserColumns {
    fn into_user(self) -> RepoResult<User> {
        if self.id <= 0 {
            return Err(RepoError::InvalidData(format!(
                "invalid id value `{}` in users.id",
                self.id
            )));
        }
        let user = User::restore(
            UserId::new(self.id),
            self.username,
            self.password,
            self.creation_date,
        )?;
        Ok(user)
    }
}

fn read_columns(row: &Row<'_>) -> RepoResult<UserColumns> {
    let creation_date = match row.get::<_, Option<NaiveDate>>("creation_date") {
        Ok(value) => value,
        Err(err) => {
            return Err(RepoError::InvalidData(format!(
                "invalid creation_date in users.creation_date: {err}"
            )));
        }
    };

    Ok(UserColumns {
        id: row.get("id")?,
        username: row.get("username")?,
        password: row.get("password")?,
        creation_date,
    })
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    read_columns(row)?.into_user()
}
