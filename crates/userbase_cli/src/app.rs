use crate::config::Config;
use chrono::NaiveDate;
use std::io::Write;
use userbase_core::{close_db, open_db, persist_user, User};

/// Builds the demo user, saves it, and writes the before/after dump to `out`.
///
/// Returns the saved record. Any validation or storage error aborts after at
/// most the "before" line has been written.
pub fn run(config: &Config, today: NaiveDate, out: &mut impl Write) -> anyhow::Result<User> {
    let mut conn = open_db(&config.db_path)?;

    let mut user = User::with_creation_date(
        config.username.as_str(),
        config.password.as_str(),
        Some(today),
    )?;
    writeln!(out, "User before saving: {user}")?;

    persist_user(&mut conn, &mut user)?;
    writeln!(out, "User after saving: {user}")?;

    close_db(conn)?;
    Ok(user)
}
