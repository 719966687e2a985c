//! Demo bootstrap: open the store, build one user, save it in a transaction.
//!
//! Prints the record before and after saving so the generated id is visible.

mod app;
mod config;

use anyhow::anyhow;
use clap::Parser;
use config::Config;
use log::info;
use userbase_core::{core_version, init_logging};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config.logging()).map_err(|err| anyhow!(err))?;
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        core_version()
    );

    let today = chrono::Local::now().date_naive();
    app::run(&config, today, &mut std::io::stdout().lock())?;
    Ok(())
}
