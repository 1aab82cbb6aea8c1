use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;

mod app;
mod bank;
mod commands;
mod loader;
mod output;
mod session;
mod settings;
mod view;

use crate::app::App;
use crate::output::TerminalOutput;
use crate::settings::Settings;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let settings = Settings::from_env()?;
    let mut app = App::new(settings, TerminalOutput::new());

    let bank_path = match env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => app
            .list_banks()?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No question bank found, pass one as an argument"))?,
    };
    app.open(bank_path)?;
    if !app.wait_for_bank() {
        warn!("Question bank is still loading");
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("could not read from stdin")?;
        if !app.handle_line(&line) {
            break;
        }
    }

    if let Some(session) = app.session() {
        let (correct, answered) = session.score();
        info!("Finished with {} of {} answered correctly", correct, answered);
    }
    info!("Goodbye");
    Ok(())
}
