use anyhow::{Context, Result};
use directories_next::BaseDirs;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::session::TextSize;

const BANK_DIR_VAR: &str = "QBANK_DIR";
const TEXT_SIZE_VAR: &str = "QBANK_TEXT_SIZE";

fn get_default_bank_dir() -> Result<PathBuf> {
    let mut dir = BaseDirs::new()
        .context("could not locate system directories")?
        .data_dir()
        .to_path_buf();
    dir.push("qbank");
    dir.push("banks");
    Ok(dir)
}

#[derive(Debug)]
pub struct Settings {
    pub bank_dir: PathBuf,
    pub text_size: TextSize,
    pub load_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bank_dir: get_default_bank_dir().unwrap_or_else(|_| PathBuf::from("banks")),
            text_size: TextSize::default(),
            load_timeout: Duration::from_secs(30),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Settings> {
        let mut settings = Settings::default();
        if let Some(dir) = env::var_os(BANK_DIR_VAR) {
            settings.bank_dir = PathBuf::from(dir);
        }
        if let Ok(index) = env::var(TEXT_SIZE_VAR) {
            let index: usize = index
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number, got `{}`", TEXT_SIZE_VAR, index))?;
            settings.text_size = TextSize::from_index(index);
        }
        Ok(settings)
    }
}
