use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::bank::Format;
use crate::commands::{self, Command};
use crate::loader::{BankLoader, Loaded};
use crate::output::{Message, Output};
use crate::session::{Action, Session};
use crate::settings::Settings;
use crate::view::{self, Highlights, Target};


pub struct App<O: Output> {
    settings: Settings,
    loader: BankLoader,
    session: Option<Session>,
    highlights: Highlights,
    output: O,
}

impl<O: Output> App<O> {
    pub fn new(settings: Settings, output: O) -> Self {
        App {
            settings,
            loader: BankLoader::new(),
            session: None,
            highlights: Highlights::default(),
            output,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn list_banks(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.settings.bank_dir).with_context(|| {
            format!(
                "could not read bank directory {}",
                self.settings.bank_dir.display()
            )
        })?;
        let mut banks: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && Format::from_path(path).is_ok())
            .collect();
        banks.sort();
        Ok(banks)
    }

    fn resolve_bank(&self, name: &str) -> Result<PathBuf> {
        let direct = PathBuf::from(name);
        if direct.is_file() {
            return Ok(direct);
        }
        let in_bank_dir = self.settings.bank_dir.join(name);
        if in_bank_dir.is_file() {
            return Ok(in_bank_dir);
        }
        Err(anyhow!("No question bank named `{}`", name))
    }

    /// Starts loading a bank. The current session is dropped right away so
    /// that commands report the loading state until the new bank arrives.
    pub fn open(&mut self, path: PathBuf) -> Result<()> {
        Format::from_path(&path)?;
        self.session = None;
        self.highlights.clear();
        self.output.say(&Message::Loading(path.clone()));
        self.loader.load(path);
        Ok(())
    }

    /// Picks up a finished load, if any. Returns true when a load completed.
    pub fn poll(&mut self) -> bool {
        match self.loader.take_ready() {
            Some(loaded) => {
                self.apply_loaded(loaded);
                true
            }
            None => false,
        }
    }

    pub fn wait_for_bank(&mut self) -> bool {
        match self.loader.wait(self.settings.load_timeout) {
            Some(loaded) => {
                self.apply_loaded(loaded);
                true
            }
            None => false,
        }
    }

    fn apply_loaded(&mut self, loaded: Loaded) {
        let name = loaded
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| loaded.path.display().to_string());
        match loaded.result {
            Ok(bank) => {
                info!("Starting session on {}", name);
                let count = bank.len();
                self.session = Some(Session::new(Arc::new(bank), self.settings.text_size));
                self.highlights.clear();
                self.output.say(&Message::BankLoaded(name, count));
                self.show_question();
            }
            Err(e) => {
                self.session = None;
                self.output.say(&Message::LoadFailed(e.to_string()));
            }
        }
    }

    /// Returns false once the user asked to leave.
    pub fn handle_line(&mut self, line: &str) -> bool {
        self.poll();
        let result = commands::parse(line).and_then(|command| match command {
            Some(command) => self.handle(command),
            None => Ok(true),
        });
        match result {
            Ok(keep_going) => keep_going,
            Err(e) => {
                debug!("Command `{}` failed: {:#}", line.trim(), e);
                self.output.say(&Message::CommandFailed(format!("{:#}", e)));
                true
            }
        }
    }

    pub fn handle(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Session(action) => self.apply(action),
            Command::Highlight(target, phrase) => self.highlight(target, &phrase),
            Command::Sidebar => {
                if let Some(session) = &self.session {
                    self.output.say(&Message::Sidebar(view::render_sidebar(session)));
                } else {
                    self.say_no_session();
                }
            }
            Command::Score => {
                if let Some(session) = &self.session {
                    let (correct, answered) = session.score();
                    self.output
                        .say(&Message::Score(correct, answered, session.len()));
                } else {
                    self.say_no_session();
                }
            }
            Command::Banks => {
                let names = self
                    .list_banks()?
                    .iter()
                    .filter_map(|path| path.file_name())
                    .map(|name| name.to_string_lossy().into_owned())
                    .collect();
                self.output.say(&Message::BankList(names));
            }
            Command::Open(name) => {
                let path = self.resolve_bank(&name)?;
                self.open(path)?;
            }
            Command::Help => self.output.say(&Message::Help),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn apply(&mut self, action: Action) {
        let session = match self.session.take() {
            Some(session) => session,
            None => {
                self.say_no_session();
                return;
            }
        };

        if action == Action::Submit && session.selected().is_none() {
            self.output.say(&Message::NothingSelected);
        }

        let navigates = match action {
            Action::Next | Action::Prev | Action::Jump(_) => true,
            _ => false,
        };
        if navigates {
            self.highlights.clear();
        }

        self.session = Some(session.apply(action));
        self.show_question();
    }

    fn highlight(&mut self, target: Target, phrase: &str) {
        let session = match &self.session {
            Some(session) => session,
            None => {
                self.say_no_session();
                return;
            }
        };
        let question = session.current();
        let text = match target {
            Target::Question => question.body.as_str(),
            Target::Explanation if session.is_submitted() => question.explanation.as_str(),
            Target::Explanation => "",
        };
        if self.highlights.add(target, text, phrase) {
            self.show_question();
        } else {
            self.output
                .say(&Message::NothingToHighlight(phrase.to_owned()));
        }
    }

    fn say_no_session(&mut self) {
        if self.loader.is_loading() {
            self.output.say(&Message::StillLoading);
        } else {
            self.output.say(&Message::NoBankLoaded);
        }
    }

    fn show_question(&mut self) {
        if let Some(session) = &self.session {
            let lines = view::render_question(session, &self.highlights);
            self.output.say(&Message::Question(lines));
        }
    }
}
