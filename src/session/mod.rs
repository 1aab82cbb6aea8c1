use log::debug;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::bank::{Bank, Question};

mod text_size;

pub use self::text_size::TextSize;


#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Browsing,
    Submitted,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Select(String),
    Strike(String),
    Submit,
    Next,
    Prev,
    Jump(usize),
    GrowText,
    ShrinkText,
}

/// State of one pass through a bank. Every transition consumes the session
/// and returns its successor; requests that make no sense in the current
/// state return the session unchanged.
#[derive(Clone, Debug)]
pub struct Session {
    bank: Arc<Bank>,
    index: usize,
    phase: Phase,
    selected: Option<String>,
    struck: BTreeSet<String>,
    outcomes: HashMap<String, Outcome>,
    text_size: TextSize,
}

impl Session {
    /// The bank must hold at least one question, which `Bank::parse` guarantees.
    pub fn new(bank: Arc<Bank>, text_size: TextSize) -> Self {
        debug_assert!(!bank.is_empty());
        Session {
            bank,
            index: 0,
            phase: Phase::Browsing,
            selected: None,
            struck: BTreeSet::new(),
            outcomes: HashMap::new(),
            text_size,
        }
    }

    pub fn apply(self, action: Action) -> Self {
        debug!("Applying {:?} on question {}", action, self.index + 1);
        match action {
            Action::Select(label) => self.select(&label),
            Action::Strike(label) => self.strike(&label),
            Action::Submit => self.submit(),
            Action::Next => self.next(),
            Action::Prev => self.prev(),
            Action::Jump(index) => self.jump(index),
            Action::GrowText => self.grow_text(),
            Action::ShrinkText => self.shrink_text(),
        }
    }

    pub fn select(mut self, label: &str) -> Self {
        if self.phase != Phase::Browsing {
            return self;
        }
        let label = match self.current().find_label(label).map(str::to_owned) {
            Some(label) => label,
            None => return self,
        };
        self.struck.remove(&label);
        self.selected = Some(label);
        self
    }

    pub fn strike(mut self, label: &str) -> Self {
        let label = match self.current().find_label(label).map(str::to_owned) {
            Some(label) => label,
            None => return self,
        };
        if self.selected.as_ref() == Some(&label) {
            return self;
        }
        if !self.struck.remove(&label) {
            self.struck.insert(label);
        }
        self
    }

    pub fn submit(mut self) -> Self {
        if self.phase != Phase::Browsing {
            return self;
        }
        let is_correct = self
            .selected
            .as_deref()
            .map(|label| self.current().is_choice_correct(label));
        let outcome = match is_correct {
            Some(true) => Outcome::Correct,
            Some(false) => Outcome::Incorrect,
            None => return self,
        };
        let id = self.current().id.clone();
        self.outcomes.insert(id, outcome);
        self.phase = Phase::Submitted;
        self
    }

    pub fn next(self) -> Self {
        let target = self.index.saturating_add(1);
        self.jump(target)
    }

    pub fn prev(self) -> Self {
        let target = self.index.saturating_sub(1);
        self.jump(target)
    }

    pub fn jump(mut self, index: usize) -> Self {
        self.index = index.min(self.len() - 1);
        self.phase = Phase::Browsing;
        self.selected = None;
        self.struck.clear();
        self
    }

    pub fn grow_text(mut self) -> Self {
        self.text_size = self.text_size.grow();
        self
    }

    pub fn shrink_text(mut self) -> Self {
        self.text_size = self.text_size.shrink();
        self
    }

    pub fn current(&self) -> &Question {
        &self.bank.get_questions()[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.bank.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == Phase::Submitted
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_struck(&self, label: &str) -> bool {
        self.struck.contains(label)
    }

    pub fn text_size(&self) -> TextSize {
        self.text_size
    }

    pub fn outcome(&self, index: usize) -> Outcome {
        self.bank
            .get(index)
            .and_then(|q| self.outcomes.get(&q.id))
            .copied()
            .unwrap_or(Outcome::Unanswered)
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        (0..self.len()).map(|i| self.outcome(i)).collect()
    }

    /// Correct answers and answered questions so far.
    pub fn score(&self) -> (usize, usize) {
        let outcomes = self.outcomes();
        let correct = outcomes.iter().filter(|o| **o == Outcome::Correct).count();
        let answered = outcomes
            .iter()
            .filter(|o| **o != Outcome::Unanswered)
            .count();
        (correct, answered)
    }
}
