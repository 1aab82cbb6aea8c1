use log::error;
use std::io::{self, Write};

use crate::output::{Message, Output};

const HELP: &str = "\
Commands:
  next | n                  go to the next question
  prev | p                  go to the previous question
  jump <n> | j <n>          go to question n
  select <label> | s        select an answer choice
  strike <label> | x        strike out (or restore) an answer choice
  submit | enter            submit the selected answer
  bigger | +                increase text size
  smaller | -               decrease text size
  highlight <phrase> | h    highlight a phrase in the question
  highlight-explanation <phrase> | he
                            highlight a phrase in the explanation
  sidebar                   show every question and its outcome
  score                     show correct and answered counts
  banks                     list available question banks
  open <bank>               open another question bank
  help | ?                  show this help
  quit | q                  leave";

pub fn format_message(message: &Message) -> String {
    match message {
        Message::BankList(names) if names.is_empty() => "No question banks found.".to_owned(),
        Message::BankList(names) => format!("Question banks:\n  {}", names.join("\n  ")),
        Message::BankLoaded(name, count) => format!("Loaded {} ({} questions).", name, count),
        Message::CommandFailed(reason) => format!("Error: {}", reason),
        Message::Help => HELP.to_owned(),
        Message::LoadFailed(reason) => format!("Could not load question bank: {}", reason),
        Message::Loading(path) => format!("Loading {}...", path.display()),
        Message::NoBankLoaded => "No question bank loaded yet.".to_owned(),
        Message::NothingSelected => "Select an answer before submitting.".to_owned(),
        Message::NothingToHighlight(phrase) => format!("Could not find `{}` to highlight.", phrase),
        Message::Question(lines) => lines.join("\n"),
        Message::Score(correct, answered, total) => format!(
            "Score: {} correct out of {} answered ({} questions)",
            correct, answered, total
        ),
        Message::Sidebar(sidebar) => sidebar.clone(),
        Message::StillLoading => "Question bank is still loading, try again shortly.".to_owned(),
    }
}

#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        TerminalOutput
    }
}

impl Output for TerminalOutput {
    fn say(&mut self, message: &Message) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = writeln!(handle, "{}\n", format_message(message)) {
            error!("Could not write to terminal: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn help_lists_aliases() {
        let help = format_message(&Message::Help);
        for alias in &["submit | enter", "| h ", "| he", "score", "help | ?"] {
            assert!(help.contains(alias), "help text is missing `{}`", alias);
        }
    }

    #[test]
    fn formats_score() {
        assert_eq!(
            format_message(&Message::Score(2, 3, 10)),
            "Score: 2 correct out of 3 answered (10 questions)"
        );
    }

    #[test]
    fn formats_bank_list() {
        assert_eq!(
            format_message(&Message::BankList(vec!["a.csv".into(), "b.json".into()])),
            "Question banks:\n  a.csv\n  b.json"
        );
        assert_eq!(
            format_message(&Message::BankList(vec![])),
            "No question banks found."
        );
    }

    #[test]
    fn formats_loading() {
        assert_eq!(
            format_message(&Message::Loading(PathBuf::from("banks/eyes.csv"))),
            "Loading banks/eyes.csv..."
        );
    }
}
