use anyhow::{anyhow, Context, Result};

use crate::session::Action;
use crate::view::Target;


const ERROR_MISSING_LABEL: &str = "This command needs an answer choice, e.g. `select B`.";
const ERROR_MISSING_PHRASE: &str = "This command needs a phrase to highlight.";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Session(Action),
    Highlight(Target, String),
    Sidebar,
    Score,
    Banks,
    Open(String),
    Help,
    Quit,
}

fn required<'a>(args: &'a str, error: &'static str) -> Result<&'a str> {
    if args.is_empty() {
        Err(anyhow!(error))
    } else {
        Ok(args)
    }
}

pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (name, args) = match line.find(char::is_whitespace) {
        Some(split) => (&line[..split], line[split..].trim()),
        None => (line, ""),
    };

    let command = match name.to_lowercase().as_str() {
        "next" | "n" => Command::Session(Action::Next),
        "prev" | "p" => Command::Session(Action::Prev),
        "jump" | "j" => {
            let number: usize = args
                .parse()
                .with_context(|| format!("`{}` is not a question number", args))?;
            Command::Session(Action::Jump(number.saturating_sub(1)))
        }
        "select" | "s" => {
            Command::Session(Action::Select(required(args, ERROR_MISSING_LABEL)?.to_owned()))
        }
        "strike" | "x" => {
            Command::Session(Action::Strike(required(args, ERROR_MISSING_LABEL)?.to_owned()))
        }
        "submit" | "enter" => Command::Session(Action::Submit),
        "bigger" | "+" => Command::Session(Action::GrowText),
        "smaller" | "-" => Command::Session(Action::ShrinkText),
        "highlight" | "h" => Command::Highlight(
            Target::Question,
            required(args, ERROR_MISSING_PHRASE)?.to_owned(),
        ),
        "highlight-explanation" | "he" => Command::Highlight(
            Target::Explanation,
            required(args, ERROR_MISSING_PHRASE)?.to_owned(),
        ),
        "sidebar" => Command::Sidebar,
        "score" => Command::Score,
        "banks" => Command::Banks,
        "open" => Command::Open(required(args, "Which question bank should be opened?")?.to_owned()),
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(anyhow!("Unknown command `{}`, try `help`", other)),
    };
    Ok(Some(command))
}
