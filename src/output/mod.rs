use std::path::PathBuf;

pub mod terminal;
#[cfg(test)]
pub mod mock;

pub use self::terminal::TerminalOutput;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    BankList(Vec<String>),
    BankLoaded(String, usize),
    CommandFailed(String),
    Help,
    LoadFailed(String),
    Loading(PathBuf),
    NoBankLoaded,
    NothingSelected,
    NothingToHighlight(String),
    Question(Vec<String>),
    Score(usize, usize, usize),
    Sidebar(String),
    StillLoading,
}

pub trait Output {
    fn say(&mut self, message: &Message);
}
