use log::info;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

mod csv;
mod json;
pub mod question;

pub use question::Question;

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported question bank format `{0}` (expected csv or json)")]
    UnsupportedFormat(String),
    #[error("question bank contains no questions")]
    Empty,
    #[error("malformed question bank: {0}")]
    Malformed(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Format, LoadError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            _ => Err(LoadError::UnsupportedFormat(extension)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Csv => write!(f, "CSV"),
            Format::Json => write!(f, "JSON"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Bank {
    questions: Vec<Question>,
}

impl Bank {
    pub fn open(source: &Path) -> Result<Bank, LoadError> {
        let format = Format::from_path(source)?;
        let text = fs::read_to_string(source)?;
        let bank = Bank::parse(&text, format)?;
        info!(
            "Loaded {} questions from {} bank {}",
            bank.len(),
            format,
            source.display()
        );
        Ok(bank)
    }

    pub fn parse(text: &str, format: Format) -> Result<Bank, LoadError> {
        if text.trim().is_empty() {
            return Err(LoadError::Empty);
        }

        let raw_questions = match format {
            Format::Csv => csv::read_questions(text)?,
            Format::Json => json::read_questions(text)?,
        };
        if raw_questions.is_empty() {
            return Err(LoadError::Empty);
        }

        let questions = raw_questions.into_iter().map(Question::from).collect();
        Ok(Bank { questions })
    }

    pub fn get_questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
