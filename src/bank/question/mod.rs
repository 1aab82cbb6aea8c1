use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use unidecode::unidecode;


lazy_static! {
    static ref FORBIDDEN_ANSWER_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9]").unwrap();
}

fn sanitize(answer: &str) -> String {
    let answer = unidecode(answer);
    FORBIDDEN_ANSWER_CHARACTERS_REGEX
        .replace_all(&answer.to_lowercase(), "")
        .into()
}

/// Label for the choice at `position` (0-based): A, B, ..., Z, AA, AB, ...
pub fn label_for_position(position: usize) -> String {
    let mut label = Vec::new();
    let mut n = position + 1;
    while n > 0 {
        let remainder = (n - 1) % 26;
        label.push(b'A' + remainder as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Choice {
    pub label: String,
    pub text: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question {
    pub id: String,
    pub body: String,
    pub choices: Vec<Choice>,
    pub correct_answer: String,
    pub correct_label: Option<String>,
    pub explanation: String,
    pub references: Vec<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// Source-agnostic fields gathered by the CSV and JSON readers before the
/// correct answer is resolved against the choices.
#[derive(Clone, Debug, Default)]
pub struct RawQuestion {
    pub id: String,
    pub body: String,
    pub choices: Vec<Choice>,
    /// 1-based source position of each choice. Empty means choices sit at
    /// their own index.
    pub positions: Vec<usize>,
    pub correct_answer: String,
    pub explanation: String,
    pub references: Vec<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

impl Question {
    pub fn choice(&self, label: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.label == label)
    }

    /// Case-insensitive lookup returning the canonical label.
    pub fn find_label(&self, label: &str) -> Option<&str> {
        let label = label.trim();
        self.choices
            .iter()
            .find(|c| c.label.eq_ignore_ascii_case(label))
            .map(|c| c.label.as_str())
    }

    pub fn correct_choice(&self) -> Option<&Choice> {
        self.correct_label
            .as_ref()
            .and_then(|label| self.choice(label))
    }

    pub fn is_choice_correct(&self, label: &str) -> bool {
        self.correct_label.as_deref() == Some(label)
    }
}

fn resolve_correct_label(raw_question: &RawQuestion) -> Option<String> {
    let choices = &raw_question.choices;
    let answer = raw_question.correct_answer.trim();
    if answer.is_empty() {
        return None;
    }

    let sanitized = sanitize(answer);
    if !sanitized.is_empty() {
        if let Some(choice) = choices.iter().find(|c| sanitize(&c.text) == sanitized) {
            return Some(choice.label.clone());
        }
    }

    if let Some(choice) = choices.iter().find(|c| c.label.eq_ignore_ascii_case(answer)) {
        return Some(choice.label.clone());
    }

    let position = answer.parse::<usize>().ok()?;
    choices
        .iter()
        .enumerate()
        .find(|(index, _choice)| {
            raw_question
                .positions
                .get(*index)
                .copied()
                .unwrap_or(index + 1)
                == position
        })
        .map(|(_index, choice)| choice.label.clone())
}

impl From<RawQuestion> for Question {
    fn from(raw_question: RawQuestion) -> Self {
        let correct_label = resolve_correct_label(&raw_question);
        if correct_label.is_none() {
            warn!(
                "Question {} has no choice matching correct answer `{}`",
                raw_question.id, raw_question.correct_answer
            );
        }

        Question {
            id: raw_question.id,
            body: raw_question.body,
            choices: raw_question.choices,
            correct_answer: raw_question.correct_answer,
            correct_label,
            explanation: raw_question.explanation,
            references: raw_question.references,
            image_url: raw_question.image_url.filter(|url| !url.trim().is_empty()),
            category: raw_question.category.filter(|c| !c.trim().is_empty()),
        }
    }
}
