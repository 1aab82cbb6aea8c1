use itertools::Itertools;
use std::ops::Range;

use crate::session::{Outcome, Phase, Session};


const HIGHLIGHT_OPEN: &str = "[[";
const HIGHLIGHT_CLOSE: &str = "]]";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    Question,
    Explanation,
}

/// Highlighted spans of the current question's body and explanation, as byte
/// ranges into the original text. Kept sorted and non-overlapping.
#[derive(Clone, Debug, Default)]
pub struct Highlights {
    question: Vec<Range<usize>>,
    explanation: Vec<Range<usize>>,
}

impl Highlights {
    pub fn clear(&mut self) {
        self.question.clear();
        self.explanation.clear();
    }

    pub fn get(&self, target: Target) -> &[Range<usize>] {
        match target {
            Target::Question => &self.question,
            Target::Explanation => &self.explanation,
        }
    }

    /// Highlights the first occurrence of `phrase` in `text` that does not
    /// overlap an existing highlight.
    pub fn add(&mut self, target: Target, text: &str, phrase: &str) -> bool {
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return false;
        }
        let ranges = match target {
            Target::Question => &mut self.question,
            Target::Explanation => &mut self.explanation,
        };
        let free = text
            .match_indices(phrase)
            .map(|(start, matched)| start..start + matched.len())
            .find(|candidate| {
                !ranges
                    .iter()
                    .any(|r| r.start < candidate.end && candidate.start < r.end)
            });
        match free {
            Some(range) => {
                ranges.push(range);
                ranges.sort_by_key(|r| r.start);
                true
            }
            None => false,
        }
    }
}

pub fn render_highlighted(text: &str, ranges: &[Range<usize>]) -> String {
    let mut rendered = String::with_capacity(text.len());
    let mut last = 0;
    for range in ranges {
        rendered.push_str(&text[last..range.start]);
        rendered.push_str(HIGHLIGHT_OPEN);
        rendered.push_str(&text[range.clone()]);
        rendered.push_str(HIGHLIGHT_CLOSE);
        last = range.end;
    }
    rendered.push_str(&text[last..]);
    rendered
}

fn outcome_glyph(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Correct => "+",
        Outcome::Incorrect => "x",
        Outcome::Unanswered => "",
    }
}

pub fn render_sidebar(session: &Session) -> String {
    session
        .outcomes()
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| {
            let entry = format!("{}{}", index + 1, outcome_glyph(outcome));
            if index == session.index() {
                format!("[{}]", entry)
            } else {
                entry
            }
        })
        .join(" ")
}

pub fn render_question(session: &Session, highlights: &Highlights) -> Vec<String> {
    let question = session.current();
    let submitted = session.phase() == Phase::Submitted;
    let mut lines = vec![
        format!(
            "Item {} of {}    (text size {}pt)",
            session.index() + 1,
            session.len(),
            session.text_size().points()
        ),
        format!("Question Id: {}", question.id),
    ];
    if let Some(category) = &question.category {
        lines.push(format!("Category: {}", category));
    }
    lines.push(String::new());
    lines.push(render_highlighted(
        &question.body,
        highlights.get(Target::Question),
    ));
    if let Some(image_url) = &question.image_url {
        lines.push(format!("Image: {}", image_url));
    }
    lines.push(String::new());

    for choice in &question.choices {
        let marker = if session.selected() == Some(choice.label.as_str()) {
            "(*)"
        } else {
            "( )"
        };
        let text = if session.is_struck(&choice.label) {
            format!("~~{}~~", choice.text)
        } else {
            choice.text.clone()
        };
        let verdict = if submitted && question.is_choice_correct(&choice.label) {
            "  <- correct"
        } else {
            ""
        };
        lines.push(format!("{} {}. {}{}", marker, choice.label, text, verdict));
    }

    if submitted {
        let is_correct = session
            .selected()
            .map(|label| question.is_choice_correct(label))
            .unwrap_or(false);
        lines.push(String::new());
        lines.push(if is_correct { "Correct!" } else { "Incorrect." }.to_owned());
        let correct_answer = match question.correct_choice() {
            Some(choice) => format!("{}. {}", choice.label, choice.text),
            None => question.correct_answer.clone(),
        };
        lines.push(format!("Correct Answer: {}", correct_answer));
        lines.push("Explanation:".to_owned());
        lines.push(render_highlighted(
            &question.explanation,
            highlights.get(Target::Explanation),
        ));
        if !question.references.is_empty() {
            lines.push("References:".to_owned());
            lines.extend(question.references.iter().map(|r| format!("  - {}", r)));
        }
    }

    lines
}
