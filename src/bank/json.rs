use serde::de;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::question::{label_for_position, Choice, RawQuestion};
use super::LoadError;

fn string_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(&other.to_string()),
            &"a string or a number",
        )),
    }
}

#[derive(Deserialize)]
struct JsonChoice {
    #[serde(default)]
    label: Option<String>,
    #[serde(deserialize_with = "string_from_scalar")]
    text: String,
}

#[derive(Deserialize)]
struct JsonQuestion {
    question: String,
    choices: Vec<JsonChoice>,
    #[serde(deserialize_with = "string_from_scalar")]
    correct_answer: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    references: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    abim_content_category: Option<String>,
}

impl JsonQuestion {
    fn into_raw(self, id: String) -> RawQuestion {
        let choices = self
            .choices
            .into_iter()
            .enumerate()
            .map(|(position, choice)| Choice {
                label: choice
                    .label
                    .map(|l| l.trim().to_owned())
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| label_for_position(position)),
                text: choice.text,
            })
            .collect();

        RawQuestion {
            id,
            body: self.question,
            choices,
            positions: Vec::new(),
            correct_answer: self.correct_answer,
            explanation: self.explanation,
            references: self.references,
            image_url: self.image,
            category: self.abim_content_category,
        }
    }
}

/// Keys that are canonical array indices ("0", "7", "42", but not "07")
/// iterate first in numeric order, as object keys do in JavaScript.
fn array_index(key: &str) -> Option<u32> {
    key.parse::<u32>()
        .ok()
        .filter(|index| *index != u32::MAX && index.to_string() == key)
}

/// Array-index keys come first in ascending order, every other key follows
/// in document order.
pub fn read_questions(text: &str) -> Result<Vec<RawQuestion>, LoadError> {
    let entries: Map<String, Value> = serde_json::from_str(text)
        .map_err(|e| LoadError::Malformed(format!("expected an object of questions: {}", e)))?;

    let mut entries: Vec<(String, Value)> = entries.into_iter().collect();
    entries.sort_by_key(|(id, _value)| match array_index(id) {
        Some(index) => (0, index),
        None => (1, 0),
    });

    entries
        .into_iter()
        .map(|(id, value)| {
            let question: JsonQuestion = serde_json::from_value(value)
                .map_err(|e| LoadError::Malformed(format!("question {}: {}", id, e)))?;
            Ok(question.into_raw(id))
        })
        .collect()
}
