use ::csv::{ReaderBuilder, StringRecord, Trim};
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use super::question::{label_for_position, Choice, RawQuestion};
use super::LoadError;

lazy_static! {
    static ref OPTION_HEADER_REGEX: Regex = Regex::new("^(?i)option([0-9]+)$").unwrap();
}

struct Columns {
    id: Option<usize>,
    question: usize,
    /// Option number and column index, ordered by option number.
    options: Vec<(usize, usize)>,
    correct_option: Option<usize>,
    explanation: Option<usize>,
    image_url: Option<usize>,
    references: Option<usize>,
    category: Option<usize>,
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Columns, LoadError> {
        let question = find_column(headers, &["question"])
            .ok_or_else(|| LoadError::Malformed("CSV header has no `question` column".into()))?;

        let mut options: Vec<(usize, usize)> = headers
            .iter()
            .enumerate()
            .filter_map(|(column, header)| {
                OPTION_HEADER_REGEX
                    .captures(header)
                    .and_then(|captures| captures[1].parse::<usize>().ok())
                    .map(|number| (number, column))
            })
            .collect();
        options.sort_by_key(|(number, _column)| *number);

        Ok(Columns {
            id: find_column(headers, &["id"]),
            question,
            options,
            correct_option: find_column(headers, &["correct_option", "correct_answer"]),
            explanation: find_column(headers, &["explanation"]),
            image_url: find_column(headers, &["imageUrl", "image"]),
            references: find_column(headers, &["references"]),
            category: find_column(headers, &["category", "abim_content_category"]),
        })
    }
}

fn field(record: &StringRecord, column: Option<usize>) -> String {
    column
        .and_then(|c| record.get(c))
        .unwrap_or("")
        .to_owned()
}

fn optional_field(record: &StringRecord, column: Option<usize>) -> Option<String> {
    Some(field(record, column)).filter(|value| !value.is_empty())
}

/// Rows are split on newlines then commas. Quoted fields are not supported:
/// a quote is an ordinary character and a comma always ends a field.
pub fn read_questions(text: &str) -> Result<Vec<RawQuestion>, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = csv_reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut questions: Vec<RawQuestion> = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| LoadError::Malformed(e.to_string()))?;
        if record.iter().all(|value| value.is_empty()) {
            continue;
        }

        let row_number = questions.len() + 1;
        if record.len() < headers.len() {
            warn!(
                "CSV row {} has {} fields, expected {}; missing fields left empty",
                row_number,
                record.len(),
                headers.len()
            );
        }

        let (positions, choices): (Vec<usize>, Vec<Choice>) = columns
            .options
            .iter()
            .map(|(number, column)| (*number, field(&record, Some(*column))))
            .filter(|(_number, text)| !text.is_empty())
            .enumerate()
            .map(|(index, (number, text))| {
                let choice = Choice {
                    label: label_for_position(index),
                    text,
                };
                (number, choice)
            })
            .unzip();

        let references = field(&record, columns.references)
            .split('|')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_owned)
            .collect();

        questions.push(RawQuestion {
            id: optional_field(&record, columns.id).unwrap_or_else(|| row_number.to_string()),
            body: field(&record, Some(columns.question)),
            choices,
            positions,
            correct_answer: field(&record, columns.correct_option),
            explanation: field(&record, columns.explanation),
            references,
            image_url: optional_field(&record, columns.image_url),
            category: optional_field(&record, columns.category),
        });
    }

    Ok(questions)
}
