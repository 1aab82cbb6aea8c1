use super::*;
use std::path::PathBuf;

const HEADER: &str = "question,option1,option2,option3,option4,correct_option,explanation";

fn csv_bank(rows: &[&str]) -> String {
    let mut lines = vec![HEADER];
    lines.extend_from_slice(rows);
    lines.join("\n")
}

fn texts(question: &Question) -> Vec<&str> {
    question.choices.iter().map(|c| c.text.as_str()).collect()
}

#[test]
fn parses_csv_row() {
    let text = csv_bank(&["What is 2+2?,3,4,5,6,4,Because 2+2=4"]);
    let bank = Bank::parse(&text, Format::Csv).unwrap();
    assert_eq!(bank.len(), 1);

    let question = &bank.get_questions()[0];
    assert_eq!(question.body, "What is 2+2?");
    assert_eq!(texts(question), ["3", "4", "5", "6"]);
    assert_eq!(question.correct_answer, "4");
    assert_eq!(question.explanation, "Because 2+2=4");
    assert_eq!(question.correct_choice().unwrap().text, "4");
}

#[test]
fn csv_keeps_row_count_and_order() {
    let text = csv_bank(&[
        "first,a,b,c,d,1,x",
        "second,a,b,c,d,2,y",
        "",
        "third,a,b,c,d,3,z",
    ]);
    let bank = Bank::parse(&text, Format::Csv).unwrap();
    let bodies: Vec<&str> = bank.get_questions().iter().map(|q| q.body.as_str()).collect();
    assert_eq!(bodies, ["first", "second", "third"]);
    let ids: Vec<&str> = bank.get_questions().iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[test]
fn csv_positional_correct_option() {
    let text = csv_bank(&["Capital of France?,London,Paris,Rome,Berlin,2,It is Paris"]);
    let bank = Bank::parse(&text, Format::Csv).unwrap();
    assert_eq!(bank.get_questions()[0].correct_label.as_deref(), Some("B"));
}

#[test]
fn csv_positional_correct_option_counts_empty_cells() {
    let text = csv_bank(&["Pick c,a,,c,d,3,x"]);
    let bank = Bank::parse(&text, Format::Csv).unwrap();
    let question = &bank.get_questions()[0];
    assert_eq!(texts(question), ["a", "c", "d"]);
    assert_eq!(question.correct_choice().map(|c| c.text.as_str()), Some("c"));
}

#[test]
fn csv_short_row_is_filled_with_empty_fields() {
    let text = csv_bank(&["Lonely question,yes,no"]);
    let bank = Bank::parse(&text, Format::Csv).unwrap();
    let question = &bank.get_questions()[0];
    assert_eq!(texts(question), ["yes", "no"]);
    assert_eq!(question.correct_answer, "");
    assert_eq!(question.correct_label, None);
    assert_eq!(question.explanation, "");
}

#[test]
fn csv_quotes_are_not_special() {
    let text = csv_bank(&["\"Hello, world\",a,b,c,d,1,x"]);
    let bank = Bank::parse(&text, Format::Csv).unwrap();
    let question = &bank.get_questions()[0];
    assert_eq!(question.body, "\"Hello");
    assert_eq!(texts(question), ["world\"", "a", "b", "c"]);
}

#[test]
fn csv_optional_columns() {
    let text = "id,question,option1,option2,correct_option,explanation,imageUrl,references,category\n\
                q7,Which eye?,Left,Right,Right,Because,http://img/eye.png,Ref A | Ref B,Ophthalmology";
    let bank = Bank::parse(text, Format::Csv).unwrap();
    let question = &bank.get_questions()[0];
    assert_eq!(question.id, "q7");
    assert_eq!(question.image_url.as_deref(), Some("http://img/eye.png"));
    assert_eq!(question.references, ["Ref A", "Ref B"]);
    assert_eq!(question.category.as_deref(), Some("Ophthalmology"));
    assert_eq!(question.correct_label.as_deref(), Some("B"));
}

#[test]
fn csv_header_only_is_empty() {
    assert!(matches!(
        Bank::parse(HEADER, Format::Csv),
        Err(LoadError::Empty)
    ));
}

#[test]
fn csv_without_question_column_is_malformed() {
    assert!(matches!(
        Bank::parse("foo,bar\n1,2", Format::Csv),
        Err(LoadError::Malformed(_))
    ));
}

#[test]
fn blank_document_is_empty() {
    assert!(matches!(Bank::parse("  \n ", Format::Csv), Err(LoadError::Empty)));
    assert!(matches!(Bank::parse("", Format::Json), Err(LoadError::Empty)));
    assert!(matches!(Bank::parse("{}", Format::Json), Err(LoadError::Empty)));
}

#[test]
fn parses_json_bank_fields() {
    let text = r#"{
        "2": {
            "question": "Second?",
            "choices": [{"label": "A", "text": "yes"}, {"label": "B", "text": "no"}],
            "correct_answer": "no",
            "explanation": "Because no"
        },
        "1": {
            "question": "First?",
            "choices": [{"label": "A", "text": "yes"}, {"label": "B", "text": "no"}],
            "correct_answer": "yes",
            "explanation": "Because yes",
            "references": ["Some textbook"],
            "image": "http://img/1.png",
            "abim_content_category": "Cardiology"
        }
    }"#;
    let bank = Bank::parse(text, Format::Json).unwrap();
    let first = &bank.get_questions()[0];
    assert_eq!(first.id, "1");
    assert_eq!(first.correct_label.as_deref(), Some("A"));

    let second = &bank.get_questions()[1];
    assert_eq!(second.correct_label.as_deref(), Some("B"));
    assert_eq!(first.references, ["Some textbook"]);
    assert_eq!(first.image_url.as_deref(), Some("http://img/1.png"));
    assert_eq!(first.category.as_deref(), Some("Cardiology"));
}

#[test]
fn json_index_keys_come_first_in_numeric_order() {
    let entry = r#"{"question": "q", "choices": [{"text": "x"}], "correct_answer": "x"}"#;
    let keys = ["b", "10", "07", "2", "a", "0"];
    let text = format!(
        "{{{}}}",
        keys.iter()
            .map(|key| format!("\"{}\": {}", key, entry))
            .collect::<Vec<_>>()
            .join(",")
    );
    let bank = Bank::parse(&text, Format::Json).unwrap();
    let ids: Vec<&str> = bank.get_questions().iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["0", "2", "10", "b", "07", "a"]);
}

#[test]
fn json_keys_become_ids() {
    let text = r#"{
        "1": {"question": "a", "choices": [{"text": "x"}], "correct_answer": "x"},
        "2": {"question": "b", "choices": [{"text": "y"}], "correct_answer": 1}
    }"#;
    let bank = Bank::parse(text, Format::Json).unwrap();
    assert_eq!(bank.len(), 2);
    assert_eq!(bank.get_questions()[0].id, "1");
    assert_eq!(bank.get_questions()[1].id, "2");
    assert_eq!(bank.get_questions()[1].choices[0].label, "A");
    assert_eq!(bank.get_questions()[1].correct_label.as_deref(), Some("A"));
}

#[test]
fn json_array_is_malformed() {
    assert!(matches!(
        Bank::parse("[1, 2]", Format::Json),
        Err(LoadError::Malformed(_))
    ));
}

#[test]
fn json_entry_without_choices_is_malformed() {
    let text = r#"{"1": {"question": "a", "correct_answer": "x"}}"#;
    match Bank::parse(text, Format::Json) {
        Err(LoadError::Malformed(message)) => assert!(message.contains("question 1")),
        other => panic!("unexpected result: {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn format_from_extension() {
    assert_eq!(Format::from_path(&PathBuf::from("bank.csv")).unwrap(), Format::Csv);
    assert_eq!(Format::from_path(&PathBuf::from("bank.JSON")).unwrap(), Format::Json);
    assert!(matches!(
        Format::from_path(&PathBuf::from("bank.xml")),
        Err(LoadError::UnsupportedFormat(ext)) if ext == "xml"
    ));
    assert!(matches!(
        Format::from_path(&PathBuf::from("bank")),
        Err(LoadError::UnsupportedFormat(_))
    ));
}

#[test]
fn open_rejects_unsupported_format_before_reading() {
    let missing = PathBuf::from("does/not/exist.txt");
    assert!(matches!(
        Bank::open(&missing),
        Err(LoadError::UnsupportedFormat(_))
    ));
}
