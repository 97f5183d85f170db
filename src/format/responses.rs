//! Response flattening
//!
//! Turns the nested question/answer list of a proposal or reply into either
//! a normalized entry list (JSON output) or per-question columns (CSV
//! output).

use super::clean_new_line;
use crate::config::SEPARATOR;
use crate::graphql::ResponseNode;
use crate::types::{FormattedRecord, JsonValue, OptionStringExt};
use serde_json::json;

/// Question type marking a section header rather than an answer
const SECTION_QUESTION: &str = "SectionQuestion";

/// Question type whose answer is a list of media attachments
const MEDIA_QUESTION: &str = "MediaQuestion";

/// One answered question, normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntry {
    pub question_id: String,
    pub question_title: Option<String>,
    pub value: Option<String>,
    pub formatted_value: Option<String>,
}

impl ResponseEntry {
    /// The JSON representation used for the `responses` sub-list field
    pub fn to_json(&self) -> JsonValue {
        json!({
            "questionId": self.question_id,
            "questionTitle": self.question_title,
            "value": self.value,
            "formattedValue": self.formatted_value,
        })
    }
}

/// Flatten a response list, dropping sections and joining media URLs
pub fn flatten_responses(responses: &[ResponseNode]) -> Vec<ResponseEntry> {
    responses
        .iter()
        .filter(|response| response.question.typename != SECTION_QUESTION)
        .map(|response| ResponseEntry {
            question_id: response.question.id.clone(),
            question_title: response.question.title.as_deref().map(clean_new_line),
            value: if response.question.typename == MEDIA_QUESTION {
                Some(
                    response
                        .medias
                        .iter()
                        .map(|media| media.url.as_str())
                        .collect::<Vec<_>>()
                        .join(&format!(" {SEPARATOR} ")),
                )
            } else {
                response.value.as_deref().map(clean_new_line)
            },
            formatted_value: response.formatted_value.as_deref().map(clean_new_line),
        })
        .collect()
}

/// Derive the CSV row from a formatted record
///
/// The `responses` sub-list is removed and each entry becomes its own
/// `"Q<questionId> - <questionTitle>"` column, so CSV rows are
/// self-describing.
pub fn csv_row(record: &FormattedRecord) -> FormattedRecord {
    let mut row = record.clone();
    let Some(JsonValue::Array(entries)) = row.remove("responses") else {
        return row;
    };
    for entry in entries {
        let question_id = entry["questionId"].as_str().unwrap_or_default();
        let question_title = entry["questionTitle"].as_str().unwrap_or_default();
        let column = format!("Q{question_id} - {question_title}");
        row.insert(column, expand_answer(entry["value"].as_str()));
    }
    row
}

/// Expand one raw answer into its CSV column value
///
/// A raw value that parses as JSON and is not a bare number, bool or null is
/// treated as a structured multi-choice answer with optional `labels` and
/// `other` fields. Anything else passes through as a plain scalar. The
/// heuristic can misclassify free text that happens to look like JSON; that
/// ambiguity is inherited upstream behavior and kept as-is.
fn expand_answer(raw: Option<&str>) -> JsonValue {
    let Some(raw) = raw else {
        return JsonValue::Null;
    };
    let parsed: JsonValue = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return JsonValue::from(raw),
    };
    match parsed {
        JsonValue::Number(_) | JsonValue::Bool(_) | JsonValue::Null => JsonValue::from(raw),
        parsed => {
            let labels = parsed
                .get("labels")
                .and_then(JsonValue::as_array)
                .map(|labels| {
                    labels
                        .iter()
                        .filter_map(JsonValue::as_str)
                        .collect::<Vec<_>>()
                        .join(SEPARATOR)
                })
                .none_if_empty();
            let other = parsed.get("other").and_then(JsonValue::as_str);
            match (labels, other) {
                (Some(labels), Some(other)) => {
                    JsonValue::from(format!("{labels}{SEPARATOR}{other}"))
                }
                (Some(labels), None) => JsonValue::from(labels),
                (None, Some(other)) => JsonValue::from(other),
                (None, None) => JsonValue::Null,
            }
        }
    }
}
