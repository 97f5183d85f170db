//! Tests for record formatting and response flattening

use super::*;
use crate::graphql::{ProposalNode, ReplyNode, ResponseNode, UserNode};
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_author() -> serde_json::Value {
    json!({
        "id": "author-1",
        "username": "jdoe",
        "email": "jdoe@example.org",
        "userType": { "name": "Citizen" },
        "responses": {
            "edges": [
                { "node": { "value": "75011", "formattedValue": "75011" } },
                { "node": { "value": "ignored", "formattedValue": "ignored" } }
            ]
        }
    })
}

fn sample_proposal() -> ProposalNode {
    serde_json::from_value(json!({
        "id": "proposal-1",
        "reference": "1-42",
        "title": "More\r\nbike lanes",
        "createdAt": "2019-01-22T10:00:00Z",
        "publishedAt": "2019-01-22T11:00:00Z",
        "updatedAt": "2019-01-23T09:30:00Z",
        "trashed": false,
        "trashedStatus": null,
        "author": sample_author(),
        "responses": [
            {
                "question": { "id": "10", "title": "Section header", "__typename": "SectionQuestion" }
            },
            {
                "question": { "id": "11", "title": "Your\nopinion", "__typename": "TextQuestion" },
                "value": "Lines\r\nof text",
                "formattedValue": "Lines of text"
            }
        ]
    }))
    .unwrap()
}

fn sample_user() -> UserNode {
    serde_json::from_value(json!({
        "id": "user-1",
        "email": "user@example.org",
        "username": "multi\nline name",
        "userType": { "name": "Association" },
        "consentInternalCommunication": true,
        "createdAt": "2019-01-10T08:00:00Z",
        "updatedAt": "2019-02-01T08:00:00Z",
        "deletedAccountAt": null,
        "enabled": true,
        "biography": "Line one\r\nline two",
        "url": "https://example.org/profile/user-1",
        "avatarUrl": null,
        "websiteUrl": null,
        "linkedInUrl": null,
        "twitterUrl": null,
        "facebookUrl": null,
        "responses": {
            "edges": [ { "node": { "value": "44000", "formattedValue": "44000" } } ]
        }
    }))
    .unwrap()
}

// ============================================================================
// Newline normalization
// ============================================================================

#[test]
fn test_clean_new_line_collapses_all_break_kinds() {
    assert_eq!(clean_new_line("a\r\nb\rc\nd"), "a b c d");
}

#[test]
fn test_clean_new_line_is_idempotent() {
    let once = clean_new_line("first\r\nsecond");
    assert_eq!(clean_new_line(&once), once);
    assert_eq!(clean_new_line("no breaks"), "no breaks");
}

// ============================================================================
// Response flattening
// ============================================================================

#[test]
fn test_flatten_drops_sections() {
    let responses: Vec<ResponseNode> = serde_json::from_value(json!([
        { "question": { "id": "1", "title": "Part A", "__typename": "SectionQuestion" } },
        {
            "question": { "id": "2", "title": "Why?", "__typename": "TextQuestion" },
            "value": "because",
            "formattedValue": "because"
        }
    ]))
    .unwrap();

    let flat = flatten_responses(&responses);
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].question_id, "2");
    assert_eq!(flat[0].value.as_deref(), Some("because"));
}

#[test]
fn test_flatten_joins_media_urls() {
    let responses: Vec<ResponseNode> = serde_json::from_value(json!([
        {
            "question": { "id": "3", "title": "Attachments", "__typename": "MediaQuestion" },
            "medias": [ { "url": "http://a" }, { "url": "http://b" } ]
        }
    ]))
    .unwrap();

    let flat = flatten_responses(&responses);
    assert_eq!(flat[0].value.as_deref(), Some("http://a | http://b"));
}

#[test]
fn test_flatten_normalizes_question_titles_and_values() {
    let responses: Vec<ResponseNode> = serde_json::from_value(json!([
        {
            "question": { "id": "4", "title": "Two\r\nlines", "__typename": "TextQuestion" },
            "value": "an\nanswer",
            "formattedValue": "an\ranswer"
        }
    ]))
    .unwrap();

    let flat = flatten_responses(&responses);
    assert_eq!(flat[0].question_title.as_deref(), Some("Two lines"));
    assert_eq!(flat[0].value.as_deref(), Some("an answer"));
    assert_eq!(flat[0].formatted_value.as_deref(), Some("an answer"));
}

// ============================================================================
// CSV expansion
// ============================================================================

fn row_with_response(value: serde_json::Value) -> FormattedRecord {
    let mut record = FormattedRecord::new();
    record.insert("id".into(), json!("r1"));
    record.insert(
        "responses".into(),
        json!([{
            "questionId": "7",
            "questionTitle": "Pick some",
            "value": value,
            "formattedValue": null,
        }]),
    );
    record
}

#[test]
fn test_csv_row_expands_structured_answer() {
    let record = row_with_response(json!(r#"{"labels":["x","y"],"other":"z"}"#));
    let row = csv_row(&record);
    assert_eq!(row["Q7 - Pick some"], json!("x|y|z"));
    assert!(!row.contains_key("responses"));
}

#[test]
fn test_csv_row_keeps_numeric_string_plain() {
    let record = row_with_response(json!("42"));
    let row = csv_row(&record);
    assert_eq!(row["Q7 - Pick some"], json!("42"));
}

#[test]
fn test_csv_row_keeps_plain_text() {
    let record = row_with_response(json!("free text answer"));
    let row = csv_row(&record);
    assert_eq!(row["Q7 - Pick some"], json!("free text answer"));
}

#[test]
fn test_csv_row_labels_only_and_other_only() {
    let row = csv_row(&row_with_response(json!(r#"{"labels":["a","b"]}"#)));
    assert_eq!(row["Q7 - Pick some"], json!("a|b"));

    let row = csv_row(&row_with_response(json!(r#"{"other":"custom"}"#)));
    assert_eq!(row["Q7 - Pick some"], json!("custom"));
}

#[test]
fn test_csv_row_structured_without_fields_is_empty() {
    let row = csv_row(&row_with_response(json!(r#"{"unrelated":true}"#)));
    assert_eq!(row["Q7 - Pick some"], json!(null));
}

#[test]
fn test_csv_row_null_value_stays_null() {
    let row = csv_row(&row_with_response(json!(null)));
    assert_eq!(row["Q7 - Pick some"], json!(null));
}

#[test]
fn test_csv_row_without_responses_is_unchanged() {
    let mut record = FormattedRecord::new();
    record.insert("id".into(), json!("u1"));
    assert_eq!(csv_row(&record), record);
}

// ============================================================================
// Formatters
// ============================================================================

#[test]
fn test_format_proposal_shape() {
    let record = format_proposal(&sample_proposal(), false);

    assert_eq!(record["id"], json!("proposal-1"));
    assert_eq!(record["title"], json!("More bike lanes"));
    assert_eq!(record["authorId"], json!("author-1"));
    assert_eq!(record["authorUsername"], json!("jdoe"));
    assert_eq!(record["authorEmail"], json!("jdoe@example.org"));
    assert_eq!(record["authorType"], json!("Citizen"));
    assert_eq!(record["authorZipCode"], json!("75011"));

    // The section entry is gone, the text entry survived.
    let responses = record["responses"].as_array().unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["questionId"], json!("11"));
    assert_eq!(responses[0]["questionTitle"], json!("Your opinion"));
    assert_eq!(responses[0]["value"], json!("Lines of text"));
}

#[test]
fn test_format_proposal_anonymized() {
    let record = format_proposal(&sample_proposal(), true);
    assert!(!record.contains_key("authorUsername"));
    assert!(!record.contains_key("authorEmail"));
    assert!(record.contains_key("authorId"));
    assert!(record.contains_key("authorZipCode"));
}

#[test]
fn test_format_reply_shape() {
    let reply: ReplyNode = serde_json::from_value(json!({
        "id": "reply-1",
        "createdAt": "2019-02-01T10:00:00Z",
        "publishedAt": "2019-02-01T10:05:00Z",
        "updatedAt": null,
        "author": sample_author(),
        "responses": [
            {
                "question": { "id": "20", "title": "Choice", "__typename": "MultipleChoiceQuestion" },
                "value": r#"{"labels":["yes"]}"#
            }
        ]
    }))
    .unwrap();

    let record = format_reply(&reply, false);
    assert_eq!(record["id"], json!("reply-1"));
    assert_eq!(record["authorZipCode"], json!("75011"));
    assert_eq!(record["responses"].as_array().unwrap().len(), 1);

    let row = csv_row(&record);
    assert_eq!(row["Q20 - Choice"], json!("yes"));
    assert!(!row.contains_key("responses"));
}

#[test]
fn test_format_event_shape() {
    let event: crate::graphql::EventNode = serde_json::from_value(json!({
        "id": "event-1",
        "title": "Town\nhall",
        "createdAt": "2019-01-15T18:00:00Z",
        "updatedAt": null,
        "startAt": "2019-01-20T18:00:00Z",
        "endAt": "2019-01-20T20:00:00Z",
        "enabled": true,
        "lat": 47.21,
        "lng": -1.55,
        "fullAddress": "1 Place Royale, Nantes",
        "link": null,
        "url": "https://example.org/events/event-1",
        "body": "Agenda:\r\n- item",
        "author": sample_author()
    }))
    .unwrap();

    let record = format_event(&event, false);
    assert_eq!(record["title"], json!("Town hall"));
    assert_eq!(record["body"], json!("Agenda: - item"));
    assert_eq!(record["lat"], json!(47.21));
    assert_eq!(record["authorUsername"], json!("jdoe"));

    let record = format_event(&event, true);
    assert!(!record.contains_key("authorUsername"));
    assert!(!record.contains_key("authorEmail"));
}

#[test]
fn test_format_user_shape() {
    let record = format_user(&sample_user(), false);
    assert_eq!(record["email"], json!("user@example.org"));
    assert_eq!(record["username"], json!("multi line name"));
    assert_eq!(record["type"], json!("Association"));
    assert_eq!(record["zipCode"], json!("44000"));
    assert_eq!(record["biography"], json!("Line one line two"));
    assert_eq!(record["consentInternalCommunication"], json!(true));
}

#[test]
fn test_format_user_anonymized() {
    let record = format_user(&sample_user(), true);
    assert!(!record.contains_key("email"));
    assert!(!record.contains_key("consentInternalCommunication"));
    assert!(record.contains_key("username"));
    assert!(record.contains_key("zipCode"));
}

#[test]
fn test_records_share_key_set_per_kind() {
    let with_author = format_proposal(&sample_proposal(), false);

    let mut bare: ProposalNode = sample_proposal();
    bare.author = serde_json::from_value(json!({ "id": "author-2" })).unwrap();
    bare.responses.clear();
    let without = format_proposal(&bare, false);

    let keys_a: Vec<&String> = with_author.keys().collect();
    let keys_b: Vec<&String> = without.keys().collect();
    assert_eq!(keys_a, keys_b);
}

#[test]
fn test_author_without_responses_has_null_zip() {
    let mut proposal = sample_proposal();
    proposal.author = serde_json::from_value(json!({ "id": "author-3" })).unwrap();
    let record = format_proposal(&proposal, false);
    assert_eq!(record["authorZipCode"], json!(null));
    assert_eq!(record["authorType"], json!(null));
}
