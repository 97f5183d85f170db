//! Record formatting
//!
//! Pure functions that turn one API node into a flat record ready for the
//! sinks. Field order here is the field order in the JSON output and the
//! CSV header.
//!
//! Free-text fields get newline normalization; author fields are merged
//! under `author`-prefixed keys; anonymization strips identifying fields
//! after the record is built.

mod responses;

pub use responses::{csv_row, flatten_responses, ResponseEntry};

use crate::graphql::{Author, EventNode, ProposalNode, ReplyNode, UserNode};
use crate::types::{FormattedRecord, JsonValue};
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("valid regex"));

/// Collapse every line-break sequence to a single space
pub fn clean_new_line(value: &str) -> String {
    LINE_BREAKS.replace_all(value, " ").into_owned()
}

/// Optional text, passed through verbatim
fn text(value: &Option<String>) -> JsonValue {
    value
        .as_ref()
        .map_or(JsonValue::Null, |s| JsonValue::from(s.as_str()))
}

/// Optional free text, with newlines collapsed
fn clean(value: &Option<String>) -> JsonValue {
    value
        .as_ref()
        .map_or(JsonValue::Null, |s| JsonValue::from(clean_new_line(s)))
}

/// Optional scalar (bool, number), passed through verbatim
fn scalar<T: Into<JsonValue> + Clone>(value: &Option<T>) -> JsonValue {
    value.clone().map_or(JsonValue::Null, Into::into)
}

/// Merge the author view into a record under prefixed keys
///
/// The zip code comes from the author's first response. That is a positional
/// upstream convention: the zip-code question is always the first entry of
/// the author response list.
fn merge_author(record: &mut FormattedRecord, author: &Author) {
    record.insert("authorId".into(), JsonValue::from(author.id.as_str()));
    record.insert("authorUsername".into(), text(&author.username));
    record.insert("authorEmail".into(), text(&author.email));
    record.insert(
        "authorType".into(),
        author
            .user_type
            .as_ref()
            .map_or(JsonValue::Null, |t| text(&t.name)),
    );
    record.insert(
        "authorZipCode".into(),
        author
            .responses
            .edges
            .first()
            .map_or(JsonValue::Null, |edge| text(&edge.node.value)),
    );
}

/// Strip the identifying author fields from an anonymized record
fn remove_author_identity(record: &mut FormattedRecord) {
    record.remove("authorUsername");
    record.remove("authorEmail");
}

/// Format one proposal node
pub fn format_proposal(node: &ProposalNode, anonymize: bool) -> FormattedRecord {
    let mut record = FormattedRecord::new();
    record.insert("id".into(), JsonValue::from(node.id.as_str()));
    record.insert("reference".into(), text(&node.reference));
    record.insert("title".into(), clean(&node.title));
    record.insert("createdAt".into(), text(&node.created_at));
    record.insert("publishedAt".into(), text(&node.published_at));
    record.insert("updatedAt".into(), text(&node.updated_at));
    record.insert("trashed".into(), scalar(&node.trashed));
    record.insert("trashedStatus".into(), text(&node.trashed_status));
    merge_author(&mut record, &node.author);
    record.insert(
        "responses".into(),
        responses_json(&flatten_responses(&node.responses)),
    );
    if anonymize {
        remove_author_identity(&mut record);
    }
    record
}

/// Format one questionnaire reply node
pub fn format_reply(node: &ReplyNode, anonymize: bool) -> FormattedRecord {
    let mut record = FormattedRecord::new();
    record.insert("id".into(), JsonValue::from(node.id.as_str()));
    record.insert("createdAt".into(), text(&node.created_at));
    record.insert("publishedAt".into(), text(&node.published_at));
    record.insert("updatedAt".into(), text(&node.updated_at));
    merge_author(&mut record, &node.author);
    record.insert(
        "responses".into(),
        responses_json(&flatten_responses(&node.responses)),
    );
    if anonymize {
        remove_author_identity(&mut record);
    }
    record
}

/// Format one event node
pub fn format_event(node: &EventNode, anonymize: bool) -> FormattedRecord {
    let mut record = FormattedRecord::new();
    record.insert("id".into(), JsonValue::from(node.id.as_str()));
    record.insert("title".into(), clean(&node.title));
    record.insert("createdAt".into(), text(&node.created_at));
    record.insert("updatedAt".into(), text(&node.updated_at));
    record.insert("startAt".into(), text(&node.start_at));
    record.insert("endAt".into(), text(&node.end_at));
    record.insert("enabled".into(), scalar(&node.enabled));
    record.insert("lat".into(), scalar(&node.lat));
    record.insert("lng".into(), scalar(&node.lng));
    record.insert("fullAddress".into(), text(&node.full_address));
    record.insert("link".into(), text(&node.link));
    record.insert("url".into(), text(&node.url));
    record.insert("body".into(), clean(&node.body));
    merge_author(&mut record, &node.author);
    if anonymize {
        remove_author_identity(&mut record);
    }
    record
}

/// Format one user node
pub fn format_user(node: &UserNode, anonymize: bool) -> FormattedRecord {
    let mut record = FormattedRecord::new();
    record.insert("id".into(), JsonValue::from(node.id.as_str()));
    record.insert("email".into(), text(&node.email));
    record.insert("username".into(), clean(&node.username));
    record.insert(
        "type".into(),
        node.user_type
            .as_ref()
            .map_or(JsonValue::Null, |t| text(&t.name)),
    );
    record.insert(
        "zipCode".into(),
        node.responses
            .edges
            .first()
            .map_or(JsonValue::Null, |edge| text(&edge.node.value)),
    );
    record.insert("createdAt".into(), text(&node.created_at));
    record.insert("updatedAt".into(), text(&node.updated_at));
    record.insert("deletedAccountAt".into(), text(&node.deleted_account_at));
    record.insert("enabled".into(), scalar(&node.enabled));
    record.insert("biography".into(), clean(&node.biography));
    record.insert(
        "consentInternalCommunication".into(),
        scalar(&node.consent_internal_communication),
    );
    record.insert("url".into(), text(&node.url));
    record.insert("avatarUrl".into(), text(&node.avatar_url));
    record.insert("websiteUrl".into(), text(&node.website_url));
    record.insert("linkedInUrl".into(), text(&node.linked_in_url));
    record.insert("twitterUrl".into(), text(&node.twitter_url));
    record.insert("facebookUrl".into(), text(&node.facebook_url));
    if anonymize {
        record.remove("email");
        record.remove("consentInternalCommunication");
    }
    record
}

/// Serialize flattened responses as the JSON sub-list field
fn responses_json(entries: &[ResponseEntry]) -> JsonValue {
    JsonValue::Array(entries.iter().map(ResponseEntry::to_json).collect())
}

#[cfg(test)]
mod tests;
