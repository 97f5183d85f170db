//! Typed wire model for the participation API
//!
//! Connection/page envelopes plus one node struct per export kind. Shapes
//! follow the four export queries; unknown response fields are ignored.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::de::DeserializeOwned;
use serde::Deserialize;

// ============================================================================
// Connection envelopes
// ============================================================================

/// Relay-style page metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One edge wrapping a node
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// A page of nodes with pagination metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    pub total_count: u64,
    pub page_info: PageInfo,
    #[serde(default)]
    pub edges: Vec<Edge<T>>,
}

/// A bare edge list without pagination metadata (author responses)
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct EdgeList<T> {
    #[serde(default)]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for EdgeList<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

/// Extract a typed page from a response data tree
///
/// `path` walks from the data root to the connection object, e.g.
/// `["node", "proposals"]`.
pub fn extract_page<T: DeserializeOwned>(data: &JsonValue, path: &[&str]) -> Result<Page<T>> {
    let mut current = data;
    for part in path {
        current = current
            .get(part)
            .ok_or_else(|| Error::missing_data(path.join(".")))?;
    }
    serde_json::from_value(current.clone()).map_err(Error::from)
}

// ============================================================================
// Shared node fragments
// ============================================================================

/// User type classification (citizen, organization, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct UserType {
    #[serde(default)]
    pub name: Option<String>,
}

/// A value-only response node, as nested under an author
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueNode {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub formatted_value: Option<String>,
}

/// Author reference carried by proposals, replies and events
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub responses: EdgeList<ValueNode>,
}

/// The question a response answers
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "__typename")]
    pub typename: String,
}

/// A media attachment on a media response
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub url: String,
}

/// One answered question on a proposal or reply
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseNode {
    pub question: Question,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub formatted_value: Option<String>,
    #[serde(default)]
    pub medias: Vec<Media>,
}

// ============================================================================
// Export kind nodes
// ============================================================================

/// A proposal from a collect step
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalNode {
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub trashed: Option<bool>,
    #[serde(default)]
    pub trashed_status: Option<String>,
    pub author: Author,
    #[serde(default)]
    pub responses: Vec<ResponseNode>,
}

/// A reply to a questionnaire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyNode {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub author: Author,
    #[serde(default)]
    pub responses: Vec<ResponseNode>,
}

/// A public event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventNode {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub author: Author,
}

/// A platform user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNode {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub consent_internal_communication: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_account_at: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub linked_in_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub responses: EdgeList<ValueNode>,
}
