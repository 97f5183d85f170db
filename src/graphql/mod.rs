//! GraphQL transport and wire model
//!
//! The client POSTs query documents with bearer auth and the preview accept
//! header; the types module mirrors the connection shapes the four export
//! queries return.

mod client;
mod queries;
mod types;

pub use client::GraphqlClient;
pub use queries::{EVENTS_QUERY, PROPOSALS_QUERY, REPLIES_QUERY, USERS_QUERY};
pub use types::{
    extract_page, Author, Edge, EdgeList, EventNode, Media, Page, PageInfo, ProposalNode,
    Question, ReplyNode, ResponseNode, UserNode, UserType, ValueNode,
};
