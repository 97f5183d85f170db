//! The four export query documents
//!
//! Field sets match what the formatter consumes; the platform requires the
//! preview accept header for some of these fields.

use once_cell::sync::Lazy;

/// Fields fetched for every author reference
const AUTHOR_FRAGMENT: &str = r"
  fragment AuthorFragment on User {
    id
    username
    email
    userType {
      name
    }
    responses {
      edges {
        node {
          ... on ValueResponse {
            value
            formattedValue
          }
        }
      }
    }
  }
";

const USERS_DOC: &str = r"
  query UsersQuery($count: Int!, $cursor: String) {
    users(first: $count, after: $cursor) {
      totalCount
      pageInfo {
        hasNextPage
        endCursor
      }
      edges {
        node {
          id
          username
          email
          consentInternalCommunication
          avatarUrl
          linkedInUrl
          twitterUrl
          websiteUrl
          facebookUrl
          createdAt
          updatedAt
          deletedAccountAt
          enabled
          biography
          url
          userType {
            name
          }
          responses {
            edges {
              node {
                ... on ValueResponse {
                  value
                  formattedValue
                }
              }
            }
          }
        }
      }
    }
  }
";

const EVENTS_DOC: &str = r"
  query EventsQuery($count: Int!, $cursor: String) {
    events(first: $count, after: $cursor) {
      totalCount
      pageInfo {
        hasNextPage
        endCursor
      }
      edges {
        node {
          id
          title
          createdAt
          updatedAt
          startAt
          endAt
          enabled
          fullAddress
          lat
          lng
          body
          url
          link
          author {
            ...AuthorFragment
          }
        }
      }
    }
  }
";

const PROPOSALS_DOC: &str = r"
  query ProposalsQuery(
    $id: ID!
    $count: Int!
    $cursor: String
    $trashedStatus: ProposalTrashedStatus
    $orderBy: ProposalOrder!
  ) {
    node(id: $id) {
      id
      ... on CollectStep {
        proposals(
          trashedStatus: $trashedStatus
          orderBy: $orderBy
          first: $count
          after: $cursor
        ) {
          totalCount
          edges {
            node {
              id
              reference
              title
              createdAt
              publishedAt
              updatedAt
              trashed
              trashedStatus
              author {
                ...AuthorFragment
              }
              responses {
                question {
                  id
                  title
                  __typename
                }
                ... on ValueResponse {
                  value
                  formattedValue
                }
              }
            }
          }
          pageInfo {
            hasNextPage
            endCursor
          }
        }
      }
    }
  }
";

const REPLIES_DOC: &str = r"
  query RepliesQuery($id: ID!, $count: Int!, $cursor: String) {
    node(id: $id) {
      ... on Questionnaire {
        replies(first: $count, after: $cursor) {
          totalCount
          pageInfo {
            hasNextPage
            endCursor
          }
          edges {
            node {
              id
              createdAt
              publishedAt
              updatedAt
              author {
                ...AuthorFragment
              }
              responses {
                question {
                  id
                  title
                  __typename
                }
                ... on ValueResponse {
                  value
                }
                ... on MediaResponse {
                  medias {
                    url
                  }
                }
              }
            }
          }
        }
      }
    }
  }
";

/// Users query (no author fragment; users carry their own fields)
pub static USERS_QUERY: Lazy<String> = Lazy::new(|| USERS_DOC.to_string());

/// Events query with the author fragment appended
pub static EVENTS_QUERY: Lazy<String> = Lazy::new(|| format!("{EVENTS_DOC}{AUTHOR_FRAGMENT}"));

/// Proposals-by-collect-step query with the author fragment appended
pub static PROPOSALS_QUERY: Lazy<String> = Lazy::new(|| format!("{PROPOSALS_DOC}{AUTHOR_FRAGMENT}"));

/// Replies-by-questionnaire query with the author fragment appended
pub static REPLIES_QUERY: Lazy<String> = Lazy::new(|| format!("{REPLIES_DOC}{AUTHOR_FRAGMENT}"));
