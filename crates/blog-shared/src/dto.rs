//! Data Transfer Objects - request bodies for the posts API.
//!
//! Every field is optional on the wire so the server can name the field that
//! is missing instead of failing with a generic deserialization error.

use serde::{Deserialize, Serialize};

/// Author as sent by clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Body of `POST /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author: Option<AuthorInput>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Body of `PUT /posts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    /// When present, must match the id in the path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
