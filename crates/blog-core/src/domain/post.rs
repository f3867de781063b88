use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Author of a post. Both names are always present together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// Build an author, rejecting blank names.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Result<Self, DomainError> {
        let first_name = first_name.into();
        let last_name = last_name.into();

        if first_name.trim().is_empty() {
            return Err(DomainError::MissingField("author.firstName"));
        }
        if last_name.trim().is_empty() {
            return Err(DomainError::MissingField("author.lastName"));
        }

        Ok(Self {
            first_name,
            last_name,
        })
    }

    /// Display form used by the public view: "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Blog post as held by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Materialize a stored document from validated input.
    ///
    /// The store calls this on insert: it owns id generation, and `created`
    /// falls back to the current time when the input did not carry one.
    pub fn from_new(new: NewPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: new.author,
            title: new.title,
            content: new.content,
            created: new.created.unwrap_or_else(Utc::now),
        }
    }

    /// External representation of the post.
    pub fn to_view(&self) -> PostView {
        PostView {
            id: self.id,
            author: self.author.full_name(),
            title: self.title.clone(),
            content: self.content.clone(),
            created: self.created,
        }
    }
}

/// Validated input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn new(author: Author, title: impl Into<String>, content: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::MissingField("title"));
        }

        Ok(Self {
            author,
            title,
            content: content.into(),
            created: None,
        })
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

/// Partial update of a post. Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub author: Option<Author>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::MissingField("title"));
        }
        self.title = Some(title);
        Ok(self)
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.title.is_none() && self.content.is_none()
    }

    /// Apply the supplied fields to `post`. `id` and `created` are never touched.
    pub fn apply(&self, post: &mut BlogPost) {
        if let Some(author) = &self.author {
            post.author = author.clone();
        }
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
    }
}

/// Serialized view of a post returned by the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}
