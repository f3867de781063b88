//! Blog post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Author, NewPost, PostPatch, PostView};
use blog_core::ports::{BaseRepository, PostRepository};
use blog_shared::dto::{AuthorInput, CreatePostRequest, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let views: Vec<PostView> = posts.iter().map(|p| p.to_view()).collect();

    Ok(HttpResponse::Ok().json(views))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = new_post_from_request(body.into_inner())?;

    let post = state.posts.create(new_post).await?;
    tracing::info!(post_id = %post.id, "Post created");

    Ok(HttpResponse::Created().json(post.to_view()))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let path_id = path.into_inner();
    let req = body.into_inner();

    if let Some(body_id) = &req.id {
        if *body_id != path_id {
            return Err(AppError::IdMismatch {
                path: path_id,
                body: body_id.clone(),
            });
        }
    }

    let id = parse_post_id(&path_id)?;
    let patch = patch_from_request(req)?;

    state.posts.update_by_id(id, patch).await?;
    tracing::info!(post_id = %id, "Post updated");

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
///
/// Succeeds whether or not the post existed.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let Ok(id) = Uuid::parse_str(&path.into_inner()) else {
        tracing::debug!("Delete with malformed id, nothing to remove");
        return Ok(HttpResponse::NoContent().finish());
    };

    state.posts.delete_by_id(id).await?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

fn parse_post_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|e| DomainError::InvalidField {
        field: "id",
        reason: e.to_string(),
    })
}

fn author_from_input(input: AuthorInput) -> Result<Author, DomainError> {
    let first_name = input
        .first_name
        .ok_or(DomainError::MissingField("author.firstName"))?;
    let last_name = input
        .last_name
        .ok_or(DomainError::MissingField("author.lastName"))?;

    Author::new(first_name, last_name)
}

/// Validate a create body. Only `title`, `content` and `author` are required.
fn new_post_from_request(req: CreatePostRequest) -> Result<NewPost, DomainError> {
    let title = req.title.ok_or(DomainError::MissingField("title"))?;
    let content = req.content.ok_or(DomainError::MissingField("content"))?;
    let author = req.author.ok_or(DomainError::MissingField("author"))?;

    NewPost::new(author_from_input(author)?, title, content)
}

fn patch_from_request(req: UpdatePostRequest) -> Result<PostPatch, DomainError> {
    let mut patch = PostPatch::default();

    if let Some(author) = req.author {
        patch = patch.with_author(author_from_input(author)?);
    }
    if let Some(title) = req.title {
        patch = patch.with_title(title)?;
    }
    if let Some(content) = req.content {
        patch = patch.with_content(content);
    }

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(first: Option<&str>, last: Option<&str>) -> AuthorInput {
        AuthorInput {
            first_name: first.map(String::from),
            last_name: last.map(String::from),
        }
    }

    #[test]
    fn test_create_reports_first_missing_field() {
        let req = CreatePostRequest {
            author: Some(author(Some("A"), Some("B"))),
            title: None,
            content: Some("C".into()),
        };
        let err = new_post_from_request(req).unwrap_err();
        assert_eq!(err.field(), "title");

        let req = CreatePostRequest {
            author: Some(author(Some("A"), None)),
            title: Some("T".into()),
            content: Some("C".into()),
        };
        let err = new_post_from_request(req).unwrap_err();
        assert_eq!(err.field(), "author.lastName");

        let req = CreatePostRequest {
            author: None,
            title: Some("T".into()),
            content: None,
        };
        let err = new_post_from_request(req).unwrap_err();
        assert_eq!(err.field(), "content");
    }

    #[test]
    fn test_patch_requires_complete_author() {
        let req = UpdatePostRequest {
            author: Some(author(Some("James"), None)),
            ..Default::default()
        };
        assert_eq!(patch_from_request(req).unwrap_err().field(), "author.lastName");
    }

    #[test]
    fn test_patch_keeps_absent_fields_unset() {
        let req = UpdatePostRequest {
            content: Some("Only content".into()),
            ..Default::default()
        };
        let patch = patch_from_request(req).unwrap();

        assert!(patch.author.is_none());
        assert!(patch.title.is_none());
        assert_eq!(patch.content.as_deref(), Some("Only content"));
    }

    #[test]
    fn test_parse_post_id_rejects_garbage() {
        assert_eq!(parse_post_id("not-an-id").unwrap_err().field(), "id");
        assert!(parse_post_id(&Uuid::new_v4().to_string()).is_ok());
    }
}
