//! Post store operations and the read-side summaries served by the API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Post, PostDraft};
use crate::error::{DomainError, RepoError};
use crate::ports::{Clock, IdGenerator, PostRepository, UserRepository};

/// Public view of a post: id, title and the raw preview text.
///
/// The derived `Post::preview` is not exposed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub preview_text: String,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            preview_text: post.preview_text,
        }
    }
}

pub struct PostCatalog {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl PostCatalog {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            posts,
            users,
            clock,
            ids,
        }
    }

    /// All posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<PostSummary>, DomainError> {
        let posts = self.posts.list_recent().await?;
        Ok(posts.into_iter().map(PostSummary::from).collect())
    }

    pub async fn get_post(&self, id: Uuid) -> Result<PostSummary, DomainError> {
        self.find(id).await.map(PostSummary::from)
    }

    /// Full post record, including content and author.
    pub async fn find(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }

    pub async fn by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_author(author_id).await?)
    }

    /// Store a new post for an existing author.
    pub async fn publish(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, DomainError> {
        let post = Post::new(self.ids.generate(), author_id, draft, self.clock.now());
        post.validate()?;

        self.ensure_author(author_id).await?;

        let post = self.store(post).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, "Post published");
        Ok(post)
    }

    /// Overwrite a stored post. `created_at` keeps its original value.
    pub async fn update(&self, mut post: Post) -> Result<Post, DomainError> {
        let existing = self.find(post.id).await?;
        post.created_at = existing.created_at;
        post.validate()?;
        self.ensure_author(post.author_id).await?;

        self.store(post).await
    }

    async fn ensure_author(&self, author_id: Uuid) -> Result<(), DomainError> {
        match self.users.find_by_id(author_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound {
                entity_type: "User",
                id: author_id,
            }),
        }
    }

    /// Persist, reporting a vanished author as `NotFound`.
    async fn store(&self, post: Post) -> Result<Post, DomainError> {
        let author_id = post.author_id;
        match self.posts.save(post).await {
            Ok(post) => Ok(post),
            Err(RepoError::ForeignKey(_)) => Err(DomainError::NotFound {
                entity_type: "User",
                id: author_id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        match self.posts.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::NotFound {
                entity_type: "Post",
                id,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_summary_has_exactly_three_keys() {
        let post = Post::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            PostDraft::new("Title", "title")
                .with_preview_text("teaser")
                .with_content("body"),
            Utc::now(),
        );

        let json = serde_json::to_value(PostSummary::from(post.clone())).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["id", "preview_text", "title"]);
        assert_eq!(object["preview_text"], "teaser");
        assert_eq!(object["id"], post.id.to_string());
    }

    #[test]
    fn test_summary_uses_raw_preview_text() {
        let post = Post::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            PostDraft::new("Title", "title").with_content("derived preview here"),
            Utc::now(),
        );

        let summary = PostSummary::from(post);
        assert_eq!(summary.preview_text, "");
    }
}
