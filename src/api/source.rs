// DataSource trait — the seam between the state layer and the network.
//
// `UserDataService` only talks to a `DataSource`. `ApiClient` is the real
// implementation; tests provide in-memory ones.

use anyhow::Result;
use async_trait::async_trait;

use super::client::ApiClient;
use super::models::{Comment, Post, User};
use super::{posts, users};

/// Read access to users, posts and comments.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Every user, unfiltered.
    async fn users(&self) -> Result<Vec<User>>;

    /// Posts written by the given user.
    async fn posts_for_user(&self, user_id: u64) -> Result<Vec<Post>>;

    /// Comments left on the given post.
    async fn comments_for_post(&self, post_id: u64) -> Result<Vec<Comment>>;
}

#[async_trait]
impl DataSource for ApiClient {
    async fn users(&self) -> Result<Vec<User>> {
        users::fetch_all_users(self).await
    }

    async fn posts_for_user(&self, user_id: u64) -> Result<Vec<Post>> {
        posts::fetch_user_posts(self, user_id).await
    }

    async fn comments_for_post(&self, post_id: u64) -> Result<Vec<Comment>> {
        posts::fetch_post_comments(self, post_id).await
    }
}
