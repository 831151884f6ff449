// Post and comment fetching, plus the per-post comment fan-out.

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use super::client::ApiClient;
use super::models::{Comment, Post, PostsAndComments};
use super::source::DataSource;

/// Fetch the posts written by one user.
pub async fn fetch_user_posts(client: &ApiClient, user_id: u64) -> Result<Vec<Post>> {
    let id = user_id.to_string();
    client
        .get_json("/posts", &[("userId", &id)])
        .await
        .with_context(|| format!("Failed to fetch posts for user {user_id}"))
}

/// Fetch the comments left on one post.
pub async fn fetch_post_comments(client: &ApiClient, post_id: u64) -> Result<Vec<Comment>> {
    let id = post_id.to_string();
    client
        .get_json("/comments", &[("postId", &id)])
        .await
        .with_context(|| format!("Failed to fetch comments for post {post_id}"))
}

/// Fetch a user's posts, then the comments on each post.
///
/// Comment requests run concurrently, at most `concurrency` at a time, and
/// are joined before returning. Comments come back grouped in post order.
/// The first failing request fails the whole call.
pub async fn fetch_posts_and_comments(
    source: &dyn DataSource,
    user_id: u64,
    concurrency: usize,
) -> Result<PostsAndComments> {
    let posts = source.posts_for_user(user_id).await?;

    debug!(user_id = user_id, posts = posts.len(), "Fetching comments per post");

    let post_ids: Vec<u64> = posts.iter().map(|post| post.id).collect();
    let per_post: Vec<Vec<Comment>> = stream::iter(post_ids)
        .map(|post_id| source.comments_for_post(post_id))
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    let comments: Vec<Comment> = per_post.into_iter().flatten().collect();

    info!(
        user_id = user_id,
        posts = posts.len(),
        comments = comments.len(),
        "Collected posts and comments"
    );

    Ok(PostsAndComments { posts, comments })
}
