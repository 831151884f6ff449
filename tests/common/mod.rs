// In-memory DataSource shared by the state-layer tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use userlens::api::models::{Comment, Post, User};
use userlens::api::source::DataSource;

#[derive(Default)]
pub struct FakeSource {
    pub users: Vec<User>,
    pub posts: HashMap<u64, Vec<Post>>,
    pub comments: HashMap<u64, Vec<Comment>>,
    /// Per-post delay before comments are returned.
    pub comment_delays: HashMap<u64, Duration>,
    pub fail_users: AtomicBool,
    pub fail_comments_for: Option<u64>,

    pub user_calls: AtomicUsize,
    pub comment_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

#[async_trait]
impl DataSource for FakeSource {
    async fn users(&self) -> Result<Vec<User>> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_users.load(Ordering::SeqCst) {
            anyhow::bail!("GET /users returned 503 Service Unavailable");
        }
        Ok(self.users.clone())
    }

    async fn posts_for_user(&self, user_id: u64) -> Result<Vec<Post>> {
        Ok(self.posts.get(&user_id).cloned().unwrap_or_default())
    }

    async fn comments_for_post(&self, post_id: u64) -> Result<Vec<Comment>> {
        self.comment_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.comment_delays.get(&post_id) {
            tokio::time::sleep(*delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_comments_for == Some(post_id) {
            anyhow::bail!("GET /comments returned 500 Internal Server Error");
        }
        Ok(self.comments.get(&post_id).cloned().unwrap_or_default())
    }
}

pub fn user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
    }
}

pub fn post(id: u64, user_id: u64) -> Post {
    Post {
        id,
        user_id,
        title: format!("post {id}"),
        body: format!("body of post {id}"),
    }
}

pub fn comment(id: u64, post_id: u64, body: &str) -> Comment {
    Comment {
        id,
        post_id,
        name: format!("comment {id}"),
        email: format!("c{id}@example.test"),
        body: body.to_string(),
    }
}

/// Three users; Leanne (1) has two posts with comments, Ervin (2) has none.
pub fn sample_source() -> FakeSource {
    let mut source = FakeSource {
        users: vec![
            user(1, "Leanne Graham"),
            user(2, "Ervin Howell"),
            user(3, "Clementine Bauch"),
        ],
        ..Default::default()
    };
    source.posts.insert(1, vec![post(10, 1), post(11, 1)]);
    source.posts.insert(2, vec![]);
    source.comments.insert(
        10,
        vec![
            comment(100, 10, "the quick brown fox"),
            comment(101, 10, "The lazy dog"),
        ],
    );
    source
        .comments
        .insert(11, vec![comment(110, 11, "quick quick THE end")]);
    source
}
