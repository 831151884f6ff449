// Wire types for the REST API.
//
// The API speaks camelCase JSON; fields here are snake_case with serde
// renames. `RawUser` mirrors the full users payload, but the rest of the
// crate only ever sees the `User` projection.

use serde::{Deserialize, Serialize};

/// A user as returned by `GET /users`.
///
/// Only `id` and `name` are required. The remaining fields default when
/// absent so partial fixtures and alternate backends still decode.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub geo: Geo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geo {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lng: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "catchPhrase")]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

/// A simplified user — just the fields the view model needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
        }
    }
}

/// A post as returned by `GET /posts?userId=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// A comment as returned by `GET /comments?postId=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(rename = "postId")]
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// A user's posts together with every comment left on them.
///
/// Comments are grouped by post, in the same order as `posts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsAndComments {
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}
