// ViewModel — everything a front end needs to render, in one record.

use serde::Serialize;

use crate::api::models::{Comment, Post, User};
use crate::words::frequency::WordFrequency;

/// The single aggregated state object rendered by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    /// Users matching `search_term`.
    pub users: Vec<User>,
    pub search_term: String,
    /// The user whose posts and comments are loaded, if any.
    pub active_user: Option<User>,
    pub active_user_posts: Vec<Post>,
    /// Comments on the active user's posts, grouped in post order.
    pub active_user_comments: Vec<Comment>,
    /// True while a fetch is in flight.
    pub loading: bool,
    /// Word counts over `active_user_comments`.
    pub word_frequency: WordFrequency,
}
