// User list fetching and name search.
//
// The API has no server-side name search, so filtering happens here after
// the full list comes back.

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::client::ApiClient;
use super::models::{RawUser, User};
use super::source::DataSource;

/// Fetch every user and project each one down to `User`.
pub async fn fetch_all_users(client: &ApiClient) -> Result<Vec<User>> {
    let raw: Vec<RawUser> = client
        .get_json("/users", &[])
        .await
        .context("Failed to fetch users")?;

    debug!(count = raw.len(), "Fetched users");

    Ok(raw.into_iter().map(User::from).collect())
}

/// Fetch users whose name contains `term`, ignoring case.
///
/// An empty term matches everyone.
pub async fn search_users(source: &dyn DataSource, term: &str) -> Result<Vec<User>> {
    let all = source.users().await?;
    let total = all.len();
    let matched = filter_by_name(all, term);

    info!(
        term = term,
        matched = matched.len(),
        total = total,
        "User search complete"
    );

    Ok(matched)
}

/// Keep the users whose name contains `term` as a case-insensitive substring.
pub fn filter_by_name(users: Vec<User>, term: &str) -> Vec<User> {
    if term.is_empty() {
        return users;
    }

    let needle = term.to_lowercase();
    users
        .into_iter()
        .filter(|user| user.name.to_lowercase().contains(&needle))
        .collect()
}
