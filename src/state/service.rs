// UserDataService — fetches from a DataSource and publishes ViewModel snapshots.
//
// The current view model lives in a `tokio::sync::watch` channel. Every
// operation fetches first and then merges its result into the view model in
// one step, so subscribers only ever see states that reflect a completed
// fetch. Publishes that leave the view model unchanged do not wake anyone.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::models::User;
use crate::api::posts;
use crate::api::source::DataSource;
use crate::api::users;
use crate::words::frequency::WordFrequencyCounter;

use super::view_model::ViewModel;

/// Default number of comment requests in flight at once.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

/// Holds the view model and the operations that change it.
///
/// Share it across tasks with `Arc<UserDataService>`; every method takes
/// `&self`.
pub struct UserDataService {
    source: Arc<dyn DataSource>,
    counter: WordFrequencyCounter,
    fetch_concurrency: usize,
    store: watch::Sender<ViewModel>,
    /// Fetches currently running; `loading` is true while this is non-zero.
    in_flight: AtomicUsize,
}

impl UserDataService {
    /// Create a service with an empty view model. Nothing is fetched until
    /// one of the operations is called.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let (store, _) = watch::channel(ViewModel::default());
        Self {
            source,
            counter: WordFrequencyCounter::default(),
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            store,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Use a different word counter (e.g. a different top-N).
    pub fn with_counter(mut self, counter: WordFrequencyCounter) -> Self {
        self.counter = counter;
        self
    }

    /// Cap how many comment requests run at once when selecting a user.
    pub fn with_fetch_concurrency(mut self, concurrency: usize) -> Self {
        self.fetch_concurrency = concurrency.max(1);
        self
    }

    /// A receiver that always holds the latest view model.
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.store.subscribe()
    }

    /// A copy of the current view model.
    pub fn snapshot(&self) -> ViewModel {
        self.store.borrow().clone()
    }

    /// Fetch the full user list and clear the search term.
    pub async fn load_users(&self) -> Result<()> {
        let all = self.while_loading(self.source.users()).await?;

        info!(count = all.len(), "Loaded users");

        self.update_state(|state| {
            state.search_term.clear();
            state.users = all;
            state.loading = self.fetching();
        });
        Ok(())
    }

    /// Fetch the users whose name contains `term` and record the term.
    pub async fn update_search_term(&self, term: &str) -> Result<()> {
        let matched = self
            .while_loading(users::search_users(self.source.as_ref(), term))
            .await?;

        self.update_state(|state| {
            state.search_term = term.to_string();
            state.users = matched;
            state.loading = self.fetching();
        });
        Ok(())
    }

    /// Make `user` the active user: fetch their posts and the comments on
    /// them, and count the words in those comments.
    pub async fn select_user(&self, user: &User) -> Result<()> {
        let fetched = self
            .while_loading(posts::fetch_posts_and_comments(
                self.source.as_ref(),
                user.id,
                self.fetch_concurrency,
            ))
            .await?;

        let word_frequency = self.counter.count_comments(&fetched.comments);

        info!(
            user_id = user.id,
            posts = fetched.posts.len(),
            comments = fetched.comments.len(),
            total_words = word_frequency.total_word_count,
            "Selected user"
        );

        self.update_state(|state| {
            state.active_user = Some(user.clone());
            state.active_user_posts = fetched.posts;
            state.active_user_comments = fetched.comments;
            state.word_frequency = word_frequency;
            state.loading = self.fetching();
        });
        Ok(())
    }

    /// Select the user with `user_id` from the current user list.
    pub async fn select_user_by_id(&self, user_id: u64) -> Result<()> {
        // The borrow must end before the await below.
        let user = {
            let view = self.store.borrow();
            view.users.iter().find(|u| u.id == user_id).cloned()
        };

        match user {
            Some(user) => self.select_user(&user).await,
            None => anyhow::bail!("No user with id {user_id} in the current list"),
        }
    }

    /// Run `fetch` with the loading flag raised. The flag only drops once
    /// every overlapping fetch has finished. On failure the rest of the view
    /// model is left untouched; on success the caller publishes its result
    /// together with the new flag.
    async fn while_loading<T>(&self, fetch: impl Future<Output = Result<T>>) -> Result<T> {
        let result = {
            let _guard = InFlight::enter(&self.in_flight);
            self.update_state(|state| state.loading = true);
            fetch.await
        };

        result.inspect_err(|e| {
            warn!(error = %e, "Fetch failed, keeping previous view model");
            self.update_state(|state| state.loading = self.fetching());
        })
    }

    /// True while any fetch started through `while_loading` is still running.
    fn fetching(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Apply `change` to the view model and notify subscribers if anything
    /// actually changed.
    fn update_state(&self, change: impl FnOnce(&mut ViewModel)) {
        let notified = self.store.send_if_modified(|state| {
            let before = state.clone();
            change(state);
            *state != before
        });

        if !notified {
            debug!("View model unchanged, subscribers not notified");
        }
    }
}

/// Counts one running fetch for as long as it lives, including when the
/// fetch future is dropped before completing.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
