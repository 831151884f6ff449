// Colored terminal output for users, posts and word frequencies.
//
// This module handles all terminal-specific formatting. The main.rs
// commands delegate here.

use colored::Colorize;

use crate::api::models::{Post, User};
use crate::state::view_model::ViewModel;
use crate::words::frequency::WordFrequency;

/// Width of a full-length histogram bar, in characters.
const BAR_WIDTH: usize = 30;

/// Display a list of users, optionally noting the search term that produced it.
pub fn display_users(users: &[User], search_term: &str) {
    let heading = if search_term.is_empty() {
        format!("=== Users ({}) ===", users.len())
    } else {
        format!("=== Users matching \"{}\" ({}) ===", search_term, users.len())
    };
    println!("\n{}", heading.bold());

    if users.is_empty() {
        println!("  {}", "No users found.".dimmed());
        return;
    }

    for user in users {
        println!("  {:>4}  {}", user.id.to_string().dimmed(), user.name);
    }
}

/// Display a user's posts with a one-line preview of each body.
pub fn display_posts(user: &User, posts: &[Post], comment_count: usize) {
    println!(
        "\n{}",
        format!(
            "=== Posts by {} ({} posts, {} comments) ===",
            user.name,
            posts.len(),
            comment_count
        )
        .bold()
    );

    if posts.is_empty() {
        println!("  {}", "No posts.".dimmed());
        return;
    }

    for post in posts {
        println!("  {:>4}. {}", post.id, post.title.bold());
        let preview = super::truncate_chars(&super::single_line(&post.body), 100);
        println!("        {}", preview.dimmed());
    }
}

/// Display the word-frequency table: word, count and share of all words.
pub fn display_word_table(frequency: &WordFrequency) {
    println!(
        "\n{}",
        format!(
            "=== Top {} words (of {} total) ===",
            frequency.sorted_and_counted_words.len(),
            frequency.total_word_count
        )
        .bold()
    );

    if frequency.is_empty() {
        println!("  {}", "No comments to count.".dimmed());
        return;
    }

    println!(
        "  {:>2}  {:<20} {:>6}  {:>7}",
        "#".dimmed(),
        "Word".dimmed(),
        "Count".dimmed(),
        "Percent".dimmed(),
    );
    println!("  {}", "-".repeat(40).dimmed());

    for (i, entry) in frequency.sorted_and_counted_words.iter().enumerate() {
        println!(
            "  {:>2}. {:<20} {:>6}  {:>6.1}%",
            i + 1,
            entry.word,
            entry.count,
            entry.percent_of(frequency.total_word_count),
        );
    }
}

/// Display the word-frequency histogram, bars scaled to the most frequent word.
pub fn display_histogram(frequency: &WordFrequency) {
    if frequency.is_empty() {
        return;
    }

    println!("\n{}", "=== Word histogram ===".bold());
    println!();

    for entry in &frequency.sorted_and_counted_words {
        let bar = histogram_bar(entry.bar_ratio(frequency.highest_count), BAR_WIDTH);
        println!("  {:<20} {} {}", entry.word, bar.bright_green(), entry.count);
    }
}

/// Print a compact summary of a view model snapshot (used by `browse`).
pub fn display_snapshot(view: &ViewModel) {
    if view.loading {
        println!("{}", "Loading...".dimmed());
        return;
    }

    display_users(&view.users, &view.search_term);

    if let Some(user) = &view.active_user {
        display_posts(user, &view.active_user_posts, view.active_user_comments.len());
        display_word_table(&view.word_frequency);
        display_histogram(&view.word_frequency);
    }
}

/// Render a bar of `width` cells, `ratio` of them filled.
pub fn histogram_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "#".repeat(filled), " ".repeat(empty))
}
