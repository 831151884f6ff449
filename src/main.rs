use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use userlens::api::client::ApiClient;
use userlens::config::Config;
use userlens::output::terminal;
use userlens::state::search::spawn_search_listener;
use userlens::state::service::UserDataService;
use userlens::words::frequency::WordFrequencyCounter;

/// userlens: browse users, their posts, and the words their commenters use.
#[derive(Parser)]
#[command(name = "userlens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List users, optionally filtered by name
    Users {
        /// Only show users whose name contains this (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Show a user's posts and the word frequencies of their comments
    User {
        /// The user's numeric id
        id: u64,

        /// Print the view model as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Interactive search: type a name fragment, or `:<id>` to select a user
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("userlens=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let service = Arc::new(build_service(&config)?);

    match cli.command {
        Commands::Users { search } => {
            match search.as_deref() {
                Some(term) => service.update_search_term(term).await?,
                None => service.load_users().await?,
            }
            let view = service.snapshot();
            terminal::display_users(&view.users, &view.search_term);
        }

        Commands::User { id, json } => {
            let spinner = spinner(&format!("Fetching posts and comments for user {id}..."))?;

            let result = load_and_select(&service, id).await;
            spinner.finish_and_clear();
            result?;

            let view = service.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            if let Some(user) = &view.active_user {
                terminal::display_posts(
                    user,
                    &view.active_user_posts,
                    view.active_user_comments.len(),
                );
            }
            terminal::display_word_table(&view.word_frequency);
            terminal::display_histogram(&view.word_frequency);
        }

        Commands::Browse => browse(service, config.search_debounce).await?,
    }

    Ok(())
}

/// Wire the configured API client, word counter and fan-out limit into a service.
fn build_service(config: &Config) -> Result<UserDataService> {
    let client = ApiClient::new(&config.api_url)?;
    info!(api_url = client.base_url(), "Using REST API");

    Ok(UserDataService::new(Arc::new(client))
        .with_counter(WordFrequencyCounter::new(config.top_words))
        .with_fetch_concurrency(config.fetch_concurrency))
}

/// Load the user list, then make `id` the active user.
async fn load_and_select(service: &UserDataService, id: u64) -> Result<()> {
    service.load_users().await?;
    service.select_user_by_id(id).await
}

/// Interactive loop: stdin lines become search terms or user selections, and
/// every new view model snapshot is printed as it is published.
async fn browse(service: Arc<UserDataService>, debounce: Duration) -> Result<()> {
    service.load_users().await?;
    terminal::display_snapshot(&service.snapshot());

    println!(
        "\n{}",
        "Type part of a name to search, `:<id>` to select a user, `:q` to quit.".dimmed()
    );

    let mut updates = service.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let view = updates.borrow_and_update().clone();
            terminal::display_snapshot(&view);
        }
    });

    let (terms_tx, terms_rx) = mpsc::channel(32);
    let listener = spawn_search_listener(service.clone(), terms_rx, debounce);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();

        if line == ":q" {
            break;
        }

        if let Some(id) = line.strip_prefix(':') {
            match id.trim().parse::<u64>() {
                Ok(id) => {
                    if let Err(e) = service.select_user_by_id(id).await {
                        warn!(error = %e, "Could not select user");
                        println!("  {} {}", "Error:".red(), e);
                    }
                }
                Err(_) => println!("  {} `{}` is not a user id", "Error:".red(), id),
            }
            continue;
        }

        if terms_tx.send(line.to_string()).await.is_err() {
            break;
        }
    }

    drop(terms_tx);
    listener.await.context("Search listener panicked")?;
    printer.abort();
    debug!("Browse session ended");

    Ok(())
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("  {spinner} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
