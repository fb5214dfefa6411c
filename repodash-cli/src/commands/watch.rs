//! Interactive dashboard
//!
//! Each stdin line is the new content of the search box; lines starting with
//! `:` are control commands. The screen is redrawn whenever the store state
//! changes or input arrives.

use anyhow::{Context, Result};
use repodash_client::{DashboardClient, RepositoryApi};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Notify;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::config::Config;
use crate::filter::FilterController;
use crate::store::{FetchOutcome, RepositoryStore};
use crate::view::render_dashboard;

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    /// New search box content
    Search(String),
    /// Search now instead of waiting for the debounce
    Submit,
    /// Select a language, or `all`
    Language(String),
    Clear,
    Refresh,
    Retry,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Input::Search(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "submit" | "s" => Input::Submit,
        "lang" | "l" if arg.is_empty() => Input::Language(crate::filter::ALL_LANGUAGES.to_string()),
        "lang" | "l" => Input::Language(arg.to_string()),
        "clear" | "c" => Input::Clear,
        "refresh" | "r" => Input::Refresh,
        "retry" => Input::Retry,
        "quit" | "q" => Input::Quit,
        other => Input::Unknown(other.to_string()),
    }
}

/// Run the interactive dashboard until `:quit` or end of input
///
/// `:quit` leaves at once. At end of input (e.g. piped stdin) the pending
/// load, actions and debounced search are awaited and the final state is
/// printed before returning.
pub async fn run(config: &Config) -> Result<()> {
    let client: Arc<dyn RepositoryApi> = Arc::new(DashboardClient::new(&config.api_base));
    let store = RepositoryStore::new(client);
    let controller = FilterController::new(store.clone(), config.debounce);
    let redraw = Arc::new(Notify::new());

    let renderer = spawn_renderer(store.clone(), controller.clone(), Arc::clone(&redraw));

    let mut tasks = JoinSet::new();
    {
        let store = store.clone();
        tasks.spawn(async move {
            let outcome = store.load_initial().await;
            tracing::debug!("Initial load finished: {:?}", outcome);
        });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut quit = false;
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        // Reap finished actions
        while tasks.try_join_next().is_some() {}

        match parse_input(&line) {
            Input::Search(text) => controller.on_search_input(text),
            Input::Submit => spawn_action(&mut tasks, &controller, |c| async move {
                c.submit_search().await
            }),
            Input::Language(language) => spawn_action(&mut tasks, &controller, move |c| async move {
                c.on_language_change(&language).await
            }),
            Input::Clear => spawn_action(&mut tasks, &controller, |c| async move {
                c.clear_filters().await
            }),
            Input::Refresh => spawn_action(&mut tasks, &controller, |c| async move {
                c.refresh().await
            }),
            Input::Retry => spawn_action(&mut tasks, &controller, |c| async move {
                c.retry().await
            }),
            Input::Quit => {
                quit = true;
                break;
            }
            Input::Unknown(name) => warn!("Unknown command :{}", name),
        }
        redraw.notify_one();
    }

    renderer.abort();
    if !quit {
        info!("End of input, waiting for pending work");
        finish_pending(&controller, &mut tasks).await;
        println!(
            "{}",
            render_dashboard(&store.snapshot(), &controller.active_filters())
        );
    }

    info!(
        "Leaving dashboard with {} repositories loaded",
        store.snapshot().repositories.len()
    );
    Ok(())
}

/// Run a controller action without blocking input
fn spawn_action<F, Fut>(tasks: &mut JoinSet<()>, controller: &FilterController, action: F)
where
    F: FnOnce(FilterController) -> Fut,
    Fut: Future<Output = FetchOutcome> + Send + 'static,
{
    let task = action(controller.clone());
    tasks.spawn(async move {
        let outcome = task.await;
        tracing::debug!("Action finished: {:?}", outcome);
    });
}

/// Waits for spawned actions and the last debounced search
async fn finish_pending(controller: &FilterController, tasks: &mut JoinSet<()>) {
    controller.settle().await;
    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            warn!("Dashboard task failed: {}", e);
        }
    }
}

/// Redraws on state changes and input notifications
fn spawn_renderer(
    store: RepositoryStore,
    controller: FilterController,
    redraw: Arc<Notify>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut updates = store.subscribe();
        loop {
            let state = updates.borrow_and_update().clone();
            // Clear screen and home the cursor
            print!("\x1B[2J\x1B[H");
            println!("{}", render_dashboard(&state, &controller.active_filters()));

            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = redraw.notified() => {}
            }
        }
    })
}
