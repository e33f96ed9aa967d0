// Library module containing testable functions from main.rs

use crate::app::App;
use crate::async_task::{Task, TaskResult};
use crate::client::SearchClient;
use crate::command::Command;
use crate::error::Result;
use crate::executor::{Effect, Executor};
use crate::sort::{self, SortConfig, SortDirection, SortKey};
use crate::test_config::TestConfig;
use std::fs;
use tokio::sync::mpsc;

pub fn handle_task_result(app: &mut App, result: TaskResult) {
    match result {
        TaskResult::SearchCompleted { id, results } => {
            if !app.complete_search(id, results) {
                app.status_message = "Async result ignored (newer search pending)".to_string();
            }
        }
        TaskResult::SearchFailed { id, message } => {
            if !app.fail_search(id, message) {
                app.status_message = "Async result ignored (newer search pending)".to_string();
            }
        }
    }
}

/// Carry out the effects of a command in the interactive UI.
pub fn apply_effects(app: &mut App, effects: Vec<Effect>, task_sender: &mpsc::Sender<Task>) {
    for effect in effects {
        match effect {
            Effect::Search(request) => {
                let task = Task::Search {
                    id: request.id,
                    query: request.query,
                };
                if let Err(e) = task_sender.try_send(task) {
                    log::error!("📤 main: Failed to send search task: {}", e);
                    app.fail_search(request.id, format!("Failed to start search: {}", e));
                }
            }
            Effect::OpenUrl(url) => {
                if let Err(e) = open::that(&url) {
                    log::warn!("Failed to open {}: {}", url, e);
                    app.status_message = format!("Could not open {}: {}", url, e);
                }
            }
        }
    }
}

pub fn execute_command(config_path: &str, command_str: &str, output_path: Option<&str>) -> Result<()> {
    // Load the configuration
    let config = TestConfig::load_from_file(config_path)?;

    // Parse the command
    let command = Command::from_string(command_str)?;

    // Execute the command
    let mut app = App::from_test_config(&config);
    let effects = Executor::execute(&mut app, command);

    // Convert result to JSON
    let result_json = serde_json::to_string_pretty(&TestConfig::from_app(&app))?;

    // Output the result
    match output_path {
        Some(path) => {
            fs::write(path, &result_json)?;
            println!("Result saved to: {}", path);
        }
        None => {
            println!("{}", result_json);
        }
    }

    // Effects are reported, not performed
    for effect in &effects {
        match effect {
            Effect::Search(request) => {
                eprintln!("Would dispatch search #{}: {:?}", request.id, request.query)
            }
            Effect::OpenUrl(url) => eprintln!("Would open: {}", url),
        }
    }
    eprintln!("Status: {}", app.status_message);
    if app.should_quit {
        eprintln!("Command resulted in quit");
    }

    Ok(())
}

/// Format results as plain text rows for the one-shot `search` command.
pub fn format_results(results: &[crate::model::Recommendation], config: SortConfig) -> String {
    let shown = sort::sorted(results, config);
    if shown.is_empty() {
        return "No results found.".to_string();
    }

    let name_width = shown.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).max(4);
    let mut lines = vec![format!("{:<name_width$}  {:<24}  {}", "Name", "Test Types", "Remote")];
    for item in shown {
        lines.push(format!(
            "{:<name_width$}  {:<24}  {}",
            item.name,
            item.test_types_or_placeholder(),
            item.remote_testing_or_placeholder()
        ));
        if let Some(url) = item.visit_url() {
            lines.push(format!("{:<name_width$}  {}", "", url));
        }
    }
    lines.join("\n")
}

pub async fn search_once(
    client: &SearchClient,
    query: &str,
    sort_field: Option<&str>,
    descending: bool,
) -> Result<String> {
    if query.trim().is_empty() {
        return Err("Query must not be empty".into());
    }

    let key = match sort_field {
        Some(field) => Some(
            SortKey::from_field_name(field)
                .ok_or_else(|| format!("Unknown sort field: {}", field))?,
        ),
        None => None,
    };
    let direction = if descending {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    let results = client
        .search(query)
        .await
        .map_err(|e| crate::error::AppError::Generic(e.user_message()))?;

    Ok(format_results(&results, SortConfig { key, direction }))
}
