use tokio::sync::mpsc;

use crate::client::SearchClient;
use crate::model::Recommendation;

#[derive(Debug, Clone)]
pub enum Task {
    Search { id: u64, query: String },
}

#[derive(Debug, Clone)]
pub enum TaskResult {
    SearchCompleted { id: u64, results: Vec<Recommendation> },
    SearchFailed { id: u64, message: String },
}

pub async fn run_worker(
    mut task_receiver: mpsc::Receiver<Task>,
    result_sender: mpsc::Sender<TaskResult>,
    client: SearchClient,
) {
    while let Some(task) = task_receiver.recv().await {
        let result = match task {
            Task::Search { id, query } => run_search(&client, id, &query).await,
        };

        if result_sender.send(result).await.is_err() {
            // Main thread has dropped the receiver, exit worker
            break;
        }
    }
}

/// A single attempt; any failure becomes a `SearchFailed`.
pub async fn run_search(client: &SearchClient, id: u64, query: &str) -> TaskResult {
    log::debug!("🔎 worker: search #{id} -> {}", client.endpoint());

    match client.search(query).await {
        Ok(results) => {
            log::debug!("🔎 worker: search #{id} returned {} results", results.len());
            TaskResult::SearchCompleted { id, results }
        }
        Err(e) => {
            log::warn!("🔎 worker: search #{id} failed: {e}");
            TaskResult::SearchFailed {
                id,
                message: e.user_message(),
            }
        }
    }
}
