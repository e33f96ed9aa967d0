use solution_finder::app::App;
use solution_finder::async_task::TaskResult;
use solution_finder::cli::{Cli, Commands};
use solution_finder::client::SearchClient;
use solution_finder::model::Recommendation;
use solution_finder::sort::{SortDirection, SortKey};
use solution_finder::test_config::TestConfig;
use solution_finder::*;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

fn create_test_config_file(
    temp_dir: &TempDir,
    config: &TestConfig,
) -> std::result::Result<PathBuf, Box<dyn std::error::Error>> {
    let config_path = temp_dir.path().join("test_config.json");
    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)?;
    Ok(config_path)
}

fn searching_app(query: &str) -> (App, u64) {
    let mut app = App::new();
    app.query = query.to_string();
    let request = app.begin_search().unwrap();
    (app, request.id)
}

mod cli_integration {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing_run_command() {
        let cli = Cli::try_parse_from(vec!["solution-finder"]);
        assert_ok!(&cli);
        assert_eq!(cli.unwrap().command, None); // Defaults to Run

        let cli = Cli::try_parse_from(vec![
            "solution-finder",
            "run",
            "--endpoint",
            "http://localhost:4000/api/recommend",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Run {
                endpoint: Some("http://localhost:4000/api/recommend".to_string())
            })
        );
    }

    #[test]
    fn test_cli_parsing_serve_command() {
        let cli = Cli::try_parse_from(vec![
            "solution-finder",
            "serve",
            "--port",
            "8080",
            "--upstream",
            "http://localhost:9000/recommend",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                port: Some(8080),
                upstream: Some("http://localhost:9000/recommend".to_string()),
            })
        );
    }

    #[test]
    fn test_cli_rejects_invalid_port() {
        let cli = Cli::try_parse_from(vec!["solution-finder", "serve", "--port", "99999"]);
        assert_err!(&cli);
    }

    #[test]
    fn test_cli_parsing_screenshot_command() {
        let cli = Cli::try_parse_from(vec![
            "solution-finder",
            "screenshot",
            "--config",
            "state.json",
            "--output",
            "screen.txt",
            "--width",
            "100",
        ])
        .unwrap();

        match cli.command.unwrap() {
            Commands::Screenshot {
                config,
                output,
                width,
                height,
            } => {
                assert_eq!(config, "state.json");
                assert_eq!(output, Some("screen.txt".to_string()));
                assert_eq!(width, 100);
                assert_eq!(height, 40);
            }
            other => panic!("Expected Screenshot command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parsing_execute_command() {
        let cli = Cli::try_parse_from(vec![
            "solution-finder",
            "execute",
            "-c",
            "state.json",
            "-x",
            "sort:name",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Execute {
                config: "state.json".to_string(),
                command: "sort:name".to_string(),
                output: None,
            })
        );
    }

    #[test]
    fn test_cli_parsing_search_command() {
        let cli = Cli::try_parse_from(vec![
            "solution-finder",
            "search",
            "java developer",
            "--sort",
            "remote_testing",
            "--descending",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Search {
                query: "java developer".to_string(),
                sort: Some("remote_testing".to_string()),
                descending: true,
                endpoint: None,
            })
        );
    }
}

mod task_result_handling {
    use super::*;

    #[test]
    fn test_handle_search_completed() {
        let (mut app, id) = searching_app("java developer");

        main_lib::handle_task_result(
            &mut app,
            TaskResult::SearchCompleted {
                id,
                results: vec![Recommendation::new("Java Test")],
            },
        );

        assert!(!app.loading);
        assert!(app.error.is_none());
        assert_eq!(app.results[0].name, "Java Test");
        assert_eq!(app.status_message, "Found 1 results");
    }

    #[test]
    fn test_handle_search_failed() {
        let (mut app, id) = searching_app("python");

        main_lib::handle_task_result(
            &mut app,
            TaskResult::SearchFailed {
                id,
                message: "Failed to fetch recommendations".to_string(),
            },
        );

        assert!(!app.loading);
        assert_eq!(app.error.as_deref(), Some("Failed to fetch recommendations"));
        assert_eq!(app.query, "python");
    }

    #[test]
    fn test_handle_stale_result_race_condition_protection() {
        let (mut app, old_id) = searching_app("first");
        app.loading = false;
        app.query = "second".to_string();
        let new_id = app.begin_search().unwrap().id;

        main_lib::handle_task_result(
            &mut app,
            TaskResult::SearchCompleted {
                id: old_id,
                results: vec![Recommendation::new("Stale")],
            },
        );
        assert!(app.loading);
        assert!(app.results.is_empty());

        main_lib::handle_task_result(
            &mut app,
            TaskResult::SearchCompleted {
                id: new_id,
                results: vec![Recommendation::new("Fresh")],
            },
        );
        assert!(!app.loading);
        assert_eq!(app.results[0].name, "Fresh");
    }
}

mod command_execution {
    use super::*;

    #[test]
    #[serial]
    fn test_execute_command_with_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_test_config_file(&temp_dir, &TestConfig::default()).unwrap();
        let output_path = temp_dir.path().join("result.json");

        let result = main_lib::execute_command(
            config_path.to_str().unwrap(),
            "sort:name",
            Some(output_path.to_str().unwrap()),
        );
        assert_ok!(result);

        let saved = TestConfig::load_from_file(output_path.to_str().unwrap()).unwrap();
        assert_eq!(saved.sort.key, Some(SortKey::Name));
        assert_eq!(saved.sort.direction, SortDirection::Ascending);
        // Sorting never reorders the stored list
        assert_eq!(saved.results[0].name, "Java 8 (New)");
    }

    #[test]
    #[serial]
    fn test_execute_command_invalid_config() {
        let result = main_lib::execute_command("/nonexistent/state.json", "quit", None);
        assert_err!(result);
    }

    #[test]
    #[serial]
    fn test_execute_command_invalid_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_test_config_file(&temp_dir, &TestConfig::default()).unwrap();

        let result = main_lib::execute_command(config_path.to_str().unwrap(), "sort:colour", None);
        assert_err!(result);
    }

    #[test]
    #[serial]
    fn test_execute_command_complex_sequence() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_test_config_file(&temp_dir, &TestConfig::default()).unwrap();
        let output_path = temp_dir.path().join("result.json");

        // Expand the first row, open its download, then flip the name sort twice
        let result = main_lib::execute_command(
            config_path.to_str().unwrap(),
            "sequence:[row:0,download:1,sort:name,sort:name]",
            Some(output_path.to_str().unwrap()),
        );
        assert_ok!(result);

        let saved = TestConfig::load_from_file(output_path.to_str().unwrap()).unwrap();
        assert_eq!(saved.expanded_index, Some(0));
        assert_eq!(saved.sort.direction, SortDirection::Descending);
    }

    #[test]
    #[serial]
    fn test_execute_submit_starts_search() {
        let temp_dir = TempDir::new().unwrap();
        let config = TestConfig {
            results: vec![],
            search_generation: 4,
            ..TestConfig::default()
        };
        let config_path = create_test_config_file(&temp_dir, &config).unwrap();
        let output_path = temp_dir.path().join("result.json");

        main_lib::execute_command(
            config_path.to_str().unwrap(),
            "submit",
            Some(output_path.to_str().unwrap()),
        )
        .unwrap();

        let saved = TestConfig::load_from_file(output_path.to_str().unwrap()).unwrap();
        assert!(saved.loading);
        assert!(saved.error.is_none());
        assert_eq!(saved.search_generation, 5);
    }
}

mod screenshots {
    use super::*;

    #[test]
    #[serial]
    fn test_generate_screenshot_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_test_config_file(&temp_dir, &TestConfig::default()).unwrap();
        let output_path = temp_dir.path().join("screen.txt");

        screenshot::generate_screenshot(
            config_path.to_str().unwrap(),
            Some(output_path.to_str().unwrap()),
            100,
            30,
        )
        .unwrap();

        let screen = fs::read_to_string(&output_path).unwrap();
        assert_eq!(screen.lines().count(), 30);
        assert!(screen.contains("Solution Finder"));
        assert!(screen.contains("Java 8 (New)"));
    }
}

mod one_shot_search {
    use super::*;

    fn offline_client() -> SearchClient {
        SearchClient::new(reqwest::Client::new(), "http://127.0.0.1:9/api/recommend")
    }

    #[tokio::test]
    async fn test_search_once_rejects_blank_query() {
        let result = main_lib::search_once(&offline_client(), "   ", None, false).await;
        assert_err!(result);
    }

    #[tokio::test]
    async fn test_search_once_rejects_unknown_sort_field() {
        let err = main_lib::search_once(&offline_client(), "java", Some("colour"), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unknown sort field: colour"));
    }

    #[tokio::test]
    async fn test_search_once_reports_network_failure() {
        let result = main_lib::search_once(&offline_client(), "java", Some("name"), true).await;
        assert_err!(result);
    }
}
