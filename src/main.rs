use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::OpenOptions, io, time::Duration};
use tokio::sync::mpsc;

use solution_finder::{
    app::App,
    async_task::{self, Task, TaskResult},
    cli::{Cli, Commands},
    client::SearchClient,
    config::{Config, LOG_FILE_VAR},
    error::Result,
    event,
    executor::Executor,
    main_lib, proxy, screenshot, ui,
};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run { endpoint: None });

    match command {
        Commands::Serve { port, upstream } => {
            init_stderr_logging();
            let config = Config::load()?.with_port(port).with_upstream(upstream);
            proxy::start_server(&config.proxy).await
        }
        Commands::Run { endpoint } => {
            init_file_logging()?;
            let config = Config::load()?.with_endpoint(endpoint);
            run_interactive(&config).await
        }
        Commands::Screenshot {
            config,
            output,
            width,
            height,
        } => screenshot::generate_screenshot(&config, output.as_deref(), width, height),
        Commands::Execute {
            config,
            command,
            output,
        } => main_lib::execute_command(&config, &command, output.as_deref()),
        Commands::Search {
            query,
            sort,
            descending,
            endpoint,
        } => {
            init_file_logging()?;
            let config = Config::load()?.with_endpoint(endpoint);
            let client = SearchClient::new(reqwest::Client::new(), config.client.endpoint);
            let text = main_lib::search_once(&client, &query, sort.as_deref(), descending).await?;
            println!("{}", text);
            Ok(())
        }
    }
}

/// The server logs to stderr, `RUST_LOG` overrides the default level.
fn init_stderr_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Terminal modes own the screen, so they only log when a log file is named.
fn init_file_logging() -> Result<()> {
    if let Ok(log_file) = std::env::var(LOG_FILE_VAR) {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .filter_level(log::LevelFilter::Debug)
            .init();

        log::info!("Solution Finder starting up");
    }
    Ok(())
}

async fn run_interactive(config: &Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(terminal: &mut Tui, config: &Config) -> Result<()> {
    let mut app = App::new();

    // Setup async task channels
    let (task_sender, task_receiver) = mpsc::channel::<Task>(32);
    let (result_sender, mut result_receiver) = mpsc::channel::<TaskResult>(32);

    // Start background worker
    let client = SearchClient::new(reqwest::Client::new(), config.client.endpoint.clone());
    log::info!("📤 main: Searching against {}", client.endpoint());
    let worker_handle = tokio::spawn(async_task::run_worker(task_receiver, result_sender, client));

    // Main application loop
    let tick_rate = Duration::from_millis(250);
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if crossterm::event::poll(tick_rate)? {
            let terminal_event = crossterm::event::read()?;
            if let Some(command) = event::command_for_event(&terminal_event, &app) {
                log::debug!("⌨️ main: {}", command);
                let effects = Executor::execute(&mut app, command);
                main_lib::apply_effects(&mut app, effects, &task_sender);
            }
        }

        // Handle async task results
        while let Ok(result) = result_receiver.try_recv() {
            log::debug!("📨 main: Received async task result: {:?}", result);
            main_lib::handle_task_result(&mut app, result);
        }

        if app.should_quit {
            break;
        }
    }

    worker_handle.abort();
    Ok(())
}
