use crate::{
    app::{App, Focus, SearchRequest},
    command::Command,
};

/// Work a command asks the host to do outside the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one search to the background worker.
    Search(SearchRequest),
    /// Open a link in a new browser window.
    OpenUrl(String),
}

/// Applies commands to the search view state
pub struct Executor;

impl Executor {
    /// Execute a command and return the side effects it requested, in order
    pub fn execute(app: &mut App, command: Command) -> Vec<Effect> {
        let mut effects = Vec::new();
        Self::execute_into(app, command, &mut effects);
        effects
    }

    fn execute_into(app: &mut App, command: Command, effects: &mut Vec<Effect>) {
        match command {
            Command::Quit => {
                app.should_quit = true;
                app.status_message = "Goodbye!".to_string();
            }

            Command::NextFocus => {
                app.next_focus();
                app.status_message = format!("Focus: {:?}", app.focus);
            }

            Command::FocusInput => {
                app.focus = Focus::Input;
            }

            Command::TypeChar(ch) => {
                app.query.push(ch);
            }

            Command::Backspace => {
                app.query.pop();
            }

            Command::ClearQuery => {
                app.query.clear();
            }

            Command::Submit => {
                if let Some(request) = app.begin_search() {
                    log::info!("Dispatching search #{} for {:?}", request.id, request.query);
                    effects.push(Effect::Search(request));
                } else if app.loading {
                    app.status_message = "A search is already in progress".to_string();
                }
            }

            Command::SelectUp => {
                app.select_previous();
            }

            Command::SelectDown => {
                app.select_next();
            }

            Command::ToggleExpand => {
                app.toggle_selected();
            }

            Command::ToggleRow(index) => {
                if index < app.results.len() {
                    app.selected = index;
                }
                app.toggle_expand(index);
            }

            Command::SortBy(key) => {
                app.toggle_sort(key);
            }

            // Link actions never touch the expansion state
            Command::Visit => match app.visit_target(app.selected) {
                Some(url) => {
                    app.status_message = format!("Opening {}", url);
                    effects.push(Effect::OpenUrl(url));
                }
                None => {
                    app.status_message = "No link available for this item".to_string();
                }
            },

            Command::OpenDownload(number) => match app.download_target(number) {
                Some(url) => {
                    app.status_message = format!("Opening {}", url);
                    effects.push(Effect::OpenUrl(url));
                }
                None => {
                    app.status_message = format!("No download #{} for this item", number);
                }
            },

            Command::Sequence(commands) => {
                for command in commands {
                    Self::execute_into(app, command, effects);
                    if app.should_quit {
                        break;
                    }
                }
            }
        }
    }
}
