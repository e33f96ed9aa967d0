use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "solution-finder")]
#[command(about = "Search assessment recommendations from the terminal, with the proxy that serves them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the interactive search view (default)
    Run {
        /// Proxy endpoint to search against
        #[arg(short, long)]
        endpoint: Option<String>,
    },
    /// Run the proxy endpoint
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Recommendation service URL
        #[arg(short, long)]
        upstream: Option<String>,
    },
    /// Generate a screenshot from a JSON configuration
    Screenshot {
        /// Path to the JSON configuration file
        #[arg(short, long)]
        config: String,
        /// Output file for the screenshot (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Terminal width for rendering
        #[arg(long, default_value = "120")]
        width: u16,
        /// Terminal height for rendering
        #[arg(long, default_value = "40")]
        height: u16,
    },
    /// Execute a command against a configuration and output the result
    Execute {
        /// Path to the JSON configuration file
        #[arg(short, long)]
        config: String,
        /// Command to execute (e.g., "sort:name", "row:1", "submit")
        #[arg(short = 'x', long)]
        command: String,
        /// Output file for the resulting configuration (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Run one search and print the results as text
    Search {
        /// Free-text query
        query: String,
        /// Field to sort by (e.g., "name", "test_types", "remote_testing")
        #[arg(short, long)]
        sort: Option<String>,
        /// Sort descending instead of ascending
        #[arg(short, long)]
        descending: bool,
        /// Proxy endpoint to search against
        #[arg(short, long)]
        endpoint: Option<String>,
    },
}
