//! rdr command-line entry point.
//!
//! Commands resolve their settings snapshot at start, call the API client,
//! and write through a renderer. Renderers never terminate the process;
//! `main` alone translates outcomes into the exit code, so logging goes to
//! stderr and stdout stays machine-consumable.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::Globals;
use output::{JsonRenderer, Outcome};

/// Read and search the web in LLM-friendly formats.
#[derive(Debug, Parser)]
#[command(name = "rdr")]
#[command(about = "CLI client for LLM-friendly web reading and search")]
#[command(long_about = "rdr wraps a remote reader/search API: it converts any \
URL into LLM-friendly input and searches the web, rendering results as JSON \
or Markdown.\n\nQuick start:\n  rdr read --url \"https://example.com\"\n  \
rdr search --query \"rust async runtime\"")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (overrides config).
    #[arg(long, short = 'a', global = true)]
    api_base: Option<String>,

    /// API key (overrides config).
    #[arg(long, short = 'k', global = true)]
    api_key: Option<String>,

    /// Output format: json or markdown.
    #[arg(long, short = 'o', global = true)]
    output: Option<String>,

    /// Verbose output.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract and convert content from URLs.
    #[command(visible_alias = "r")]
    Read(commands::read::ReadArgs),

    /// Search the web with LLM-friendly results.
    #[command(visible_alias = "s")]
    Search(commands::search::SearchArgs),

    /// Manage configuration.
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli).await {
        Ok(Outcome::Success) => 0,
        Ok(Outcome::Failure) => 1,
        Err(err) => {
            // Failed before any renderer existed; fall back to the JSON
            // error envelope so scripts still get a tagged failure.
            let _ = JsonRenderer::new().render_error(&err.to_string());
            1
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<Outcome> {
    let globals = Globals { api_base: cli.api_base, api_key: cli.api_key, output: cli.output };

    match cli.command {
        Commands::Read(args) => commands::read::run(&globals, args).await,
        Commands::Search(args) => commands::search::run(&globals, args).await,
        Commands::Config(args) => commands::config::run(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_read_flags() {
        let cli = Cli::parse_from([
            "rdr", "read", "-u", "https://example.com", "--post", "--no-cache", "-F", "html",
        ]);
        let Commands::Read(args) = cli.command else { panic!("expected read") };
        assert_eq!(args.url.as_deref(), Some("https://example.com"));
        assert!(args.post);
        assert!(args.no_cache);
        assert_eq!(args.format.as_deref(), Some("html"));
    }

    #[test]
    fn test_parse_search_with_repeated_sites() {
        let cli = Cli::parse_from([
            "rdr", "s", "-q", "ai news", "--site", "a.example", "--site", "b.example", "-l", "3",
        ]);
        let Commands::Search(args) = cli.command else { panic!("expected search") };
        assert_eq!(args.query, "ai news");
        assert_eq!(args.site, ["a.example", "b.example"]);
        assert_eq!(args.limit, Some(3));
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from([
            "rdr", "-o", "markdown", "-k", "secret", "read", "-u", "https://example.com",
        ]);
        assert_eq!(cli.output.as_deref(), Some("markdown"));
        assert_eq!(cli.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::parse_from(["rdr", "config", "set", "timeout", "60"]);
        let Commands::Config(args) = cli.command else { panic!("expected config") };
        let commands::config::ConfigAction::Set { key, value } = args.action else {
            panic!("expected set")
        };
        assert_eq!(key, "timeout");
        assert_eq!(value, "60");
    }
}
