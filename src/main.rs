use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use orgdir::headless::{self, HeadlessRequest, OutputFormat};
use orgdir_core::{Catalog, FilterKey};

#[derive(Parser)]
#[command(
    name = "orgdir",
    about = "Organization directory: keyword and faceted search in the terminal"
)]
struct Cli {
    /// Write debug logs to /tmp/orgdir-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Catalog file (TOML, YAML or JSON). Defaults to the built-in sample.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Page to open (or search, with --headless).
    #[arg(long)]
    page: Option<String>,

    /// Filter on every keystroke instead of on Enter.
    #[arg(long)]
    live: bool,

    /// Run one search and print the results instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Keyword for --headless.
    #[arg(long, requires = "headless")]
    query: Option<String>,

    /// Filter selection for --headless, e.g. `category=academic`. Repeatable.
    #[arg(long = "filter", value_name = "GROUP=VALUE", value_parser = parse_filter, requires = "headless")]
    filters: Vec<FilterKey>,

    /// Output format for --headless.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, requires = "headless")]
    format: OutputFormat,
}

fn parse_filter(raw: &str) -> Result<FilterKey, String> {
    FilterKey::parse(raw).ok_or_else(|| format!("expected GROUP=VALUE, got `{raw}`"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/orgdir-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("orgdir debug log started, tail -f /tmp/orgdir-debug.log");
    }

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::demo(),
    };

    if cli.headless {
        let request = HeadlessRequest {
            page: cli.page,
            query: cli.query,
            filters: cli.filters,
            format: cli.format,
        };
        return headless::run(&catalog, &request, &mut std::io::stdout().lock());
    }

    orgdir_tui::run(catalog, cli.live, cli.page.as_deref())
}
