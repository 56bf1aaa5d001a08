use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use bsviz::api;
use bsviz::client::{LocalService, SearchClient, SearchService};
use bsviz::config::CONFIG;
use bsviz::session::{Outcome, Session};
use bsviz::view::TerminalView;

#[derive(Parser)]
#[command(name = "bsviz", about = "Step-by-step binary search visualizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the search service (POST /search)
    Serve {
        #[arg(long)]
        addr: Option<String>,
        /// Directory served at / for a browser UI
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Animate a single search in the terminal
    Search {
        /// Whitespace-separated numbers, e.g. "5 3 1 4"
        #[arg(long)]
        array: String,
        #[arg(long)]
        target: String,
        #[command(flatten)]
        backend: Backend,
    },
    /// Read `ARRAY | TARGET` lines; each line interrupts the running search
    Repl {
        #[command(flatten)]
        backend: Backend,
    },
}

#[derive(Args)]
struct Backend {
    /// Base URL of the search service
    #[arg(long, conflicts_with = "local")]
    server: Option<String>,
    /// Compute steps in-process instead of calling a server
    #[arg(long)]
    local: bool,
    /// Per-phase delay in milliseconds, clamped to 1000..=1500
    #[arg(long)]
    delay_ms: Option<u64>,
}

impl Backend {
    fn delay(&self) -> Duration {
        self.delay_ms
            .map(Duration::from_millis)
            .unwrap_or(CONFIG.step_delay)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (also captures log crate records)
    tracing_subscriber::fmt()
        .with_max_level(CONFIG.log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    for warning in &CONFIG.warnings {
        tracing::warn!("{warning}");
    }

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { addr, static_dir } => {
            let addr = addr.unwrap_or_else(|| CONFIG.bind_addr.clone());
            let static_dir = static_dir.or_else(|| CONFIG.static_dir.clone());
            api::serve(&addr, static_dir).await
        }
        Command::Search {
            array,
            target,
            backend,
        } => {
            let delay = backend.delay();
            if backend.local {
                search_once(LocalService, &array, &target, delay).await
            } else {
                let url = backend.server.unwrap_or_else(|| CONFIG.server_url.clone());
                search_once(SearchClient::new(&url), &array, &target, delay).await
            }
        }
        Command::Repl { backend } => {
            let delay = backend.delay();
            if backend.local {
                repl(LocalService, delay).await
            } else {
                let url = backend.server.unwrap_or_else(|| CONFIG.server_url.clone());
                repl(SearchClient::new(&url), delay).await
            }
        }
    }
}

async fn search_once<S: SearchService>(
    service: S,
    array: &str,
    target: &str,
    delay: Duration,
) -> anyhow::Result<()> {
    let mut session = Session::new(service, TerminalView::stdout(), delay);
    session.start(array, target).await?;
    match session.finish().await {
        Some(Outcome::Failed(reason)) => anyhow::bail!(reason),
        outcome => {
            tracing::debug!("search finished: {:?}", outcome);
            Ok(())
        }
    }
}

async fn repl<S: SearchService>(service: S, delay: Duration) -> anyhow::Result<()> {
    let mut session = Session::new(service, TerminalView::stdout(), delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("enter `ARRAY | TARGET`, `reset` or `quit`");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "reset" => session.reset().await,
            _ => {
                let (array, target) = line.split_once('|').unwrap_or((line, ""));
                // invalid input is already on screen
                let _ = session.start(array, target).await;
            }
        }
    }

    session.finish().await;
    Ok(())
}
