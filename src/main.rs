//! scale-console
//!
//! Watches a horizontally scaled service through its load balancer.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────── scale-console ────────────────────────────┐
//!   │                                                                       │
//!   │  ┌──────────┐  tick   ┌───────────┐  GET /api/   ┌───────────────┐    │
//!   │  │  poll    │────────▶│   http    │─────────────▶│ load balancer │────┼──▶ backends
//!   │  │scheduler │         │  client   │◀─────────────│               │    │
//!   │  └──────────┘         └─────┬─────┘  JSON        └───────────────┘    │
//!   │                             │                                         │
//!   │                             ▼                                         │
//!   │                      ┌─────────────┐   watch    ┌──────────┐          │
//!   │                      │ StatusModel │───────────▶│  render  │──▶ stdout│
//!   │                      └─────────────┘            └──────────┘          │
//!   │                                                      ▲                │
//!   │  stdin ──▶ JobField ──▶ EnqueueHandler ──▶ notifications              │
//!   │                             │                                         │
//!   │                             └──▶ GET /api/enqueue?job=...             │
//!   └───────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use scale_console::actions::{JobField, SubmitPhase};
use scale_console::config::{self, validate_config, ConsoleConfig};
use scale_console::lifecycle::{signals, Console, Shutdown};
use scale_console::observability::logging;
use scale_console::render;
use scale_console::state::ViewState;

/// Notifications kept on screen below the status block.
const RECENT_NOTIFICATIONS: usize = 5;

#[derive(Parser)]
#[command(name = "scale-console")]
#[command(about = "Watch load distribution and session affinity behind a load balancer", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the load balancer (overrides the config file).
    #[arg(short, long)]
    url: Option<String>,

    /// Poll period in milliseconds (overrides the config file).
    #[arg(short, long)]
    interval_ms: Option<u64>,
}

fn resolve_config(cli: &Cli) -> Result<ConsoleConfig, Box<dyn std::error::Error>> {
    let mut config = config::load_or_default(cli.config.as_deref())?;
    if let Some(url) = &cli.url {
        config.target.base_url = url.clone();
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.poll.interval_ms = interval_ms;
    }
    validate_config(&config).map_err(config::ConfigError::Validation)?;
    Ok(config)
}

struct Screen {
    interactive: bool,
    banner: String,
    recent: VecDeque<String>,
}

impl Screen {
    fn draw(&self, view: &ViewState, phase: SubmitPhase) {
        let mut out = std::io::stdout().lock();
        if self.interactive {
            let _ = writeln!(out, "\x1b[2J\x1b[H{}", self.banner);
        }
        let _ = write!(out, "{}", render::render_status(view));
        if self.interactive {
            if let Some(line) = render::render_enqueue_phase(phase) {
                let _ = writeln!(out, "{}", line);
            }
            for line in &self.recent {
                let _ = writeln!(out, "{}", line);
            }
        }
        let _ = out.flush();
    }

    fn push_notification(&mut self, line: String) {
        if !self.interactive {
            println!("{}", line);
        }
        self.recent.push_back(line);
        while self.recent.len() > RECENT_NOTIFICATIONS {
            self.recent.pop_front();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    logging::init_logging(&config.observability);

    tracing::info!("scale-console v{} starting", env!("CARGO_PKG_VERSION"));

    let mut console = Console::start(config).await?;

    let shutdown = Shutdown::new();
    let mut stop = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown.clone());

    let mut field = JobField::new(console.config.enqueue.default_job.clone());
    let mut screen = Screen {
        interactive: std::io::stdout().is_terminal(),
        banner: render::render_banner(
            console.client.base_url().as_str(),
            console.config.poll.interval_ms,
            field.value(),
        ),
        recent: VecDeque::new(),
    };
    if !screen.interactive {
        print!("{}", screen.banner);
    }

    let mut view = console.poller.subscribe();
    screen.draw(&view.borrow_and_update().clone(), console.enqueue.phase());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            _ = stop.recv() => break,
            changed = view.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = view.borrow_and_update().clone();
                screen.draw(&state, console.enqueue.phase());
            }
            Some(note) = console.notifications.next() => {
                screen.push_notification(render::render_notification(&note));
                let state = view.borrow().clone();
                screen.draw(&state, console.enqueue.phase());
            }
            line = lines.next_line(), if input_open => match line {
                Ok(Some(line)) => {
                    let job = field.submit_line(&line);
                    console.enqueue.spawn_submit(job);
                    let state = view.borrow().clone();
                    screen.draw(&state, console.enqueue.phase());
                }
                Ok(None) => {
                    tracing::debug!("Input closed; enqueue disabled");
                    input_open = false;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read input; enqueue disabled");
                    input_open = false;
                }
            },
        }
    }

    if shutdown.is_triggered() {
        tracing::info!("Stopping on signal");
    } else {
        tracing::info!("Status channel closed; stopping");
    }

    let leftover = console.stop().await;
    for note in leftover {
        println!("{}", render::render_notification(&note));
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
