//! raftview - terminal browser for a log server's stat/list API.
//!
//! Usage:
//!   raftview                                # follow http://localhost:8082/
//!   raftview --url http://logs:8082/        # another server
//!   raftview --from -1h --message timeout   # start with filters applied
//!   raftview --dimensions host-app          # group by hostname/application
//!   raftview --no-follow --log-file /tmp/raftview.log -v

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tikv_jemallocator::Jemalloc;
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use raftview::api::DimensionSet;
use raftview::client::{HttpLogSource, LogSource};
use raftview::poller::{DEFAULT_MAX_BACKOFF, PollConfig};
use raftview::query::{DEFAULT_PAGE_SIZE, DEFAULT_STAT_LIMIT, FilterState};
use raftview::tui::{App, AppState};
use raftview::util::parse_time;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// UI redraw and poll-check period.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Terminal browser for log statistics and entries.
#[derive(Parser)]
#[command(name = "raftview", about = "Log stat/list browser", version)]
struct Args {
    /// Base URL of the log server.
    #[arg(long, env = "RAFTVIEW_URL", default_value = "http://localhost:8082/")]
    url: String,

    /// Grouping dimensions: app-process or host-app.
    #[arg(long, env = "RAFTVIEW_DIMENSIONS", default_value = "app-process")]
    dimensions: DimensionSet,

    /// Initial lower time bound. Supported formats:
    /// - Relative: -1h, -30m, -2d
    /// - ISO 8601: 2026-02-07T17:00:00
    /// - Unix timestamp: 1738944000
    /// - Date time (UTC): 2026-02-07 07:00
    /// - Time only (today, UTC): 07:00
    #[arg(long, env = "RAFTVIEW_FROM", value_name = "TIME")]
    from: Option<String>,

    /// Initial upper time bound (same formats as --from).
    #[arg(long, env = "RAFTVIEW_TO", value_name = "TIME")]
    to: Option<String>,

    /// Initial message substring filter.
    #[arg(long, env = "RAFTVIEW_MESSAGE", value_name = "TEXT")]
    message: Option<String>,

    /// Entries per list page.
    #[arg(long, env = "RAFTVIEW_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Maximum stat rows requested from the server.
    #[arg(long, env = "RAFTVIEW_STAT_LIMIT", default_value_t = DEFAULT_STAT_LIMIT)]
    stat_limit: u32,

    /// Follow mode poll interval in seconds.
    #[arg(long, env = "RAFTVIEW_INTERVAL", default_value = "5")]
    interval: u64,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "RAFTVIEW_TIMEOUT", default_value = "10")]
    timeout: u64,

    /// Start paused instead of following new entries.
    #[arg(long, env = "RAFTVIEW_NO_FOLLOW")]
    no_follow: bool,

    /// Write logs to this file (the terminal is owned by the UI).
    #[arg(long, env = "RAFTVIEW_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes file logging. Without a log file nothing is installed.
fn init_logging(log_file: Option<&Path>, verbose: u8, quiet: bool) -> std::io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn build_filter(args: &Args) -> Result<FilterState, String> {
    let mut filter = FilterState::new(args.dimensions, args.page_size, args.stat_limit)
        .with_follow(!args.no_follow);

    if let Some(from) = &args.from {
        filter.set_from(Some(parse_time(from).map_err(|e| e.to_string())?));
    }
    if let Some(to) = &args.to {
        filter.set_to(Some(parse_time(to).map_err(|e| e.to_string())?));
    }
    if let Some(message) = &args.message {
        let message = message.trim();
        filter.set_message((!message.is_empty()).then(|| message.to_string()));
    }
    Ok(filter)
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref(), args.verbose, args.quiet) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    let filter = match build_filter(&args) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let source = match HttpLogSource::new(&args.url, Duration::from_secs(args.timeout.max(1))) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let interval = Duration::from_secs(args.interval.max(1));
    let poll = PollConfig {
        interval,
        max_backoff: DEFAULT_MAX_BACKOFF.max(interval),
    };

    tracing::info!(
        "raftview {} starting: server={}, dimensions={}, interval={}s",
        env!("CARGO_PKG_VERSION"),
        source.describe(),
        args.dimensions,
        interval.as_secs()
    );

    let state = AppState::new(filter, source.describe());
    let app = App::new(Box::new(source), state, poll);
    if let Err(e) = app.run(TICK_RATE) {
        tracing::error!(error = %e, "terminal error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
