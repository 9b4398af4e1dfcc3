use std::fmt;
use std::time::Duration;

use services::{AppServices, Clock, RemoteConfig, SessionIntent, ViewModel};
use tokio::io::{AsyncBufReadExt, BufReader};

mod terminal;

use terminal::Command as Input;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidTimeout { raw: String },
    TimeoutWithoutApi,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout-secs value: {raw}"),
            ArgsError::TimeoutWithoutApi => {
                write!(f, "--timeout-secs needs --api-url or SCENARIO_API_URL")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play  [--db <sqlite_url>] [--api-url <url>] [--timeout-secs <n>]");
    eprintln!("  cargo run -p app -- list  [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- clear [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://scenarios.sqlite3");
    eprintln!("  no --api-url: scenarios come from the built-in templates");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SCENARIO_DB_URL, SCENARIO_API_URL, SCENARIO_API_TIMEOUT_SECS, RUST_LOG");
}

const DEFAULT_DB_URL: &str = "sqlite://scenarios.sqlite3";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    List,
    Clear,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "list" => Some(Self::List),
            "clear" => Some(Self::Clear),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    remote: Option<RemoteConfig>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        Self::parse_with(
            args,
            std::env::var("SCENARIO_DB_URL").ok(),
            RemoteConfig::from_env(),
        )
    }

    fn parse_with(
        args: &mut impl Iterator<Item = String>,
        db_env: Option<String>,
        remote_env: Option<RemoteConfig>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = db_env.map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut remote = remote_env;
        let mut timeout = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    remote = Some(RemoteConfig::new(value.trim()));
                }
                "--timeout-secs" => {
                    let value = require_value(args, "--timeout-secs")?;
                    let secs: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidTimeout { raw: value.clone() })?;
                    timeout = Some(Duration::from_secs(secs));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        match (remote.as_mut(), timeout) {
            (Some(config), Some(timeout)) => config.timeout = Some(timeout),
            (None, Some(_)) => return Err(ArgsError::TimeoutWithoutApi),
            _ => {}
        }

        Ok(Self { db_url, remote })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means play.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&parsed.db_url)?;
    tracing::debug!(db = %parsed.db_url, remote = parsed.remote.is_some(), "opening scenario store");
    let mut services =
        AppServices::new_sqlite(&parsed.db_url, Clock::default_clock(), parsed.remote).await?;
    let workflow = services.workflow_mut();

    match cmd {
        Command::Play => play(workflow).await,
        Command::List => {
            let view = workflow.dispatch(SessionIntent::Start).await?;
            print_view(&view)?;
            Ok(())
        }
        Command::Clear => {
            workflow.dispatch(SessionIntent::ClearAll).await?;
            println!("All scenarios cleared.");
            Ok(())
        }
    }
}

async fn play(workflow: &mut services::ScenarioWorkflow) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = workflow.dispatch(SessionIntent::Start).await?;
    print_view(&view)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let intent = match terminal::parse_command(&line, &view) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => {
                println!("{}", terminal::help(&view));
                continue;
            }
            Ok(Input::Intent(intent)) => intent,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        if matches!(intent, SessionIntent::Generate { .. }) {
            println!("Generating scenario...");
        }
        match workflow.dispatch(intent).await {
            Ok(next) => {
                view = next;
                print_view(&view)?;
            }
            // The current screen stays valid; report and keep going.
            Err(err) => println!("error: {err}"),
        }
    }
    Ok(())
}

fn print_view(view: &ViewModel) -> Result<(), std::fmt::Error> {
    let mut out = String::new();
    terminal::render(view, &mut out)?;
    println!("\n{out}");
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
