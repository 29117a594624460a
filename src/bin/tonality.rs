//! Command-line front end: inspect, set and watch the persisted theme.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use tonality::{
    ClassList, FileStore, OsSignal, PreferenceStore, ResolvedTheme, ResolverConfig,
    ThemePreference, ThemeResolver,
};

#[derive(Parser)]
#[command(name = "tonality", about = "Persisted light/dark/system theme preference")]
struct Cli {
    /// Preferences file (defaults to the user config directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Key the preference is stored under
    #[arg(long, global = true, default_value = tonality::DEFAULT_STORAGE_KEY)]
    key: String,

    /// Log resolver activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the stored preference and the theme it resolves to
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store a new preference
    Set { preference: ThemePreference },
    /// Print the resolved theme each time the OS setting changes
    Watch {
        /// Seconds between OS checks
        #[arg(long, default_value_t = 2)]
        interval: u64,
    },
}

type Resolver = ThemeResolver<FileStore, OsSignal, ClassList>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tonality=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let store = FileStore::new(cli.store.unwrap_or_else(default_store_path));
    let config = ResolverConfig::new().storage_key(cli.key.as_str());
    let mut resolver =
        Resolver::with_config(config, store.clone(), OsSignal::new(), ClassList::new());

    match cli.command.unwrap_or(Command::Show { json: false }) {
        Command::Show { json } => show(&resolver, json),
        Command::Set { preference } => {
            resolver.set_theme(preference);
            // The resolver swallows write failures; the CLI should not.
            match store.get(&cli.key) {
                Ok(Some(stored)) if stored == preference.as_str() => show(&resolver, false),
                Ok(_) => {
                    eprintln!("{} preference was not saved", style("error:").red().bold());
                    ExitCode::FAILURE
                }
                Err(e) => {
                    eprintln!("{} {}", style("error:").red().bold(), e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Watch { interval } => watch(&resolver, Duration::from_secs(interval.max(1))),
    }
}

fn show(resolver: &Resolver, json: bool) -> ExitCode {
    if json {
        let value = serde_json::json!({
            "theme": resolver.theme(),
            "resolved": resolver.resolved(),
        });
        println!("{value}");
    } else {
        println!(
            "{} {} {}",
            style(resolver.theme()).bold(),
            style("→").dim(),
            styled(resolver.resolved())
        );
    }
    ExitCode::SUCCESS
}

fn watch(resolver: &Resolver, interval: Duration) -> ExitCode {
    let mut last = resolver.resolved();
    println!("{}", styled(last));
    loop {
        thread::sleep(interval);
        if resolver.signal().refresh() && resolver.resolved() != last {
            last = resolver.resolved();
            println!("{}", styled(last));
        }
    }
}

fn styled(theme: ResolvedTheme) -> console::StyledObject<&'static str> {
    match theme {
        ResolvedTheme::Light => style(theme.as_str()).black().on_white(),
        ResolvedTheme::Dark => style(theme.as_str()).white().on_black(),
    }
}

fn default_store_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("tonality").join("preferences.json")
}
