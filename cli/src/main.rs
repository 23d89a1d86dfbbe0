use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use detect_completion_core::{CompletionRequest, OptionList, complete};
use detect_completion_discovery::output::{
    OutputFormat, format_option_report, format_options, format_status,
};
use detect_completion_discovery::report::{OptionReport, StatusReport};
use detect_completion_discovery::cache::BUILDING_NOTICE;
use detect_completion_discovery::{CacheState, CompletionConfig, OptionCache};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod shell;

use shell::Shell;

#[derive(Debug, Parser)]
#[command(name = "detect-complete")]
#[command(about = "Shell completion for Synopsys Detect options")]
#[command(version)]
struct Cli {
    /// Configuration file (default: $DETECT_COMPLETION_CONFIG, then
    /// ~/.config/detect-completion/config.yaml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print completions for the word under the cursor (called by the shell hook).
    Complete(CompleteArgs),
    /// Print the shell hook that registers completion.
    Init(InitArgs),
    /// Rebuild the option cache from the newest Detect artifact.
    Refresh(RefreshArgs),
    /// Print the cached option names.
    Options(FormatArgs),
    /// Show the artifact and option cache in use.
    Status(FormatArgs),
    /// Show how an option's value is completed.
    Explain(ExplainArgs),
}

#[derive(Debug, Args)]
struct CompleteArgs {
    /// The word before the one being completed.
    #[arg(allow_hyphen_values = true)]
    previous: Option<String>,
    /// The word being completed, as typed so far.
    #[arg(allow_hyphen_values = true)]
    current: Option<String>,
}

#[derive(Debug, Args)]
struct InitArgs {
    /// Shell to generate the hook for.
    #[arg(value_enum)]
    shell: Shell,
    /// Command name to register for (default: from configuration).
    #[arg(long)]
    command_name: Option<String>,
}

#[derive(Debug, Args)]
struct RefreshArgs {
    /// Rebuild even if the cache is newer than the artifact.
    #[arg(long)]
    force: bool,
}

#[derive(Debug, Args)]
struct FormatArgs {
    /// Output format.
    #[arg(long, value_enum, default_value = "plain")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ExplainArgs {
    /// Option name, with or without leading dashes.
    #[arg(allow_hyphen_values = true)]
    option: String,
    /// Output format.
    #[arg(long, value_enum, default_value = "plain")]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    // `complete` shares stderr with the user's terminal
    let default_level = match (&cli.command, cli.verbose) {
        (_, true) => "debug",
        (Command::Complete(_), false) => "off",
        _ => "warn",
    };
    init_tracing(default_level);

    let result = match cli.command {
        Command::Complete(args) => {
            run_complete(cli.config, args);
            Ok(())
        }
        Command::Init(args) => run_init(cli.config, args),
        Command::Refresh(args) => run_refresh(cli.config, args),
        Command::Options(args) => run_options(cli.config, args),
        Command::Status(args) => run_status(cli.config, args),
        Command::Explain(args) => run_explain(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<CompletionConfig, String> {
    CompletionConfig::resolve(path.as_deref()).map_err(|e| format!("Failed to load config: {e}"))
}

fn load_cache(config: &CompletionConfig) -> Result<OptionCache, String> {
    OptionCache::from_config(config).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// complete: never fails, an empty answer is a valid answer
// ---------------------------------------------------------------------------

fn run_complete(config_path: Option<PathBuf>, args: CompleteArgs) {
    let request = CompletionRequest::new(
        args.previous.as_deref().unwrap_or_default(),
        args.current.as_deref().unwrap_or_default(),
    );
    debug!(
        option = request.option(),
        fragment = request.fragment(),
        "Completing"
    );

    let config = load_config(config_path).unwrap_or_else(|err| {
        debug!(error = %err, "Falling back to default configuration");
        CompletionConfig::default()
    });

    let completion = match load_cache(&config) {
        Ok(cache) => {
            if request.category().is_none() {
                announce_rebuild(&cache);
            }
            complete(&request, &cache)
        }
        Err(err) => {
            debug!(error = %err, "Option cache unavailable");
            complete(&request, &OptionList::Available(Vec::new()))
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = stdout.write_all(shell::render(&completion).as_bytes()) {
        debug!(error = %err, "Failed to write completions");
    }
}

/// Tells the user a slow rebuild is about to run.
fn announce_rebuild(cache: &OptionCache) {
    let Some(artifact) = cache.locate() else {
        return;
    };
    if cache.state(&artifact) != CacheState::Fresh {
        eprintln!("\n{BUILDING_NOTICE}");
    }
}

fn run_init(config_path: Option<PathBuf>, args: InitArgs) -> Result<(), String> {
    let command_name = match args.command_name {
        Some(name) => name,
        None => load_config(config_path)?.command_name,
    };
    let bin = std::env::current_exe()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "detect-complete".to_string());
    print!("{}", shell::hook(args.shell, &command_name, &bin));
    Ok(())
}

fn run_refresh(config_path: Option<PathBuf>, args: RefreshArgs) -> Result<(), String> {
    let config = load_config(config_path)?;
    let cache = load_cache(&config)?;
    let artifact = cache.require_artifact().map_err(|e| e.to_string())?;

    if !args.force && cache.state(&artifact) == CacheState::Fresh {
        let count = cache.read(&artifact).map_err(|e| e.to_string())?.len();
        // an empty fresh cache records a failed attempt
        if count > 0 {
            println!(
                "Option cache for '{}' is up to date ({count} option(s)).",
                artifact.path.display()
            );
            return Ok(());
        }
    }

    eprintln!("{BUILDING_NOTICE}");
    let options = cache.refresh(&artifact).map_err(|e| e.to_string())?;
    println!(
        "Cached {} option(s) for '{}'.",
        options.len(),
        artifact.path.display()
    );
    Ok(())
}

fn run_options(config_path: Option<PathBuf>, args: FormatArgs) -> Result<(), String> {
    let config = load_config(config_path)?;
    let cache = load_cache(&config)?;
    match cache.load_options() {
        OptionList::Available(options) => {
            print!("{}", format_options(&options, args.format)?);
            Ok(())
        }
        OptionList::Unavailable(notice) => Err(notice),
    }
}

fn run_status(config_path: Option<PathBuf>, args: FormatArgs) -> Result<(), String> {
    let config = load_config(config_path)?;
    let cache = load_cache(&config)?;
    let report = StatusReport::collect(&cache);
    print!("{}", format_status(&report, args.format)?);
    Ok(())
}

fn run_explain(args: ExplainArgs) -> Result<(), String> {
    let report = OptionReport::explain(&args.option);
    print!("{}", format_option_report(&report, args.format)?);
    Ok(())
}
