//! CLI entry point for vaultfind

use std::io::IsTerminal;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use vaultfind::{
    ConsoleFormatter, Credentials, OutputConfig, SearchFilter, SearchReport, SecretLister,
    TreeWalker, VaultLister, WalkerConfig, collect_stats, print_json, print_stats, print_stats_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "vaultfind")]
#[command(about = "Recursively list secret paths in a Vault KV v2 mount")]
#[command(version)]
struct Args {
    /// Only show secrets whose path contains this text (case-insensitive)
    search: Option<String>,

    /// Verbose mode (debug logging to stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Mountpoint to search for secrets
    #[arg(short, long, default_value = "secret")]
    mount: String,

    /// Skip keys matching pattern, pruning whole directories (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Number of parallel workers for listing sibling directories
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "1")]
    jobs: usize,

    /// Keep Vault's listing order instead of sorting keys
    #[arg(long = "unsorted")]
    unsorted: bool,

    /// Do not print the "Found the following secrets:" line
    #[arg(long = "no-header")]
    no_header: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Show statistics about the matching secrets instead of listing them
    #[arg(long = "stats")]
    stats: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "warn,vaultfind=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Report a failure on stderr and exit with status 1.
fn exit_with(err: vaultfind::Error) -> ! {
    if err.is_configuration() {
        eprintln!("vaultfind: {}", err);
    } else {
        eprintln!("vaultfind: error listing secrets: {}", err);
    }
    process::exit(1);
}

/// Resolve credentials, connect and walk the whole mount.
///
/// Returns the normalized mount and every secret path beneath it.
fn list_secrets(args: &Args) -> vaultfind::Result<(String, Vec<String>)> {
    let credentials = Credentials::from_env()?;
    let lister = VaultLister::connect(&credentials, &args.mount)?;

    let walker_config = WalkerConfig {
        sort_children: !args.unsorted,
        ignore_patterns: args.ignore.clone(),
        parallel_workers: args.jobs,
    };
    let walker = TreeWalker::new(lister, walker_config);
    let secrets = walker.walk("")?;

    Ok((walker.lister().mount().to_string(), secrets))
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let (mount, secrets) = list_secrets(&args).unwrap_or_else(|e| exit_with(e));

    let search = args.search.as_deref().unwrap_or("");
    let filter = SearchFilter::new(search);
    let use_color = should_use_color(args.color);

    let result = if args.stats {
        let stats = collect_stats(&mount, filter.apply(&secrets));
        if args.json {
            print_stats_json(&stats)
        } else {
            print_stats(&stats, use_color)
        }
    } else if args.json {
        print_json(&SearchReport::new(&mount, search, &secrets, &filter))
    } else {
        let formatter = ConsoleFormatter::new(OutputConfig {
            use_color,
            show_header: !args.no_header,
        });
        formatter.print(&mount, &secrets, &filter).map(|_| ())
    };

    if let Err(e) = result {
        eprintln!("vaultfind: error writing output: {}", e);
        process::exit(1);
    }
}
