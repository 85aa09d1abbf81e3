mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use cmd::resolve::Format;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "promote",
    about = "Promote a package between release channels (edge -> beta -> candidate -> stable)",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .promote/ or .git/)
    #[arg(long, global = true, env = "PROMOTE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default .promote/config.yaml
    Init {
        /// Package to promote (repeatable)
        #[arg(long = "package", value_name = "NAME")]
        packages: Vec<String>,
    },

    /// List the available promotion choices
    Choices,

    /// Resolve a promotion choice into channels and track without promoting
    Resolve {
        /// One of "edge -> beta", "beta -> candidate", "candidate -> stable"
        #[arg(long)]
        choice: String,
        /// Branch or tag the promotion runs on
        #[arg(long = "ref", env = "GITHUB_REF_NAME", value_name = "REF")]
        ref_name: String,
        /// Output format for non-JSON output
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Gate on the ref, resolve the choice and promote every package
    Run {
        /// One of "edge -> beta", "beta -> candidate", "candidate -> stable"
        #[arg(long)]
        choice: String,
        /// Branch or tag the promotion runs on
        #[arg(long = "ref", env = "GITHUB_REF_NAME", value_name = "REF")]
        ref_name: String,
        /// Package to promote, overriding the configured list (repeatable)
        #[arg(long = "package", value_name = "NAME")]
        packages: Vec<String>,
        /// Print the publisher commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show or validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Run { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { packages } => cmd::init::run(&root, packages, cli.json),
        Commands::Choices => cmd::choices::run(cli.json),
        Commands::Resolve {
            choice,
            ref_name,
            format,
        } => cmd::resolve::run(&root, &choice, &ref_name, format, cli.json),
        Commands::Run {
            choice,
            ref_name,
            packages,
            dry_run,
        } => cmd::run::run(&root, choice, ref_name, packages, dry_run, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
