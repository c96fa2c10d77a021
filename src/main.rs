//! reqsnap: semantic comparison of compiled requirements snapshots
//!
//! Decides whether a freshly compiled lock file differs meaningfully from the
//! previous snapshot, ignoring compiler timestamps and the active marker.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use reqsnap::{
    cli,
    config::{AppConfig, CompareConfig, PruneConfig},
    model::Environment,
    pipeline::{exit_codes, OutputFormat},
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reqsnap")]
#[command(version)]
#[command(about = "Semantic comparison of compiled requirements snapshots", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No differences detected
    1  Differences detected (including a first snapshot with no predecessor)
    3  Error occurred

EXAMPLES:
    # Did the nightly recompile change anything?
    reqsnap compare ../requirements_backups/production_2024-06-01T03-00-00.txt -p . -e production

    # Show what changed
    reqsnap diff ../requirements_backups/production_2024-06-01T03-00-00.txt -p .

    # Keep only the ten most recent snapshots
    reqsnap prune -p . --keep 10")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Where the project and its backups live
#[derive(clap::Args)]
struct ProjectArgs {
    /// Project root (defaults to the current directory)
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// Environment tag (defaults to the config file, then local)
    #[arg(short, long, value_enum)]
    env: Option<Environment>,

    /// Backup directory, overriding the sibling `requirements_backups` convention
    #[arg(long, env = "REQSNAP_BACKUP_DIR")]
    backup_dir: Option<PathBuf>,
}

/// Arguments for the `compare` and `diff` subcommands
#[derive(clap::Args)]
struct CompareArgs {
    /// Newly compiled snapshot
    new: PathBuf,

    /// Compare against this snapshot instead of locating the previous one
    #[arg(long)]
    previous: Option<PathBuf>,

    #[command(flatten)]
    project: ProjectArgs,

    /// Output format
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Unchanged lines shown around each hunk
    #[arg(short = 'U', long)]
    context: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether a new snapshot differs from the previous one
    Compare {
        #[command(flatten)]
        args: CompareArgs,

        /// Include the unified diff when differences are found
        #[arg(long)]
        diff: bool,
    },

    /// Compare and print the unified diff of the raw files
    Diff(CompareArgs),

    /// Print the snapshot that precedes a new one
    Locate {
        /// Newly compiled snapshot
        new: PathBuf,

        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Print the backup path for a snapshot compiled now
    NewPath {
        #[command(flatten)]
        project: ProjectArgs,

        /// Do not create the backup directory
        #[arg(long)]
        no_create: bool,
    },

    /// Delete all but the most recent snapshots
    Prune {
        #[command(flatten)]
        project: ProjectArgs,

        /// Number of snapshots to keep (defaults to the config file, then 30)
        #[arg(short, long)]
        keep: Option<usize>,
    },

    /// Prepend the active marker to an accepted snapshot
    MarkActive {
        /// Snapshot to mark
        snapshot: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .reqsnap.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

/// Dispatch to command handlers, returning the process exit code.
fn run(cli: Cli) -> Result<i32> {
    let (mut app, loaded_from) = reqsnap::config::load_or_default(cli.config.as_deref());
    if let Some(path) = &loaded_from {
        tracing::debug!("using config {}", path.display());
    }
    app.output.quiet |= cli.quiet;

    match cli.command {
        Commands::Compare { args, diff } => run_compare(args, diff, app),
        Commands::Diff(args) => run_compare(args, true, app),

        Commands::Locate { new, project } => {
            let root = project_root(project.project.as_deref())?;
            apply_project_args(&mut app, &project);
            match cli::run_locate(&new, &root, project.env, &app)? {
                Some(previous) => println!("{}", previous.display()),
                None => tracing::info!("No snapshot precedes {}", new.display()),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::NewPath { project, no_create } => {
            let root = project_root(project.project.as_deref())?;
            apply_project_args(&mut app, &project);
            let now = chrono::Local::now().naive_local();
            let path = cli::run_new_path(&root, project.env, now, !no_create, &app)?;
            println!("{}", path.display());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Prune { project, keep } => {
            let project_root = project_root(project.project.as_deref())?;
            apply_project_args(&mut app, &project);
            let removed = cli::run_prune(PruneConfig {
                project_root,
                keep_recent: keep,
                app,
            })?;
            for path in &removed {
                println!("{}", path.display());
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::MarkActive { snapshot } => {
            if !cli::run_mark_active(&snapshot, &app)? {
                tracing::info!("{} is already active", snapshot.display());
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "reqsnap", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = reqsnap::config::generate_json_schema()
                .context("failed to serialize config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config_action(&action, cli.config.as_deref(), &app, loaded_from.as_deref())?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_compare(args: CompareArgs, include_diff: bool, mut app: AppConfig) -> Result<i32> {
    let project_root = project_root(args.project.project.as_deref())?;
    apply_project_args(&mut app, &args.project);
    if let Some(format) = args.output {
        app.output.format = format;
    }
    if args.output_file.is_some() {
        app.output.file = args.output_file;
    }
    if let Some(context) = args.context {
        app.diff.context_lines = context;
    }

    cli::run_compare(CompareConfig {
        new: args.new,
        previous: args.previous,
        project_root,
        environment: args.project.env,
        include_diff,
        app,
    })
}

fn run_config_action(
    action: &ConfigAction,
    explicit: Option<&Path>,
    app: &AppConfig,
    loaded_from: Option<&Path>,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if let Some(path) = loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(app).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            eprintln!("Config file search paths (in order):");
            for dir in reqsnap::config::search_dirs() {
                eprintln!("  {}", dir.display());
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in reqsnap::config::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match reqsnap::config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".reqsnap.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, reqsnap::config::generate_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}

/// Absolute project root, so the sibling backup directory always resolves.
fn project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => std::fs::canonicalize(path)
            .with_context(|| format!("project root {} is not accessible", path.display())),
        None => std::env::current_dir().context("cannot determine current directory"),
    }
}

fn apply_project_args(app: &mut AppConfig, args: &ProjectArgs) {
    if let Some(dir) = &args.backup_dir {
        app.backups.dir = Some(dir.clone());
    }
}
