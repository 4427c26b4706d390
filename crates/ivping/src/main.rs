//! Ivping launcher
//!
//! Browse the host spreadsheet in a terminal table, or run one-shot commands
//! (list, ping, ssh, config) from scripts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ivping_core::DataDir;
use ivping_logging::LogConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

mod cli;

use cli::context::AppContext;

#[derive(Parser, Debug)]
#[command(
    name = "ivping",
    version,
    about = "Browse network hosts from a spreadsheet and launch ping or SSH gateway sessions"
)]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Settings file (defaults to <data dir>/ivping.toml)
    #[arg(long, global = true, env = "IVPING_CONFIG")]
    config: Option<PathBuf>,

    /// Host spreadsheet (overrides the settings file and the default location)
    #[arg(long, global = true)]
    hosts_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive host table (default)
    Tui,

    /// Print the host list
    List(cli::list::ListArgs),

    /// Open a ping console for a host
    Ping(cli::actions::PingArgs),

    /// Open the SSH web gateway for a switch or router
    Ssh(cli::actions::SshArgs),

    /// Show resolved paths and effective settings
    Config(cli::config::ConfigArgs),
}

fn run_command(command: Commands, ctx: &AppContext) -> Result<()> {
    match command {
        Commands::Tui => cli::tui::run(ctx),
        Commands::List(args) => cli::list::run(args, ctx),
        Commands::Ping(args) => cli::actions::run_ping(args, ctx),
        Commands::Ssh(args) => cli::actions::run_ssh(args, ctx),
        Commands::Config(args) => cli::config::run(args, ctx),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let data_dir = DataDir::from_env();

    // stderr shares the screen with the TUI, so keep it quiet there
    let log_config = LogConfig {
        app_name: "ivping",
        verbose: cli.verbose,
        tui_mode: matches!(command, Commands::Tui),
        log_dir: Some(data_dir.logs_dir()),
    };
    if let Err(err) = ivping_logging::init_logging(log_config) {
        eprintln!("Warning: logging disabled: {:#}", err);
    }
    debug!(data_dir = %data_dir.root().display(), "Resolved data directory");

    let result = AppContext::load(data_dir, cli.config, cli.hosts_file)
        .and_then(|ctx| run_command(command, &ctx));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}
