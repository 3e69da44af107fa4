use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use evm_coin_info::cli::coin_info::display_error;
use evm_coin_info::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Resolve the EVM coin info without storing it
    Resolve,
    /// Resolve the EVM coin info and store it
    Init {
        /// Overwrite an already stored record
        #[arg(long)]
        force: bool,
    },
    /// Display the stored EVM coin info
    Show,
}

impl From<Commands> for evm_coin_info::AppCommand {
    fn from(cmd: Commands) -> evm_coin_info::AppCommand {
        match cmd {
            Commands::Resolve => evm_coin_info::AppCommand::Resolve,
            Commands::Init { force } => evm_coin_info::AppCommand::Init { force },
            Commands::Show => evm_coin_info::AppCommand::Show,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => evm_coin_info::cli::setup::setup_at_path(path),
            None => evm_coin_info::cli::setup::setup(),
        },
        Some(cmd) => evm_coin_info::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
        display_error(e);
    }
    result
}
