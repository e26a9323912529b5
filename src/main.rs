use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use secret_share::cli::{self, Options, Role};
use secret_share::error::Result;

#[derive(Parser)]
#[command(name = "secret-share")]
#[command(author = "Oleg")]
#[command(version = "0.1.0")]
#[command(about = "Share a one-time secret over chat or email without a pre-shared key", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Do not copy keys or secrets to the system clipboard
    #[arg(long, global = true)]
    no_clipboard: bool,

    /// Log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a one-time key and decrypt the secret sent back for it
    Receive,

    /// Encrypt a secret for someone else's key
    Send,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "secret_share=debug",
        _ => "secret_share=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = Options {
        clipboard: !cli.no_clipboard,
    };

    cli::print_header(cli::TITLE_CARD);

    let role = match cli.command {
        Some(Commands::Receive) => Role::Receiver,
        Some(Commands::Send) => Role::Sender,
        None => match cli::prompt_role()? {
            Some(role) => role,
            None => {
                cli::print_message("Quitting secret-share");
                return Ok(());
            }
        },
    };

    match role {
        Role::Receiver => cli::receive::run(&options),
        Role::Sender => cli::send::run(&options),
    }
}
