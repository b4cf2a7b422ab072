use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod tui;

#[derive(Parser)]
#[command(name = "officehours", version, about = "Office hours queue and meeting timer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the live queue display (default)
    Run,
    /// Inspect or clear the saved queue
    Queue {
        #[command(subcommand)]
        action: commands::queue::QueueAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            logging::init_file();
            commands::run::run()
        }
        Commands::Queue { action } => {
            logging::init_stderr();
            commands::queue::run(action)
        }
        Commands::Config { action } => {
            logging::init_stderr();
            commands::config::run(action)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
