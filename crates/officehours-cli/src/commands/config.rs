use clap::Subcommand;
use officehours_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "meeting.minutes", "display.welcome_message")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
    /// Open the config file with the system's default application
    Open,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = Config::path()?;
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_from(&path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(&path)?;
            config.set(&key, &value, &path)?;
            tracing::info!(%key, "config updated");
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load_from(&path)?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            Config::default().save_to(&path)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Open => {
            // Make sure there is a file to open.
            Config::load_from(&path)?;
            Config::open_in_editor(&path)?;
        }
    }
    Ok(())
}
