use clap::Subcommand;
use officehours_core::{format_time, QueueStore};

#[derive(Subcommand)]
pub enum QueueAction {
    /// Print the saved queue
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove everyone from the saved queue
    Clear,
}

pub fn run(action: QueueAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = QueueStore::open_default()?;

    match action {
        QueueAction::Show { json } => {
            let stored = store.load()?.unwrap_or_default();
            if json {
                println!("{}", serde_json::to_string_pretty(&stored)?);
                return Ok(());
            }
            if stored.names.is_empty() {
                println!("(no students in queue)");
                return Ok(());
            }
            if let Some(seconds) = stored.seconds {
                println!("current meeting: {} left", format_time(seconds));
            }
            for (i, name) in stored.names.iter().enumerate() {
                println!("{:>3}. {name}", i + 1);
            }
        }
        QueueAction::Clear => {
            store.clear()?;
            tracing::info!(path = %store.path().display(), "queue cleared");
            println!("queue cleared");
        }
    }
    Ok(())
}
