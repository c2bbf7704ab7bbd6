mod cli;
mod config;
mod error;
mod logging;
mod migrate;
mod model;
mod openproject;
mod util;

use anyhow::Result;

use cli::Command;
use config::{Mappings, Settings};
use model::wekan::BoardExport;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match cli::parse_args(&args)? {
        Command::Help => {
            cli::print_help();
            return Ok(());
        }
        Command::Migrate(args) => args,
    };

    // Everything that can be checked locally is checked before the first request.
    let settings = Settings::from_env()?;
    let mappings = Mappings::load(args.mappings_path.as_deref())?;
    let board = BoardExport::load(&args.board_path)?;

    let tracker = openproject::create_tracker(&settings, args.dry_run);
    let report = migrate::run(&board, tracker.as_ref(), &mappings).await?;

    println!("Migrated {report}");
    Ok(())
}
