use clap::Parser;
use pocketbook::api::BookApi;
use pocketbook::config::BookConfig;
use pocketbook::error::Result;
use pocketbook::logging::init_logging;
use pocketbook::session::Session;
use pocketbook::store::fs::FileStore;

mod cli;
use cli::console::ConsoleInterface;
use cli::setup::{resolve_data_dir, Cli};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir)?;
    let config = BookConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
        BookConfig::default()
    });
    tracing::debug!(data_dir = %data_dir.display(), ?config, "starting session");

    let store =
        FileStore::new(data_dir).with_file_names(&config.contacts_file, &config.notes_file);
    let mut session = Session::new(BookApi::new(store, config), ConsoleInterface::new());
    session.run()
}
