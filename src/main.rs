use clap::Parser;
use movie_collection::utils::{error::ErrorSeverity, logger};
use movie_collection::{
    default_registry, AppConfig, CliConfig, CollectionError, CollectionManager, DumpManager,
    LocalStorage, Runner, StandardConsole,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // The log level comes from the config, so it is checked before logging starts.
    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(cli.verbose, &config.log.level);
    tracing::info!("Starting movie-collection");
    tracing::debug!("CLI config: {:?}", cli);

    let dump = DumpManager::new(LocalStorage::new("."), cli.file.clone())
        .with_pretty(config.storage.pretty);
    let mut collection = CollectionManager::new(dump);

    match collection.load_collection() {
        Ok(count) => println!("Collection loaded: {} elements", count),
        Err(e) => report_load_error(&e),
    }

    let console = StandardConsole::stdio();
    let mut runner = Runner::new(
        console,
        collection,
        default_registry(),
        config.runner_options(),
    );
    runner.interactive_mode();

    tracing::info!("Session finished");
    Ok(())
}

/// A collection that fails to load is not fatal: the session starts empty.
fn report_load_error(e: &CollectionError) {
    tracing::error!(
        "Loading the collection failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("Error: {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    if e.severity() >= ErrorSeverity::High {
        tracing::warn!("Starting with an empty collection; 'save' will overwrite the file");
    }
}
