use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use lifegrid::cli::args::{Cli, Commands, SprintCommands};
use lifegrid::cli::handlers;
use lifegrid::config::AppConfig;
use lifegrid::db::{run_migrations, SqliteRepository};
use lifegrid::store::Store;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn).context("Running migrations")?;

    let mut store = Store::open(SqliteRepository::new(conn));

    match cli.command {
        Some(Commands::Sprint { action }) => handlers::handle_sprint(&mut store, &action)?,
        Some(Commands::Log {
            sprint,
            goal,
            hours,
            date,
        }) => handlers::handle_log(&mut store, &sprint, &goal, hours, date)?,
        Some(Commands::Effort { action }) => handlers::handle_effort(&mut store, &action)?,
        Some(Commands::Stats { days }) => handlers::handle_stats(&store, &config, days)?,
        Some(Commands::Grid { days }) => handlers::handle_grid(&store, &config, days)?,
        Some(Commands::Life) => handlers::handle_life(&config)?,
        Some(Commands::Profile {
            name,
            email,
            current_age,
            target_age,
        }) => handlers::handle_profile(&mut config, name, email, current_age, target_age)?,
        Some(Commands::Export) => handlers::handle_export(&store)?,

        // No subcommand → overview of the sprint covering today
        None => {
            let today = chrono::Local::now().date_naive();
            if store.sprint_for_date(today).is_some() {
                handlers::handle_sprint(&mut store, &SprintCommands::Show { sprint: None })?;
                handlers::handle_stats(&store, &config, None)?;
            } else {
                eprintln!("No sprint covers today. Create one with `lifegrid sprint new <name> --start <date> --end <date>`.");
            }
        }
    }

    Ok(())
}
