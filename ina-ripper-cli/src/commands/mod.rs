pub(crate) mod clean;
pub(crate) mod config;
pub(crate) mod enrich;
pub(crate) mod plan;
pub(crate) mod select;
pub(crate) mod stats;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ina_ripper_catalog::slugify;
use ina_ripper_db::{Database, DatabaseFile, SaveOutcome};
use ina_ripper_lib::{Config, Overrides};

use crate::CliError;

/// Flags shared by every command.
pub(crate) struct GlobalArgs {
    pub database: Option<PathBuf>,
    pub yes: bool,
    pub collections: Vec<String>,
}

/// Load the settings file and layer the global flags on top.
pub(crate) fn load_config(
    global: &GlobalArgs,
    delay: Option<Duration>,
    append: bool,
) -> Result<Config, CliError> {
    let config = Config::load().map_err(|e| CliError::config(e.to_string()))?;
    Ok(config.apply(Overrides {
        database: global.database.clone(),
        skip_confirmation: global.yes,
        delay,
        append,
        collections: global.collections.iter().map(|c| slugify(c)).collect(),
    }))
}

fn database_file(config: &Config) -> Result<DatabaseFile, CliError> {
    DatabaseFile::new(&config.database)
        .with_delimiter(config.delimiter)
        .map_err(|e| CliError::config(e.to_string()))
}

pub(crate) fn open_database(config: &Config) -> Result<Database, CliError> {
    database_file(config)?
        .load()
        .map_err(|e| CliError::database(format!("Failed to load database: {}", e)))
}

/// Rewrite the database, asking first unless confirmation is skipped.
pub(crate) fn save_database(config: &Config, db: &Database) -> Result<(), CliError> {
    let outcome = database_file(config)?
        .save(db, |path| config.skip_confirmation || confirm_overwrite(path))
        .map_err(|e| CliError::database(format!("Failed to save database: {}", e)))?;
    if outcome == SaveOutcome::Declined {
        log::warn!("Database left unchanged");
    }
    Ok(())
}

fn confirm_overwrite(path: &Path) -> bool {
    let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    print!(
        "This action will reset the database at {}, continue? (y/n) ",
        shown.display()
    );
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    io::stdin().read_line(&mut answer).is_ok() && answer.trim().eq_ignore_ascii_case("y")
}
