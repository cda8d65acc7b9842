use std::io;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::domain::expand_env_vars;
use crate::infrastructure::di::ServiceContainer;

/// Resolve the positional location codes and print the record to stdout.
#[instrument(skip(cli))]
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings);
    let service = container.location_service()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    service.run(&cli.positional(), &mut out)?;
    Ok(())
}

/// Layered settings with command line flags applied last.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;

    if let Some(dataset) = &cli.dataset {
        settings.dataset = PathBuf::from(expand_env_vars(&dataset.to_string_lossy()));
    }
    if cli.strict {
        settings.strict_city_id = true;
    }
    if cli.pretty {
        settings.pretty = true;
    }
    Ok(settings)
}
