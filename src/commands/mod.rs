use crate::cli::{Cli, Commands};
use crate::{Config, Store};
use anyhow::{Context, Result};
use std::path::PathBuf;

mod check;
mod go;
mod list;
mod new;
mod script;
mod tags;

/// Settings and store handle shared by every command
pub struct Session {
    pub config: Config,
    pub store: Store,
    store_path: PathBuf,
}

impl Session {
    pub fn open(config: Config) -> Result<Self> {
        let store_path = config.store_path()?;
        let store = Store::load(&store_path)
            .with_context(|| format!("Failed to open workspace store {:?}", store_path))?;
        Ok(Self {
            config,
            store,
            store_path,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.store
            .save(&self.store_path)
            .with_context(|| format!("Failed to save workspace store {:?}", self.store_path))
    }

    fn variant_or_default(&self, variant: Option<String>) -> String {
        variant.unwrap_or_else(|| self.config.default_variant.clone())
    }
}

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load_default()?;
    let mut session = Session::open(config)?;

    match cli.command {
        Commands::New { name, description } => new::execute(&mut session, &name, &description),

        Commands::List => list::execute(&session),

        Commands::Go {
            workspace,
            configuration,
        } => go::execute(&mut session, &workspace, configuration),

        Commands::Script {
            workspace,
            configuration,
        } => script::execute(&session, &workspace, configuration),

        Commands::Check { workspace } => check::execute(&session, &workspace),

        Commands::Tags(action) => tags::execute(&mut session, action),
    }
}
