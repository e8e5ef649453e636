use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dsl::DslError;
use crate::environment::{Configuration, Environment};
use crate::launcher::LaunchError;
use crate::platform::OsClass;
use crate::script::{render, ShellScript};

/// Per-workspace configuration file name
pub const DESKTOPFILE: &str = "Desktopfile";

/// Template written by `desktop new` when a workspace has no Desktopfile
pub const DESKTOPFILE_TEMPLATE: &str = include_str!("../templates/Desktopfile");

#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    /// No workspace is registered under this name.
    #[error("no workspace named \"{0}\"")]
    MissingWorkspace(String),

    /// The Desktopfile evaluated but does not declare the variant.
    #[error("no configuration named \"{variant}\" in {}", desktopfile.display())]
    MissingVariant { variant: String, desktopfile: PathBuf },

    /// The Desktopfile exists but could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        #[source]
        source: io::Error,
        path: PathBuf,
    },

    /// The Desktopfile failed to parse or evaluate.
    #[error(transparent)]
    Dsl(#[from] DslError),

    /// The shell could not be started.
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// A workspace variant that is ready to launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub workspace: String,
    pub variant: String,
    pub directory: PathBuf,
    pub configuration: Configuration,
    pub script: ShellScript,
}

impl Activation {
    /// Evaluate the workspace's Desktopfile for the current host and render
    /// the chosen variant
    pub fn prepare(workspace: &str, directory: &Path, variant: &str) -> Result<Self, ActivationError> {
        Self::prepare_for(workspace, directory, variant, OsClass::current())
    }

    /// Like [`Activation::prepare`], evaluating `os` blocks against `os`.
    ///
    /// Nothing is written to disk.
    pub fn prepare_for(
        workspace: &str,
        directory: &Path,
        variant: &str,
        os: OsClass,
    ) -> Result<Self, ActivationError> {
        let configuration = match load_environment(directory, os)? {
            Some((desktopfile, environment)) => environment
                .into_configuration(variant)
                .ok_or_else(|| ActivationError::MissingVariant {
                    variant: variant.to_string(),
                    desktopfile,
                })?,
            None => {
                debug!(dir = %directory.display(), "no Desktopfile, using an empty configuration");
                Configuration::default()
            }
        };

        let script = render(&configuration, workspace, variant);
        Ok(Self {
            workspace: workspace.to_string(),
            variant: variant.to_string(),
            directory: directory.to_path_buf(),
            configuration,
            script,
        })
    }
}

/// Evaluate `<directory>/Desktopfile` if there is one
pub fn load_environment(
    directory: &Path,
    os: OsClass,
) -> Result<Option<(PathBuf, Environment)>, ActivationError> {
    let path = directory.join(DESKTOPFILE);
    match fs::metadata(&path) {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => return Ok(None),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(ActivationError::Read { source, path }),
    }

    let source = fs::read_to_string(&path).map_err(|source| ActivationError::Read {
        source,
        path: path.clone(),
    })?;
    let environment = Environment::evaluate_for(&source, &path.display().to_string(), os)?;
    debug!(path = %path.display(), variants = environment.len(), "evaluated Desktopfile");

    Ok(Some((path, environment)))
}
