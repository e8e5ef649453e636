use std::convert::Infallible;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::script::ShellScript;

const SCRIPT_PREFIX: &str = "desktop";
const SCRIPT_SUFFIX: &str = ".sh";

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The transient script file could not be created.
    #[error("failed to create init script in {}", dir.display())]
    CreateScript {
        #[source]
        source: io::Error,
        dir: PathBuf,
    },

    /// The rendered script could not be written out.
    #[error("failed to write init script {}", path.display())]
    WriteScript {
        #[source]
        source: io::Error,
        path: PathBuf,
    },

    /// The script could not be kept on disk for the shell to read.
    #[error("failed to persist init script {}", path.display())]
    PersistScript {
        #[source]
        source: io::Error,
        path: PathBuf,
    },

    /// The shell could not be started.
    #[error("failed to launch shell {shell:?}")]
    Exec {
        #[source]
        source: io::Error,
        shell: String,
    },
}

/// Starts an interactive bash session from a rendered init script
#[derive(Debug, Clone)]
pub struct Launcher {
    shell: String,
    script_dir: PathBuf,
}

impl Launcher {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            script_dir: std::env::temp_dir(),
        }
    }

    /// Place transient scripts somewhere other than the system temp directory
    pub fn with_script_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.script_dir = dir.into();
        self
    }

    /// Write `script` to a fresh file and keep it on disk.
    ///
    /// If writing fails the file is removed. On success it is left behind for
    /// the shell to read.
    pub fn write_script(&self, script: &ShellScript) -> Result<PathBuf, LaunchError> {
        let mut file = tempfile::Builder::new()
            .prefix(SCRIPT_PREFIX)
            .suffix(SCRIPT_SUFFIX)
            .tempfile_in(&self.script_dir)
            .map_err(|source| LaunchError::CreateScript {
                source,
                dir: self.script_dir.clone(),
            })?;

        let path = file.path().to_path_buf();
        file.write_all(script.to_string().as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| LaunchError::WriteScript {
                source,
                path: path.clone(),
            })?;

        file.into_temp_path()
            .keep()
            .map_err(|e| LaunchError::PersistScript {
                source: e.error,
                path,
            })
    }

    /// The command that starts the shell with `script_path` as its init file
    pub fn command(&self, script_path: &Path, working_dir: &Path) -> Command {
        let mut command = Command::new(&self.shell);
        command
            .arg("--init-file")
            .arg(script_path)
            .arg("-i")
            .current_dir(working_dir);
        command
    }

    /// Write the script and replace this process with the shell.
    ///
    /// Only returns on failure.
    pub fn launch(&self, script: &ShellScript, working_dir: &Path) -> Result<Infallible, LaunchError> {
        let script_path = self.write_script(script)?;
        debug!(script = %script_path.display(), shell = %self.shell, "init script written");

        let command = self.command(&script_path, working_dir);
        info!(dir = %working_dir.display(), "starting {}", self.shell);
        self.exec(command)
    }

    #[cfg(unix)]
    fn exec(&self, mut command: Command) -> Result<Infallible, LaunchError> {
        use std::os::unix::process::CommandExt;

        let source = command.exec();
        Err(LaunchError::Exec {
            source,
            shell: self.shell.clone(),
        })
    }

    #[cfg(not(unix))]
    fn exec(&self, mut command: Command) -> Result<Infallible, LaunchError> {
        let status = command.status().map_err(|source| LaunchError::Exec {
            source,
            shell: self.shell.clone(),
        })?;
        std::process::exit(status.code().unwrap_or(1));
    }
}
