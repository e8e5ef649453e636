use super::Session;
use crate::activate::{Activation, ActivationError};
use crate::launcher::Launcher;
use crate::ui;
use anyhow::Result;
use tracing::info;

pub fn execute(session: &mut Session, workspace: &str, variant: Option<String>) -> Result<()> {
    let record = session
        .store
        .workspace(workspace)
        .ok_or_else(|| ActivationError::MissingWorkspace(workspace.to_string()))?;
    let variant = session.variant_or_default(variant);

    let activation = Activation::prepare(&record.name, &record.path, &variant)?;

    // Recorded before launching; a failed launch still counts as a use.
    session.store.touch(&activation.workspace)?;
    session.save()?;

    ui::success(
        "Activating",
        format!(
            "configuration {} in workspace {}",
            activation.variant, activation.workspace
        ),
    );
    info!(workspace = %activation.workspace, variant = %activation.variant, "activating");

    let launcher = Launcher::new(session.config.shell.clone());
    match launcher.launch(&activation.script, &activation.directory) {
        Ok(never) => match never {},
        Err(err) => Err(ActivationError::from(err).into()),
    }
}
