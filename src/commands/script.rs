use super::Session;
use crate::activate::{Activation, ActivationError};
use anyhow::Result;

pub fn execute(session: &Session, workspace: &str, variant: Option<String>) -> Result<()> {
    let record = session
        .store
        .workspace(workspace)
        .ok_or_else(|| ActivationError::MissingWorkspace(workspace.to_string()))?;
    let variant = session.variant_or_default(variant);

    let activation = Activation::prepare(&record.name, &record.path, &variant)?;
    print!("{}", activation.script);
    Ok(())
}
