use super::Session;
use crate::activate::{load_environment, ActivationError, DESKTOPFILE};
use crate::platform::OsClass;
use crate::ui;
use anyhow::Result;

pub fn execute(session: &Session, workspace: &str) -> Result<()> {
    let record = session
        .store
        .workspace(workspace)
        .ok_or_else(|| ActivationError::MissingWorkspace(workspace.to_string()))?;

    let os = OsClass::current();
    let Some((path, environment)) = load_environment(&record.path, os)? else {
        ui::info(format!(
            "No {DESKTOPFILE} in {}; activation uses an empty configuration.",
            record.path.display()
        ));
        return Ok(());
    };

    if environment.is_empty() {
        ui::warn(format!("{} declares no configurations", path.display()));
        return Ok(());
    }

    for (name, config) in environment.configurations() {
        ui::status(
            name,
            format!(
                "{} variable(s), {} alias(es), {} command(s) on {os}",
                config.environment_variables().len(),
                config.aliases().len(),
                config.commands().len()
            ),
        );
    }
    ui::success("Check", format!("{} is valid", path.display()));
    Ok(())
}
