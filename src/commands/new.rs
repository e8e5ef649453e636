use super::Session;
use crate::activate::{DESKTOPFILE, DESKTOPFILE_TEMPLATE};
use crate::ui;
use anyhow::{Context, Result};
use std::env;
use std::fs;

pub fn execute(session: &mut Session, name: &str, description: &str) -> Result<()> {
    let path = env::current_dir().context("Failed to determine the current directory")?;
    ui::info(format!("Creating a new workspace in directory {}", path.display()));

    if let Some(existing) = session.store.workspace(name) {
        anyhow::bail!(
            "A workspace named \"{}\" already exists at {}",
            name,
            existing.path.display()
        );
    }

    session.store.add_workspace(name, description, &path)?;
    session.save()?;

    let desktopfile = path.join(DESKTOPFILE);
    if !desktopfile.exists() {
        fs::write(&desktopfile, DESKTOPFILE_TEMPLATE)
            .with_context(|| format!("Failed to write {:?}", desktopfile))?;
        ui::success("Created", format!("starter {DESKTOPFILE}"));
    }

    ui::success("Created", format!("workspace '{name}'"));
    Ok(())
}
