use super::Session;
use crate::ui;
use crate::util::time::ago_in_words;
use anyhow::Result;
use chrono::Utc;

pub fn execute(session: &Session) -> Result<()> {
    let workspaces = session.store.workspaces_by_recent();
    if workspaces.is_empty() {
        ui::info("No workspaces found. Create a few with 'desktop new'!");
        return Ok(());
    }

    let now = Utc::now();
    for workspace in workspaces {
        ui::status(
            &workspace.name,
            format!(
                "{}\n{} (last used {})",
                workspace.description,
                workspace.path.display(),
                ago_in_words(workspace.last_used_at, now)
            ),
        );
    }
    Ok(())
}
