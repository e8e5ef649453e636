use super::Session;
use crate::cli::TagsAction;
use crate::ui;
use crate::util::time::ago_in_words;
use anyhow::Result;
use chrono::Utc;

pub fn execute(session: &mut Session, action: TagsAction) -> Result<()> {
    match action {
        TagsAction::New { name } => {
            session.store.add_tag(&name)?;
            session.save()?;
            ui::success("Created", format!("tag '{name}'"));
            Ok(())
        }

        TagsAction::List => {
            let tags: Vec<_> = session.store.tags().collect();
            if tags.is_empty() {
                ui::info("No tags found! Create a few with 'desktop tags new'!");
                return Ok(());
            }
            for tag in tags {
                let count = session.store.tag_usage(tag);
                ui::status(tag, format!("{count} workspace(s)"));
            }
            Ok(())
        }

        TagsAction::Add { workspace, tag } => {
            session.store.tag_workspace(&workspace, &tag)?;
            session.save()?;
            ui::success("Tagged", format!("workspace '{workspace}' with '{tag}'"));
            Ok(())
        }

        TagsAction::Show {
            tag: Some(tag),
            workspace: None,
        } => {
            let workspaces = session.store.workspaces_with_tag(&tag)?;
            if workspaces.is_empty() {
                ui::info(format!("No workspaces found with the tag '{tag}'"));
                return Ok(());
            }

            let now = Utc::now();
            for workspace in workspaces {
                ui::status(
                    &workspace.name,
                    format!(
                        "{} (last used {})",
                        workspace.path.display(),
                        ago_in_words(workspace.last_used_at, now)
                    ),
                );
            }
            Ok(())
        }

        TagsAction::Show {
            tag: None,
            workspace: Some(workspace),
        } => {
            let tags = session.store.tags_of(&workspace)?;
            if tags.is_empty() {
                ui::info(format!("No tags found on workspace '{workspace}'"));
                return Ok(());
            }
            for tag in tags {
                ui::status("Tag", tag);
            }
            Ok(())
        }

        TagsAction::Show { .. } => {
            anyhow::bail!("Exactly one of --tag or --workspace must be provided")
        }
    }
}
