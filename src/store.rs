use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Store file format version
const STORE_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read store {}", path.display())]
    Read {
        #[source]
        source: io::Error,
        path: PathBuf,
    },

    #[error("failed to parse store {}", path.display())]
    Parse {
        #[source]
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("failed to write store {}", path.display())]
    Write {
        #[source]
        source: io::Error,
        path: PathBuf,
    },

    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    #[error("a workspace named \"{0}\" already exists")]
    DuplicateWorkspace(String),

    #[error("no workspace named \"{0}\"")]
    UnknownWorkspace(String),

    #[error("a tag named \"{0}\" already exists")]
    DuplicateTag(String),

    #[error("no tag named \"{0}\"")]
    UnknownTag(String),
}

type Result<T, E = StoreError> = std::result::Result<T, E>;

/// A remembered directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    pub name: String,
    pub description: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// Workspaces and tags persisted as TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    version: u32,
    #[serde(default)]
    tags: BTreeSet<String>,
    #[serde(default)]
    workspaces: Vec<WorkspaceRecord>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            tags: BTreeSet::new(),
            workspaces: Vec::new(),
        }
    }
}

impl Store {
    /// Load the store, or an empty one if the file does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| StoreError::Read {
            source,
            path: path.to_path_buf(),
        })?;

        toml::from_str(&contents).map_err(|source| StoreError::Parse {
            source,
            path: path.to_path_buf(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |source| StoreError::Write {
            source,
            path: path.to_path_buf(),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(write_err)
    }

    pub fn workspace(&self, name: &str) -> Option<&WorkspaceRecord> {
        self.workspaces.iter().find(|w| w.name == name)
    }

    fn workspace_mut(&mut self, name: &str) -> Result<&mut WorkspaceRecord> {
        self.workspaces
            .iter_mut()
            .find(|w| w.name == name)
            .ok_or_else(|| StoreError::UnknownWorkspace(name.to_string()))
    }

    /// Register a workspace. Names are unique.
    pub fn add_workspace(
        &mut self,
        name: &str,
        description: &str,
        path: &Path,
    ) -> Result<&WorkspaceRecord> {
        if self.workspace(name).is_some() {
            return Err(StoreError::DuplicateWorkspace(name.to_string()));
        }

        let now = Utc::now();
        self.workspaces.push(WorkspaceRecord {
            name: name.to_string(),
            description: description.to_string(),
            path: path.to_path_buf(),
            created_at: now,
            modified_at: now,
            last_used_at: now,
            tags: BTreeSet::new(),
        });
        Ok(&self.workspaces[self.workspaces.len() - 1])
    }

    /// All workspaces, most recently used first
    pub fn workspaces_by_recent(&self) -> Vec<&WorkspaceRecord> {
        let mut workspaces: Vec<_> = self.workspaces.iter().collect();
        workspaces.sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at));
        workspaces
    }

    /// Record that a workspace was just activated
    pub fn touch(&mut self, name: &str) -> Result<()> {
        self.workspace_mut(name)?.last_used_at = Utc::now();
        Ok(())
    }

    pub fn add_tag(&mut self, name: &str) -> Result<()> {
        if !self.tags.insert(name.to_string()) {
            return Err(StoreError::DuplicateTag(name.to_string()));
        }
        Ok(())
    }

    /// Known tags, sorted by name
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    fn has_tag(&self, name: &str) -> bool {
        self.tags.contains(name)
    }

    /// Number of workspaces carrying the tag
    pub fn tag_usage(&self, tag: &str) -> usize {
        self.workspaces.iter().filter(|w| w.tags.contains(tag)).count()
    }

    /// Attach an existing tag to an existing workspace. Re-tagging is a no-op.
    pub fn tag_workspace(&mut self, workspace: &str, tag: &str) -> Result<()> {
        if !self.has_tag(tag) {
            return Err(StoreError::UnknownTag(tag.to_string()));
        }

        let record = self.workspace_mut(workspace)?;
        if record.tags.insert(tag.to_string()) {
            record.modified_at = Utc::now();
        }
        Ok(())
    }

    /// Workspaces carrying the tag, most recently used first
    pub fn workspaces_with_tag(&self, tag: &str) -> Result<Vec<&WorkspaceRecord>> {
        if !self.has_tag(tag) {
            return Err(StoreError::UnknownTag(tag.to_string()));
        }

        Ok(self
            .workspaces_by_recent()
            .into_iter()
            .filter(|w| w.tags.contains(tag))
            .collect())
    }

    pub fn tags_of(&self, workspace: &str) -> Result<&BTreeSet<String>> {
        self.workspace(workspace)
            .map(|w| &w.tags)
            .ok_or_else(|| StoreError::UnknownWorkspace(workspace.to_string()))
    }
}
