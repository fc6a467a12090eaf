//! Standalone node

use std::path::{Path, PathBuf};

use super::{Entity, EntityKind, FileSet};

/// A standalone entity with its own directory (e.g. an analysis process).
///
/// Nodes carry no parameter configuration, so they cannot have tagged files.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    run_settings: Option<serde_json::Value>,
    files: Option<FileSet>,
    path: Option<PathBuf>,
}

impl Node {
    /// Create a node.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            run_settings: None,
            files: None,
            path: None,
        }
    }

    /// Attach opaque run settings.
    #[must_use]
    pub fn with_run_settings(mut self, run_settings: serde_json::Value) -> Self {
        self.run_settings = Some(run_settings);
        self
    }

    /// Attach generator files, replacing any previous set.
    pub fn attach_generator_files(&mut self, files: FileSet) {
        self.files = Some(files);
    }

    /// Run settings, if any.
    #[must_use]
    pub const fn run_settings(&self) -> Option<&serde_json::Value> {
        self.run_settings.as_ref()
    }
}

impl Entity for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Node
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    fn files(&self) -> Option<&FileSet> {
        self.files.as_ref()
    }

    fn files_mut(&mut self) -> Option<&mut FileSet> {
        self.files.as_mut()
    }
}
