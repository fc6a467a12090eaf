//! Orchestrator - data store placement

use std::path::{Path, PathBuf};

use super::{Entity, EntityKind, FileSet};

/// Directory name of the orchestrator under the experiment root
pub const ORCHESTRATOR_DIR: &str = "orchestrator";

/// Default data store port
pub const DEFAULT_PORT: u16 = 6379;

/// Data store orchestrator.
///
/// Its directory only holds disposable launch output, so the generator wipes
/// and recreates it on every run. Port and shard count are launch metadata
/// and do not affect generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orchestrator {
    port: u16,
    db_nodes: usize,
    path: Option<PathBuf>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_PORT)
    }
}

impl Orchestrator {
    /// Create a single-shard orchestrator on `port`.
    #[must_use]
    pub const fn new(port: u16) -> Self {
        Self {
            port,
            db_nodes: 1,
            path: None,
        }
    }

    /// Set the number of data store shards.
    #[must_use]
    pub const fn with_db_nodes(mut self, db_nodes: usize) -> Self {
        self.db_nodes = db_nodes;
        self
    }

    /// Data store port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Number of data store shards.
    #[must_use]
    pub const fn db_nodes(&self) -> usize {
        self.db_nodes
    }
}

impl Entity for Orchestrator {
    fn name(&self) -> &str {
        ORCHESTRATOR_DIR
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Orchestrator
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    fn files(&self) -> Option<&FileSet> {
        None
    }

    fn files_mut(&mut self) -> Option<&mut FileSet> {
        None
    }
}
