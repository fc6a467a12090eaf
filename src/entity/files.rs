//! Generator files attached to an entity

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Files and directories to place in an entity's directory.
///
/// - `copy`: copied; directories are copied whole
/// - `link`: symlinked, the original stays where it is
/// - `tagged`: copied, then configured with the model's parameters
///
/// Materialization rewrites every entry to its new location and marks the set
/// as materialized. Cloning yields an independent copy; ensembles hand a clone
/// to every model they generate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSet {
    copy: Vec<PathBuf>,
    link: Vec<PathBuf>,
    tagged: Vec<PathBuf>,
    #[serde(default)]
    materialized: bool,
}

impl FileSet {
    /// Create a builder.
    #[must_use]
    pub fn builder() -> FileSetBuilder {
        FileSetBuilder::default()
    }

    /// Paths to copy.
    #[must_use]
    pub fn copy(&self) -> &[PathBuf] {
        &self.copy
    }

    /// Paths to symlink.
    #[must_use]
    pub fn link(&self) -> &[PathBuf] {
        &self.link
    }

    /// Paths to copy and configure.
    #[must_use]
    pub fn tagged(&self) -> &[PathBuf] {
        &self.tagged
    }

    /// Check if every list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.copy.is_empty() && self.link.is_empty() && self.tagged.is_empty()
    }

    /// Whether the entries already point at materialized locations.
    #[must_use]
    pub const fn is_materialized(&self) -> bool {
        self.materialized
    }

    pub(crate) fn copy_mut(&mut self) -> &mut [PathBuf] {
        &mut self.copy
    }

    pub(crate) fn link_mut(&mut self) -> &mut [PathBuf] {
        &mut self.link
    }

    pub(crate) fn tagged_mut(&mut self) -> &mut [PathBuf] {
        &mut self.tagged
    }

    pub(crate) fn mark_materialized(&mut self) {
        self.materialized = true;
    }
}

/// Builder for `FileSet`.
#[derive(Debug, Default)]
pub struct FileSetBuilder {
    copy: Vec<PathBuf>,
    link: Vec<PathBuf>,
    tagged: Vec<PathBuf>,
}

impl FileSetBuilder {
    /// Add a file or directory to copy.
    #[must_use]
    pub fn copy(mut self, path: impl Into<PathBuf>) -> Self {
        self.copy.push(path.into());
        self
    }

    /// Add a file or directory to symlink.
    #[must_use]
    pub fn link(mut self, path: impl Into<PathBuf>) -> Self {
        self.link.push(path.into());
        self
    }

    /// Add a tagged file to copy and configure.
    #[must_use]
    pub fn tagged(mut self, path: impl Into<PathBuf>) -> Self {
        self.tagged.push(path.into());
        self
    }

    /// Build the `FileSet`, checking that every path exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first missing path, or a
    /// tagged entry that is a directory.
    pub fn build(self) -> Result<FileSet> {
        for path in self.copy.iter().chain(&self.link).chain(&self.tagged) {
            ensure_exists(path)?;
        }
        if let Some(dir) = self.tagged.iter().find(|p| p.is_dir()) {
            return Err(Error::Configuration(format!(
                "Tagged file {} is a directory; only files can be configured",
                dir.display()
            )));
        }
        Ok(FileSet {
            copy: self.copy,
            link: self.link,
            tagged: self.tagged,
            materialized: false,
        })
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "Generator file {} does not exist",
            path.display()
        )))
    }
}
