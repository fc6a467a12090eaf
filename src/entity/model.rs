//! Model instance - one fully parameterized unit of work

use std::path::{Path, PathBuf};

use super::{Entity, EntityKind, FileSet};
use crate::params::Configuration;

/// A concrete model, generated from an ensemble or added by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    configuration: Configuration,
    run_settings: Option<serde_json::Value>,
    files: Option<FileSet>,
    path: Option<PathBuf>,
}

impl Model {
    /// Create a model with the given name and configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, configuration: Configuration) -> Self {
        Self {
            name: name.into(),
            configuration,
            run_settings: None,
            files: None,
            path: None,
        }
    }

    /// Attach opaque run settings, passed through untouched.
    #[must_use]
    pub fn with_run_settings(mut self, run_settings: serde_json::Value) -> Self {
        self.run_settings = Some(run_settings);
        self
    }

    /// Attach generator files, replacing any previous set.
    pub fn attach_generator_files(&mut self, files: FileSet) {
        self.files = Some(files);
    }

    /// Parameter values of this model.
    #[must_use]
    pub const fn params(&self) -> &Configuration {
        &self.configuration
    }

    /// Run settings, if any.
    #[must_use]
    pub const fn run_settings(&self) -> Option<&serde_json::Value> {
        self.run_settings.as_ref()
    }
}

impl Entity for Model {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Model
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

    fn configuration(&self) -> Option<&Configuration> {
        Some(&self.configuration)
    }
}
