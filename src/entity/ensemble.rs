//! Ensemble - a named parameter sweep and the models generated from it

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::{Entity, EntityKind, FileSet, Model};
use crate::params::ParameterSet;
use crate::{Error, Result};

/// Group of models sharing a parameter sweep and attached files.
///
/// Models are kept in insertion order, which for generated models is the
/// order produced by the permutation strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    name: String,
    params: ParameterSet,
    run_settings: Option<serde_json::Value>,
    files: Option<FileSet>,
    models: IndexMap<String, Model>,
    path: Option<PathBuf>,
}

impl Ensemble {
    /// Create an ensemble. An empty parameter set means models are added by hand.
    #[must_use]
    pub fn new(name: impl Into<String>, params: ParameterSet) -> Self {
        Self {
            name: name.into(),
            params,
            run_settings: None,
            files: None,
            models: IndexMap::new(),
            path: None,
        }
    }

    /// Attach opaque run settings shared by generated models.
    #[must_use]
    pub fn with_run_settings(mut self, run_settings: serde_json::Value) -> Self {
        self.run_settings = Some(run_settings);
        self
    }

    /// Attach generator files; every generated model receives its own copy.
    pub fn attach_generator_files(&mut self, files: FileSet) {
        self.files = Some(files);
    }

    /// Parameter definitions.
    #[must_use]
    pub const fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Run settings, if any.
    #[must_use]
    pub const fn run_settings(&self) -> Option<&serde_json::Value> {
        self.run_settings.as_ref()
    }

    /// Register a model under its name.
    ///
    /// With `overwrite`, an existing model of the same name is replaced in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelExists`] if the name is taken and `overwrite` is false.
    pub fn add_model(&mut self, model: Model, overwrite: bool) -> Result<()> {
        if !overwrite && self.models.contains_key(model.name()) {
            return Err(Error::ModelExists {
                ensemble: self.name.clone(),
                model: model.name().to_string(),
            });
        }
        self.models.insert(model.name().to_string(), model);
        Ok(())
    }

    /// Look up a model by name.
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// Models in insertion order.
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub(crate) fn models_mut(&mut self) -> impl Iterator<Item = &mut Model> {
        self.models.values_mut()
    }

    /// Number of models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if the ensemble has no models.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Entity for Ensemble {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Ensemble
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
