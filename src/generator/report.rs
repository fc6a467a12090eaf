//! Generation report - what a `generate` call put on disk

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::params::Configuration;
use crate::Result;

/// One generated model directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelRecord {
    name: String,
    path: PathBuf,
    params: Configuration,
}

impl ModelRecord {
    pub(crate) const fn new(name: String, path: PathBuf, params: Configuration) -> Self {
        Self { name, path, params }
    }

    /// Model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parameter values the model was configured with.
    #[must_use]
    pub const fn params(&self) -> &Configuration {
        &self.params
    }
}

/// One ensemble directory and its models, in generation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnsembleRecord {
    name: String,
    path: PathBuf,
    models: Vec<ModelRecord>,
}

impl EnsembleRecord {
    pub(crate) const fn new(name: String, path: PathBuf) -> Self {
        Self {
            name,
            path,
            models: Vec::new(),
        }
    }

    pub(crate) fn push_model(&mut self, model: ModelRecord) {
        self.models.push(model);
    }

    /// Ensemble name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ensemble directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Generated models.
    #[must_use]
    pub fn models(&self) -> &[ModelRecord] {
        &self.models
    }
}

/// One standalone node directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeRecord {
    name: String,
    path: PathBuf,
}

impl NodeRecord {
    pub(crate) const fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }

    /// Node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Record of a completed generation run.
///
/// Serializable so an experiment driver can persist it next to the tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationReport {
    experiment_path: PathBuf,
    generated_at: DateTime<Utc>,
    orchestrator: Option<PathBuf>,
    nodes: Vec<NodeRecord>,
    ensembles: Vec<EnsembleRecord>,
}

impl GenerationReport {
    pub(crate) fn new(experiment_path: PathBuf) -> Self {
        Self {
            experiment_path,
            generated_at: Utc::now(),
            orchestrator: None,
            nodes: Vec::new(),
            ensembles: Vec::new(),
        }
    }

    pub(crate) fn set_orchestrator(&mut self, path: PathBuf) {
        self.orchestrator = Some(path);
    }

    pub(crate) fn push_node(&mut self, node: NodeRecord) {
        self.nodes.push(node);
    }

    pub(crate) fn push_ensemble(&mut self, ensemble: EnsembleRecord) {
        self.ensembles.push(ensemble);
    }

    /// Experiment root.
    #[must_use]
    pub fn experiment_path(&self) -> &Path {
        &self.experiment_path
    }

    /// When generation started.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Orchestrator directory, if one was generated.
    #[must_use]
    pub fn orchestrator(&self) -> Option<&Path> {
        self.orchestrator.as_deref()
    }

    /// Node directories.
    #[must_use]
    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    /// Ensemble directories.
    #[must_use]
    pub fn ensembles(&self) -> &[EnsembleRecord] {
        &self.ensembles
    }

    /// Look up an ensemble by name.
    #[must_use]
    pub fn ensemble(&self, name: &str) -> Option<&EnsembleRecord> {
        self.ensembles.iter().find(|e| e.name == name)
    }

    /// Total number of model directories generated.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.ensembles.iter().map(|e| e.models.len()).sum()
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
