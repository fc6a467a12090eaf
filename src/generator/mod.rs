//! Experiment generator
//!
//! Expands ensembles into models and lays out the experiment tree:
//!
//! ```text
//! <experiment_root>/
//!   orchestrator/              always wiped and recreated
//!   <node_name>/               copied/linked node files
//!   <ensemble_name>/
//!     <ensemble_name>_0/       copied/linked/tagged model files
//!     <ensemble_name>_1/
//! ```
//!
//! ## Overwrite policy
//!
//! With `overwrite = false` an existing node or model directory is a
//! [`Error::Collision`]. With `overwrite = true` it is removed and recreated.
//! The orchestrator directory is removed and recreated regardless.
//!
//! A failure aborts the run where it happened. Directories created before the
//! failure stay on disk.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use trueno_ensemble::entity::{Ensemble, FileSet};
//! use trueno_ensemble::generator::Generator;
//! use trueno_ensemble::params::ParameterSet;
//! use trueno_ensemble::strategy::StrategyOptions;
//!
//! let params = ParameterSet::new().with("THERMO", [10, 20]).with("STEPS", 100);
//! let mut sweep = Ensemble::new("sweep", params);
//! sweep.attach_generator_files(FileSet::builder().tagged("in.lammps").build()?);
//!
//! let generator = Generator::new(false);
//! let report = generator.generate(
//!     Path::new("/tmp/exp"),
//!     std::slice::from_mut(&mut sweep),
//!     &mut [],
//!     None,
//!     &StrategyOptions::default(),
//! )?;
//! assert_eq!(report.model_count(), 2);
//! # Ok::<(), trueno_ensemble::Error>(())
//! ```

mod report;

pub use report::{EnsembleRecord, GenerationReport, ModelRecord, NodeRecord};

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::entity::{
    check_dir_name, Ensemble, Entity, EntityKind, Model, Node, Orchestrator, ORCHESTRATOR_DIR,
};
use crate::error::IoContext;
use crate::materialize::Materializer;
use crate::strategy::{PermutationStrategy, StrategyOptions};
use crate::writer::TaggedFileWriter;
use crate::{Error, Result};

/// Creates and configures the file structure of an experiment
#[derive(Debug, Clone, Default)]
pub struct Generator {
    overwrite: bool,
    strategy: PermutationStrategy,
    writer: TaggedFileWriter,
}

impl Generator {
    /// Create a generator using the all-permutations strategy and `;` tag.
    #[must_use]
    pub fn new(overwrite: bool) -> Self {
        Self {
            overwrite,
            ..Self::default()
        }
    }

    /// Create a generator from serializable settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured tag or regex is invalid.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let mut generator = Self::new(config.overwrite);
        generator.set_strategy(config.strategy.into());
        generator.set_tag(&config.tag, config.regex.as_deref())?;
        Ok(generator)
    }

    /// Use `strategy` to expand ensembles into models.
    pub fn set_strategy(&mut self, strategy: PermutationStrategy) {
        self.strategy = strategy;
    }

    /// Select a built-in strategy by name: `all_perm`, `step` or `random`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for any other name.
    pub fn set_strategy_name(&mut self, name: &str) -> Result<()> {
        self.strategy = name.parse()?;
        Ok(())
    }

    /// Set the tag or regex used to find placeholders in tagged files.
    ///
    /// # Errors
    ///
    /// See [`TaggedFileWriter::set_tag`].
    pub fn set_tag(&mut self, tag: &str, regex: Option<&str>) -> Result<()> {
        self.writer.set_tag(tag, regex)
    }

    /// Toggle destructive replacement of existing directories.
    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    /// Whether existing directories are replaced.
    #[must_use]
    pub const fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Current permutation strategy.
    #[must_use]
    pub const fn strategy(&self) -> &PermutationStrategy {
        &self.strategy
    }

    /// Writer used for tagged files.
    #[must_use]
    pub const fn writer(&self) -> &TaggedFileWriter {
        &self.writer
    }

    /// Generate the experiment tree under `exp_path`.
    ///
    /// Ensembles with parameters are expanded into models named
    /// `<ensemble>_<index>` first; ensembles without parameters keep the
    /// models added to them by hand. All expansion and validation happens
    /// before the file system is touched.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] for entity names that are not plain directory
    ///   names, duplicate entity names, or tagged files on nodes
    /// - [`Error::Generation`] / [`Error::ModelExists`] from expansion
    /// - [`Error::Collision`] for existing node/model directories without overwrite
    /// - IO errors from creating directories or materializing files
    pub fn generate(
        &self,
        exp_path: &Path,
        ensembles: &mut [Ensemble],
        nodes: &mut [Node],
        orchestrator: Option<&mut Orchestrator>,
        options: &StrategyOptions,
    ) -> Result<GenerationReport> {
        validate_entities(ensembles, nodes, orchestrator.is_some())?;
        self.generate_ensembles(ensembles, options)?;

        let mut report = GenerationReport::new(exp_path.to_path_buf());
        create_experiment_dir(exp_path)?;
        if let Some(orchestrator) = orchestrator {
            create_orchestrator_dir(exp_path, orchestrator)?;
            if let Some(path) = orchestrator.path() {
                report.set_orchestrator(path.to_path_buf());
            }
        }
        self.create_nodes(exp_path, nodes, &mut report)?;
        self.create_ensembles(exp_path, ensembles, &mut report)?;
        Ok(report)
    }

    fn generate_ensembles(
        &self,
        ensembles: &mut [Ensemble],
        options: &StrategyOptions,
    ) -> Result<()> {
        for ensemble in ensembles.iter_mut() {
            let (names, values) = ensemble.params().to_names_and_values()?;
            // no parameters: models were added by hand
            if names.is_empty() {
                continue;
            }

            let configs = self.strategy.permute(&names, &values, options)?;
            debug!(ensemble = ensemble.name(), configs = configs.len(), "expanded parameters");
            for (index, config) in configs.into_iter().enumerate() {
                let name = format!("{}_{index}", ensemble.name());
                let mut model = Model::new(name, config);
                if let Some(run_settings) = ensemble.run_settings() {
                    model = model.with_run_settings(run_settings.clone());
                }
                if let Some(files) = ensemble.files() {
                    model.attach_generator_files(files.clone());
                }
                ensemble.add_model(model, self.overwrite)?;
            }
        }
        Ok(())
    }

    fn create_nodes(
        &self,
        exp_path: &Path,
        nodes: &mut [Node],
        report: &mut GenerationReport,
    ) -> Result<()> {
        let materializer = Materializer::new(&self.writer);
        for node in nodes.iter_mut() {
            let node_path = exp_path.join(node.name());
            if node_path.is_dir() {
                if !self.overwrite {
                    return Err(Error::Collision {
                        kind: EntityKind::Node,
                        name: node.name().to_string(),
                        path: node_path,
                    });
                }
                fs::remove_dir_all(&node_path).io_context("remove node directory", &node_path)?;
            }
            fs::create_dir(&node_path).io_context("create node directory", &node_path)?;
            node.set_path(node_path.clone());
            materializer.materialize(node, &node_path)?;
            report.push_node(NodeRecord::new(node.name().to_string(), node_path));
        }
        Ok(())
    }

    fn create_ensembles(
        &self,
        exp_path: &Path,
        ensembles: &mut [Ensemble],
        report: &mut GenerationReport,
    ) -> Result<()> {
        let materializer = Materializer::new(&self.writer);
        for ensemble in ensembles.iter_mut() {
            let ensemble_dir = exp_path.join(ensemble.name());
            if ensemble_dir.is_dir() {
                if self.overwrite {
                    fs::remove_dir_all(&ensemble_dir)
                        .io_context("remove ensemble directory", &ensemble_dir)?;
                    fs::create_dir(&ensemble_dir)
                        .io_context("create ensemble directory", &ensemble_dir)?;
                }
            } else {
                fs::create_dir(&ensemble_dir)
                    .io_context("create ensemble directory", &ensemble_dir)?;
            }
            ensemble.set_path(ensemble_dir.clone());

            let mut record = EnsembleRecord::new(ensemble.name().to_string(), ensemble_dir.clone());
            for model in ensemble.models_mut() {
                let model_dir = ensemble_dir.join(model.name());
                if model_dir.is_dir() {
                    if !self.overwrite {
                        return Err(Error::Collision {
                            kind: EntityKind::Model,
                            name: model.name().to_string(),
                            path: model_dir,
                        });
                    }
                    fs::remove_dir_all(&model_dir)
                        .io_context("remove model directory", &model_dir)?;
                }
                fs::create_dir(&model_dir).io_context("create model directory", &model_dir)?;
                model.set_path(model_dir.clone());
                materializer.materialize(model, &model_dir)?;
                record.push_model(ModelRecord::new(
                    model.name().to_string(),
                    model_dir,
                    model.params().clone(),
                ));
            }

            info!(
                ensemble = ensemble.name(),
                models = ensemble.len(),
                "Generated models for ensemble"
            );
            report.push_ensemble(record);
        }
        Ok(())
    }
}

/// Reject setups that would clobber one entity's directory with another's.
fn validate_entities(ensembles: &[Ensemble], nodes: &[Node], has_orchestrator: bool) -> Result<()> {
    for node in nodes {
        check_dir_name(EntityKind::Node, node.name())?;
    }
    for ensemble in ensembles {
        check_dir_name(EntityKind::Ensemble, ensemble.name())?;
        for model in ensemble.models() {
            check_dir_name(EntityKind::Model, model.name())?;
        }
    }

    let mut seen = HashSet::new();
    if has_orchestrator {
        seen.insert(ORCHESTRATOR_DIR);
    }
    let names = nodes
        .iter()
        .map(|n| n.name())
        .chain(ensembles.iter().map(|e| e.name()));
    for name in names {
        if !seen.insert(name) {
            return Err(Error::Configuration(format!(
                "Entity name {name} is used more than once in the experiment"
            )));
        }
    }

    if let Some(node) = nodes
        .iter()
        .find(|n| n.files().is_some_and(|f| !f.tagged().is_empty()))
    {
        return Err(Error::Configuration(format!(
            "Node {} has tagged files; only ensemble models can configure tagged files",
            node.name()
        )));
    }
    Ok(())
}

fn create_experiment_dir(exp_path: &Path) -> Result<()> {
    if exp_path.is_dir() {
        info!(path = %exp_path.display(), "Working in previously created experiment");
        return Ok(());
    }
    fs::create_dir_all(exp_path).io_context("create experiment directory", exp_path)
}

fn create_orchestrator_dir(exp_path: &Path, orchestrator: &mut Orchestrator) -> Result<()> {
    let orc_path = exp_path.join(ORCHESTRATOR_DIR);
    // orchestrator files are always replaced
    if orc_path.is_dir() {
        fs::remove_dir_all(&orc_path).io_context("remove orchestrator directory", &orc_path)?;
    }
    fs::create_dir(&orc_path).io_context("create orchestrator directory", &orc_path)?;
    orchestrator.set_path(orc_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Configuration, ParamValue, ParameterSet};

    #[test]
    fn test_from_config_applies_settings() {
        let config = GeneratorConfig::from_json_str(
            r#"{"overwrite": true, "strategy": "step", "tag": "@"}"#,
        )
        .unwrap();
        let generator = Generator::from_config(&config).unwrap();
        assert!(generator.overwrite());
        assert!(matches!(generator.strategy(), PermutationStrategy::Step));
        assert_eq!(generator.writer().tag(), "@");
    }

    #[test]
    fn test_set_strategy_name_unsupported() {
        let mut generator = Generator::new(false);
        let err = generator.set_strategy_name("latin_hypercube").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(matches!(
            generator.strategy(),
            PermutationStrategy::AllPermutations
        ));
    }

    #[test]
    fn test_expansion_names_and_inherits_run_settings() {
        let generator = Generator::new(false);
        let params = ParameterSet::new().with("A", [1, 2, 3]);
        let mut ensembles = vec![Ensemble::new("ens", params)
            .with_run_settings(serde_json::json!({"nodes": 1}))];
        generator
            .generate_ensembles(&mut ensembles, &StrategyOptions::default())
            .unwrap();

        let names: Vec<&str> = ensembles[0].models().map(|m| m.name()).collect();
        assert_eq!(names, vec!["ens_0", "ens_1", "ens_2"]);
        assert!(ensembles[0]
            .models()
            .all(|m| m.run_settings() == Some(&serde_json::json!({"nodes": 1}))));
    }

    #[test]
    fn test_expansion_twice_without_overwrite_collides() {
        let generator = Generator::new(false);
        let mut ensembles = vec![Ensemble::new("ens", ParameterSet::new().with("A", 1))];
        let options = StrategyOptions::default();
        generator.generate_ensembles(&mut ensembles, &options).unwrap();

        let err = generator
            .generate_ensembles(&mut ensembles, &options)
            .unwrap_err();
        assert!(matches!(err, Error::ModelExists { .. }));
    }

    #[test]
    fn test_parameterless_ensemble_keeps_manual_models() {
        let mut generator = Generator::new(false);
        generator.set_strategy(PermutationStrategy::custom(|_, _, _| {
            Err(Error::Generation("strategy must not run".into()))
        }));
        let mut ensemble = Ensemble::new("manual", ParameterSet::new());
        let mut config = Configuration::new();
        config.insert("X".into(), ParamValue::Int(1));
        ensemble.add_model(Model::new("custom", config), false).unwrap();

        let mut ensembles = vec![ensemble];
        generator
            .generate_ensembles(&mut ensembles, &StrategyOptions::default())
            .unwrap();
        assert_eq!(ensembles[0].len(), 1);
        assert!(ensembles[0].model("custom").is_some());
    }

    #[test]
    fn test_duplicate_entity_names_rejected() {
        let ensembles = vec![Ensemble::new("shared", ParameterSet::new())];
        let nodes = vec![Node::new("shared")];
        let err = validate_entities(&ensembles, &nodes, false).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let nodes = vec![Node::new("orchestrator")];
        assert!(validate_entities(&[], &nodes, false).is_ok());
        assert!(validate_entities(&[], &nodes, true).is_err());
    }
}
