//! # Trueno-Ensemble: Parameter Sweeps to Experiment Trees
//!
//! **Version**: 0.1.0
//!
//! Trueno-Ensemble expands declarative ensembles (named parameter sweeps) into
//! concrete model instances and materializes an experiment directory tree with
//! each instance's copied, linked and configured input files.
//!
//! ## Pipeline
//!
//! ```text
//! Ensemble params ──strategy──> Models ──generator──> <exp>/<ensemble>/<ensemble>_<i>/
//!                                                       ├── copied files
//!                                                       ├── symlinks
//!                                                       └── tagged files (;PARAM; -> value)
//! ```
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Poka-Yoke**: Expansion and validation finish before the file system is touched
//! - **Jidoka**: Directory collisions stop the line unless overwrite is requested
//! - **Genchi Genbutsu**: Seedable random sampling for reproducible sweeps
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use trueno_ensemble::entity::{Ensemble, FileSet, Orchestrator};
//! use trueno_ensemble::generator::Generator;
//! use trueno_ensemble::params::ParameterSet;
//! use trueno_ensemble::strategy::StrategyOptions;
//!
//! let params = ParameterSet::new().with("THERMO", [10, 20]).with("STEPS", 100);
//! let mut sweep = Ensemble::new("sweep", params);
//! sweep.attach_generator_files(FileSet::builder().tagged("in.lammps").build()?);
//! let mut orc = Orchestrator::default();
//!
//! let report = Generator::new(false).generate(
//!     Path::new("/tmp/exp"),
//!     std::slice::from_mut(&mut sweep),
//!     &mut [],
//!     Some(&mut orc),
//!     &StrategyOptions::default(),
//! )?;
//! println!("{}", report.to_json_pretty()?);
//! # Ok::<(), trueno_ensemble::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod generator;
pub mod materialize;
pub mod params;
pub mod strategy;
pub mod writer;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use generator::{GenerationReport, Generator};
pub use strategy::{PermutationStrategy, StrategyOptions};
