//! Entities materialized by the generator
//!
//! ## Ownership
//!
//! ```text
//! Ensemble (1) ──< Model (N)     [insertion order = generation order]
//!    └── FileSet (0..1) ──clone──> Model FileSet
//! Node ── FileSet (0..1)
//! Orchestrator
//! ```
//!
//! The generator never owns entities. It borrows them from the caller and
//! fills in their paths, rewritten file sets and, for ensembles, their models.

mod ensemble;
mod files;
mod model;
mod node;
mod orchestrator;

pub use crate::error::EntityKind;
pub use ensemble::Ensemble;
pub use files::{FileSet, FileSetBuilder};
pub use model::Model;
pub use node::Node;
pub use orchestrator::{Orchestrator, DEFAULT_PORT, ORCHESTRATOR_DIR};

use std::path::{self, Path, PathBuf};

use crate::params::Configuration;
use crate::{Error, Result};

/// Common interface of everything that gets a directory in the experiment tree.
pub trait Entity {
    /// Name, unique within the entity's container.
    fn name(&self) -> &str;

    /// Kind of entity.
    fn kind(&self) -> EntityKind;

    /// Directory assigned at materialization time.
    fn path(&self) -> Option<&Path>;

    /// Assign the entity's directory.
    fn set_path(&mut self, path: PathBuf);

    /// Attached generator files, if any.
    fn files(&self) -> Option<&FileSet>;

    /// Mutable access to attached generator files.
    fn files_mut(&mut self) -> Option<&mut FileSet>;

    /// Parameter configuration used for tagged files.
    ///
    /// Only model instances carry one.
    fn configuration(&self) -> Option<&Configuration> {
        None
    }
}

/// Check that `name` is a single directory component.
///
/// Empty names, `.`, `..` and names containing a path separator would
/// resolve to the parent directory or outside of it.
pub(crate) fn check_dir_name(kind: EntityKind, name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.chars().any(path::is_separator) {
        return Err(Error::Configuration(format!(
            "{kind} name {name:?} is not a valid directory name\nUse a non-empty name without path separators, '.' or '..'."
        )));
    }
    Ok(())
}
