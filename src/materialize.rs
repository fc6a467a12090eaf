//! Entity materializer
//!
//! Places an entity's attached files in its directory, in a fixed order:
//!
//! 1. `copy`   - files to `dest/<basename>`, directories merged into `dest`
//! 2. `link`   - symlink at `dest/<basename>` pointing at the original
//! 3. `tagged` - copy to `dest/<basename>`, then configure in place
//!
//! Every reference is then rewritten to its destination. A file set is
//! materialized exactly once.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::entity::Entity;
use crate::error::IoContext;
use crate::writer::TaggedFileWriter;
use crate::{Error, Result};

/// Performs the file-system work for one entity at a time
#[derive(Debug, Clone, Copy)]
pub struct Materializer<'w> {
    writer: &'w TaggedFileWriter,
}

impl<'w> Materializer<'w> {
    /// Create a materializer configuring tagged files with `writer`.
    #[must_use]
    pub const fn new(writer: &'w TaggedFileWriter) -> Self {
        Self { writer }
    }

    /// Materialize `entity`'s files into `dest`, which must already exist.
    ///
    /// Entities without files are a no-op.
    ///
    /// # Errors
    ///
    /// - [`Error::Generation`] if the file set was already materialized
    /// - [`Error::Configuration`] if tagged files are attached to an entity
    ///   without a parameter configuration, or an entry has no file name
    /// - IO and traversal errors from copying, linking or configuring
    pub fn materialize<E: Entity + ?Sized>(&self, entity: &mut E, dest: &Path) -> Result<()> {
        let kind = entity.kind();
        let name = entity.name().to_string();
        let configuration = entity.configuration().cloned();
        let Some(files) = entity.files_mut() else {
            return Ok(());
        };

        if files.is_materialized() {
            return Err(Error::Generation(format!(
                "{kind} {name} files were already materialized"
            )));
        }
        if !files.tagged().is_empty() && configuration.is_none() {
            return Err(Error::Configuration(format!(
                "{kind} {name} has tagged files but no parameter configuration; only models can configure tagged files"
            )));
        }

        for entry in files.copy_mut() {
            let target = copy_entry(entry, dest)?;
            debug!(entity = %name, src = %entry.display(), dst = %target.display(), "copied");
            *entry = target;
        }

        for entry in files.link_mut() {
            let target = dest.join(basename(entry)?);
            let original = fs::canonicalize(&*entry).io_context("resolve link source", entry)?;
            symlink(&original, &target).io_context("create symlink", &target)?;
            debug!(entity = %name, src = %original.display(), dst = %target.display(), "linked");
            *entry = target;
        }

        if let Some(config) = &configuration {
            for entry in files.tagged_mut() {
                let target = dest.join(basename(entry)?);
                fs::copy(&*entry, &target).io_context("copy tagged file", entry)?;
                let report = self.writer.configure(&target, config)?;
                debug!(
                    entity = %name,
                    file = %target.display(),
                    substituted = report.substituted.len(),
                    "configured"
                );
                *entry = target;
            }
        }

        files.mark_materialized();
        Ok(())
    }
}

fn basename(path: &Path) -> Result<&OsStr> {
    path.file_name().ok_or_else(|| {
        Error::Configuration(format!(
            "Generator file {} has no file name",
            path.display()
        ))
    })
}

/// Copy a file to `dest/<basename>` or a directory's contents into `dest`.
fn copy_entry(src: &Path, dest: &Path) -> Result<PathBuf> {
    if src.is_dir() {
        copy_dir_contents(src, dest)?;
        return Ok(dest.to_path_buf());
    }
    let target = dest.join(basename(src)?);
    fs::copy(src, &target).io_context("copy file", src)?;
    Ok(target)
}

fn copy_dir_contents(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true).min_depth(1) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).map_err(|_| {
            Error::Generation(format!(
                "{} is outside of {}",
                entry.path().display(),
                src.display()
            ))
        })?;
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).io_context("create directory", &target)?;
        } else {
            fs::copy(entry.path(), &target).io_context("copy file", entry.path())?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    if original.is_dir() {
        std::os::windows::fs::symlink_dir(original, link)
    } else {
        std::os::windows::fs::symlink_file(original, link)
    }
}
