//! Tagged-file writer
//!
//! Configures model input files in place. A value to substitute is written in
//! the source file as a parameter name surrounded by a tag, e.g. `THERMO = ;THERMO;`
//! with the default `;` tag. Each tagged span (delimiters included) is replaced
//! by the configuration's value for that name.
//!
//! Tokens naming a parameter that is not in the configuration are left
//! byte-for-byte unchanged. This is not an error.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::IoContext;
use crate::params::Configuration;
use crate::{Error, Result};

/// Default tag delimiting a parameter name
pub const DEFAULT_TAG: &str = ";";

/// Characters allowed in a tagged parameter name
const NAME_CLASS: &str = "[A-Za-z0-9_.-]+";

/// Check that `name` can appear between tags, i.e. matches `NAME_CLASS`.
pub(crate) fn is_tag_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Outcome of configuring one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagReport {
    /// Parameter names substituted, in file order
    pub substituted: Vec<String>,
    /// Tagged tokens left unchanged (no matching parameter), in file order
    pub unmatched: Vec<String>,
}

/// Reads a file, substitutes tagged parameters, writes it back
#[derive(Debug, Clone)]
pub struct TaggedFileWriter {
    tag: String,
    pattern: Regex,
    custom: bool,
}

impl Default for TaggedFileWriter {
    fn default() -> Self {
        // escaped constant tag around a fixed class always compiles
        let pattern = tag_pattern(DEFAULT_TAG).expect("default tag pattern is a valid regex");
        Self {
            tag: DEFAULT_TAG.to_string(),
            pattern,
            custom: false,
        }
    }
}

fn tag_pattern(tag: &str) -> Result<Regex> {
    let tag = regex::escape(tag);
    Ok(Regex::new(&format!("{tag}({NAME_CLASS}){tag}"))?)
}

/// Byte offset just past the character starting at `at`.
fn next_boundary(text: &str, at: usize) -> usize {
    text[at..].chars().next().map_or(at + 1, |c| at + c.len_utf8())
}

impl TaggedFileWriter {
    /// Create a writer using the default `;` tag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with a custom tag or regex.
    ///
    /// # Errors
    ///
    /// See [`set_tag`](Self::set_tag).
    pub fn with_tag(tag: &str, regex: Option<&str>) -> Result<Self> {
        let mut writer = Self::new();
        writer.set_tag(tag, regex)?;
        Ok(writer)
    }

    /// Set the tag, or a full regular expression, used to find placeholders.
    ///
    /// A tag of `@` matches `@NAME@`. A regex replaces the tag entirely: each
    /// match is a substitution span and the parameter name is read from the
    /// capture group `name`, or group 1 if there is no such group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty tag or a regex without a
    /// capture group, and [`Error::InvalidPattern`] if the regex does not compile.
    pub fn set_tag(&mut self, tag: &str, regex: Option<&str>) -> Result<()> {
        if tag.is_empty() {
            return Err(Error::Configuration("Tag must not be empty".to_string()));
        }
        let pattern = match regex {
            Some(src) => {
                let re = Regex::new(src)?;
                if re.captures_len() < 2 {
                    return Err(Error::Configuration(format!(
                        "Tag regex {src} must contain a capture group naming the parameter"
                    )));
                }
                re
            }
            None => tag_pattern(tag)?,
        };
        self.tag = tag.to_string();
        self.pattern = pattern;
        self.custom = regex.is_some();
        Ok(())
    }

    /// Current tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Custom regex, if one is set.
    #[must_use]
    pub fn regex(&self) -> Option<&str> {
        self.custom.then(|| self.pattern.as_str())
    }

    /// Substitute tagged parameters in `text`.
    ///
    /// A token naming an unknown parameter is kept as-is and scanning resumes
    /// right after its opening tag, so a closing tag shared with the next
    /// placeholder still opens that placeholder.
    #[must_use]
    pub fn render<'t>(&self, text: &'t str, config: &Configuration) -> (Cow<'t, str>, TagReport) {
        let mut report = TagReport::default();
        let mut out = String::new();
        let mut copied = 0;
        let mut pos = 0;

        while pos <= text.len() {
            let Some(caps) = self.pattern.captures_at(text, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            let token = caps.name("name").or_else(|| caps.get(1));
            let value = token.and_then(|t| config.get(t.as_str()));

            match (token, value) {
                (Some(token), Some(value)) => {
                    out.push_str(&text[copied..whole.start()]);
                    out.push_str(&value.to_string());
                    report.substituted.push(token.as_str().to_string());
                    copied = whole.end();
                    pos = if whole.is_empty() {
                        next_boundary(text, whole.end())
                    } else {
                        whole.end()
                    };
                }
                (Some(token), None) => {
                    report.unmatched.push(token.as_str().to_string());
                    pos = if token.start() > whole.start() {
                        token.start()
                    } else {
                        next_boundary(text, whole.start())
                    };
                }
                (None, _) => pos = next_boundary(text, whole.start()),
            }
        }

        if report.substituted.is_empty() {
            return (Cow::Borrowed(text), report);
        }
        out.push_str(&text[copied..]);
        (Cow::Owned(out), report)
    }

    /// Configure a file in place.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read or written.
    pub fn configure(&self, path: &Path, config: &Configuration) -> Result<TagReport> {
        let text = fs::read_to_string(path).io_context("read tagged file", path)?;
        let (rendered, report) = self.render(&text, config);
        if let Cow::Owned(out) = rendered {
            fs::write(path, out).io_context("write tagged file", path)?;
        }

        for token in &report.unmatched {
            debug!(file = %path.display(), token = %token, "tag has no matching parameter, left unchanged");
        }
        for name in config.keys() {
            if !report.substituted.contains(name) {
                debug!(file = %path.display(), param = %name, "parameter not tagged in file");
            }
        }
        Ok(report)
    }
}
