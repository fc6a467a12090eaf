//! Positional zip strategy

use super::StrategyOptions;
use crate::params::{Configuration, ParamValue};
use crate::{Error, Result};

/// Take the k-th value of every list, for each k.
///
/// All lists must have the same length `n`; the result has `n` configurations.
///
/// # Errors
///
/// Returns [`Error::Generation`] when list lengths differ. Lists are never
/// truncated to the shortest.
pub fn step_values(
    names: &[String],
    values: &[Vec<ParamValue>],
    _options: &StrategyOptions,
) -> Result<Vec<Configuration>> {
    let Some(first) = values.first() else {
        return Ok(Vec::new());
    };
    let steps = first.len();
    if let Some((name, list)) = names
        .iter()
        .zip(values)
        .find(|(_, list)| list.len() != steps)
    {
        return Err(Error::Generation(format!(
            "Step strategy requires equal-length parameter lists: {} has {} values, {} has {}",
            names.first().map_or("", String::as_str),
            steps,
            name,
            list.len()
        )));
    }

    Ok((0..steps)
        .map(|k| {
            names
                .iter()
                .zip(values)
                .map(|(name, list)| (name.clone(), list[k].clone()))
                .collect()
        })
        .collect())
}
