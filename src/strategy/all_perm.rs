//! Cartesian product strategy

use super::{nth_configuration, space_size, StrategyOptions};
use crate::params::{Configuration, ParamValue};
use crate::Result;

/// Every combination of parameter values.
///
/// Order matches a standard product generator: the last list varies fastest,
/// so `{A: [1, 2], B: [x, y]}` yields `(1,x) (1,y) (2,x) (2,y)`. This order
/// decides generated model indices and must stay stable.
///
/// # Errors
///
/// Returns [`Error::Generation`](crate::Error::Generation) if the product size
/// overflows `usize`.
pub fn create_all_permutations(
    names: &[String],
    values: &[Vec<ParamValue>],
    _options: &StrategyOptions,
) -> Result<Vec<Configuration>> {
    let total = space_size(values)?;
    Ok((0..total)
        .map(|index| nth_configuration(names, values, index))
        .collect())
}
