//! Random sampling strategy

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{create_all_permutations, nth_configuration, space_size, StrategyOptions};
use crate::params::{Configuration, ParamValue};
use crate::{Error, Result};

/// Sample `n_models` distinct configurations from the Cartesian product.
///
/// - `n_models = None`: the full product, in product order
/// - `seed = Some(s)`: reproducible sample; otherwise seeded from OS entropy
///
/// Sampling is without replacement and the result keeps the sampled order.
///
/// # Errors
///
/// Returns [`Error::Generation`] if `n_models` exceeds the size of the
/// parameter space.
pub fn random_permutations(
    names: &[String],
    values: &[Vec<ParamValue>],
    options: &StrategyOptions,
) -> Result<Vec<Configuration>> {
    let Some(n_models) = options.n_models else {
        return create_all_permutations(names, values, options);
    };
    let total = space_size(values)?;
    if n_models > total {
        return Err(Error::Generation(format!(
            "Cannot sample {n_models} models from a parameter space of {total} configurations"
        )));
    }

    let mut rng = options
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    Ok(rand::seq::index::sample(&mut rng, total, n_models)
        .into_iter()
        .map(|index| nth_configuration(names, values, index))
        .collect())
}
