//! Permutation strategies
//!
//! A strategy expands parallel `names`/`values` sequences into an ordered list
//! of [`Configuration`]s. The position of a configuration in that list becomes
//! the generated model's index, so every built-in strategy is deterministic
//! (Random only once seeded).
//!
//! ## Built-ins
//!
//! | Name | Variant | Output |
//! |------------|-------------------|---------------------------------------|
//! | `all_perm` | `AllPermutations` | Cartesian product, last list fastest |
//! | `step`     | `Step`            | positional zip of equal-length lists  |
//! | `random`   | `Random`          | `n_models` samples without replacement|
//!
//! ## Example
//!
//! ```rust
//! use trueno_ensemble::params::ParamValue;
//! use trueno_ensemble::strategy::{PermutationStrategy, StrategyOptions};
//!
//! let names = vec!["A".to_string(), "B".to_string()];
//! let values = vec![
//!     vec![ParamValue::Int(1), ParamValue::Int(2)],
//!     vec![ParamValue::Int(10), ParamValue::Int(20)],
//! ];
//! let configs = PermutationStrategy::AllPermutations
//!     .permute(&names, &values, &StrategyOptions::default())?;
//! assert_eq!(configs.len(), 4);
//! assert_eq!(configs[1]["B"], ParamValue::Int(20));
//! # Ok::<(), trueno_ensemble::Error>(())
//! ```

mod all_perm;
mod random;
mod step;

pub use all_perm::create_all_permutations;
pub use random::random_permutations;
pub use step::step_values;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::params::{Configuration, ParamValue};
use crate::{Error, Result};

/// Signature shared by every strategy, built-in or custom.
pub type StrategyFn = dyn Fn(&[String], &[Vec<ParamValue>], &StrategyOptions) -> Result<Vec<Configuration>>
    + Send
    + Sync;

/// Strategy-specific options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyOptions {
    /// Number of configurations to sample (Random)
    pub n_models: Option<usize>,
    /// RNG seed for reproducible sampling (Random)
    pub seed: Option<u64>,
    /// Free-form options forwarded to custom strategies
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl StrategyOptions {
    /// Set the sample count.
    #[must_use]
    pub const fn n_models(mut self, n: usize) -> Self {
        self.n_models = Some(n);
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Add a custom option.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Name of a built-in strategy, as used in configuration files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Cartesian product
    #[default]
    #[serde(rename = "all_perm")]
    AllPermutations,
    /// Positional zip
    #[serde(rename = "step")]
    Step,
    /// Random sample of the Cartesian product
    #[serde(rename = "random")]
    Random,
}

impl StrategyKind {
    /// Configuration name of this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllPermutations => "all_perm",
            Self::Step => "step",
            Self::Random => "random",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all_perm" => Ok(Self::AllPermutations),
            "step" => Ok(Self::Step),
            "random" => Ok(Self::Random),
            other => Err(Error::Configuration(format!(
                "Permutation strategy given is not supported: {other}\nOptions are \"all_perm\", \"step\", \"random\", or a custom strategy"
            ))),
        }
    }
}

/// User-registered strategy function
#[derive(Clone)]
pub struct CustomStrategy(Arc<StrategyFn>);

impl fmt::Debug for CustomStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomStrategy(..)")
    }
}

/// Strategy used by the generator to expand ensembles into models
#[derive(Debug, Clone, Default)]
pub enum PermutationStrategy {
    /// Every combination of parameter values
    #[default]
    AllPermutations,
    /// The k-th value of every list, for each k
    Step,
    /// Sample of the Cartesian product
    Random,
    /// Caller-supplied function; output is used as-is
    Custom(CustomStrategy),
}

impl PermutationStrategy {
    /// Register a custom strategy.
    ///
    /// The function receives parameter names, their value lists (same order)
    /// and the generation options. Its output is not validated: configurations
    /// missing a tagged parameter simply leave that tag unsubstituted.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[String], &[Vec<ParamValue>], &StrategyOptions) -> Result<Vec<Configuration>>
            + Send
            + Sync
            + 'static,
    {
        Self::Custom(CustomStrategy(Arc::new(f)))
    }

    /// Expand parameter lists into configurations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`] on shape violations (mismatched step
    /// lengths, oversized samples, product overflow) or whatever a custom
    /// strategy returns.
    pub fn permute(
        &self,
        names: &[String],
        values: &[Vec<ParamValue>],
        options: &StrategyOptions,
    ) -> Result<Vec<Configuration>> {
        if names.len() != values.len() {
            return Err(Error::Generation(format!(
                "{} parameter names given for {} value lists",
                names.len(),
                values.len()
            )));
        }
        match self {
            Self::AllPermutations => create_all_permutations(names, values, options),
            Self::Step => step_values(names, values, options),
            Self::Random => random_permutations(names, values, options),
            Self::Custom(CustomStrategy(f)) => f(names, values, options),
        }
    }
}

impl From<StrategyKind> for PermutationStrategy {
    fn from(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::AllPermutations => Self::AllPermutations,
            StrategyKind::Step => Self::Step,
            StrategyKind::Random => Self::Random,
        }
    }
}

impl FromStr for PermutationStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<StrategyKind>().map(Into::into)
    }
}

/// Size of the Cartesian space spanned by `values`.
pub(crate) fn space_size(values: &[Vec<ParamValue>]) -> Result<usize> {
    values.iter().try_fold(1usize, |acc, list| {
        acc.checked_mul(list.len()).ok_or_else(|| {
            Error::Generation("Parameter space is too large to enumerate".to_string())
        })
    })
}

/// Decode a flat product index into a configuration (last list fastest).
pub(crate) fn nth_configuration(
    names: &[String],
    values: &[Vec<ParamValue>],
    mut index: usize,
) -> Configuration {
    let mut picks = vec![0usize; values.len()];
    for (slot, list) in picks.iter_mut().zip(values).rev() {
        *slot = index % list.len();
        index /= list.len();
    }
    names
        .iter()
        .zip(values)
        .zip(picks)
        .map(|((name, list), pick)| (name.clone(), list[pick].clone()))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::params::ParamValue;

    pub fn names(ns: &[&str]) -> Vec<String> {
        ns.iter().map(|n| (*n).to_string()).collect()
    }

    pub fn ints(vs: &[i64]) -> Vec<ParamValue> {
        vs.iter().copied().map(ParamValue::Int).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{ints, names};
    use super::*;

    #[test]
    fn test_strategy_from_name() {
        assert!(matches!(
            "all_perm".parse::<PermutationStrategy>().unwrap(),
            PermutationStrategy::AllPermutations
        ));
        assert!(matches!(
            "step".parse::<PermutationStrategy>().unwrap(),
            PermutationStrategy::Step
        ));
        assert!(matches!(
            "random".parse::<PermutationStrategy>().unwrap(),
            PermutationStrategy::Random
        ));
    }

    #[test]
    fn test_unsupported_strategy_name() {
        let err = "grid".parse::<PermutationStrategy>().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("grid"));
    }

    #[test]
    fn test_custom_strategy_receives_options() {
        let strategy = PermutationStrategy::custom(|names, values, options| {
            let repeat = options
                .extra
                .get("repeat")
                .and_then(serde_json::Value::as_u64)
                .unwrap_or(1);
            let first: Configuration = names
                .iter()
                .zip(values)
                .map(|(n, v)| (n.clone(), v[0].clone()))
                .collect();
            Ok((0..repeat).map(|_| first.clone()).collect())
        });
        let options = StrategyOptions::default().extra("repeat", serde_json::json!(3));
        let configs = strategy
            .permute(&names(&["A"]), &[ints(&[7, 8])], &options)
            .unwrap();
        assert_eq!(configs.len(), 3);
        assert!(configs.iter().all(|c| c["A"] == ParamValue::Int(7)));
    }

    #[test]
    fn test_names_values_length_mismatch() {
        let err = PermutationStrategy::AllPermutations
            .permute(&names(&["A", "B"]), &[ints(&[1])], &StrategyOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn test_nth_configuration_last_fastest() {
        let ns = names(&["A", "B"]);
        let vs = vec![ints(&[1, 2]), ints(&[10, 20, 30])];
        let c = nth_configuration(&ns, &vs, 4);
        assert_eq!(c["A"], ParamValue::Int(2));
        assert_eq!(c["B"], ParamValue::Int(20));
    }

    #[test]
    fn test_strategy_kind_serde_names() {
        let kind: StrategyKind = serde_json::from_str("\"random\"").unwrap();
        assert_eq!(kind, StrategyKind::Random);
        assert_eq!(
            serde_json::to_string(&StrategyKind::AllPermutations).unwrap(),
            "\"all_perm\""
        );
    }
}
