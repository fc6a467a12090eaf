//! Ensemble parameters and model configurations
//!
//! A [`ParameterSet`] maps parameter names to either a single scalar or an
//! ordered list of scalars. Before permutation every entry is read as a list
//! (scalars become single-element lists), which yields the parallel
//! `names`/`values` sequences consumed by a
//! [`PermutationStrategy`](crate::strategy::PermutationStrategy).

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::writer::is_tag_name;
use crate::{Error, Result};

/// One concrete parameter assignment: name -> single value.
///
/// Key order follows the ensemble's parameter order for built-in strategies.
pub type Configuration = IndexMap<String, ParamValue>;

/// Scalar parameter value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer value
    Int(i64),
    /// String value
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Parameter definition: a single scalar or an ordered list of scalars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamSpec {
    /// Single value, coerced to a one-element list for permutation
    Scalar(ParamValue),
    /// Ordered candidate values
    List(Vec<ParamValue>),
}

impl ParamSpec {
    /// Values as a list (scalars become single-element lists).
    #[must_use]
    pub fn to_values(&self) -> Vec<ParamValue> {
        match self {
            Self::Scalar(v) => vec![v.clone()],
            Self::List(vs) => vs.clone(),
        }
    }

    fn from_json(name: &str, value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| scalar_from_json(name, item))
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            other => scalar_from_json(name, other).map(Self::Scalar),
        }
    }
}

fn scalar_from_json(name: &str, value: &serde_json::Value) -> Result<ParamValue> {
    match value {
        serde_json::Value::String(s) => Ok(ParamValue::Str(s.clone())),
        serde_json::Value::Number(n) => n.as_i64().map(ParamValue::Int).ok_or_else(|| {
            Error::Generation(format!(
                "Incorrect type for ensemble parameter {name}: {n}\nMust be list, int, or string."
            ))
        }),
        other => Err(Error::Generation(format!(
            "Incorrect type for ensemble parameter {name}: {other}\nMust be list, int, or string."
        ))),
    }
}

impl From<ParamValue> for ParamSpec {
    fn from(v: ParamValue) -> Self {
        Self::Scalar(v)
    }
}

impl From<i64> for ParamSpec {
    fn from(v: i64) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<i32> for ParamSpec {
    fn from(v: i32) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<&str> for ParamSpec {
    fn from(s: &str) -> Self {
        Self::Scalar(s.into())
    }
}

impl From<String> for ParamSpec {
    fn from(s: String) -> Self {
        Self::Scalar(s.into())
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamSpec {
    fn from(vs: Vec<T>) -> Self {
        Self::List(vs.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>, const N: usize> From<[T; N]> for ParamSpec {
    fn from(vs: [T; N]) -> Self {
        Self::List(vs.into_iter().map(Into::into).collect())
    }
}

/// Insertion-ordered parameter definitions of an ensemble
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    params: IndexMap<String, ParamSpec>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parameter set from a JSON object.
    ///
    /// Values must be strings, integers, or arrays of those.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`] if the value is not an object or any
    /// parameter has an unsupported type (float, bool, null, object, nested array).
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(map) = value else {
            return Err(Error::Generation(format!(
                "Ensemble parameters must be a JSON object, got {value}"
            )));
        };
        let mut params = Self::new();
        for (name, spec) in map {
            params
                .params
                .insert(name.clone(), ParamSpec::from_json(name, spec)?);
        }
        Ok(params)
    }

    /// Add or replace a parameter, keeping its original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, spec: impl Into<ParamSpec>) {
        self.params.insert(name.into(), spec.into());
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, spec: impl Into<ParamSpec>) -> Self {
        self.insert(name, spec);
        self
    }

    /// Look up a parameter definition.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.get(name)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if no parameters are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over `(name, spec)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamSpec)> {
        self.params.iter()
    }

    /// Split into parallel `names`/`values` sequences for a permutation strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`] if a list parameter has no values, or a
    /// name could never be matched by a tag (letters, digits, `_`, `.`, `-`).
    pub fn to_names_and_values(&self) -> Result<(Vec<String>, Vec<Vec<ParamValue>>)> {
        let mut names = Vec::with_capacity(self.params.len());
        let mut values = Vec::with_capacity(self.params.len());
        for (name, spec) in &self.params {
            if !is_tag_name(name) {
                return Err(Error::Generation(format!(
                    "Ensemble parameter name {name:?} cannot be tagged\nUse only letters, digits, '_', '.' or '-'."
                )));
            }
            let list = spec.to_values();
            if list.is_empty() {
                return Err(Error::Generation(format!(
                    "Ensemble parameter {name} has an empty value list"
                )));
            }
            names.push(name.clone());
            values.push(list);
        }
        Ok((names, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_coerced_to_list() {
        let params = ParameterSet::new().with("STEPS", 100).with("MODE", "fast");
        let (names, values) = params.to_names_and_values().unwrap();
        assert_eq!(names, vec!["STEPS", "MODE"]);
        assert_eq!(values[0], vec![ParamValue::Int(100)]);
        assert_eq!(values[1], vec![ParamValue::Str("fast".into())]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let params = ParameterSet::new()
            .with("Z", [1, 2])
            .with("A", vec!["x", "y"])
            .with("M", 3);
        let names: Vec<&String> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_empty_list_rejected() {
        let params = ParameterSet::new().with("EMPTY", Vec::<i64>::new());
        let err = params.to_names_and_values().unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn test_untaggable_names_rejected() {
        for name in ["my param", "a:b", ""] {
            let params = ParameterSet::new().with("OK", 1).with(name, [7]);
            let err = params.to_names_and_values().unwrap_err();
            assert!(matches!(err, Error::Generation(_)), "accepted {name:?}");
        }
        assert!(ParameterSet::new()
            .with("dt.v-2_x", 1)
            .to_names_and_values()
            .is_ok());
    }

    #[test]
    fn test_from_json_accepts_scalars_and_lists() {
        let params = ParameterSet::from_json(&json!({
            "THERMO": [10, 20],
            "STEPS": 100,
            "NAME": "run"
        }))
        .unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(
            params.get("THERMO"),
            Some(&ParamSpec::List(vec![ParamValue::Int(10), ParamValue::Int(20)]))
        );
        assert_eq!(params.get("NAME"), Some(&ParamSpec::Scalar("run".into())));
    }

    #[test]
    fn test_from_json_rejects_malformed_types() {
        for bad in [
            json!({"X": 1.5}),
            json!({"X": true}),
            json!({"X": null}),
            json!({"X": {"nested": 1}}),
            json!({"X": [[1, 2]]}),
            json!([1, 2]),
        ] {
            let err = ParameterSet::from_json(&bad).unwrap_err();
            assert!(matches!(err, Error::Generation(_)), "accepted {bad}");
        }
    }

    #[test]
    fn test_param_value_display() {
        assert_eq!(ParamValue::Int(-7).to_string(), "-7");
        assert_eq!(ParamValue::from("abc").to_string(), "abc");
    }
}
