//! Definition of the variable module
//!
//! A `Variable` represents a discrete random variable (a node) in a Bayesian network. An
//! `Assignment` binds some subset of the nodes of a network to values from their domains.

use util::{Result, ReverendError};

use indexmap::IndexMap;
use indexmap::map::Iter;
use itertools::Itertools;

use std::fmt;


/// A named, discrete random variable with a finite, ordered set of possible values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {

    /// The name of the `Variable`
    name: String,

    /// The possible values, in declaration order
    values: Vec<String>

}

impl Variable {

    /// Construct a new `Variable`.
    ///
    /// # Errors
    /// * `ReverendError::EmptyDomain` if no values are given
    pub fn new<S: AsRef<str>>(name: &str, values: &[S]) -> Result<Self> {
        if values.is_empty() {
            return Err(ReverendError::EmptyDomain(String::from(name)));
        }

        Ok(Variable {
            name: String::from(name),
            values: values.iter().map(|v| String::from(v.as_ref())).collect()
        })
    }

    /// Construct a binary `Variable` with the values `True` and `False`
    pub fn binary(name: &str) -> Self {
        Variable {
            name: String::from(name),
            values: vec![String::from("True"), String::from("False")]
        }
    }

    /// Get the name of the `Variable`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the values of the `Variable`
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Get the number of values the `Variable` can take on
    pub fn cardinality(&self) -> usize {
        self.values.len()
    }

    /// Get the position of `value` in the domain, if present
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

}

impl fmt::Display for Variable {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {{{}}}", self.name, self.values.iter().join(", "))
    }

}


/// A (possibly partial) assignment of values to the nodes of a network, keyed by node name.
///
/// Iteration follows insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    values: IndexMap<String, String>
}

impl Assignment {

    /// Construct an empty `Assignment`
    pub fn new() -> Self {
        Assignment { values: IndexMap::new() }
    }

    /// Construct an `Assignment` from `(node, value)` pairs
    pub fn from_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> Self {
        let mut a = Assignment::new();
        for &(ref k, ref v) in pairs.iter() {
            a.set(k.as_ref(), v.as_ref());
        }
        a
    }

    /// Assign `value` to `node`, replacing any existing value
    pub fn set(&mut self, node: &str, value: &str) {
        self.values.insert(String::from(node), String::from(value));
    }

    /// Remove the value assigned to `node`
    pub fn unset(&mut self, node: &str) {
        self.values.shift_remove(node);
    }

    /// Get the value assigned to `node`
    pub fn get(&self, node: &str) -> Option<&str> {
        self.values.get(node).map(|v| v.as_str())
    }

    /// Check if `node` has a value
    pub fn contains(&self, node: &str) -> bool {
        self.values.contains_key(node)
    }

    /// A copy of this `Assignment` extended (or overridden) with `node = value`
    pub fn with(&self, node: &str, value: &str) -> Self {
        let mut a = self.clone();
        a.set(node, value);
        a
    }

    /// Number of assigned nodes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the `(node, value)` pairs
    pub fn iter(&self) -> Iter<String, String> {
        self.values.iter()
    }

    /// Check if every `(node, value)` pair in `evidence` is also in this `Assignment`
    pub fn is_consistent_with(&self, evidence: &Assignment) -> bool {
        evidence.iter().all(|(node, value)| self.get(node) == Some(value.as_str()))
    }

}

impl fmt::Display for Assignment {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.values.iter().map(|(k, v)| format!("{}={}", k, v)).join(", "))
    }

}
