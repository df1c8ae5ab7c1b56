//! Defines a `Distribution`: a mapping from the values of a single node to probabilities (or, before
//! normalization, to unnormalized weights).

use util::{Result, ReverendError};

use indexmap::IndexMap;
use indexmap::map::Iter;

use std::fmt;


#[derive(Clone, Debug, Default, PartialEq)]
pub struct Distribution {
    probs: IndexMap<String, f64>
}

impl Distribution {

    /// Construct an empty `Distribution`
    pub fn new() -> Self {
        Distribution { probs: IndexMap::new() }
    }

    /// Construct a `Distribution` pairing each value with its weight. Extra values or weights are
    /// ignored.
    pub fn from_weights<S: AsRef<str>>(values: &[S], weights: &[f64]) -> Self {
        let probs = values.iter()
                          .zip(weights.iter())
                          .map(|(v, &w)| (String::from(v.as_ref()), w))
                          .collect();

        Distribution { probs }
    }

    /// Set the weight of `value`
    pub fn set(&mut self, value: &str, weight: f64) {
        self.probs.insert(String::from(value), weight);
    }

    /// Add `weight` to the weight of `value`
    pub fn add(&mut self, value: &str, weight: f64) {
        *self.probs.entry(String::from(value)).or_insert(0.0) += weight;
    }

    /// Get the weight of `value`
    pub fn get(&self, value: &str) -> Option<f64> {
        self.probs.get(value).cloned()
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Iterate over the ```(value, weight)``` pairs, in insertion order
    pub fn iter(&self) -> Iter<String, f64> {
        self.probs.iter()
    }

    /// The sum of all weights
    pub fn total(&self) -> f64 {
        self.probs.values().sum()
    }

    /// Rescale the weights so they sum to one.
    ///
    /// # Errors
    /// * `ReverendError::EmptyDistribution` if there are no values
    /// * `ReverendError::DivideByZero` if the weights sum to zero
    ///
    /// On error the weights are left as they were.
    pub fn normalize(&mut self) -> Result<()> {
        if self.probs.is_empty() {
            warn!("distribution can't be empty");
            return Err(ReverendError::EmptyDistribution);
        }

        let total = self.total();
        if total == 0.0 {
            warn!(distribution = %self, "probabilities to be normalized cannot add to zero");
            return Err(ReverendError::DivideByZero);
        }

        for p in self.probs.values_mut() {
            *p = *p / total;
        }

        Ok(())
    }

    /// Consume the `Distribution`, returning it normalized
    pub fn normalized(mut self) -> Result<Self> {
        self.normalize()?;
        Ok(self)
    }

    /// The value with the highest weight. Ties go to the earliest value.
    pub fn most_likely(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;

        for (v, &p) in self.probs.iter() {
            match best {
                Some((_, bp)) if bp >= p => (),
                _ => best = Some((v.as_str(), p))
            }
        }

        best
    }

}

impl fmt::Display for Distribution {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, (value, p)) in self.probs.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "P({}) = {:6.2}", value, p)?;
        }
        Ok(())
    }

}
