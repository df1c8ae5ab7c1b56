//! Defines a `Model`, a Bayesian (directed) graphical model representing the factorization of a
//! probability distribution P over discrete random variables.

use variable::{Assignment, Variable};
use util::Result;

/// The `Model` trait represents a Probabilistic Graphical Model.
pub trait Model {

    /// Lookup a `Variable` in the `Model` based on the name
    fn lookup_variable(&self, name: &str) -> Option<&Variable>;


    /// Get the names of all `Variable`s in the model, in topological order.
    fn variables(&self) -> Vec<&str>;


    /// Get the number of `Variable`s in the the `Model`
    fn num_variables(&self) -> usize;


    /// Determine the probability of a full `Assignment` to the `Variable`s in the `Model`.
    ///
    /// Specifically, this computes ```P(zeta)```, where ```zeta``` is a full assignment.
    ///
    /// # Args
    /// * `assignment`: a full `Assignment` to the `Model`
    ///
    /// # Returns
    /// the probability of the `Assignment` given the `Model`
    fn probability(&self, assignment: &Assignment) -> Result<f64>;
}

pub mod network;
