//! Defines the `Sampler` trait - an object that can randomly sample from a `BayesNet`.

use model::network::BayesNet;
use util::Result;
use variable::Assignment;

use rand::Rng;

pub mod forward;
pub mod gibbs;
pub mod likelihood;
pub mod selection;

pub use self::forward::ForwardSampler;
pub use self::gibbs::GibbsSampler;
pub use self::likelihood::LikelihoodWeightedSampler;
pub use self::selection::{weighted_index, weighted_selection};

pub trait Sampler {

    /// Sample a full assignment from the associated `BayesNet`.
    fn sample(&mut self) -> Result<Assignment>;

    /// Draw `count` samples
    fn samples(&mut self, count: usize) -> Result<Vec<Assignment>> {
        (0..count).map(|_| self.sample()).collect()
    }

}


/// A sample (a full assignment) and the associated weight.
/// Used for likelihood weighting.
#[derive(Clone, Debug)]
pub struct WeightedSample(pub Assignment, pub f64);

pub trait WeightedSampler {

    /// Sample a full assignment and its weight from the associated `BayesNet`.
    fn weighted_sample(&mut self) -> Result<WeightedSample>;

    /// Draw `count` weighted samples
    fn weighted_samples(&mut self, count: usize) -> Result<Vec<WeightedSample>> {
        (0..count).map(|_| self.weighted_sample()).collect()
    }

}


/// Draw a value for `node` from ```P(node | parents)```, with the parents' values taken from
/// `knowns`.
pub(crate) fn sample_node<R: Rng>(model: &BayesNet, node: &str, knowns: &Assignment, rng: &mut R) -> Result<String> {
    let var = model.variable(node)?;

    let mut probs = Vec::with_capacity(var.cardinality());
    for value in var.values().iter() {
        probs.push(model.lookup(node, value, knowns)?);
    }

    weighted_selection(var.values(), &probs, rng).map(|v| v.clone())
}
