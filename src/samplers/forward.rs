//! Defines a simple forward (prior) sampler for a `BayesNet`
//!
//! Implementation of Koller & Friedman Algorithm 12.1 (pp 489)

use model::network::BayesNet;
use util::Result;
use variable::Assignment;
use super::{sample_node, Sampler};

use rand::{self, Rng, ThreadRng};

/// A `Sampler` that draws full assignments from the prior distribution of a `BayesNet`
///
/// A draw that reaches a CPT row whose weights are all zero fails with
/// `ReverendError::DivideByZero`, and so does any batch from `samples` containing it.
pub struct ForwardSampler<'a, R: Rng = ThreadRng> {

    /// The `BayesNet` to sample
    model: &'a BayesNet,

    /// The source of randomness
    rng: R
}


impl<'a> ForwardSampler<'a, ThreadRng> {

    pub fn new(model: &'a BayesNet) -> Self {
        ForwardSampler::with_rng(model, rand::thread_rng())
    }

}

impl<'a, R: Rng> ForwardSampler<'a, R> {

    pub fn with_rng(model: &'a BayesNet, rng: R) -> Self {
        ForwardSampler { model, rng }
    }

    fn get_sample(&mut self) -> Result<Assignment> {
        let mut a = Assignment::new();

        for var in self.model.order().into_iter() {
            // we iterate in topological order so every parent of var already has a value
            let value = sample_node(self.model, var, &a, &mut self.rng)?;
            a.set(var, &value);
        }

        Ok(a)
    }
}

impl<'a, R: Rng> Sampler for ForwardSampler<'a, R> {

    fn sample(&mut self) -> Result<Assignment> {
        self.get_sample()
    }

}
