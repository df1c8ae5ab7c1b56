//! Defines a `WeightedSampler` for likelihood weighted particle generation for a `BayesNet`.
//!
//! Koller & Friedman Algorithm 12.2 (pp 493)

use model::network::BayesNet;
use super::{sample_node, WeightedSample, WeightedSampler};
use util::Result;
use variable::Assignment;

use rand::{self, Rng, ThreadRng};


/// A simple `Sampler` for Bayesian networks that uses likelihood weighted sampling to draw full
/// assignments from the `BayesNet` given evidence.
pub struct LikelihoodWeightedSampler<'a, R: Rng = ThreadRng> {

    /// The model from which to sample
    model: &'a BayesNet,

    /// The evidence on which to condition
    evidence: &'a Assignment,

    rng: R

}


impl<'a> LikelihoodWeightedSampler<'a, ThreadRng> {

    pub fn new(model: &'a BayesNet, evidence: &'a Assignment) -> Self {
        LikelihoodWeightedSampler::with_rng(model, evidence, rand::thread_rng())
    }

}

impl<'a, R: Rng> LikelihoodWeightedSampler<'a, R> {

    pub fn with_rng(model: &'a BayesNet, evidence: &'a Assignment, rng: R) -> Self {
        LikelihoodWeightedSampler { model, evidence, rng }
    }

    fn get_sample(&mut self) -> Result<WeightedSample> {
        let mut a = Assignment::new();
        let mut w = 1.0;

        for var in self.model.order().into_iter() {
            if let Some(val) = self.evidence.get(var) {
                // evidence is never sampled, it only updates the weight by P(var | Pa(var))
                w = w * self.model.lookup(var, val, &a)?;
                a.set(var, val);
            } else {
                let val = sample_node(self.model, var, &a, &mut self.rng)?;
                a.set(var, &val);
            }
        }

        Ok(WeightedSample(a, w))
    }

}


impl<'a, R: Rng> WeightedSampler for LikelihoodWeightedSampler<'a, R> {

    fn weighted_sample(&mut self) -> Result<WeightedSample> {
        self.get_sample()
    }

}
