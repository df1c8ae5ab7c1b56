//! Defines an importance-sampling `InferenceEngine` for approximate inference using particle-based
//! approximations.
//!
//! Implementation of Importance Sampling via Normalized Likelihood Weighting, described in Koller &
//! Friedman 12.2.3.3

use distribution::Distribution;
use model::network::BayesNet;
use samplers::{LikelihoodWeightedSampler, WeightedSample, WeightedSampler};
use super::ConditionalInferenceEngine;
use util::{Result, ReverendError};
use variable::Assignment;

use rand::{self, Rng, ThreadRng};

/// An `InferenceEngine` for Bayesian networks using Importance Sampling
pub struct ImportanceSamplingEngine<'a, R: Rng = ThreadRng> {

    /// The model over which to perform inference
    model: &'a BayesNet,

    /// The number of samples to use
    samples: usize,

    rng: R
}

impl<'a> ImportanceSamplingEngine<'a, ThreadRng> {

    pub fn new(model: &'a BayesNet, samples: usize) -> Self {
        ImportanceSamplingEngine::with_rng(model, samples, rand::thread_rng())
    }

}

impl<'a, R: Rng> ImportanceSamplingEngine<'a, R> {

    pub fn with_rng(model: &'a BayesNet, samples: usize, rng: R) -> Self {
        ImportanceSamplingEngine { model, samples, rng }
    }

    /// Estimate ```P(query | evidence)``` as the normalized sum of the weights of the particles
    /// for each value of `query`.
    ///
    /// # Errors
    /// * `ReverendError::InvalidScope` if `query` is not a node of the network
    /// * `ReverendError::NotEnoughData` if every particle has zero weight
    pub fn distribution(&mut self, query: &str, evidence: &Assignment) -> Result<Distribution> {
        let model = self.model;
        let var = model.variable(query)?;
        model.check_evidence(evidence)?;

        let mut dist = Distribution::from_weights(var.values(), &vec![0.0; var.cardinality()]);

        // sample away...
        let mut sampler = LikelihoodWeightedSampler::with_rng(model, evidence, &mut self.rng);
        for _ in 0..self.samples {
            let WeightedSample(a, w) = sampler.weighted_sample()?;

            if let Some(value) = a.get(query) {
                dist.add(value, w);
            }
        }

        if dist.total() <= 0.0 {
            debug!(query = query, evidence = %evidence, samples = self.samples, "every particle has zero weight");
            return Err(ReverendError::NotEnoughData);
        }

        dist.normalize()?;
        Ok(dist)
    }

}

impl<'a, R: Rng> ConditionalInferenceEngine for ImportanceSamplingEngine<'a, R> {

    fn infer(&mut self, query: &str, evidence: &Assignment) -> Result<Distribution> {
        self.distribution(query, evidence)
    }

}
