//! Defines a `ConditionalInferenceEngine` for Markov-Chain Monte-Carlo methods.
//!
//! Implementation of MCMC Inference for Conditional Queries described in Koller & Friedman
//! 12.3.5.2

use distribution::Distribution;
use model::network::BayesNet;
use samplers::{GibbsSampler, Sampler};
use super::ConditionalInferenceEngine;
use util::{Result, ReverendError};
use variable::Assignment;

use rand::{self, Rng, ThreadRng};

use std::cmp;

/// A `ConditionalInferenceEngine` for Bayesian networks that runs a `GibbsSampler` per query.
pub struct McmcEngine<'a, R: Rng = ThreadRng> {

    model: &'a BayesNet,

    /// The number of full sweeps discarded before counting
    burnin: usize,

    /// The number of full sweeps counted
    sweeps: usize,

    rng: R

}

impl<'a> McmcEngine<'a, ThreadRng> {

    pub fn new(model: &'a BayesNet, burnin: usize, sweeps: usize) -> Self {
        McmcEngine::with_rng(model, burnin, sweeps, rand::thread_rng())
    }

}

impl<'a, R: Rng> McmcEngine<'a, R> {

    pub fn with_rng(model: &'a BayesNet, burnin: usize, sweeps: usize, rng: R) -> Self {
        McmcEngine { model, burnin, sweeps, rng }
    }

    /// Estimate ```P(query | evidence)``` from the states visited by a Gibbs chain.
    ///
    /// The value of `query` is counted after every single-node step once the chain has burned in.
    ///
    /// # Errors
    /// * `ReverendError::InvalidScope` if `query` is not a node of the network
    /// * `ReverendError::NotEnoughData` if no state is counted, or the evidence is impossible
    pub fn distribution(&mut self, query: &str, evidence: &Assignment) -> Result<Distribution> {
        let model = self.model;
        let var = model.variable(query)?;

        let mut sampler = GibbsSampler::with_rng(model, evidence, &mut self.rng)?;

        // let the sampler burnin
        for _ in 0..self.burnin {
            sampler.sample()?;
        }

        let mut dist = Distribution::from_weights(var.values(), &vec![0.0; var.cardinality()]);

        let steps = self.sweeps * cmp::max(1, sampler.free().len());
        for _ in 0..steps {
            sampler.step()?;

            if let Some(value) = sampler.state().get(query) {
                dist.add(value, 1.0);
            }
        }

        if dist.total() <= 0.0 {
            return Err(ReverendError::NotEnoughData);
        }

        debug!(query = query, evidence = %evidence, steps = steps, "gibbs chain finished");
        dist.normalize()?;
        Ok(dist)
    }

}

impl<'a, R: Rng> ConditionalInferenceEngine for McmcEngine<'a, R> {

    fn infer(&mut self, query: &str, evidence: &Assignment) -> Result<Distribution> {
        self.distribution(query, evidence)
    }

}
