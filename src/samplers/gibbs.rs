//! Defines a Gibbs `Sampler`.
//!
//! Implementation of Koller & Friedman Algorithm 12.4

use distribution::Distribution;
use model::network::BayesNet;
use super::{LikelihoodWeightedSampler, Sampler, WeightedSample, WeightedSampler, weighted_selection};
use util::{Result, ReverendError};
use variable::Assignment;

use itertools::Itertools;
use rand::{self, Rng, ThreadRng};

/// How many likelihood weighted draws to try for a starting state the evidence is possible in
const MAX_INIT_ATTEMPTS: usize = 100;

/// A Markov chain over the full assignments of a `BayesNet` that agree with some evidence.
///
/// Every step resamples one non-evidence node from its distribution given its Markov blanket,
/// cycling through the non-evidence nodes in topological order.
pub struct GibbsSampler<'a, R: Rng = ThreadRng> {

    model: &'a BayesNet,

    /// The nodes that are resampled, i.e. those without evidence
    free: Vec<String>,

    /// The current state of the chain
    sample: Assignment,

    /// Position in `free` of the node resampled by the next step
    next: usize,

    rng: R

}


impl<'a> GibbsSampler<'a, ThreadRng> {

    /// Construct a new `GibbsSampler` from the `BayesNet`
    pub fn new(model: &'a BayesNet, evidence: &Assignment) -> Result<Self> {
        GibbsSampler::with_rng(model, evidence, rand::thread_rng())
    }

}

impl<'a, R: Rng> GibbsSampler<'a, R> {

    /// Construct a new `GibbsSampler` from the `BayesNet`, drawing from `rng`
    ///
    /// Initializes the assignment from a `LikelihoodWeightedSampler`, taking the first draw with a
    /// non-zero weight.
    ///
    /// # Errors
    /// * `ReverendError::MissingNode` or `ReverendError::InvalidValue` if the evidence does not
    ///   fit the network
    /// * `ReverendError::NotEnoughData` if no draw in which the evidence is possible is found
    pub fn with_rng(model: &'a BayesNet, evidence: &Assignment, mut rng: R) -> Result<Self> {
        model.check_evidence(evidence)?;

        let free: Vec<String> = model.order()
                                     .into_iter()
                                     .filter(|v| ! evidence.contains(v))
                                     .map(String::from)
                                     .collect();

        // use likelihood sampling to draw an initial sample from the mutilated Bayesian network
        let sample = {
            let mut t0_sampler = LikelihoodWeightedSampler::with_rng(model, evidence, &mut rng);

            let mut attempts = 1;
            let mut particle = t0_sampler.weighted_sample()?;
            while particle.1 <= 0.0 && attempts < MAX_INIT_ATTEMPTS {
                particle = t0_sampler.weighted_sample()?;
                attempts += 1;
            }

            let WeightedSample(sample, weight) = particle;
            if weight <= 0.0 {
                debug!(evidence = %evidence, attempts = attempts, "no starting state found in which the evidence is possible");
                return Err(ReverendError::NotEnoughData);
            }
            sample
        };

        Ok(GibbsSampler { model, free, sample, next: 0, rng })
    }

    /// The current state of the chain
    pub fn state(&self) -> &Assignment {
        &self.sample
    }

    /// The nodes without evidence, in the order they are resampled
    pub fn free(&self) -> &[String] {
        &self.free
    }

    /// Unnormalized ```P(node = v | blanket)``` for every value `v` of `node`: the node's own CPT
    /// entry times the CPT entry of every child, with `v` substituted into the current state.
    fn blanket_weights(&self, node: &str) -> Result<Vec<f64>> {
        let var = self.model.variable(node)?;
        let children: Vec<String> = self.model.graph().children(node).into_iter().unique().collect();

        let mut weights = Vec::with_capacity(var.cardinality());
        for value in var.values().iter() {
            let candidate = self.sample.with(node, value);

            let mut w = self.model.lookup(node, value, &candidate)?;
            for child in children.iter() {
                let child_value = candidate.get(child)
                                           .ok_or_else(|| ReverendError::IncompleteAssignment(vec![child.clone()]))?;
                w = w * self.model.lookup(child, child_value, &candidate)?;
            }

            weights.push(w);
        }

        Ok(weights)
    }

    /// The distribution of `node` given the current values of its Markov blanket
    ///
    /// # Errors
    /// * `ReverendError::DivideByZero` if every value of `node` is impossible in the current state
    pub fn blanket_distribution(&self, node: &str) -> Result<Distribution> {
        let weights = self.blanket_weights(node)?;
        let var = self.model.variable(node)?;

        Distribution::from_weights(var.values(), &weights).normalized()
    }

    /// Resample the next non-evidence node. A node whose every value is impossible in the current
    /// state keeps its value.
    pub fn step(&mut self) -> Result<()> {
        if self.free.is_empty() {
            return Ok(());
        }

        let model = self.model;
        let node = self.free[self.next].clone();
        self.next = (self.next + 1) % self.free.len();

        let weights = self.blanket_weights(&node)?;
        if weights.iter().sum::<f64>() <= 0.0 {
            debug!(node = %node, state = %self.sample, "markov blanket has no mass, keeping the current value");
            return Ok(());
        }

        let var = model.variable(&node)?;
        let value = weighted_selection(var.values(), &weights, &mut self.rng)?;
        self.sample.set(&node, value);

        Ok(())
    }

}

impl<'a, R: Rng> Sampler for GibbsSampler<'a, R> {

    /// Resample every non-evidence node once and return the new state
    fn sample(&mut self) -> Result<Assignment> {
        for _ in 0..self.free.len() {
            self.step()?;
        }

        Ok(self.sample.clone())
    }

}
