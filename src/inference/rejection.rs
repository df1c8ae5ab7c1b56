//! Defines a `ConditionalInferenceEngine` that estimates conditional distributions by rejection
//! sampling.
//!
//! Implementation of REJECTION-SAMPLING, Russell & Norvig Figure 14.14

use distribution::Distribution;
use model::network::BayesNet;
use samplers::{ForwardSampler, Sampler};
use super::ConditionalInferenceEngine;
use util::{Result, ReverendError};
use variable::Assignment;

use rand::{self, Rng, ThreadRng};


/// Keep only the samples that agree with every entry of `evidence`
pub fn select_consistent<'s>(samples: &'s [Assignment], evidence: &Assignment) -> Vec<&'s Assignment> {
    samples.iter().filter(|s| s.is_consistent_with(evidence)).collect()
}


/// An `InferenceEngine` for Bayesian networks using rejection sampling
pub struct RejectionSamplingEngine<'a, R: Rng = ThreadRng> {

    /// The model over which to perform inference
    model: &'a BayesNet,

    /// The number of prior samples drawn per query
    samples: usize,

    rng: R

}

impl<'a> RejectionSamplingEngine<'a, ThreadRng> {

    pub fn new(model: &'a BayesNet, samples: usize) -> Self {
        RejectionSamplingEngine::with_rng(model, samples, rand::thread_rng())
    }

}

impl<'a, R: Rng> RejectionSamplingEngine<'a, R> {

    pub fn with_rng(model: &'a BayesNet, samples: usize, rng: R) -> Self {
        RejectionSamplingEngine { model, samples, rng }
    }

    /// Estimate ```P(query | evidence)``` from the prior samples that agree with `evidence`.
    ///
    /// # Errors
    /// * `ReverendError::InvalidScope` if `query` is not a node of the network
    /// * `ReverendError::NotEnoughData` if no sample agrees with the evidence
    pub fn distribution(&mut self, query: &str, evidence: &Assignment) -> Result<Distribution> {
        let model = self.model;
        let var = model.variable(query)?;
        model.check_evidence(evidence)?;

        let samples = ForwardSampler::with_rng(model, &mut self.rng).samples(self.samples)?;
        let consistent = select_consistent(&samples, evidence);

        if consistent.is_empty() {
            debug!(query = query, evidence = %evidence, samples = self.samples, "no sample agrees with the evidence");
            return Err(ReverendError::NotEnoughData);
        }

        let mut dist = Distribution::from_weights(var.values(), &vec![0.0; var.cardinality()]);
        for s in consistent.iter() {
            if let Some(value) = s.get(query) {
                dist.add(value, 1.0);
            }
        }

        debug!(query = query, kept = consistent.len(), samples = self.samples, "rejection sampling finished");
        dist.normalize()?;
        Ok(dist)
    }

}

impl<'a, R: Rng> ConditionalInferenceEngine for RejectionSamplingEngine<'a, R> {

    fn infer(&mut self, query: &str, evidence: &Assignment) -> Result<Distribution> {
        self.distribution(query, evidence)
    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use fixtures;

    #[test]
    fn consistent() {
        let samples = vec![
            Assignment::from_pairs(&[("A", "True"), ("B", "True")]),
            Assignment::from_pairs(&[("A", "False"), ("B", "True")]),
            Assignment::from_pairs(&[("A", "True"), ("B", "False")]),
        ];

        let kept = select_consistent(&samples, &Assignment::from_pairs(&[("A", "True")]));
        assert_eq!(vec![&samples[0], &samples[2]], kept);

        let kept = select_consistent(&samples, &Assignment::new());
        assert_eq!(3, kept.len());

        let kept = select_consistent(&samples, &Assignment::from_pairs(&[("A", "True"), ("B", "Maybe")]));
        assert!(kept.is_empty());
    }

    #[test]
    fn no_samples() {
        let model = fixtures::two_node();
        let mut engine = RejectionSamplingEngine::new(&model, 0);

        assert_eq!(
            Err(ReverendError::NotEnoughData),
            engine.distribution("A", &Assignment::new())
        );
    }

    #[test]
    fn counts_are_normalized() {
        let model = fixtures::student();
        let mut engine = RejectionSamplingEngine::new(&model, 500);

        let dist = engine.distribution("Grade", &Assignment::from_pairs(&[("Difficulty", "easy")])).unwrap();
        assert_eq!(3, dist.len());
        assert!((dist.total() - 1.0).abs() < 1e-9);
    }

}
