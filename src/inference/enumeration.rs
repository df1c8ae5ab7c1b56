//! Defines an exact `ConditionalInferenceEngine` that sums the joint distribution over every
//! unobserved node.
//!
//! Implementation of ENUMERATION-ASK, Russell & Norvig Figure 14.9

use distribution::Distribution;
use model::network::BayesNet;
use super::ConditionalInferenceEngine;
use util::Result;
use variable::Assignment;


/// Exact inference by enumeration over the topological order of a `BayesNet`.
///
/// Nothing is cached between branches, so the cost is exponential in the number of unobserved
/// nodes.
pub struct EnumerationEngine<'a> {

    /// The model over which to perform inference
    model: &'a BayesNet

}

impl<'a> EnumerationEngine<'a> {

    pub fn new(model: &'a BayesNet) -> Self {
        EnumerationEngine { model }
    }

    /// Compute the probability of the conjunction of the assignments in `knowns`.
    ///
    /// # Errors
    /// * `ReverendError::MissingNode` or `ReverendError::InvalidValue` if an entry of `knowns` does
    ///   not fit the network
    pub fn joint_probability(&self, knowns: &Assignment) -> Result<f64> {
        self.model.check_evidence(knowns)?;

        let p = self.enumerate(0, knowns)?;
        debug!(knowns = %knowns, p = p, "joint probability");
        Ok(p)
    }

    /// The probability of the nodes from `pos` on in the topological order, given `knowns`
    fn enumerate(&self, pos: usize, knowns: &Assignment) -> Result<f64> {
        let cpt = match self.model.cpts().table_at(pos) {
            Some(cpt) => cpt,
            None => return Ok(1.0)
        };

        let var = cpt.variable();
        let node = var.name();

        if let Some(value) = knowns.get(node) {
            let p = self.model.lookup(node, value, knowns)?;
            trace!(depth = pos, node = node, value = value, p = p, "observed");

            if p == 0.0 {
                return Ok(0.0);
            }

            return Ok(p * self.enumerate(pos + 1, knowns)?);
        }

        // sum out the hidden node
        let mut total = 0.0;
        for value in var.values().iter() {
            let with = knowns.with(node, value);

            let p = self.model.lookup(node, value, &with)?;
            trace!(depth = pos, node = node, value = %value, p = p, "hidden");

            if p > 0.0 {
                total += p * self.enumerate(pos + 1, &with)?;
            }
        }

        Ok(total)
    }

    /// Compute ```P(query | evidence)```.
    ///
    /// The joint probability of each value of `query` together with `evidence` is computed, then
    /// normalized. An entry for `query` in `evidence` is replaced by each candidate value in turn.
    ///
    /// # Errors
    /// * `ReverendError::InvalidScope` if `query` is not a node of the network
    /// * `ReverendError::DivideByZero` if the evidence has probability zero
    pub fn distribution(&self, query: &str, evidence: &Assignment) -> Result<Distribution> {
        let var = self.model.variable(query)?;
        self.model.check_evidence(evidence)?;

        let mut dist = Distribution::new();
        for value in var.values().iter() {
            dist.set(value, self.joint_probability(&evidence.with(query, value))?);
        }

        dist.normalize()?;
        debug!(query = query, evidence = %evidence, "exact distribution computed");
        Ok(dist)
    }

}

impl<'a> ConditionalInferenceEngine for EnumerationEngine<'a> {

    fn infer(&mut self, query: &str, evidence: &Assignment) -> Result<Distribution> {
        self.distribution(query, evidence)
    }

}
