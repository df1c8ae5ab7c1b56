//! Defines the interface to inference engines

use distribution::Distribution;
use variable::Assignment;
use super::Result;

mod enumeration;
mod importance_sampling;
mod mcmc;
mod rejection;

pub use self::enumeration::EnumerationEngine;
pub use self::importance_sampling::ImportanceSamplingEngine;
pub use self::mcmc::McmcEngine;
pub use self::rejection::{select_consistent, RejectionSamplingEngine};


/// A `ConditionalInferenceEngine` is capable of answering Conditional Probability Queries of the form:
///     ```P(Y | E = e)```
///
/// The network is fixed when the engine is constructed. The evidence is given with every query and
/// is never retained, so one engine may answer any number of queries.
pub trait ConditionalInferenceEngine {

    /// Infer the distribution ```P(query | evidence)```
    fn infer(&mut self, query: &str, evidence: &Assignment) -> Result<Distribution>;

}
