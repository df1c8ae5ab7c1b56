extern crate indexmap;
extern crate itertools;
#[macro_use]
extern crate ndarray;
extern crate ndarray_rand;
extern crate rand;
#[macro_use]
extern crate tracing;

#[cfg(test)]
#[macro_use]
extern crate proptest;

pub mod util;
pub mod variable;
pub mod graph;
pub mod order;
pub mod cpt;
pub mod init;
pub mod distribution;
pub mod model;
pub mod reader;
pub mod samplers;
pub mod inference;

#[cfg(test)]
mod fixtures;

pub use util::{Result, ReverendError};
pub use variable::{Assignment, Variable};
pub use graph::Graph;
pub use order::topological_order;
pub use cpt::{ConditionalTable, CptStore, Table};
pub use init::Initialization;
pub use distribution::Distribution;
pub use model::Model;
pub use model::network::{BayesNet, BayesNetBuilder};
pub use reader::{parse_network, read_network};
pub use samplers::{
    ForwardSampler, GibbsSampler, LikelihoodWeightedSampler, Sampler, WeightedSample, WeightedSampler,
    weighted_index, weighted_selection
};
pub use inference::{
    ConditionalInferenceEngine, EnumerationEngine, ImportanceSamplingEngine, McmcEngine,
    RejectionSamplingEngine, select_consistent
};
