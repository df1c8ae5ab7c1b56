//! Defines a `BayesNet`, a Bayesian model over discrete variables that represents the
//! factorization of a probability distribution P.

use cpt::{CptStore, Table};
use distribution::Distribution;
use graph::Graph;
use inference::{EnumerationEngine, RejectionSamplingEngine};
use init::Initialization;
use samplers::{ForwardSampler, Sampler};
use super::Model;
use util::{Result, ReverendError};
use variable::{Assignment, Variable};

use std::collections::HashMap;


/// Represents a Bayesian Network - a Directed Probabilistic Graphical Model.
///
/// # Representation
/// The structure lives in a `Graph`, which keeps the parents of each node in the order the edges
/// were added. The `CptStore` holds one table per node, in topological order, with the parents'
/// axes in that same order. Both are fixed once the network is built except for the entries of the
/// tables, which may be filled in afterwards. Queries only ever borrow the network immutably.
#[derive(Clone, Debug)]
pub struct BayesNet {

    /// The nodes and edges
    graph: Graph,

    /// The conditional probability tables, in topological order
    cpts: CptStore

}

impl BayesNet {

    /// Order the nodes of `graph` and allocate a zeroed CPT for every node.
    ///
    /// # Errors
    /// * `ReverendError::CyclicGraph` if the graph is not a DAG
    pub fn new(graph: Graph) -> Result<Self> {
        let cpts = CptStore::skeleton(&graph)?;
        Ok(BayesNet { graph, cpts })
    }

    /// The structure of the network
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The conditional probability tables
    pub fn cpts(&self) -> &CptStore {
        &self.cpts
    }

    /// Give up the tables and get the structure back, e.g. to edit it
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// The nodes, in topological order
    pub fn order(&self) -> Vec<&str> {
        self.cpts.order()
    }

    /// Set ```P(node = value | parents = givens)```, with `givens` in the order of
    /// `self.graph().parents(node)`
    pub fn set_cpt_entry<S: AsRef<str>>(&mut self, node: &str, value: &str, givens: &[S], prob: f64) -> Result<()> {
        self.cpts.set_entry(node, value, givens, prob)
    }

    /// Set a row of a node's CPT. Parent values are bound by name, in any order.
    pub fn set_cpt_row<S: AsRef<str>>(
        &mut self,
        node: &str,
        bindings: &HashMap<String, String>,
        probs: &[(S, f64)]
    ) -> Result<()> {
        self.cpts.set_row(node, bindings, probs)
    }

    /// Replace a node's whole CPT
    pub fn set_table(&mut self, node: &str, table: Table) -> Result<()> {
        self.cpts.set_table(node, table)
    }

    /// Replace a node's whole CPT using an `Initialization`
    pub fn initialize(&mut self, node: &str, init: Initialization) -> Result<()> {
        let current = self.cpts
                          .table(node)
                          .ok_or_else(|| ReverendError::MissingNode(String::from(node)))?;

        let cpt = init.build_cpt(current.variable().clone(), current.parents().to_vec())?;
        self.cpts.set_table(node, cpt.table().clone())
    }

    /// Look up ```P(node = value | parents)``` with the parents' values taken from `knowns`. A
    /// parent without a value makes the probability ```0.0```.
    pub fn lookup(&self, node: &str, value: &str, knowns: &Assignment) -> Result<f64> {
        self.cpts.lookup_or_zero(node, value, knowns)
    }

    /// Get the `Variable` for `node`, or an `InvalidScope` error naming it
    pub fn variable(&self, node: &str) -> Result<&Variable> {
        self.graph
            .variable(node)
            .ok_or_else(|| ReverendError::InvalidScope(format!("{} is not a node of the network", node)))
    }

    /// Verify that every entry of `evidence` names a node of the network and a value in its domain
    pub fn check_evidence(&self, evidence: &Assignment) -> Result<()> {
        for (node, value) in evidence.iter() {
            let var = self.graph
                          .variable(node)
                          .ok_or_else(|| ReverendError::MissingNode(node.clone()))?;

            if var.index_of(value).is_none() {
                return Err(ReverendError::InvalidValue { node: node.clone(), value: value.clone() });
            }
        }

        Ok(())
    }

    /// Probability of the conjunction of the assignments in `knowns`, by exact enumeration
    pub fn joint_probability(&self, knowns: &Assignment) -> Result<f64> {
        EnumerationEngine::new(self).joint_probability(knowns)
    }

    /// ```P(query | evidence)```, by exact enumeration
    pub fn distribution(&self, query: &str, evidence: &Assignment) -> Result<Distribution> {
        EnumerationEngine::new(self).distribution(query, evidence)
    }

    /// Draw `count` full assignments from the network
    ///
    /// # Errors
    /// * `ReverendError::DivideByZero` if a draw reaches a CPT row whose weights are all zero
    pub fn prior_sample(&self, count: usize) -> Result<Vec<Assignment>> {
        ForwardSampler::new(self).samples(count)
    }

    /// Estimate ```P(query | evidence)``` by rejection sampling with `count` prior samples
    pub fn rejection_sample(&self, query: &str, evidence: &Assignment, count: usize) -> Result<Distribution> {
        RejectionSamplingEngine::new(self, count).distribution(query, evidence)
    }

}

impl Model for BayesNet {

    /// Lookup a `Variable` in the `BayesNet` based on the name
    fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.graph.variable(name)
    }

    /// Get all `Variable`s in the model.
    fn variables(&self) -> Vec<&str> {
        self.order()
    }

    /// Get the number of `Variable`s in the the `BayesNet`
    fn num_variables(&self) -> usize {
        self.graph.len()
    }

    /// Determine the probability of a full `Assignment` by the chain rule.
    fn probability(&self, assignment: &Assignment) -> Result<f64> {
        let missing: Vec<String> = self.order()
                                       .into_iter()
                                       .filter(|n| ! assignment.contains(n))
                                       .map(String::from)
                                       .collect();

        if ! missing.is_empty() {
            return Err(ReverendError::IncompleteAssignment(missing));
        }

        // for every node in the graph
        self.cpts.tables()
                 // get the probability of its value given its parents'
                 .map(|t| {
                     let name = t.variable().name();
                     // every node is assigned, checked above
                     let value = assignment.get(name).unwrap_or_default();
                     t.lookup(value, assignment)
                 })
                 // and multiply those probabilities by the chain rule
                 // but if there are any errors, just return the error
                 .fold(Ok(1.0), |acc, val| acc.and_then(|p| val.map(|v| p * v)))
    }

}


/// An implementation of the [builder pattern] for creating a `BayesNet`.
///
/// Nodes and edges may be added in any order. Tables are filled once the structure is complete,
/// in the order they were given. The first error puts the builder in an error state; every later
/// call is ignored and `build` reports the error.
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
pub struct BayesNetBuilder<'a> {

    /// The structure of the network
    graph: Graph,

    /// Table contents to apply after the CPTs are allocated
    tables: Vec<(String, TableSpec<'a>)>,

    /// The error state of the builder
    err: Option<ReverendError>

}

/// A pending change to one node's CPT
enum TableSpec<'a> {
    Row(HashMap<String, String>, Vec<(String, f64)>),
    Init(Initialization<'a>)
}


impl<'a> BayesNetBuilder<'a> {

    /// Construct a new `BayesNetBuilder` representing an empty `BayesNet`
    pub fn new() -> Self {
        BayesNetBuilder {
            graph: Graph::new(),
            tables: Vec::new(),
            err: None
        }
    }

    /// Add a node with the given values
    pub fn with_node<S: AsRef<str>>(mut self, name: &str, values: &[S]) -> Self {
        if self.err.is_none() {
            if let Err(e) = self.graph.add_node(name, values) {
                self.err = Some(e);
            }
        }

        self
    }

    /// Add the edge `parent -> child`
    pub fn with_edge(mut self, parent: &str, child: &str) -> Self {
        if self.err.is_none() {
            if let Err(e) = self.graph.add_edge(parent, child) {
                self.err = Some(e);
            }
        }

        self
    }

    /// Set one row of `node`'s CPT.
    ///
    /// # Args
    /// * `node`: the node whose CPT is updated
    /// * `givens`: ```(parent, value)``` for every parent of `node`, in any order
    /// * `probs`: ```(value, probability)``` for the values of `node`
    pub fn with_cpt_row(mut self, node: &str, givens: &[(&str, &str)], probs: &[(&str, f64)]) -> Self {
        if self.err.is_none() {
            let bindings = givens.iter().map(|&(p, v)| (String::from(p), String::from(v))).collect();
            let probs = probs.iter().map(|&(v, p)| (String::from(v), p)).collect();
            self.tables.push((String::from(node), TableSpec::Row(bindings, probs)));
        }

        self
    }

    /// Set the whole CPT of `node`
    pub fn with_table(mut self, node: &str, init: Initialization<'a>) -> Self {
        if self.err.is_none() {
            self.tables.push((String::from(node), TableSpec::Init(init)));
        }

        self
    }

    /// Complete building the network.
    ///
    /// # Returns
    /// the `BayesNet`, or the first error generated during the building process
    pub fn build(self) -> Result<BayesNet> {
        if let Some(e) = self.err {
            return Err(e);
        }

        let mut net = BayesNet::new(self.graph)?;

        for (node, spec) in self.tables.into_iter() {
            match spec {
                TableSpec::Row(bindings, probs) => net.set_cpt_row(&node, &bindings, &probs)?,
                TableSpec::Init(init) => net.initialize(&node, init)?
            }
        }

        Ok(net)
    }

}

impl<'a> Default for BayesNetBuilder<'a> {

    fn default() -> Self {
        BayesNetBuilder::new()
    }

}
