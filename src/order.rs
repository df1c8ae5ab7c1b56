//! Topological ordering of the nodes of a `Graph`.

use graph::Graph;
use util::{Result, ReverendError};

use std::collections::{HashSet, VecDeque};


/// Order the nodes of `graph` so that every node comes after all of its parents.
///
/// Nodes are taken from a queue seeded in insertion order. A node whose parents are all placed is
/// appended to the order; any other node goes to the back of the queue. The result is therefore
/// deterministic for a given graph.
///
/// # Errors
/// * `ReverendError::CyclicGraph` if a whole pass over the queue places nothing, which only
///   happens when the remaining nodes lie on or below a cycle
pub fn topological_order(graph: &Graph) -> Result<Vec<String>> {
    let mut order: Vec<String> = Vec::with_capacity(graph.len());
    let mut placed: HashSet<String> = HashSet::new();
    let mut pending: VecDeque<String> = graph.nodes().into_iter().collect();

    // number of nodes deferred since the last one was placed
    let mut stalled = 0;

    while let Some(node) = pending.pop_front() {
        if graph.parents_ref(&node).iter().all(|p| placed.contains(p)) {
            placed.insert(node.clone());
            order.push(node);
            stalled = 0;
        } else {
            pending.push_back(node);
            stalled += 1;

            if stalled >= pending.len() {
                let stuck: Vec<String> = pending.into_iter().collect();
                return Err(ReverendError::CyclicGraph(stuck));
            }
        }
    }

    debug!(order = ?order, "computed topological order");
    Ok(order)
}
