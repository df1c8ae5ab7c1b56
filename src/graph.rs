//! Defines the `Graph`, the structural store of a Bayesian network.
//!
//! The `Graph` holds the nodes (as `Variable`s), and the directed edges between them. Both the
//! forward (node -> children) and reverse (node -> parents) adjacency are kept, in insertion
//! order. The `Graph` performs no inference and does not check for cycles; see `order` for that.

use util::{Result, ReverendError};
use variable::Variable;

use indexmap::IndexMap;


#[derive(Clone, Debug, Default)]
pub struct Graph {

    /// The nodes of the graph, in insertion order
    nodes: IndexMap<String, Variable>,

    /// Forward adjacency: node -> children
    children: IndexMap<String, Vec<String>>,

    /// Reverse adjacency: node -> parents
    parents: IndexMap<String, Vec<String>>

}

impl Graph {

    /// Construct an empty `Graph`
    pub fn new() -> Self {
        Graph {
            nodes: IndexMap::new(),
            children: IndexMap::new(),
            parents: IndexMap::new()
        }
    }

    /// Add a node with no edges.
    ///
    /// # Errors
    /// * `ReverendError::DuplicateNode` if a node with this name already exists
    /// * `ReverendError::EmptyDomain` if `values` is empty
    pub fn add_node<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> Result<()> {
        if self.nodes.contains_key(name) {
            return Err(ReverendError::DuplicateNode(String::from(name)));
        }

        let var = Variable::new(name, values)?;
        self.insert(var);
        Ok(())
    }

    /// Replace the domain of a node, leaving its edges as they are. If the node does not exist
    /// it is added.
    pub fn redefine_node<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> Result<()> {
        let var = Variable::new(name, values)?;

        if let Some(existing) = self.nodes.get_mut(name) {
            *existing = var;
            return Ok(());
        }

        self.insert(var);
        Ok(())
    }

    fn insert(&mut self, var: Variable) {
        let name = String::from(var.name());
        debug!(node = %var, "adding node");

        self.nodes.insert(name.clone(), var);
        self.children.insert(name.clone(), Vec::new());
        self.parents.insert(name, Vec::new());
    }

    /// Remove a node, along with every edge into or out of it.
    ///
    /// # Errors
    /// * `ReverendError::MissingNode` if there is no such node
    pub fn delete_node(&mut self, name: &str) -> Result<()> {
        if self.nodes.shift_remove(name).is_none() {
            return Err(ReverendError::MissingNode(String::from(name)));
        }

        let children = self.children.shift_remove(name).unwrap_or_default();
        let parents = self.parents.shift_remove(name).unwrap_or_default();

        for child in children.iter() {
            if let Some(ps) = self.parents.get_mut(child) {
                ps.retain(|p| p != name);
            }
        }

        for parent in parents.iter() {
            if let Some(cs) = self.children.get_mut(parent) {
                cs.retain(|c| c != name);
            }
        }

        debug!(node = name, "deleted node");
        Ok(())
    }

    /// Add the edge `parent -> child`.
    ///
    /// Adding the same edge twice records it twice; callers must avoid doing so.
    ///
    /// # Errors
    /// * `ReverendError::MissingNode` if either endpoint does not exist
    pub fn add_edge(&mut self, parent: &str, child: &str) -> Result<()> {
        for name in [parent, child].iter() {
            if ! self.nodes.contains_key(*name) {
                return Err(ReverendError::MissingNode(String::from(*name)));
            }
        }

        // both lists exist for every node, checked above
        if let Some(cs) = self.children.get_mut(parent) {
            cs.push(String::from(child));
        }
        if let Some(ps) = self.parents.get_mut(child) {
            ps.push(String::from(parent));
        }

        debug!(from = parent, to = child, "adding edge");
        Ok(())
    }

    /// Remove one occurrence of the edge `parent -> child`. Does nothing if there is no such
    /// edge.
    pub fn delete_edge(&mut self, parent: &str, child: &str) {
        let has_edge = self.parents.get(child).map_or(false, |ps| ps.iter().any(|p| p == parent));
        if ! has_edge {
            return;
        }

        if let Some(ps) = self.parents.get_mut(child) {
            if let Some(idx) = ps.iter().position(|p| p == parent) {
                ps.remove(idx);
            }
        }
        if let Some(cs) = self.children.get_mut(parent) {
            if let Some(idx) = cs.iter().position(|c| c == child) {
                cs.remove(idx);
            }
        }
    }

    /// Check if the graph has a node named `name`
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// The number of nodes in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The names of all nodes, in insertion order
    pub fn nodes(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// Get the `Variable` for a node
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.nodes.get(name)
    }

    /// The values of a node. Empty if there is no such node.
    pub fn values(&self, name: &str) -> Vec<String> {
        self.nodes.get(name).map_or(Vec::new(), |v| v.values().to_vec())
    }

    /// The nodes that `name` has an edge to. Empty if there is no such node.
    pub fn children(&self, name: &str) -> Vec<String> {
        self.children.get(name).cloned().unwrap_or_default()
    }

    /// The nodes that have an edge to `name`, in the order the edges were added. Empty if there is
    /// no such node.
    pub fn parents(&self, name: &str) -> Vec<String> {
        self.parents.get(name).cloned().unwrap_or_default()
    }

    /// Borrow the parents of a node without copying
    pub(crate) fn parents_ref(&self, name: &str) -> &[String] {
        self.parents.get(name).map_or(&[][..], |ps| ps.as_slice())
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    fn tf() -> Vec<&'static str> {
        vec!["True", "False"]
    }

    fn alarm_graph() -> Graph {
        let mut g = Graph::new();
        g.add_node("Burglary", &tf()).unwrap();
        g.add_node("Earthquake", &tf()).unwrap();
        g.add_node("Alarm", &tf()).unwrap();
        g.add_node("JohnCalls", &tf()).unwrap();
        g.add_edge("Burglary", "Alarm").unwrap();
        g.add_edge("Earthquake", "Alarm").unwrap();
        g.add_edge("Alarm", "JohnCalls").unwrap();
        g
    }

    #[test]
    fn build() {
        let g = alarm_graph();

        assert_eq!(4, g.len());
        assert_eq!(vec!["Burglary", "Earthquake", "Alarm", "JohnCalls"], g.nodes());
        assert_eq!(vec!["Burglary", "Earthquake"], g.parents("Alarm"));
        assert_eq!(vec!["Alarm"], g.children("Burglary"));
        assert_eq!(vec!["True", "False"], g.values("Alarm"));
        assert!(g.parents("Burglary").is_empty());
    }

    #[test]
    fn duplicate_node() {
        let mut g = alarm_graph();
        let res = g.add_node("Alarm", &["On", "Off"]);

        assert_eq!(Err(ReverendError::DuplicateNode(String::from("Alarm"))), res);
        // no-op on error
        assert_eq!(vec!["True", "False"], g.values("Alarm"));
    }

    #[test]
    fn redefine_node() {
        let mut g = alarm_graph();
        g.redefine_node("Alarm", &["Loud", "Quiet", "Off"]).unwrap();

        assert_eq!(vec!["Loud", "Quiet", "Off"], g.values("Alarm"));
        assert_eq!(vec!["Burglary", "Earthquake"], g.parents("Alarm"));

        g.redefine_node("MaryCalls", &tf()).unwrap();
        assert!(g.contains("MaryCalls"));
        assert_eq!(5, g.len());
    }

    #[test]
    fn missing_endpoint() {
        let mut g = alarm_graph();
        let res = g.add_edge("Alarm", "MaryCalls");

        assert_eq!(Err(ReverendError::MissingNode(String::from("MaryCalls"))), res);
        assert_eq!(vec!["JohnCalls"], g.children("Alarm"));

        let res = g.add_edge("Storm", "Alarm");
        assert_eq!(Err(ReverendError::MissingNode(String::from("Storm"))), res);
    }

    #[test]
    fn duplicate_edges_are_kept() {
        let mut g = alarm_graph();
        g.add_edge("Alarm", "JohnCalls").unwrap();

        assert_eq!(vec!["Alarm", "Alarm"], g.parents("JohnCalls"));

        g.delete_edge("Alarm", "JohnCalls");
        assert_eq!(vec!["Alarm"], g.parents("JohnCalls"));
        assert_eq!(vec!["JohnCalls"], g.children("Alarm"));
    }

    #[test]
    fn delete_edge() {
        let mut g = alarm_graph();
        g.delete_edge("Earthquake", "Alarm");

        assert_eq!(vec!["Burglary"], g.parents("Alarm"));
        assert!(g.children("Earthquake").is_empty());

        // no such edge
        g.delete_edge("JohnCalls", "Burglary");
        g.delete_edge("Nobody", "Burglary");
        assert_eq!(vec!["Burglary"], g.parents("Alarm"));
    }

    #[test]
    fn delete_node() {
        let mut g = alarm_graph();
        g.delete_node("Alarm").unwrap();

        assert_eq!(3, g.len());
        assert!(! g.contains("Alarm"));
        assert!(g.children("Burglary").is_empty());
        assert!(g.children("Earthquake").is_empty());
        assert!(g.parents("JohnCalls").is_empty());

        assert_eq!(Err(ReverendError::MissingNode(String::from("Alarm"))), g.delete_node("Alarm"));
    }

    #[test]
    fn queries_return_copies() {
        let g = alarm_graph();
        let mut parents = g.parents("Alarm");
        parents.clear();

        assert_eq!(2, g.parents("Alarm").len());
    }

}
