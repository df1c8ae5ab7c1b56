//! Definition of the cpt module
//!
//! A `ConditionalTable` holds the Conditional Probability Table (CPT) of a single node, and the
//! `CptStore` holds the tables of every node in a network, together with the topological order
//! they were built in.
//!
//! # Representation
//! A table for node ```X``` with parents ```(P1, ..., Pk)``` is an ```ndarray``` of shape
//! ```(|P1|, ..., |Pk|, |X|)```. The parents are in the order of the reverse adjacency of the
//! `Graph`, and each axis is indexed by the position of a value within its node's domain. Every
//! combination of parent values and node value therefore has an entry; entries start at ```0.0```.

use graph::Graph;
use order::topological_order;
use util::{Result, ReverendError};
use variable::{Assignment, Variable};

use indexmap::IndexMap;
use itertools::Itertools;
use ndarray::prelude as nd;

use std::collections::HashMap;

/// Alias f64 ndarray::Array as Table
pub type Table = nd::ArrayD<f64>;


#[derive(Clone, Debug)]
pub struct ConditionalTable {

    /// The node this table belongs to
    var: Variable,

    /// The parents of the node, in order. Each corresponds to one leading axis of `table`.
    parents: Vec<Variable>,

    /// The probabilities
    table: Table

}

impl ConditionalTable {

    /// Construct a table with every entry set to ```0.0```
    pub fn zeros(var: Variable, parents: Vec<Variable>) -> Self {
        let shape = table_shape(&var, &parents);
        ConditionalTable { var, parents, table: Table::zeros(shape) }
    }

    /// Construct a table from existing values.
    ///
    /// # Errors
    /// * `ReverendError::InvalidTable` if the shape of `table` does not match
    ///   ```(|P1|, ..., |Pk|, |X|)``` or any entry is outside ```[0, 1]```
    pub fn new(var: Variable, parents: Vec<Variable>, table: Table) -> Result<Self> {
        let shape = table_shape(&var, &parents);
        if table.shape() != shape.as_slice() {
            return Err(ReverendError::InvalidTable(
                format!("table for {} has shape {:?}, expected {:?}", var.name(), table.shape(), shape)
            ));
        }

        if table.iter().any(|&p| p < 0.0 || p > 1.0 || p.is_nan()) {
            return Err(ReverendError::InvalidTable(
                format!("table for {} has a value outside [0, 1]", var.name())
            ));
        }

        Ok(ConditionalTable { var, parents, table })
    }

    /// The node this table belongs to
    pub fn variable(&self) -> &Variable {
        &self.var
    }

    /// The parents of the node, in table order
    pub fn parents(&self) -> &[Variable] {
        &self.parents
    }

    /// The raw table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Every combination of parent values - one per row of the table.
    ///
    /// The combinations are built right to left, so the left-most parent varies slowest. A node
    /// without parents has exactly one (empty) combination.
    pub fn givens(&self) -> Vec<Vec<String>> {
        expand_givens(&self.parents, 0)
    }

    /// Set ```P(X = value | parents = givens)```, with `givens` in parent order.
    ///
    /// # Errors
    /// * `ReverendError::InvalidScope` if the number of givens does not match the parents
    /// * `ReverendError::InvalidValue` if a value is outside its node's domain
    /// * `ReverendError::InvalidTable` if `prob` is outside ```[0, 1]```
    pub fn set<S: AsRef<str>>(&mut self, value: &str, givens: &[S], prob: f64) -> Result<()> {
        if givens.len() != self.parents.len() {
            return Err(ReverendError::InvalidScope(
                format!("{} has {} parents, got {} given values", self.var.name(), self.parents.len(), givens.len())
            ));
        }

        if prob < 0.0 || prob > 1.0 || prob.is_nan() {
            return Err(ReverendError::InvalidTable(
                format!("P({} = {}) = {} is not a probability", self.var.name(), value, prob)
            ));
        }

        let mut idx = Vec::with_capacity(self.parents.len() + 1);
        for (parent, given) in self.parents.iter().zip(givens.iter()) {
            idx.push(value_index(parent, given.as_ref())?);
        }
        idx.push(value_index(&self.var, value)?);

        self.table[nd::IxDyn(&idx)] = prob;
        Ok(())
    }

    /// Get ```P(X = value | parents = givens)```, with `givens` in parent order.
    pub fn get<S: AsRef<str>>(&self, value: &str, givens: &[S]) -> Result<f64> {
        if givens.len() != self.parents.len() {
            return Err(ReverendError::InvalidScope(
                format!("{} has {} parents, got {} given values", self.var.name(), self.parents.len(), givens.len())
            ));
        }

        let mut idx = Vec::with_capacity(self.parents.len() + 1);
        for (parent, given) in self.parents.iter().zip(givens.iter()) {
            idx.push(value_index(parent, given.as_ref())?);
        }
        idx.push(value_index(&self.var, value)?);

        Ok(self.table[nd::IxDyn(&idx)])
    }

    /// Look up ```P(X = value | parents)```, reading the parents' values from `knowns`.
    ///
    /// # Errors
    /// * `ReverendError::MissingEvidence` if a parent has no value in `knowns`
    /// * `ReverendError::InvalidValue` if a value is outside its node's domain
    pub fn lookup(&self, value: &str, knowns: &Assignment) -> Result<f64> {
        let mut idx = self.parent_index(knowns)?;
        idx.push(value_index(&self.var, value)?);

        Ok(self.table[nd::IxDyn(&idx)])
    }

    /// Look up the whole row ```P(X | parents)``` for the parents' values in `knowns`. The row is
    /// in the order of the node's values.
    pub fn row(&self, knowns: &Assignment) -> Result<Vec<f64>> {
        let mut idx = self.parent_index(knowns)?;
        idx.push(0);

        let last = idx.len() - 1;
        let mut row = Vec::with_capacity(self.var.cardinality());
        for i in 0..self.var.cardinality() {
            idx[last] = i;
            row.push(self.table[nd::IxDyn(&idx)]);
        }

        Ok(row)
    }

    fn parent_index(&self, knowns: &Assignment) -> Result<Vec<usize>> {
        let mut idx = Vec::with_capacity(self.parents.len() + 1);

        for parent in self.parents.iter() {
            match knowns.get(parent.name()) {
                Some(val) => idx.push(value_index(parent, val)?),
                None => {
                    return Err(ReverendError::MissingEvidence {
                        node: String::from(self.var.name()),
                        parent: String::from(parent.name())
                    });
                }
            }
        }

        Ok(idx)
    }

    /// The rows whose entries do not sum to ```1.0``` within `tolerance`
    pub fn unnormalized_rows(&self, tolerance: f64) -> Vec<Vec<String>> {
        let mut bad = Vec::new();

        for givens in self.givens() {
            let total: f64 = self.var.values()
                                 .iter()
                                 .map(|v| self.get(v, &givens).unwrap_or(0.0))
                                 .sum();

            if (total - 1.0).abs() > tolerance {
                bad.push(givens);
            }
        }

        bad
    }

}


/// Shape of the table for `var` given `parents`: one axis per parent, then one for `var`
fn table_shape(var: &Variable, parents: &[Variable]) -> Vec<usize> {
    parents.iter().map(|p| p.cardinality()).chain(Some(var.cardinality())).collect()
}

fn value_index(var: &Variable, value: &str) -> Result<usize> {
    var.index_of(value).ok_or_else(|| ReverendError::InvalidValue {
        node: String::from(var.name()),
        value: String::from(value)
    })
}

/// All combinations of values of ```parents[pos..]```
fn expand_givens(parents: &[Variable], pos: usize) -> Vec<Vec<String>> {
    if pos == parents.len() {
        return vec![Vec::new()];
    }

    let rest = expand_givens(parents, pos + 1);
    let mut combos = Vec::with_capacity(parents[pos].cardinality() * rest.len());

    for val in parents[pos].values().iter() {
        for tail in rest.iter() {
            let mut combo = Vec::with_capacity(tail.len() + 1);
            combo.push(val.clone());
            combo.extend(tail.iter().cloned());
            combos.push(combo);
        }
    }

    combos
}


/// The `ConditionalTable`s of every node in a network, keyed by node name and held in
/// topological order.
#[derive(Clone, Debug)]
pub struct CptStore {
    tables: IndexMap<String, ConditionalTable>
}

impl CptStore {

    /// Order the nodes of `graph` and allocate a zeroed table for each one.
    ///
    /// # Errors
    /// * `ReverendError::CyclicGraph` if the graph cannot be ordered
    pub fn skeleton(graph: &Graph) -> Result<Self> {
        let order = topological_order(graph)?;
        let mut tables = IndexMap::with_capacity(order.len());

        for name in order.into_iter() {
            // the order holds exactly the nodes of the graph
            let var = match graph.variable(&name) {
                Some(v) => v.clone(),
                None => return Err(ReverendError::MissingNode(name))
            };

            let mut parents = Vec::new();
            for p in graph.parents(&name).iter() {
                match graph.variable(p) {
                    Some(v) => parents.push(v.clone()),
                    None => return Err(ReverendError::MissingNode(p.clone()))
                }
            }

            debug!(
                node = %name,
                parents = %parents.iter().map(|p| p.name()).join(", "),
                "allocating table"
            );
            tables.insert(name, ConditionalTable::zeros(var, parents));
        }

        Ok(CptStore { tables })
    }

    /// The nodes, in topological order
    pub fn order(&self) -> Vec<&str> {
        self.tables.keys().map(|k| k.as_str()).collect()
    }

    /// The number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Get the table of a node
    pub fn table(&self, node: &str) -> Option<&ConditionalTable> {
        self.tables.get(node)
    }

    /// Get the table at a position of the topological order
    pub fn table_at(&self, pos: usize) -> Option<&ConditionalTable> {
        self.tables.get_index(pos).map(|(_, t)| t)
    }

    /// Iterate over the tables in topological order
    pub fn tables(&self) -> impl Iterator<Item = &ConditionalTable> {
        self.tables.values()
    }

    fn table_mut(&mut self, node: &str) -> Result<&mut ConditionalTable> {
        self.tables.get_mut(node).ok_or_else(|| ReverendError::MissingNode(String::from(node)))
    }

    /// Every combination of parent values of a node - one per row of its table
    pub fn givens(&self, node: &str) -> Result<Vec<Vec<String>>> {
        self.tables.get(node)
                   .map(|t| t.givens())
                   .ok_or_else(|| ReverendError::MissingNode(String::from(node)))
    }

    /// Set a single entry ```P(node = value | parents = givens)```, with `givens` in parent order
    pub fn set_entry<S: AsRef<str>>(&mut self, node: &str, value: &str, givens: &[S], prob: f64) -> Result<()> {
        self.table_mut(node)?.set(value, givens, prob)
    }

    /// Set one row of a node's table.
    ///
    /// # Args
    /// * `node`: the node whose table is updated
    /// * `bindings`: the value of every parent, keyed by parent name. The order does not matter.
    /// * `probs`: ```(value, probability)``` pairs for the node
    ///
    /// # Errors
    /// * `ReverendError::MissingEvidence` if a parent has no binding
    /// * `ReverendError::InvalidScope` if a binding names a node that is not a parent
    /// * any error from `ConditionalTable::set`
    ///
    /// The row is validated completely before any entry is written.
    pub fn set_row<S: AsRef<str>>(
        &mut self,
        node: &str,
        bindings: &HashMap<String, String>,
        probs: &[(S, f64)]
    ) -> Result<()> {
        let table = self.table_mut(node)?;

        if let Some(extra) = bindings.keys().find(|k| ! table.parents.iter().any(|p| p.name() == k.as_str())) {
            return Err(ReverendError::InvalidScope(
                format!("{} is not a parent of {}", extra, node)
            ));
        }

        let mut givens = Vec::with_capacity(table.parents.len());
        for parent in table.parents.iter() {
            match bindings.get(parent.name()) {
                Some(val) => givens.push(val.clone()),
                None => {
                    return Err(ReverendError::MissingEvidence {
                        node: String::from(node),
                        parent: String::from(parent.name())
                    });
                }
            }
        }

        // check everything first so a bad row leaves the table untouched
        let mut scratch = table.clone();
        for &(ref value, prob) in probs.iter() {
            scratch.set(value.as_ref(), &givens, prob)?;
        }

        *table = scratch;
        Ok(())
    }

    /// Replace the whole table of a node.
    ///
    /// # Errors
    /// * `ReverendError::InvalidTable` if the shape does not match the node and its parents
    pub fn set_table(&mut self, node: &str, table: Table) -> Result<()> {
        let current = self.table_mut(node)?;
        let replacement = ConditionalTable::new(current.var.clone(), current.parents.clone(), table)?;
        *current = replacement;
        Ok(())
    }

    /// Look up ```P(node = value | parents)``` with parent values taken from `knowns`.
    ///
    /// This is the single lookup used by both exact inference and sampling.
    pub fn lookup(&self, node: &str, value: &str, knowns: &Assignment) -> Result<f64> {
        self.tables.get(node)
                   .ok_or_else(|| ReverendError::MissingNode(String::from(node)))
                   .and_then(|t| t.lookup(value, knowns))
    }

    /// Like `lookup`, but a parent missing from `knowns` counts as probability ```0.0```.
    ///
    /// The missing value is logged, and the branch of the computation that needed it contributes
    /// nothing. Any other error is returned.
    pub fn lookup_or_zero(&self, node: &str, value: &str, knowns: &Assignment) -> Result<f64> {
        match self.lookup(node, value, knowns) {
            Err(ReverendError::MissingEvidence { node, parent }) => {
                warn!(node = %node, parent = %parent, known = %knowns, "missing a parent value, using probability 0");
                Ok(0.0)
            },
            other => other
        }
    }

    /// Every ```(node, givens)``` row whose entries do not sum to ```1.0``` within `tolerance`
    pub fn unnormalized_rows(&self, tolerance: f64) -> Vec<(String, Vec<String>)> {
        self.tables
            .iter()
            .flat_map(|(name, t)| {
                t.unnormalized_rows(tolerance).into_iter().map(move |g| (name.clone(), g))
            })
            .collect()
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    fn two_node() -> CptStore {
        let mut g = Graph::new();
        g.add_node("A", &["True", "False"]).unwrap();
        g.add_node("B", &["True", "False"]).unwrap();
        g.add_edge("A", "B").unwrap();
        CptStore::skeleton(&g).unwrap()
    }

    #[test]
    fn skeleton_is_zeroed() {
        let store = two_node();

        assert_eq!(vec!["A", "B"], store.order());
        assert_eq!(&[2usize], store.table("A").unwrap().table().shape());
        assert_eq!(&[2usize, 2], store.table("B").unwrap().table().shape());
        assert!(store.tables().all(|t| t.table().iter().all(|&p| p == 0.0)));

        let knowns = Assignment::from_pairs(&[("A", "False")]);
        assert_eq!(0.0, store.lookup("B", "True", &knowns).unwrap());
    }

    #[test]
    fn givens_left_most_slowest() {
        let mut g = Graph::new();
        g.add_node("X", &["x1", "x2"]).unwrap();
        g.add_node("Y", &["y1", "y2", "y3"]).unwrap();
        g.add_node("Z", &["z"]).unwrap();
        g.add_edge("X", "Z").unwrap();
        g.add_edge("Y", "Z").unwrap();

        let store = CptStore::skeleton(&g).unwrap();
        let givens = store.givens("Z").unwrap();

        let expected = vec![
            vec!["x1", "y1"], vec!["x1", "y2"], vec!["x1", "y3"],
            vec!["x2", "y1"], vec!["x2", "y2"], vec!["x2", "y3"]
        ];
        assert_eq!(expected, givens);

        let root: Vec<Vec<String>> = vec![vec![]];
        assert_eq!(root, store.givens("X").unwrap());
    }

    #[test]
    fn set_and_lookup() {
        let mut store = two_node();
        let none: [&str; 0] = [];
        store.set_entry("A", "True", &none, 0.5).unwrap();
        store.set_entry("A", "False", &none, 0.5).unwrap();
        store.set_entry("B", "True", &["True"], 0.9).unwrap();
        store.set_entry("B", "False", &["True"], 0.1).unwrap();
        store.set_entry("B", "True", &["False"], 0.2).unwrap();
        store.set_entry("B", "False", &["False"], 0.8).unwrap();

        let knowns = Assignment::from_pairs(&[("A", "True")]);
        assert_eq!(0.9, store.lookup("B", "True", &knowns).unwrap());
        assert_eq!(0.5, store.lookup("A", "True", &knowns).unwrap());
        assert_eq!(vec![0.9, 0.1], store.table("B").unwrap().row(&knowns).unwrap());

        let knowns = Assignment::from_pairs(&[("A", "False")]);
        assert_eq!(0.2, store.lookup("B", "True", &knowns).unwrap());
        assert_eq!(0.8, store.table("B").unwrap().get("False", &["False"]).unwrap());

        assert!(store.unnormalized_rows(1e-9).is_empty());
    }

    #[test]
    fn set_errors() {
        let mut store = two_node();

        assert_eq!(
            Err(ReverendError::InvalidValue { node: String::from("B"), value: String::from("Maybe") }),
            store.set_entry("B", "Maybe", &["True"], 0.5)
        );
        assert_eq!(
            Err(ReverendError::InvalidValue { node: String::from("A"), value: String::from("Maybe") }),
            store.set_entry("B", "True", &["Maybe"], 0.5)
        );
        assert!(store.set_entry("B", "True", &["True", "False"], 0.5).is_err());
        assert!(store.set_entry("B", "True", &["True"], 1.5).is_err());
        assert_eq!(
            Err(ReverendError::MissingNode(String::from("C"))),
            store.set_entry("C", "True", &["True"], 0.5)
        );
    }

    #[test]
    fn missing_parent() {
        let store = two_node();

        let res = store.lookup("B", "True", &Assignment::new());
        assert_eq!(
            Err(ReverendError::MissingEvidence { node: String::from("B"), parent: String::from("A") }),
            res
        );

        assert_eq!(0.0, store.lookup_or_zero("B", "True", &Assignment::new()).unwrap());
        // other errors are not swallowed
        assert!(store.lookup_or_zero("B", "Maybe", &Assignment::from_pairs(&[("A", "True")])).is_err());
    }

    #[test]
    fn set_row_by_name() {
        let mut g = Graph::new();
        g.add_node("Rain", &["True", "False"]).unwrap();
        g.add_node("Sprinkler", &["On", "Off"]).unwrap();
        g.add_node("Wet", &["True", "False"]).unwrap();
        g.add_edge("Rain", "Wet").unwrap();
        g.add_edge("Sprinkler", "Wet").unwrap();
        let mut store = CptStore::skeleton(&g).unwrap();

        let mut bindings = HashMap::new();
        // order of the bindings is irrelevant
        bindings.insert(String::from("Sprinkler"), String::from("Off"));
        bindings.insert(String::from("Rain"), String::from("True"));

        store.set_row("Wet", &bindings, &[("True", 0.8), ("False", 0.2)]).unwrap();
        assert_eq!(0.8, store.table("Wet").unwrap().get("True", &["True", "Off"]).unwrap());
        assert_eq!(0.0, store.table("Wet").unwrap().get("True", &["False", "Off"]).unwrap());

        // an unknown parent
        bindings.insert(String::from("Cloudy"), String::from("True"));
        assert!(store.set_row("Wet", &bindings, &[("True", 0.8)]).is_err());

        // a missing parent
        let mut partial = HashMap::new();
        partial.insert(String::from("Rain"), String::from("True"));
        match store.set_row("Wet", &partial, &[("True", 0.8)]) {
            Err(ReverendError::MissingEvidence { parent, .. }) => assert_eq!("Sprinkler", parent),
            other => panic!("unexpected result {:?}", other)
        }

        // a bad value partway through the row writes nothing
        bindings.remove("Cloudy");
        assert!(store.set_row("Wet", &bindings, &[("True", 0.5), ("Soaked", 0.5)]).is_err());
        assert_eq!(0.8, store.table("Wet").unwrap().get("True", &["True", "Off"]).unwrap());
    }

    #[test]
    fn set_table() {
        let mut store = two_node();

        let bad = Table::zeros(vec![2]);
        assert!(store.set_table("B", bad).is_err());

        let tbl = array![[0.9, 0.1], [0.2, 0.8]].into_dyn();
        store.set_table("B", tbl).unwrap();
        let knowns = Assignment::from_pairs(&[("A", "False")]);
        assert_eq!(0.8, store.lookup("B", "False", &knowns).unwrap());

        let out_of_range = array![[0.9, 0.1], [0.2, 1.8]].into_dyn();
        assert!(store.set_table("B", out_of_range).is_err());
    }

    #[test]
    fn unnormalized_rows() {
        let mut store = two_node();
        store.set_table("A", array![0.3, 0.7].into_dyn()).unwrap();
        store.set_table("B", array![[0.9, 0.1], [0.2, 0.7]].into_dyn()).unwrap();

        let bad = store.unnormalized_rows(1e-6);
        assert_eq!(vec![(String::from("B"), vec![String::from("False")])], bad);
    }

    #[test]
    fn duplicate_edges_repeat_axis() {
        let mut g = Graph::new();
        g.add_node("A", &["True", "False"]).unwrap();
        g.add_node("B", &["True", "False"]).unwrap();
        g.add_edge("A", "B").unwrap();
        g.add_edge("A", "B").unwrap();

        let mut store = CptStore::skeleton(&g).unwrap();
        assert_eq!(&[2usize, 2, 2], store.table("B").unwrap().table().shape());

        store.set_entry("B", "True", &["True", "True"], 0.4).unwrap();
        let knowns = Assignment::from_pairs(&[("A", "True")]);
        assert_eq!(0.4, store.lookup("B", "True", &knowns).unwrap());
    }

}
