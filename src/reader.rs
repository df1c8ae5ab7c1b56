//! Reads a `BayesNet` from its plain text description.
//!
//! A description is a sequence of sections. A section is entered by a header line (`nodes`,
//! `edges`, any letter case) and left by a line holding only `---`:
//!
//! ```text
//! nodes
//! Rain True False
//! WetGrass True False
//! ---
//! edges
//! Rain WetGrass
//! ---
//! tables
//! cpt Rain
//! []True=0.2 False=0.8
//! ---
//! cpt WetGrass
//! [Rain=True]True=0.9 False=0.1
//! [Rain=False]True=0.1 False=0.9
//! ---
//! ```
//!
//! The `tables` line orders the nodes and allocates a zeroed table for each of them. It must come
//! after every node and edge. A line starting with `cpt` names the node whose rows follow, up to
//! the next `---`. Each row binds the parents by name inside the brackets, in any order, and
//! gives the probability of each value after them. `=` may be surrounded by spaces.

use model::network::BayesNet;
use graph::Graph;
use util::{Result, ReverendError};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Rows whose probabilities sum this far from one are reported after reading
const ROW_TOLERANCE: f64 = 1e-6;

/// Where in the description the reader is
enum Section {
    Outside,
    Nodes,
    Edges,
    Cpt(String)
}


/// Read the description in the file at `path`
pub fn read_network<P: AsRef<Path>>(path: P) -> Result<BayesNet> {
    let text = fs::read_to_string(path.as_ref()).map_err(|e| {
        ReverendError::Io(format!("{}: {}", path.as_ref().display(), e))
    })?;

    parse_network(&text)
}

/// Build a `BayesNet` from a description.
///
/// # Errors
/// * `ReverendError::Parse` for a malformed line, or a line the network rejects, with the
///   (1-based) line number
/// * `ReverendError::CyclicGraph` if the edges form a cycle
pub fn parse_network(text: &str) -> Result<BayesNet> {
    let mut graph = Graph::new();
    let mut net: Option<BayesNet> = None;
    let mut section = Section::Outside;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line == "---" {
            section = Section::Outside;
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();

        match section {
            Section::Outside => {
                let header = line.to_lowercase();

                if header == "nodes" || header == "edges" {
                    if net.is_some() {
                        return Err(parse_error(line_no, format!("{} after tables", header)));
                    }
                    section = if header == "nodes" { Section::Nodes } else { Section::Edges };
                } else if header == "tables" {
                    if net.is_some() {
                        return Err(parse_error(line_no, "tables given twice"));
                    }
                    net = Some(BayesNet::new(graph.clone())?);
                    debug!(nodes = graph.len(), "tables allocated");
                } else if header.contains("cpt") {
                    if net.is_none() {
                        return Err(parse_error(line_no, "cpt before tables"));
                    }
                    let node = tokens.get(1).ok_or_else(|| parse_error(line_no, "cpt without a node"))?;
                    if ! graph.contains(node) {
                        return Err(parse_error(line_no, format!("cpt for unknown node {}", node)));
                    }
                    section = Section::Cpt(node.to_string());
                } else {
                    return Err(parse_error(line_no, format!("unexpected line: {}", line)));
                }
            },

            Section::Nodes => {
                graph.add_node(tokens[0], &tokens[1..]).map_err(|e| parse_error(line_no, e.to_string()))?;
            },

            Section::Edges => {
                if tokens.len() != 2 {
                    return Err(parse_error(line_no, "an edge needs exactly two nodes"));
                }
                graph.add_edge(tokens[0], tokens[1]).map_err(|e| parse_error(line_no, e.to_string()))?;
            },

            Section::Cpt(ref node) => {
                // a cpt section is only entered once the tables exist
                let net = net.as_mut().ok_or_else(|| parse_error(line_no, "cpt before tables"))?;
                let (bindings, probs) = parse_row(line).map_err(|reason| parse_error(line_no, reason))?;

                net.set_cpt_row(node, &bindings, &probs).map_err(|e| parse_error(line_no, e.to_string()))?;
            }
        }
    }

    let net = match net {
        Some(net) => net,
        None => BayesNet::new(graph)?
    };

    for (node, givens) in net.cpts().unnormalized_rows(ROW_TOLERANCE) {
        warn!(node = %node, givens = ?givens, "probabilities do not sum to one");
    }

    Ok(net)
}

fn parse_error<S: Into<String>>(line: usize, reason: S) -> ReverendError {
    ReverendError::Parse { line, reason: reason.into() }
}

/// Split ```[p1=a p2=b]x=0.1 y=0.9``` into the parent bindings and the probabilities
fn parse_row(line: &str) -> ::std::result::Result<(HashMap<String, String>, Vec<(String, f64)>), String> {
    if line.matches(']').count() != 1 {
        return Err(String::from("a row needs exactly one ]"));
    }

    if ! line.starts_with('[') {
        return Err(String::from("a row must start with ["));
    }

    let mut parts = line[1..].splitn(2, ']');
    let givens = parts.next().unwrap_or("");
    let probs = parts.next().unwrap_or("");

    let bindings = parse_equals(givens)?.into_iter().collect();

    let mut out = Vec::new();
    for (value, p) in parse_equals(probs)? {
        let p = p.parse::<f64>().map_err(|_| format!("{} is not a probability", p))?;
        out.push((value, p));
    }

    if out.is_empty() {
        return Err(String::from("a row needs at least one probability"));
    }

    Ok((bindings, out))
}

/// Break ```x1 = y1 x2=y2 ...``` into ```(x, y)``` pairs
fn parse_equals(s: &str) -> ::std::result::Result<Vec<(String, String)>, String> {
    let spaced = s.replace('=', " = ");
    let tokens: Vec<&str> = spaced.split_whitespace().collect();

    if tokens.len() % 3 != 0 {
        return Err(format!("cannot split {:?} into key=value pairs", s.trim()));
    }

    tokens.chunks(3)
          .map(|t| match t {
              &[k, "=", v] => Ok((k.to_string(), v.to_string())),
              _ => Err(format!("cannot split {:?} into key=value pairs", s.trim()))
          })
          .collect()
}


#[cfg(test)]
mod tests {

    use super::*;
    use model::Model;
    use variable::Assignment;

    const RAIN: &str = "
nodes
Rain True False
WetGrass True False
---

EDGES
Rain WetGrass
---
tables
cpt Rain
[]True=0.2 False=0.8
---
cpt WetGrass
[Rain = True]True = 0.9 False = 0.1
[Rain=False]True=0.1 False=0.9
---
";

    #[test]
    fn read() {
        let net = parse_network(RAIN).unwrap();

        assert_eq!(vec!["Rain", "WetGrass"], net.variables());
        assert_eq!(vec![String::from("Rain")], net.graph().parents("WetGrass"));

        let a = Assignment::from_pairs(&[("Rain", "True"), ("WetGrass", "False")]);
        assert!((net.probability(&a).unwrap() - 0.2 * 0.1).abs() < 1e-12);
        assert!(net.cpts().unnormalized_rows(1e-9).is_empty());
    }

    #[test]
    fn without_tables() {
        let net = parse_network("nodes\nA x y\nB x y\n---\nedges\nA B\n---\n").unwrap();

        assert_eq!(2, net.num_variables());
        let knowns = Assignment::from_pairs(&[("A", "x")]);
        assert_eq!(0.0, net.lookup("B", "y", &knowns).unwrap());
    }

    #[test]
    fn several_parents() {
        let text = "
nodes
A t f
B t f
C t f
---
edges
A C
B C
---
tables
cpt C
[B=t A=t]t=1.0 f=0.0
[A=f B=t]t=0.5 f=0.5
---
";
        let net = parse_network(text).unwrap();
        let cpts = net.cpts();

        assert_eq!(1.0, cpts.lookup("C", "t", &Assignment::from_pairs(&[("A", "t"), ("B", "t")])).unwrap());
        assert_eq!(0.5, cpts.lookup("C", "f", &Assignment::from_pairs(&[("A", "f"), ("B", "t")])).unwrap());
        assert_eq!(0.0, cpts.lookup("C", "t", &Assignment::from_pairs(&[("A", "f"), ("B", "f")])).unwrap());
    }

    #[test]
    fn two_brackets() {
        let text = "nodes\nA t f\n---\ntables\ncpt A\n[]]t=0.5 f=0.5\n---\n";

        match parse_network(text) {
            Err(ReverendError::Parse { line: 6, .. }) => (),
            res => panic!("unexpected result {:?}", res.map(|n| n.order().len()))
        }
    }

    #[test]
    fn bad_pairs() {
        let text = "nodes\nA t f\n---\ntables\ncpt A\n[]t=0.5 f\n---\n";
        assert!(parse_network(text).is_err());

        let text = "nodes\nA t f\n---\ntables\ncpt A\n[]t=half f=0.5\n---\n";
        assert!(parse_network(text).is_err());
    }

    #[test]
    fn unknown_names() {
        // edge to a missing node
        let text = "nodes\nA t f\n---\nedges\nA B\n---\n";
        match parse_network(text) {
            Err(ReverendError::Parse { line: 5, .. }) => (),
            res => panic!("unexpected result {:?}", res.map(|n| n.order().len()))
        }

        // row for a value that does not exist
        let text = "nodes\nA t f\n---\ntables\ncpt A\n[]t=0.5 maybe=0.5\n---\n";
        assert!(parse_network(text).is_err());

        // row missing a parent
        let text = "nodes\nA t f\nB t f\n---\nedges\nA B\n---\ntables\ncpt B\n[]t=0.5 f=0.5\n---\n";
        assert!(parse_network(text).is_err());
    }

    #[test]
    fn out_of_order() {
        let text = "nodes\nA t f\n---\ntables\nnodes\nB t f\n---\n";
        assert!(parse_network(text).is_err());

        let text = "nodes\nA t f\n---\ncpt A\n[]t=0.5 f=0.5\n---\n";
        assert!(parse_network(text).is_err());
    }

    #[test]
    fn cycle() {
        let text = "nodes\nA t f\nB t f\n---\nedges\nA B\nB A\n---\ntables\n";

        match parse_network(text) {
            Err(ReverendError::CyclicGraph(_)) => (),
            res => panic!("unexpected result {:?}", res.map(|n| n.order().len()))
        }
    }

    #[test]
    fn missing_file() {
        match read_network("/definitely/not/here.bn") {
            Err(ReverendError::Io(_)) => (),
            res => panic!("unexpected result {:?}", res.map(|n| n.order().len()))
        }
    }

}
