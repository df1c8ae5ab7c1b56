//! Module containing initialization routines for the conditional probability tables of a network.

use cpt::{ConditionalTable, Table};
use util::{Result, ReverendError};
use variable::Variable;

use ndarray::prelude as nd;
use ndarray_rand::RandomExt;
use rand::distributions::Range;

/// Defines possible ways to initialize the CPT of a node.
pub enum Initialization<'a> {
    /// A uniform distribution over the values of the node, for every combination of parents
    Uniform,

    /// Randomly initialize the entries of the CPT. Every row is normalized.
    Random,

    /// Initialize the CPT as a Binomial distribution with parameter ```p``` on the first value.
    /// Note that this `Initialization` is valid only for a two-valued node with no parents.
    Binomial(f64),

    /// Initialize the CPT as a Multinomial distribution with parameters ```p_0, p_1...```.
    /// Note that this `Initialization` is valid only for a node with no parents.
    Multinomial(&'a [f64]),

    /// User defined CPT, of shape ```(|P1|, ..., |Pk|, |X|)```
    Table(Table)
}


impl<'a> Initialization<'a> {

    /// Construct a CPT for `var` given `parents`, initialized based on ```self```
    pub fn build_cpt(self, var: Variable, parents: Vec<Variable>) -> Result<ConditionalTable> {
        ///////////////////////////////////////////////////////////////////////////////
        // Trivial cases

        // if this is a user defined table, it just needs to be verified and returned
        if let Initialization::Table(t) = self {
            return ConditionalTable::new(var, parents, t);
        }

        ///////////////////////////////////////////////////////////////////////////////
        // Check for errors
        match self {
            Initialization::Binomial(_) | Initialization::Multinomial(_) if ! parents.is_empty() => {
                return Err(ReverendError::InvalidTable(
                    format!("{} has parents and cannot take a prior distribution", var.name())
                ));
            },

            Initialization::Binomial(_) if var.cardinality() != 2 => {
                return Err(ReverendError::InvalidTable(
                    format!("a binomial table needs 2 values, {} has {}", var.name(), var.cardinality())
                ));
            },

            Initialization::Multinomial(ps) if ps.len() != var.cardinality() => {
                return Err(ReverendError::InvalidTable(
                    format!("{} parameters given for {} values of {}", ps.len(), var.cardinality(), var.name())
                ));
            },

            _ => ()
        }

        ///////////////////////////////////////////////////////////////////////////////
        // now, build CPT
        let mut shape: Vec<usize> = parents.iter().map(|v| v.cardinality()).collect();
        shape.push(var.cardinality());

        let tbl = match self {
            Initialization::Uniform => {
                // normalizing constant is just the number of values
                let val = 1. / (var.cardinality() as f64);
                Table::from_elem(shape, val)
            },
            Initialization::Random => {
                let mut tbl = Table::random(nd::IxDyn(&shape), Range::new(1.0, 100.0));
                normalize_rows(&mut tbl, &shape);
                tbl
            },
            Initialization::Binomial(p) => {
                array![p, (1.0 - p)].into_dyn()
            },
            Initialization::Multinomial(p) => {
                nd::Array::from_iter(p.iter().cloned()).into_dyn()
            },
            // handled above
            Initialization::Table(t) => t
        };

        ConditionalTable::new(var, parents, tbl)
    }

}


/// Scale every row (the last axis) of `tbl` to sum to one
fn normalize_rows(tbl: &mut Table, shape: &[usize]) {
    let card = shape[shape.len() - 1];
    let rows = tbl.len() / card;

    // row-major storage: each run of `card` entries is one row
    let mut flat: Vec<f64> = tbl.iter().cloned().collect();
    for r in 0..rows {
        let row = &mut flat[r * card..(r + 1) * card];
        let z: f64 = row.iter().sum();
        for p in row.iter_mut() {
            *p = *p / z;
        }
    }

    for (dst, src) in tbl.iter_mut().zip(flat.into_iter()) {
        *dst = src;
    }
}
