//! Defines the `Error` type for the reverend library

use std::error::Error;
use std::fmt;
use std::result;

pub type Result<T> = result::Result<T, ReverendError>;

#[derive(Clone, Debug, PartialEq)]
pub enum ReverendError {

    /// A node was referenced that does not exist in the network
    MissingNode(String),

    /// A node was added under a name that is already taken
    DuplicateNode(String),

    /// A node was defined with no possible values
    EmptyDomain(String),

    /// A value was used that is not in the domain of the node
    InvalidValue { node: String, value: String },

    /// The graph contains a cycle. Holds the nodes that could never be placed in the order.
    CyclicGraph(Vec<String>),

    /// A conditional probability table was supplied with the wrong shape or contents
    InvalidTable(String),

    /// A conditional probability lookup needed the value of a parent that was not known
    MissingEvidence { node: String, parent: String },

    /// Represents an incomplete assignment where a complete assignment was required.
    /// The value is the names of the nodes that were missing from the assignment.
    IncompleteAssignment(Vec<String>),

    /// A query referred to something outside the scope of the network
    InvalidScope(String),

    /// Attempted to normalize a distribution with no entries
    EmptyDistribution,

    /// Attempted to normalize a distribution whose entries sum to zero
    DivideByZero,

    /// A sampling run produced no usable samples
    NotEnoughData,

    /// A malformed line in a network description
    Parse { line: usize, reason: String },

    /// Failure to read a network description
    Io(String)

}

impl Error for ReverendError {}

impl fmt::Display for ReverendError {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &ReverendError::MissingNode(ref name) => write!(f, "Node does not exist: {}", name),
            &ReverendError::DuplicateNode(ref name) => write!(f, "Node already exists: {}", name),
            &ReverendError::EmptyDomain(ref name) => write!(f, "Node {} has no values", name),
            &ReverendError::InvalidValue { ref node, ref value } => {
                write!(f, "Value {} is not in the domain of node {}", value, node)
            },
            &ReverendError::CyclicGraph(ref names) => {
                write!(f, "The network contains a cycle through {:?}", names)
            },
            &ReverendError::InvalidTable(ref reason) => write!(f, "Invalid table: {}", reason),
            &ReverendError::MissingEvidence { ref node, ref parent } => {
                write!(f, "Missing a value for parent {} of node {}", parent, node)
            },
            &ReverendError::IncompleteAssignment(ref names) => {
                write!(f, "Missing assignments to the following required nodes: {:?}", names)
            },
            &ReverendError::InvalidScope(ref reason) => write!(f, "Invalid scope: {}", reason),
            &ReverendError::EmptyDistribution => write!(f, "Distribution can't be empty"),
            &ReverendError::DivideByZero => {
                write!(f, "Probabilities to be normalized cannot add to zero")
            },
            &ReverendError::NotEnoughData => write!(f, "Not enough data has been provided"),
            &ReverendError::Parse { line, ref reason } => write!(f, "line {}: {}", line, reason),
            &ReverendError::Io(ref err) => write!(f, "I/O error: {}", err)
        }
    }

}
