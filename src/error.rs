use thiserror::Error;

/// Errors produced by element construction and resistor combination.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetlistError {
    /// An element's endpoints must be two distinct nodes.
    #[error("the nodes cannot be the same (start_node != end_node), got node {node} twice")]
    SameNode { node: u32 },

    /// No numeric literal could be extracted from a value token.
    #[error("no numeric value found in token '{token}'")]
    ValueParse { token: String },

    /// Series combination requested for resistors that do not share exactly one endpoint.
    #[error("the resistors {a}, {b} are not in series")]
    NotInSeries { a: String, b: String },

    /// Parallel combination requested for resistors that do not share both endpoints.
    #[error("the resistors {a}, {b} are not in parallel")]
    NotInParallel { a: String, b: String },
}
