pub mod classify;
pub mod cli;
pub mod element;
pub mod error;
pub mod explain;
pub mod network;
pub mod parser;
pub mod reduce;
pub mod units;

// Re-export commonly used types
pub use element::{Element, ElementKind, NodePair};
pub use error::NetlistError;
pub use explain::{Explanation, Order};
pub use network::Network;
pub use parser::NetlistParser;
pub use reduce::{reduce, Outcome, Reduction};

// Error types
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
