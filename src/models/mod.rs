pub mod edge;
pub mod enums;
pub mod node;

pub use edge::*;
pub use enums::*;
pub use node::*;

use thiserror::Error;

/// A string did not name any variant of a model enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value}")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}
