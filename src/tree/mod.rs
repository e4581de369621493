mod format;
pub mod node;
#[allow(clippy::module_inception)]
pub mod tree;

pub use node::Node;
pub use tree::{Children, Tree};
