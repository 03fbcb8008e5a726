//! The authoring-time flow graph: its data model, the compiler that turns
//! a graph into a [`Rule`](crate::rule::Rule), and the validator that
//! reports structural defects before a graph is allowed to compile.

pub mod compiler;
pub mod definition;
pub mod validator;

pub use compiler::flow_to_rule;
pub use definition::*;
pub use validator::validate_flow;
