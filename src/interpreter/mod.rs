mod environment;
mod lox_callable;
mod lox_class;
mod lox_value;
mod tree_walker;

pub use tree_walker::{ExecuteError, Interpreter, RuntimeError};
