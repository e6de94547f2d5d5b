mod interpreter;
mod parser;
mod repl;
mod resolver;
mod scanner;

pub use interpreter::{ExecuteError, Interpreter, RuntimeError};
pub use repl::repl;
