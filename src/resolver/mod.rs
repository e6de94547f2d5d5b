mod resolver;
mod scope_stack;

use crate::parser::ast::ExprId;
use std::collections::HashMap;

pub use resolver::Resolver;

/// The resolver's output: for every local variable reference, how many
/// environments separate the use site from the scope that binds the name
/// (0 = the innermost one). References with no entry are globals.
///
/// The interpreter accumulates these across runs, which is what lets a REPL
/// line call a closure declared on an earlier line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locals(HashMap<ExprId, usize>);

impl Locals {
    pub fn get(&self, id: ExprId) -> Option<usize> {
        self.0.get(&id).copied()
    }

    fn record(&mut self, id: ExprId, depth: usize) {
        self.0.insert(id, depth);
    }

    pub fn extend(&mut self, other: Locals) {
        self.0.extend(other.0)
    }
}
