mod helpers;

mod classes;
mod control_flow;
mod errors;
mod functions;
mod operators;
mod scopes;
