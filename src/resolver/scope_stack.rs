use drop_bomb::DropBomb;
use std::collections::HashMap;

/// The stack of lexical scopes the resolver walks in and out of.
///
/// Each scope maps a name to whether its initializer has finished resolving:
/// `false` between `declare` and `define`, `true` afterwards. The global
/// scope is not represented - when the stack is empty, names are left for
/// the runtime's global environment.
#[derive(Debug, Default)]
pub(super) struct ScopeStack(Vec<Scope>);

type Scope = HashMap<String, bool>;

impl ScopeStack {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn enter_scope(&mut self) -> ScopeGuard {
        self.0.push(Scope::new());
        ScopeGuard(DropBomb::new("You forgot to close a scope"))
    }

    pub fn exit_scope(&mut self, mut guard: ScopeGuard) {
        guard.0.defuse();
        self.0.pop();
    }

    pub fn declare(&mut self, name: &str) {
        if let Some(scope) = self.0.last_mut() {
            scope.insert(name.to_string(), false);
        }
    }

    pub fn define(&mut self, name: &str) {
        if let Some(scope) = self.0.last_mut() {
            scope.insert(name.to_string(), true);
        }
    }

    pub fn is_declared_locally(&self, name: &str) -> bool {
        self.0
            .last()
            .map(|scope| scope.contains_key(name))
            .unwrap_or(false)
    }

    /// Whether `name` is declared in the innermost scope but its initializer
    /// is still being resolved, i.e. `var a = a;`.
    pub fn is_mid_initializer(&self, name: &str) -> bool {
        self.0.last().and_then(|scope| scope.get(name)) == Some(&false)
    }

    /// Number of scopes between the innermost one and the closest scope that
    /// binds `name`. `None` means the name must be a global.
    pub fn depth_of(&self, name: &str) -> Option<usize> {
        self.0
            .iter()
            .rev()
            .enumerate()
            .find_map(|(depth, scope)| scope.contains_key(name).then_some(depth))
    }
}

/// `ScopeGuard` ensures, at runtime, that we never leave a scope unclosed.
/// The resolver code has no way to defuse the drop bomb (the field is private
/// outside of this module) - the resolver is forced to call
/// [`ScopeStack::exit_scope`], which gives us a chance to pop the scope it
/// guards.
#[must_use = "Nested scopes must be closed!"]
pub(super) struct ScopeGuard(DropBomb);
