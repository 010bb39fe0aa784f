use std::collections::HashMap;

use super::tree::Expression;

/// Session-wide bindings from variable name to its unevaluated expression.
#[derive(Debug, Default)]
pub(crate) struct VariableStore {
    entries: HashMap<String, Expression>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, dropping whatever it was bound to before.
    pub fn assign(&mut self, name: impl Into<String>, expr: Expression) {
        let name = name.into();
        log::debug!("store {name} := {}", expr.to_infix());
        let _ = self.entries.insert(name, expr);
    }

    pub fn lookup(&self, name: &str) -> Option<&Expression> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod test {
    use super::VariableStore;
    use crate::runtime::tree::test::tree;

    #[test]
    fn lookup_missing() {
        let store = VariableStore::new();
        assert_eq!(store.lookup("x"), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn keeps_expression_unevaluated() {
        let mut store = VariableStore::new();
        store.assign("x", tree("3 + 2"));

        assert_eq!(store.lookup("x"), Some(&tree("3 + 2")));
    }

    #[test]
    fn overwrite_replaces_binding() {
        let mut store = VariableStore::new();
        store.assign("x", tree("1"));
        store.assign("x", tree("2"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("x"), Some(&tree("2")));
    }
}
