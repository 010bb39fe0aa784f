use crate::{
    error::{ErrorKind, PResult},
    syntax::TokenKind,
};

use super::{
    env::VariableStore,
    tree::{Expression, Node, MAX_DEPTH},
};

impl Expression {
    /// Returns a copy of this tree with bound variables replaced by the
    /// expressions they are bound to.
    ///
    /// Spliced expressions are resolved too, so `x := y` followed by
    /// `y := 3` turns `x` into `3`. A variable is left in place when it is
    /// already being expanded further up the same path, which stops
    /// self-referencing bindings such as `x := x + 1` from recursing forever.
    ///
    /// Fails with [`ErrorKind::TooDeep`] once splicing pushes a node below
    /// [`MAX_DEPTH`].
    pub fn simplify(&self, store: &VariableStore) -> PResult<Expression> {
        let mut tree = self.clone();
        if let Some(root) = tree.root_mut() {
            substitute(root, store, &mut vec![], 1)?;
        }
        Ok(tree)
    }
}

fn substitute(
    node: &mut Node,
    store: &VariableStore,
    expanding: &mut Vec<String>,
    depth: usize,
) -> PResult<()> {
    if depth > MAX_DEPTH {
        return Err(ErrorKind::TooDeep(MAX_DEPTH));
    }

    let replacement = match &*node {
        Node::Leaf(token) if token.kind == TokenKind::Variable => {
            let name = &token.text;
            if expanding.contains(name) {
                log::trace!("{name} is already being expanded, leaving it unresolved");
                None
            } else {
                store
                    .lookup(name)
                    .and_then(Expression::root)
                    .map(|stored| (name.clone(), stored.clone()))
            }
        }
        _ => None,
    };

    match replacement {
        Some((name, stored)) => {
            log::trace!("substituting {name}");
            *node = stored;
            expanding.push(name);
            let result = substitute(node, store, expanding, depth);
            expanding.pop();
            result
        }
        None => {
            if let Node::Binary { lhs, rhs, .. } = node {
                substitute(lhs, store, expanding, depth + 1)?;
                substitute(rhs, store, expanding, depth + 1)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::VariableStore;
    use crate::{
        error::ErrorKind,
        runtime::{
            eval::Overflow,
            tree::{test::tree, MAX_DEPTH},
        },
    };

    /// `first + 1 + 1 + ...` with `terms` operands in all.
    fn chain(first: &str, terms: usize) -> String {
        format!("{first}{}", " + 1".repeat(terms - 1))
    }

    #[test]
    fn substitutes_bound_variable() {
        let mut store = VariableStore::new();
        store.assign("x", tree("3 + 2"));

        let simplified = tree("x + 1").simplify(&store).unwrap();
        assert_eq!(simplified, tree("(3 + 2) + 1"));
        assert_eq!(simplified.evaluate(Overflow::Fail), Ok(6));
    }

    #[test]
    fn leaves_input_untouched() {
        let mut store = VariableStore::new();
        store.assign("x", tree("4"));

        let original = tree("x * x");
        original.simplify(&store).unwrap();
        assert_eq!(original, tree("x * x"));
    }

    #[test]
    fn unbound_variable_passes_through() {
        let store = VariableStore::new();
        let simplified = tree("y + 1").simplify(&store).unwrap();

        assert_eq!(simplified.to_infix(), "y + 1");
        assert!(simplified.contains_variable());
    }

    #[test]
    fn partial_substitution() {
        let mut store = VariableStore::new();
        store.assign("x", tree("2 * z"));

        let simplified = tree("x + y").simplify(&store).unwrap();
        assert_eq!(simplified.to_infix(), "( 2 * z ) + y");
    }

    #[test]
    fn idempotent_without_variables() {
        let mut store = VariableStore::new();
        store.assign("x", tree("1"));

        let expr = tree("(1 + 2) * 3 ^ 2");
        let once = expr.simplify(&store).unwrap();
        let twice = once.simplify(&store).unwrap();
        assert_eq!(once, expr);
        assert_eq!(twice, expr);
    }

    #[test]
    fn chained_variables_resolve_in_one_pass() {
        let mut store = VariableStore::new();
        store.assign("x", tree("y"));
        store.assign("y", tree("z + 1"));
        store.assign("z", tree("3"));

        let simplified = tree("x * 2").simplify(&store).unwrap();
        assert!(!simplified.contains_variable());
        assert_eq!(simplified.evaluate(Overflow::Fail), Ok(8));
    }

    #[test]
    fn self_reference_stays_unresolved() {
        let mut store = VariableStore::new();
        store.assign("x", tree("x + 1"));

        let simplified = tree("x").simplify(&store).unwrap();
        assert_eq!(simplified, tree("x + 1"));
    }

    #[test]
    fn mutual_reference_stays_unresolved() {
        let mut store = VariableStore::new();
        store.assign("a", tree("b + 1"));
        store.assign("b", tree("a * 2"));

        let simplified = tree("a").simplify(&store).unwrap();
        assert_eq!(simplified.to_postfix(), "a 2 * 1 +");
    }

    #[test]
    fn sibling_uses_expand_independently() {
        let mut store = VariableStore::new();
        store.assign("x", tree("2"));

        let simplified = tree("x + x").simplify(&store).unwrap();
        assert_eq!(simplified.evaluate(Overflow::Fail), Ok(4));
    }

    #[test]
    fn splicing_stays_within_depth_limit() {
        let mut store = VariableStore::new();
        store.assign("b", tree(&chain("1", 1000)));
        store.assign("a", tree(&chain("b", 1000)));

        let simplified = tree("a").simplify(&store).unwrap();
        assert_eq!(simplified.height(), 1999);
        assert_eq!(simplified.evaluate(Overflow::Fail), Ok(1999));
    }

    #[test]
    fn splicing_past_depth_limit_fails() {
        let mut store = VariableStore::new();
        store.assign("b", tree(&chain("1", 1500)));
        store.assign("a", tree(&chain("b", 1500)));

        assert_eq!(
            tree("a").simplify(&store),
            Err(ErrorKind::TooDeep(MAX_DEPTH))
        );
    }
}
