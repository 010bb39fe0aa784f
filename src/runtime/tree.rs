use crate::{
    error::{ErrorKind, PResult},
    syntax::{Token, TokenKind},
};

/// Deepest tree a statement may produce, counting the root as level one.
/// Tree walks recurse once per level.
pub(crate) const MAX_DEPTH: usize = 2048;

/// How partially simplified expressions are rendered back to infix.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum InfixStyle {
    /// Parenthesise a `+ - * /` operator whose subtree height differs from
    /// the height of the whole tree, i.e. every one below the root.
    #[default]
    Height,
    /// Parenthesise a child only where operator precedence requires it.
    Precedence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Leaf(Token),
    Binary {
        lhs: Box<Node>,
        op: Token,
        rhs: Box<Node>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Node {
    pub fn token(&self) -> &Token {
        match self {
            Self::Leaf(token) => token,
            Self::Binary { op, .. } => op,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Binary { lhs, rhs, .. } => 1 + lhs.height().max(rhs.height()),
        }
    }

    pub fn contains_variable(&self) -> bool {
        match self {
            Self::Leaf(token) => token.kind == TokenKind::Variable,
            Self::Binary { lhs, rhs, .. } => lhs.contains_variable() || rhs.contains_variable(),
        }
    }

    fn write_postfix<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Self::Binary { lhs, rhs, .. } = self {
            lhs.write_postfix(out);
            rhs.write_postfix(out);
        }
        out.push(&self.token().text);
    }

    fn write_infix<'a>(
        &'a self,
        style: InfixStyle,
        parent: Option<(&Token, Side)>,
        out: &mut Vec<&'a str>,
    ) {
        let (lhs, op, rhs) = match self {
            Self::Leaf(token) => {
                out.push(&token.text);
                return;
            }
            Self::Binary { lhs, op, rhs } => (lhs, op, rhs),
        };

        let wrap = match style {
            // A child is always lower than its parent, so only the root has
            // the height of the whole tree.
            InfixStyle::Height => op.kind != TokenKind::Pow && parent.is_some(),
            InfixStyle::Precedence => match parent {
                None => false,
                Some((parent, side)) => {
                    op.precedence() < parent.precedence()
                        || (op.precedence() == parent.precedence() && side == Side::Right)
                }
            },
        };

        if wrap {
            out.push("(");
        }
        lhs.write_infix(style, Some((op, Side::Left)), out);
        out.push(&op.text);
        rhs.write_infix(style, Some((op, Side::Right)), out);
        if wrap {
            out.push(")");
        }
    }
}

/// An owned expression tree. Cloning copies every node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Expression {
    root: Option<Node>,
}

impl Expression {
    /// Builds a tree from a postfix sequence. An empty sequence gives an
    /// empty tree.
    pub fn build(postfix: &[Token]) -> PResult<Self> {
        let mut stack: Vec<Node> = Vec::with_capacity(postfix.len());

        for token in postfix {
            let kind = token.kind;
            if kind.is_operand() {
                stack.push(Node::Leaf(token.clone()));
            } else if kind.is_operator() {
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(ErrorKind::Internal(format!(
                        "operator `{token}` is missing an operand"
                    )));
                };
                stack.push(Node::Binary {
                    lhs: Box::new(lhs),
                    op: token.clone(),
                    rhs: Box::new(rhs),
                });
            } else {
                return Err(ErrorKind::Internal(format!(
                    "unexpected {kind:?} token `{token}` in postfix input"
                )));
            }
        }

        let root = stack.pop();
        if !stack.is_empty() {
            return Err(ErrorKind::Internal(format!(
                "{} operands left without an operator",
                stack.len() + 1
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub(super) fn root_mut(&mut self) -> Option<&mut Node> {
        self.root.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, Node::height)
    }

    pub fn contains_variable(&self) -> bool {
        self.root.as_ref().map_or(false, Node::contains_variable)
    }

    pub fn to_postfix(&self) -> String {
        let mut out = vec![];
        if let Some(root) = &self.root {
            root.write_postfix(&mut out);
        }
        out.join(" ")
    }

    pub fn to_infix(&self) -> String {
        self.to_infix_with(InfixStyle::Height)
    }

    pub fn to_infix_with(&self, style: InfixStyle) -> String {
        let mut out = vec![];
        if let Some(root) = &self.root {
            root.write_infix(style, None, &mut out);
        }
        out.join(" ")
    }
}

#[cfg(test)]
pub(crate) mod test {
    use pretty_assertions::assert_eq;

    use super::{Expression, InfixStyle, Node};
    use crate::{
        error::ErrorKind,
        syntax::{to_postfix, Lexer, Token, TokenKind},
    };

    pub(crate) fn tokens(s: &str) -> Vec<Token> {
        Lexer::new(s.chars())
            .take_while(|t| !t.is_terminator())
            .collect()
    }

    /// Builds the tree for an infix string.
    pub(crate) fn tree(s: &str) -> Expression {
        Expression::build(&to_postfix(&tokens(s))).unwrap()
    }

    impl From<Node> for Expression {
        fn from(root: Node) -> Self {
            Self { root: Some(root) }
        }
    }

    fn leaf(kind: TokenKind, text: &str) -> Box<Node> {
        Box::new(Node::Leaf(Token::new(kind, text)))
    }

    #[test]
    fn build_binary_tree() {
        use TokenKind::*;

        let expected = Expression::from(Node::Binary {
            lhs: leaf(Number, "3"),
            op: Token::new(AddSub, "+"),
            rhs: Box::new(Node::Binary {
                lhs: leaf(Number, "4"),
                op: Token::new(MulDiv, "*"),
                rhs: leaf(Variable, "x"),
            }),
        });

        assert_eq!(tree("3 + 4 * x"), expected);
    }

    #[test]
    fn build_empty() {
        let expr = Expression::build(&[]).unwrap();
        assert!(expr.is_empty());
        assert_eq!(expr.height(), 0);
        assert_eq!(expr.to_postfix(), "");
        assert_eq!(expr.to_infix(), "");
    }

    #[test]
    fn build_rejects_malformed_postfix() {
        let missing_operand = tokens("3 +");
        assert!(matches!(
            Expression::build(&missing_operand),
            Err(ErrorKind::Internal(_))
        ));

        let dangling_operand = tokens("3 4");
        assert!(matches!(
            Expression::build(&dangling_operand),
            Err(ErrorKind::Internal(_))
        ));

        let paren = tokens("(");
        assert!(matches!(
            Expression::build(&paren),
            Err(ErrorKind::Internal(_))
        ));
    }

    #[test]
    fn postfix_is_stable_under_rebuild() {
        for src in ["3 + 4 * 2", "(1 + 2) * (3 - 4) / 5", "2 ^ 3 ^ 2 - 7", "9"] {
            let postfix = to_postfix(&tokens(src));
            let first = Expression::build(&postfix).unwrap().to_postfix();
            let rebuilt = Expression::build(&tokens(&first)).unwrap().to_postfix();

            assert_eq!(first, rebuilt, "{src}");
        }
    }

    #[test]
    fn deep_copy_is_independent() {
        let original = tree("x * (y + 1)");
        let mut copy = original.clone();
        if let Some(Node::Binary { lhs, .. }) = copy.root_mut() {
            **lhs = Node::Leaf(Token::new(TokenKind::Number, "5"));
        }

        assert_eq!(original.to_postfix(), "x y 1 + *");
        assert_eq!(copy.to_postfix(), "5 y 1 + *");
    }

    #[test]
    fn height_and_variables() {
        assert_eq!(tree("7").height(), 1);
        assert_eq!(tree("(1 + 2) * 3").height(), 3);
        assert!(tree("1 + x").contains_variable());
        assert!(!tree("1 + 2").contains_variable());
    }

    #[test]
    fn infix_by_height() {
        assert_eq!(tree("y + 1").to_infix(), "y + 1");
        assert_eq!(tree("x * (y + 1)").to_infix(), "x * ( y + 1 )");
        assert_eq!(tree("x + y * 2").to_infix(), "x + ( y * 2 )");
        assert_eq!(tree("a + b + c").to_infix(), "( a + b ) + c");
        assert_eq!(tree("(x + 1) ^ 2").to_infix(), "( x + 1 ) ^ 2");
        assert_eq!(tree("x ^ 2 * 3").to_infix(), "x ^ 2 * 3");
    }

    #[test]
    fn infix_by_height_on_uneven_branches() {
        assert_eq!(
            tree("(a + b) * (c + (d - e))").to_infix(),
            "( a + b ) * ( c + ( d - e ) )"
        );
    }

    #[test]
    fn infix_by_precedence() {
        let infix = |s: &str| tree(s).to_infix_with(InfixStyle::Precedence);

        assert_eq!(infix("y + 1"), "y + 1");
        assert_eq!(infix("x * (y + 1)"), "x * ( y + 1 )");
        assert_eq!(infix("x + y * 2"), "x + y * 2");
        assert_eq!(infix("a + b + c"), "a + b + c");
        assert_eq!(infix("a - (b - c)"), "a - ( b - c )");
        assert_eq!(infix("a / (b * c)"), "a / ( b * c )");
        assert_eq!(infix("(x + 1) ^ 2"), "( x + 1 ) ^ 2");
    }
}
