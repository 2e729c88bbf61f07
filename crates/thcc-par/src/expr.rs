//! Expression parsing.
//!
//! Classic precedence climbing: each level parses its operand at the next
//! higher level and folds left while the current token is one of its
//! operators. Assignment is the one right-associative level (`a = b = c`
//! parses as `a = (b = c)`); unary prefix operators recurse into themselves.

use thcc_lex::TokenKind;

use crate::ast::{
    ArrayAccessNode, BinaryOpNode, CallNode, LiteralNode, MemberAccessNode, Node, UnaryOpNode,
    VarAccessNode,
};
use crate::{describe, ParseResult, Parser};

/// Operators of the assignment level.
const ASSIGN_OPS: &[TokenKind] = &[
    TokenKind::Assign,
    TokenKind::AddEq,
    TokenKind::SubEq,
    TokenKind::MulEq,
    TokenKind::DivEq,
    TokenKind::ModEq,
    TokenKind::LshEq,
    TokenKind::RshEq,
    TokenKind::AndEq,
    TokenKind::OrEq,
    TokenKind::XorEq,
];

impl<'a> Parser<'a> {
    /// Parses a full expression (entry point: the assignment level).
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Node> {
        self.parse_assignment()
    }

    /// Assignment level, right-associative: the right-hand side recurses
    /// back into this level.
    fn parse_assignment(&mut self) -> ParseResult<Node> {
        let lhs = self.parse_logical_or()?;
        if ASSIGN_OPS.contains(&self.current().kind) {
            let op = self.bump();
            let rhs = self.parse_assignment()?;
            return Ok(Node::Binary(BinaryOpNode {
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                op,
            }));
        }
        Ok(lhs)
    }

    /// Parses one left-associative level: operands at `next`, folding while
    /// the current token is in `ops`.
    fn parse_left_assoc(
        &mut self,
        ops: &[TokenKind],
        next: fn(&mut Self) -> ParseResult<Node>,
    ) -> ParseResult<Node> {
        let mut lhs = next(self)?;
        while ops.contains(&self.current().kind) {
            let op = self.bump();
            let rhs = next(self)?;
            lhs = Node::Binary(BinaryOpNode {
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                op,
            });
        }
        Ok(lhs)
    }

    fn parse_logical_or(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(&[TokenKind::Or], Self::parse_logical_xor)
    }

    fn parse_logical_xor(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(&[TokenKind::Xor], Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(&[TokenKind::And], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(&[TokenKind::Eq, TokenKind::Neq], Self::parse_relational)
    }

    fn parse_relational(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(
            &[TokenKind::Lt, TokenKind::Gt, TokenKind::Lte, TokenKind::Gte],
            Self::parse_additive,
        )
    }

    fn parse_additive(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(&[TokenKind::Add, TokenKind::Sub], Self::parse_bitwise_or)
    }

    fn parse_bitwise_or(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(&[TokenKind::BitOr], Self::parse_bitwise_xor)
    }

    fn parse_bitwise_xor(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(&[TokenKind::BitXor], Self::parse_bitwise_and)
    }

    fn parse_bitwise_and(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(&[TokenKind::BitAnd], Self::parse_term)
    }

    fn parse_term(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(
            &[TokenKind::Mul, TokenKind::Div, TokenKind::Mod],
            Self::parse_factor,
        )
    }

    fn parse_factor(&mut self) -> ParseResult<Node> {
        self.parse_left_assoc(
            &[TokenKind::Pow, TokenKind::Lsh, TokenKind::Rsh],
            Self::parse_unary,
        )
    }

    /// Unary prefix level: `-` (negation) and `*` (dereference) recurse into
    /// another unary expression; everything else is a postfix chain.
    fn parse_unary(&mut self) -> ParseResult<Node> {
        if self.check(TokenKind::Sub) || self.check(TokenKind::Mul) {
            let op = self.bump();
            let value = self.parse_unary()?;
            return Ok(Node::Unary(UnaryOpNode {
                value: Box::new(value),
                op,
            }));
        }
        self.parse_access()
    }

    /// Postfix level: a primary followed by any chain of calls, index
    /// accesses, and member accesses, folding left.
    fn parse_access(&mut self) -> ParseResult<Node> {
        let mut access = self.parse_primary()?;
        loop {
            match self.current().kind {
                TokenKind::LParen => {
                    self.advance();
                    let mut arguments = Vec::new();
                    if !self.check(TokenKind::RParen) {
                        arguments.push(self.parse_expression()?);
                        while self.match_kind(TokenKind::Comma) {
                            arguments.push(self.parse_expression()?);
                        }
                    }
                    self.expect(TokenKind::RParen, "')'")?;
                    access = Node::Call(CallNode {
                        callee: Box::new(access),
                        arguments,
                    });
                },
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RBracket, "']'")?;
                    access = Node::ArrayAccess(ArrayAccessNode {
                        base: Box::new(access),
                        index: Box::new(index),
                    });
                },
                TokenKind::Dot | TokenKind::Arrow => {
                    let op = self.bump();
                    let member = self.expect(
                        TokenKind::Identifier,
                        if op.is(TokenKind::Dot) {
                            "identifier after '.'"
                        } else {
                            "identifier after '->'"
                        },
                    )?;
                    access = Node::Member(MemberAccessNode {
                        object: Box::new(access),
                        op,
                        member,
                    });
                },
                _ => return Ok(access),
            }
        }
    }

    /// Primary level: literals, variable references, and parenthesized
    /// expressions.
    fn parse_primary(&mut self) -> ParseResult<Node> {
        match self.current().kind {
            TokenKind::Int | TokenKind::Float | TokenKind::Str | TokenKind::Char => {
                let token = self.bump();
                Ok(Node::Literal(LiteralNode { token }))
            },
            TokenKind::Identifier => {
                let name = self.bump();
                Ok(Node::VarAccess(VarAccessNode { name }))
            },
            TokenKind::LParen => {
                self.advance();
                let expression = self.parse_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expression)
            },
            _ => Err(self.error_here(format!(
                "expected expression, found {}",
                describe(self.current())
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thcc_util::Handler;

    /// Parses a single expression, requiring the whole input be consumed.
    fn parse_expr(source: &str) -> Node {
        let handler = Handler::new("test.hc");
        let tokens = thcc_lex::tokenize(source, &handler).unwrap();
        let mut parser = Parser::new(tokens, &handler);
        let expr = parser.parse_expression().unwrap();
        assert!(parser.current().is(TokenKind::Eof), "trailing tokens");
        expr
    }

    fn parse_expr_err(source: &str) -> crate::ParseError {
        let handler = Handler::new("test.hc");
        let tokens = thcc_lex::tokenize(source, &handler).unwrap();
        let mut parser = Parser::new(tokens, &handler);
        parser.parse_expression().unwrap_err()
    }

    fn assert_binary(node: &Node, op: TokenKind) -> (&Node, &Node) {
        match node {
            Node::Binary(b) => {
                assert_eq!(b.op.kind, op, "operator");
                (&b.lhs, &b.rhs)
            },
            other => panic!("expected binary node, got {:?}", other),
        }
    }

    fn assert_var(node: &Node, name: &str) {
        match node {
            Node::VarAccess(v) => assert_eq!(v.name.text(), name),
            other => panic!("expected variable access, got {:?}", other),
        }
    }

    #[test]
    fn test_literals() {
        assert!(matches!(parse_expr("42"), Node::Literal(_)));
        assert!(matches!(parse_expr("3.25"), Node::Literal(_)));
        assert!(matches!(parse_expr("\"s\""), Node::Literal(_)));
        assert!(matches!(parse_expr("'c'"), Node::Literal(_)));
    }

    #[test]
    fn test_precedence_mul_over_add() {
        // 1+2*3 parses with the multiplication as the right child.
        let expr = parse_expr("1+2*3");
        let (_, rhs) = assert_binary(&expr, TokenKind::Add);
        assert_binary(rhs, TokenKind::Mul);
    }

    #[test]
    fn test_precedence_bitwise_between_additive_and_term() {
        // a + b | c * d: additive binds looser than bitwise-or, which binds
        // looser than multiplicative, so this is a + ((b | (c * d))).
        let expr = parse_expr("a + b | c * d");
        let (_, rhs) = assert_binary(&expr, TokenKind::Add);
        let (_, inner_rhs) = assert_binary(rhs, TokenKind::BitOr);
        assert_binary(inner_rhs, TokenKind::Mul);
    }

    #[test]
    fn test_precedence_shift_under_term() {
        // a * b << c: shift binds tighter than multiplication here.
        let expr = parse_expr("a * b << c");
        let (_, rhs) = assert_binary(&expr, TokenKind::Mul);
        assert_binary(rhs, TokenKind::Lsh);
    }

    #[test]
    fn test_precedence_logical_ladder() {
        // a || b ^^ c && d: || loosest, then ^^, then &&.
        let expr = parse_expr("a || b ^^ c && d");
        let (_, rhs) = assert_binary(&expr, TokenKind::Or);
        let (_, inner_rhs) = assert_binary(rhs, TokenKind::Xor);
        assert_binary(inner_rhs, TokenKind::And);
    }

    #[test]
    fn test_left_associativity() {
        let expr = parse_expr("a - b - c");
        let (lhs, rhs) = assert_binary(&expr, TokenKind::Sub);
        assert_binary(lhs, TokenKind::Sub);
        assert_var(rhs, "c");
    }

    #[test]
    fn test_assignment_right_associativity() {
        let expr = parse_expr("a = b = c");
        let (lhs, rhs) = assert_binary(&expr, TokenKind::Assign);
        assert_var(lhs, "a");
        let (inner_lhs, inner_rhs) = assert_binary(rhs, TokenKind::Assign);
        assert_var(inner_lhs, "b");
        assert_var(inner_rhs, "c");
    }

    #[test]
    fn test_compound_assignment() {
        let expr = parse_expr("x <<= 2");
        assert_binary(&expr, TokenKind::LshEq);
        let expr = parse_expr("x += y -= z");
        let (_, rhs) = assert_binary(&expr, TokenKind::AddEq);
        assert_binary(rhs, TokenKind::SubEq);
    }

    #[test]
    fn test_parens_override_precedence() {
        let expr = parse_expr("(1+2)*3");
        let (lhs, _) = assert_binary(&expr, TokenKind::Mul);
        assert_binary(lhs, TokenKind::Add);
    }

    #[test]
    fn test_unary_negation() {
        let expr = parse_expr("-x");
        match expr {
            Node::Unary(u) => {
                assert_eq!(u.op.kind, TokenKind::Sub);
                assert_var(&u.value, "x");
            },
            other => panic!("expected unary node, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_chain() {
        // -*p is negation of a dereference.
        let expr = parse_expr("-*p");
        match expr {
            Node::Unary(neg) => {
                assert_eq!(neg.op.kind, TokenKind::Sub);
                match &*neg.value {
                    Node::Unary(deref) => {
                        assert_eq!(deref.op.kind, TokenKind::Mul);
                        assert_var(&deref.value, "p");
                    },
                    other => panic!("expected dereference, got {:?}", other),
                }
            },
            other => panic!("expected unary node, got {:?}", other),
        }
    }

    #[test]
    fn test_prefix_vs_infix_star() {
        // a * *b: infix multiplication of a and a dereference of b.
        let expr = parse_expr("a * *b");
        let (lhs, rhs) = assert_binary(&expr, TokenKind::Mul);
        assert_var(lhs, "a");
        assert!(matches!(rhs, Node::Unary(_)));
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        // -a + b is (-a) + b.
        let expr = parse_expr("-a + b");
        let (lhs, _) = assert_binary(&expr, TokenKind::Add);
        assert!(matches!(lhs, Node::Unary(_)));
    }

    #[test]
    fn test_call_no_arguments() {
        let expr = parse_expr("f()");
        match expr {
            Node::Call(c) => {
                assert_var(&c.callee, "f");
                assert!(c.arguments.is_empty());
            },
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_call_arguments() {
        let expr = parse_expr("f(a, b + 1, 2)");
        match expr {
            Node::Call(c) => {
                assert_eq!(c.arguments.len(), 3);
                assert_var(&c.arguments[0], "a");
                assert_binary(&c.arguments[1], TokenKind::Add);
            },
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_postfix_chain() {
        // a.b->c[0](x,y): call of index of arrow-access of dot-access of a.
        let expr = parse_expr("a.b->c[0](x,y)");
        let call = match expr {
            Node::Call(c) => c,
            other => panic!("expected call, got {:?}", other),
        };
        assert_eq!(call.arguments.len(), 2);
        assert_var(&call.arguments[0], "x");
        assert_var(&call.arguments[1], "y");

        let index = match &*call.callee {
            Node::ArrayAccess(a) => a,
            other => panic!("expected array access, got {:?}", other),
        };
        assert!(matches!(&*index.index, Node::Literal(_)));

        let arrow = match &*index.base {
            Node::Member(m) => {
                assert_eq!(m.op.kind, TokenKind::Arrow);
                assert_eq!(m.member.text(), "c");
                m
            },
            other => panic!("expected member access, got {:?}", other),
        };

        match &*arrow.object {
            Node::Member(m) => {
                assert_eq!(m.op.kind, TokenKind::Dot);
                assert_eq!(m.member.text(), "b");
                assert_var(&m.object, "a");
            },
            other => panic!("expected member access, got {:?}", other),
        }
    }

    #[test]
    fn test_power_operator() {
        let expr = parse_expr("x ` 2");
        assert_binary(&expr, TokenKind::Pow);
    }

    #[test]
    fn test_missing_operand() {
        let err = parse_expr_err("1 +");
        assert!(err.message.contains("expected expression"), "{}", err.message);
    }

    #[test]
    fn test_missing_close_paren() {
        let err = parse_expr_err("(1 + 2");
        assert!(err.message.contains("expected ')'"), "{}", err.message);
    }

    #[test]
    fn test_missing_close_bracket() {
        let err = parse_expr_err("a[1");
        assert!(err.message.contains("expected ']'"), "{}", err.message);
    }

    #[test]
    fn test_missing_member_name() {
        let err = parse_expr_err("a.");
        assert!(
            err.message.contains("expected identifier after '.'"),
            "{}",
            err.message
        );
        let err = parse_expr_err("a->1");
        assert!(
            err.message.contains("expected identifier after '->'"),
            "{}",
            err.message
        );
    }
}
