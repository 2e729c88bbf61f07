//! Statement parsing.
//!
//! `parse_statement` dispatches on the current token: control-flow keywords
//! get their own productions, `{` opens a compound, a lone `;` is the empty
//! statement, labels and declarations are recognized by bounded lookahead,
//! and everything else is an expression statement terminated by `;`.

use thcc_lex::TokenKind;

use crate::ast::{
    CompoundNode, ForNode, GotoNode, IfNode, LabelNode, Node, SwitchNode, TryNode, WhileNode,
};
use crate::{describe, ParseResult, Parser};

impl<'a> Parser<'a> {
    /// Parses a single statement.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Node> {
        if self.check(TokenKind::Keyword) {
            return match self.current().text() {
                "if" => self.parse_if(),
                "while" => self.parse_while(),
                "for" => self.parse_for(),
                "switch" => self.parse_switch(),
                "try" => self.parse_try(),
                "goto" => self.parse_goto(),
                "break" => {
                    self.advance();
                    self.expect(TokenKind::Semicolon, "';' after 'break'")?;
                    Ok(Node::Break)
                },
                "class" | "union" => self.parse_record(),
                "no_warn" | "static" | "extern" | "reg" | "noreg" => self.parse_declaration(),
                other => Err(self.error_here(format!("unexpected keyword '{}'", other))),
            };
        }

        match self.current().kind {
            TokenKind::LBrace => self.parse_compound(),
            TokenKind::Semicolon => {
                self.advance();
                Ok(Node::Empty)
            },
            TokenKind::Identifier if self.peek(1).is(TokenKind::Colon) => {
                let name = self.bump();
                self.advance();
                Ok(Node::Label(LabelNode { name }))
            },
            TokenKind::Identifier if self.is_declaration_start() => self.parse_declaration(),
            _ => {
                let expression = self.parse_expression()?;
                self.expect(TokenKind::Semicolon, "';' after expression")?;
                Ok(expression)
            },
        }
    }

    /// Parses `{ statement* }`; end of input before the closing brace is
    /// fatal.
    pub(crate) fn parse_compound(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LBrace, "'{'")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;

        Ok(Node::Compound(CompoundNode { statements }))
    }

    /// Parses `if (e) stmt` plus any `else if` chain and final `else`,
    /// storing the chain as parallel condition/body lists.
    fn parse_if(&mut self) -> ParseResult<Node> {
        self.advance();

        let mut conditions = Vec::new();
        let mut bodies = Vec::new();
        let mut else_body = None;

        self.expect(TokenKind::LParen, "'(' after 'if'")?;
        conditions.push(self.parse_expression()?);
        self.expect(TokenKind::RParen, "')'")?;
        bodies.push(self.parse_statement()?);

        while self.current().is_keyword("else") {
            if self.peek(1).is_keyword("if") {
                self.advance();
                self.advance();
                self.expect(TokenKind::LParen, "'(' after 'if'")?;
                conditions.push(self.parse_expression()?);
                self.expect(TokenKind::RParen, "')'")?;
                bodies.push(self.parse_statement()?);
            } else {
                self.advance();
                else_body = Some(Box::new(self.parse_statement()?));
                break;
            }
        }

        Ok(Node::If(IfNode {
            conditions,
            bodies,
            else_body,
        }))
    }

    /// Parses `while (e) stmt`.
    fn parse_while(&mut self) -> ParseResult<Node> {
        self.advance();
        self.expect(TokenKind::LParen, "'(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_statement()?;

        Ok(Node::While(WhileNode {
            condition: Box::new(condition),
            body: Box::new(body),
        }))
    }

    /// Parses `for ([init]; [cond]; [step]) stmt`.
    ///
    /// Each header slot is optional, detected by the `;` or `)` that follows
    /// it; the init and step slots admit a declaration or an expression.
    fn parse_for(&mut self) -> ParseResult<Node> {
        self.advance();
        self.expect(TokenKind::LParen, "'(' after 'for'")?;

        let initializer = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_header_slot()?))
        };
        self.expect(TokenKind::Semicolon, "';' in for header")?;

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect(TokenKind::Semicolon, "';' in for header")?;

        let step = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_header_slot()?))
        };
        self.expect(TokenKind::RParen, "')'")?;

        let body = self.parse_statement()?;

        Ok(Node::For(ForNode {
            initializer,
            condition,
            step,
            body: Box::new(body),
        }))
    }

    /// One for-header slot: a variable declaration or an expression, neither
    /// consuming the terminator.
    fn parse_header_slot(&mut self) -> ParseResult<Node> {
        let is_decl_keyword = self.check(TokenKind::Keyword)
            && matches!(
                self.current().text(),
                "no_warn" | "static" | "extern" | "reg" | "noreg"
            );
        if is_decl_keyword || self.is_declaration_start() {
            self.parse_local_declaration()
        } else {
            self.parse_expression()
        }
    }

    /// Parses `switch (e) { case e: stmt* ... default: stmt* }`.
    ///
    /// `default` is not a reserved word; it is recognized positionally as an
    /// identifier inside the switch body.
    fn parse_switch(&mut self) -> ParseResult<Node> {
        self.advance();
        self.expect(TokenKind::LParen, "'(' after 'switch'")?;
        let scrutinee = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::LBrace, "'{' after switch header")?;

        let mut cases = Vec::new();
        let mut bodies = Vec::new();
        let mut default_body = None;

        loop {
            if self.current().is_keyword("case") {
                self.advance();
                cases.push(self.parse_expression()?);
                self.expect(TokenKind::Colon, "':' after case value")?;
                bodies.push(self.parse_case_body()?);
            } else if self.check(TokenKind::Identifier) && self.current().text() == "default" {
                self.advance();
                self.expect(TokenKind::Colon, "':' after 'default'")?;
                default_body = Some(Box::new(self.parse_case_body()?));
            } else if self.match_kind(TokenKind::RBrace) {
                break;
            } else {
                return Err(self.error_here(format!(
                    "expected 'case', 'default', or '}}' in switch body, found {}",
                    describe(self.current())
                )));
            }
        }

        Ok(Node::Switch(SwitchNode {
            scrutinee: Box::new(scrutinee),
            cases,
            bodies,
            default_body,
        }))
    }

    /// The statements of one case arm, up to the next `case`, `default`, or
    /// the closing brace, wrapped in a Compound.
    fn parse_case_body(&mut self) -> ParseResult<Node> {
        let mut statements = Vec::new();
        loop {
            if self.check(TokenKind::RBrace)
                || self.check(TokenKind::Eof)
                || self.current().is_keyword("case")
                || (self.check(TokenKind::Identifier)
                    && self.current().text() == "default"
                    && self.peek(1).is(TokenKind::Colon))
            {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(Node::Compound(CompoundNode { statements }))
    }

    /// Parses `try stmt catch stmt`.
    fn parse_try(&mut self) -> ParseResult<Node> {
        self.advance();
        let body = self.parse_statement()?;
        self.expect_keyword("catch")?;
        let catch_body = self.parse_statement()?;

        Ok(Node::Try(TryNode {
            body: Box::new(body),
            catch_body: Box::new(catch_body),
        }))
    }

    /// Parses `goto label;`.
    fn parse_goto(&mut self) -> ParseResult<Node> {
        self.advance();
        let label = self.expect(TokenKind::Identifier, "label after 'goto'")?;
        self.expect(TokenKind::Semicolon, "';' after goto")?;
        Ok(Node::Goto(GotoNode { label }))
    }
}
