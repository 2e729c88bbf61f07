//! Declaration parsing: variables, functions, and class/union records.
//!
//! The front-end does no name resolution, so declarations are recognized
//! purely syntactically: a statement is a declaration when it starts with a
//! declaration qualifier, or with an identifier followed (after any run of
//! `*`) by another identifier. Register hints are parsed with the leading
//! qualifiers, before the base type.

use thcc_lex::TokenKind;

use crate::ast::{FuncDeclNode, Node, RecordNode, VarDeclNode};
use crate::types::{Qualifiers, Register, TypeSpec, TypeTail};
use crate::{ParseResult, Parser};

/// Leading qualifiers and register hint, shared by every declaration form.
struct DeclPrefix {
    qualifiers: Qualifiers,
    reg: Register,
}

impl<'a> Parser<'a> {
    /// Returns true if the tokens at the cursor look like the start of a
    /// declaration: `IDENT '*'* IDENT`.
    ///
    /// Without a symbol table `a * b;` is indistinguishable from a pointer
    /// declaration; it parses as a declaration of `b`.
    pub(crate) fn is_declaration_start(&self) -> bool {
        if !self.check(TokenKind::Identifier) {
            return false;
        }
        let mut offset = 1;
        while self.peek(offset).is(TokenKind::Mul) {
            offset += 1;
        }
        self.peek(offset).is(TokenKind::Identifier)
    }

    /// Parses a statement-level declaration: a variable declaration ending
    /// in `;`, or a function declaration with a compound body.
    pub(crate) fn parse_declaration(&mut self) -> ParseResult<Node> {
        let prefix = self.parse_decl_prefix();
        let base = self.expect(TokenKind::Identifier, "type name")?;
        let mut ptr_depth = 0;
        while self.match_kind(TokenKind::Mul) {
            ptr_depth += 1;
        }
        let name = self.expect(TokenKind::Identifier, "declaration name")?;

        if self.check(TokenKind::LParen) {
            return self.parse_function_decl(prefix, base, ptr_depth, name);
        }

        let decl = self.parse_var_tail(prefix, base, ptr_depth, name)?;
        self.expect(TokenKind::Semicolon, "';' after declaration")?;
        Ok(Node::VarDecl(decl))
    }

    /// Parses a declaration without the trailing `;`, for for-loop header
    /// slots. Function declarations are not allowed here.
    pub(crate) fn parse_local_declaration(&mut self) -> ParseResult<Node> {
        let prefix = self.parse_decl_prefix();
        let base = self.expect(TokenKind::Identifier, "type name")?;
        let mut ptr_depth = 0;
        while self.match_kind(TokenKind::Mul) {
            ptr_depth += 1;
        }
        let name = self.expect(TokenKind::Identifier, "declaration name")?;
        let decl = self.parse_var_tail(prefix, base, ptr_depth, name)?;
        Ok(Node::VarDecl(decl))
    }

    /// Parses `class Name { field* };` or `union Name { field* };`.
    ///
    /// Bodies hold fields only; each field is a variable declaration.
    pub(crate) fn parse_record(&mut self) -> ParseResult<Node> {
        let keyword = self.bump();
        let name = self.expect(TokenKind::Identifier, "name after record keyword")?;
        self.expect(TokenKind::LBrace, "'{' after record name")?;

        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            let prefix = self.parse_decl_prefix();
            let base = self.expect(TokenKind::Identifier, "field type")?;
            let mut ptr_depth = 0;
            while self.match_kind(TokenKind::Mul) {
                ptr_depth += 1;
            }
            let field_name = self.expect(TokenKind::Identifier, "field name")?;
            if self.check(TokenKind::LParen) {
                return Err(self.error_here("methods are not allowed in class or union bodies"));
            }
            let field = self.parse_var_tail(prefix, base, ptr_depth, field_name)?;
            self.expect(TokenKind::Semicolon, "';' after field")?;
            fields.push(field);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        self.expect(TokenKind::Semicolon, "';' after record declaration")?;

        let record = RecordNode { name, fields };
        if keyword.is_keyword("class") {
            Ok(Node::Class(record))
        } else {
            Ok(Node::Union(record))
        }
    }

    /// Consumes leading qualifiers and an optional register hint.
    ///
    /// `reg` takes an optional register name; `reg` followed by anything
    /// else means "any register, compiler's choice". `no_warn` is accepted
    /// and ignored.
    fn parse_decl_prefix(&mut self) -> DeclPrefix {
        let mut qualifiers = Qualifiers::empty();
        let mut reg = Register::None;

        while self.check(TokenKind::Keyword) {
            match self.current().text() {
                "no_warn" => self.advance(),
                "static" => {
                    qualifiers.insert(Qualifiers::STATIC);
                    self.advance();
                },
                "extern" => {
                    qualifiers.insert(Qualifiers::EXTERN);
                    self.advance();
                },
                "noreg" => {
                    reg = Register::None;
                    self.advance();
                },
                "reg" => {
                    self.advance();
                    reg = Register::Auto;
                    if self.check(TokenKind::Identifier) {
                        if let Some(named) = Register::from_name(self.current().text()) {
                            reg = named;
                            self.advance();
                        }
                    }
                },
                _ => break,
            }
        }

        DeclPrefix { qualifiers, reg }
    }

    /// Parses the variable tail after the name: array dimensions and an
    /// optional initializer. Does not consume the terminator.
    fn parse_var_tail(
        &mut self,
        prefix: DeclPrefix,
        base: thcc_lex::Token,
        ptr_depth: usize,
        name: thcc_lex::Token,
    ) -> ParseResult<VarDeclNode> {
        let mut array_sizes = Vec::new();
        while self.match_kind(TokenKind::LBracket) {
            let size = self.expect(TokenKind::Int, "array size")?;
            let value = size.text().parse::<u64>().map_err(|_| crate::ParseError {
                message: "invalid array size".to_string(),
                span: size.span,
            })?;
            array_sizes.push(value);
            self.expect(TokenKind::RBracket, "']'")?;
        }

        let initializer = if self.match_kind(TokenKind::Assign) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        Ok(VarDeclNode {
            ty: TypeSpec {
                qualifiers: prefix.qualifiers,
                reg: prefix.reg,
                ptr_depth,
                array_sizes,
                tail: TypeTail::Base(base.text().to_string()),
            },
            name,
            initializer,
        })
    }

    /// Parses a function declaration from the opening parenthesis on:
    /// parameter list, optional `...` vararg tail, and compound body.
    fn parse_function_decl(
        &mut self,
        prefix: DeclPrefix,
        base: thcc_lex::Token,
        ptr_depth: usize,
        name: thcc_lex::Token,
    ) -> ParseResult<Node> {
        self.advance();

        let mut params = Vec::new();
        let mut vararg = false;
        if !self.check(TokenKind::RParen) {
            loop {
                if self.match_kind(TokenKind::Ellipsis) {
                    vararg = true;
                    break;
                }
                params.push(self.parse_parameter()?);
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;

        let return_type = TypeSpec {
            qualifiers: Qualifiers::empty(),
            reg: Register::None,
            ptr_depth,
            array_sizes: Vec::new(),
            tail: TypeTail::Base(base.text().to_string()),
        };

        let mut qualifiers = prefix.qualifiers;
        qualifiers.insert(Qualifiers::FUNCTION);
        if vararg {
            qualifiers.insert(Qualifiers::VARARG);
        }

        let ty = TypeSpec {
            qualifiers,
            reg: prefix.reg,
            ptr_depth: 0,
            array_sizes: Vec::new(),
            tail: TypeTail::Function {
                return_type: Box::new(return_type),
                params,
            },
        };

        let body = self.parse_compound()?;

        Ok(Node::FuncDecl(FuncDeclNode {
            ty,
            name,
            body: Box::new(body),
        }))
    }

    /// Parses one parameter: type, pointer stars, name, and an optional
    /// `= default` expression.
    fn parse_parameter(&mut self) -> ParseResult<VarDeclNode> {
        let base = self.expect(TokenKind::Identifier, "parameter type")?;
        let mut ptr_depth = 0;
        while self.match_kind(TokenKind::Mul) {
            ptr_depth += 1;
        }
        let name = self.expect(TokenKind::Identifier, "parameter name")?;

        let initializer = if self.match_kind(TokenKind::Assign) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        let mut ty = TypeSpec::base(base.text());
        ty.ptr_depth = ptr_depth;

        Ok(VarDeclNode {
            ty,
            name,
            initializer,
        })
    }
}
