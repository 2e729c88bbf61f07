//! Source reconstruction from an AST.
//!
//! A downstream consumer of the tree: given a parse result it prints
//! canonical source that lexes back to the same token kinds and values.
//! Parentheses are emitted only where precedence requires them, string and
//! character payloads are re-escaped, and statements are laid out one per
//! line with four-space indentation. Nothing in the lexer or parser depends
//! on this module.

use std::fmt::Write;

use thcc_lex::TokenKind;

use crate::ast::{Node, VarDeclNode};
use crate::types::{Qualifiers, Register, TypeSpec, TypeTail};

/// Renders a tree back to source text.
///
/// The root compound prints its statements at top level without braces;
/// any other node prints as a single statement.
pub fn pretty(root: &Node) -> String {
    let mut out = String::new();
    match root {
        Node::Compound(c) => {
            for statement in &c.statements {
                write_stmt(statement, 0, &mut out);
            }
        },
        other => write_stmt(other, 0, &mut out),
    }
    out
}

/* Expression precedence levels, lowest to highest. Postfix and primary
 * forms never need wrapping. */
const PREC_ASSIGN: u8 = 1;
const PREC_UNARY: u8 = 13;
const PREC_POSTFIX: u8 = 14;

fn op_prec(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::Assign
        | TokenKind::AddEq
        | TokenKind::SubEq
        | TokenKind::MulEq
        | TokenKind::DivEq
        | TokenKind::ModEq
        | TokenKind::LshEq
        | TokenKind::RshEq
        | TokenKind::AndEq
        | TokenKind::OrEq
        | TokenKind::XorEq => PREC_ASSIGN,
        TokenKind::Or => 2,
        TokenKind::Xor => 3,
        TokenKind::And => 4,
        TokenKind::Eq | TokenKind::Neq => 5,
        TokenKind::Lt | TokenKind::Gt | TokenKind::Lte | TokenKind::Gte => 6,
        TokenKind::Add | TokenKind::Sub => 7,
        TokenKind::BitOr => 8,
        TokenKind::BitXor => 9,
        TokenKind::BitAnd => 10,
        TokenKind::Mul | TokenKind::Div | TokenKind::Mod => 11,
        TokenKind::Pow | TokenKind::Lsh | TokenKind::Rsh => 12,
        _ => PREC_POSTFIX,
    }
}

fn expr_prec(node: &Node) -> u8 {
    match node {
        Node::Binary(b) => op_prec(b.op.kind),
        Node::Unary(_) => PREC_UNARY,
        _ => PREC_POSTFIX,
    }
}

fn write_expr(node: &Node, min_prec: u8, out: &mut String) {
    let prec = expr_prec(node);
    let wrap = prec < min_prec;
    if wrap {
        out.push('(');
    }

    match node {
        Node::Literal(l) => match l.token.kind {
            TokenKind::Str => {
                out.push('"');
                write_escaped(l.token.text(), '"', out);
                out.push('"');
            },
            TokenKind::Char => {
                out.push('\'');
                write_escaped(l.token.text(), '\'', out);
                out.push('\'');
            },
            _ => out.push_str(l.token.text()),
        },
        Node::VarAccess(v) => out.push_str(v.name.text()),
        Node::Binary(b) => {
            // Assignment is right-associative; everything else folds left.
            let (lhs_min, rhs_min) = if prec == PREC_ASSIGN {
                (prec + 1, prec)
            } else {
                (prec, prec + 1)
            };
            write_expr(&b.lhs, lhs_min, out);
            let _ = write!(out, " {} ", b.op.kind.spelling().unwrap_or("?"));
            write_expr(&b.rhs, rhs_min, out);
        },
        Node::Unary(u) => {
            out.push_str(u.op.kind.spelling().unwrap_or("?"));
            write_expr(&u.value, PREC_UNARY, out);
        },
        Node::ArrayAccess(a) => {
            write_expr(&a.base, PREC_POSTFIX, out);
            out.push('[');
            write_expr(&a.index, PREC_ASSIGN, out);
            out.push(']');
        },
        Node::Member(m) => {
            write_expr(&m.object, PREC_POSTFIX, out);
            out.push_str(m.op.kind.spelling().unwrap_or("?"));
            out.push_str(m.member.text());
        },
        Node::Call(c) => {
            write_expr(&c.callee, PREC_POSTFIX, out);
            out.push('(');
            for (i, argument) in c.arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(argument, PREC_ASSIGN, out);
            }
            out.push(')');
        },
        other => {
            // Statements never appear in expression position.
            let _ = write!(out, "/* {:?} */", other);
        },
    }

    if wrap {
        out.push(')');
    }
}

/// Escapes a decoded string/char payload back to source form.
///
/// Characters above U+00FF (possible when the source held multi-byte text)
/// pass through verbatim; bytes outside the printable ASCII range become
/// `\xHH`.
fn write_escaped(text: &str, quote: char, out: &mut String) {
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x0B' => out.push_str("\\v"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            '\x07' => out.push_str("\\a"),
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            },
            c if (c as u32) < 0x20 || ((c as u32) >= 0x7F && (c as u32) <= 0xFF) => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            },
            c => out.push(c),
        }
    }
}

fn indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push_str("    ");
    }
}

/// Writes a statement body: compounds keep their braces at the same level,
/// single statements are indented one step.
fn write_body(body: &Node, level: usize, out: &mut String) {
    if matches!(body, Node::Compound(_)) {
        write_stmt(body, level, out);
    } else {
        write_stmt(body, level + 1, out);
    }
}

fn write_stmt(node: &Node, level: usize, out: &mut String) {
    match node {
        Node::Compound(c) => {
            indent(level, out);
            out.push_str("{\n");
            for statement in &c.statements {
                write_stmt(statement, level + 1, out);
            }
            indent(level, out);
            out.push_str("}\n");
        },
        Node::Empty => {
            indent(level, out);
            out.push_str(";\n");
        },
        Node::If(i) => {
            for (index, (condition, body)) in i.conditions.iter().zip(&i.bodies).enumerate() {
                indent(level, out);
                if index > 0 {
                    out.push_str("else ");
                }
                out.push_str("if (");
                write_expr(condition, PREC_ASSIGN, out);
                out.push_str(")\n");
                write_body(body, level, out);
            }
            if let Some(else_body) = &i.else_body {
                indent(level, out);
                out.push_str("else\n");
                write_body(else_body, level, out);
            }
        },
        Node::While(w) => {
            indent(level, out);
            out.push_str("while (");
            write_expr(&w.condition, PREC_ASSIGN, out);
            out.push_str(")\n");
            write_body(&w.body, level, out);
        },
        Node::For(f) => {
            indent(level, out);
            out.push_str("for (");
            if let Some(initializer) = &f.initializer {
                write_header_slot(initializer, out);
            }
            out.push(';');
            if let Some(condition) = &f.condition {
                out.push(' ');
                write_expr(condition, PREC_ASSIGN, out);
            }
            out.push(';');
            if let Some(step) = &f.step {
                out.push(' ');
                write_header_slot(step, out);
            }
            out.push_str(")\n");
            write_body(&f.body, level, out);
        },
        Node::Switch(s) => {
            indent(level, out);
            out.push_str("switch (");
            write_expr(&s.scrutinee, PREC_ASSIGN, out);
            out.push_str(")\n");
            indent(level, out);
            out.push_str("{\n");
            for (case, body) in s.cases.iter().zip(&s.bodies) {
                indent(level + 1, out);
                out.push_str("case ");
                write_expr(case, PREC_ASSIGN, out);
                out.push_str(":\n");
                write_case_body(body, level + 2, out);
            }
            if let Some(default_body) = &s.default_body {
                indent(level + 1, out);
                out.push_str("default:\n");
                write_case_body(default_body, level + 2, out);
            }
            indent(level, out);
            out.push_str("}\n");
        },
        Node::Try(t) => {
            indent(level, out);
            out.push_str("try\n");
            write_body(&t.body, level, out);
            indent(level, out);
            out.push_str("catch\n");
            write_body(&t.catch_body, level, out);
        },
        Node::Goto(g) => {
            indent(level, out);
            let _ = writeln!(out, "goto {};", g.label.text());
        },
        Node::Label(l) => {
            indent(level, out);
            let _ = writeln!(out, "{}:", l.name.text());
        },
        Node::Break => {
            indent(level, out);
            out.push_str("break;\n");
        },
        Node::VarDecl(decl) => {
            indent(level, out);
            write_var_decl(decl, out);
            out.push_str(";\n");
        },
        Node::FuncDecl(func) => {
            indent(level, out);
            write_type_prefix(&func.ty, out);
            if let TypeTail::Function {
                return_type,
                params,
            } = &func.ty.tail
            {
                write_base_and_stars(return_type, out);
                out.push_str(func.name.text());
                out.push('(');
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_var_decl(param, out);
                }
                if func.ty.qualifiers.contains(Qualifiers::VARARG) {
                    if !params.is_empty() {
                        out.push_str(", ");
                    }
                    out.push_str("...");
                }
                out.push_str(")\n");
            }
            write_body(&func.body, level, out);
        },
        Node::Class(record) | Node::Union(record) => {
            indent(level, out);
            let keyword = if matches!(node, Node::Class(_)) {
                "class"
            } else {
                "union"
            };
            let _ = writeln!(out, "{} {}", keyword, record.name.text());
            indent(level, out);
            out.push_str("{\n");
            for field in &record.fields {
                indent(level + 1, out);
                write_var_decl(field, out);
                out.push_str(";\n");
            }
            indent(level, out);
            out.push_str("};\n");
        },
        expression => {
            indent(level, out);
            write_expr(expression, PREC_ASSIGN, out);
            out.push_str(";\n");
        },
    }
}

/// A case/default arm: statements without surrounding braces.
fn write_case_body(body: &Node, level: usize, out: &mut String) {
    match body {
        Node::Compound(c) => {
            for statement in &c.statements {
                write_stmt(statement, level, out);
            }
        },
        other => write_stmt(other, level, out),
    }
}

/// A for-header slot without its terminator.
fn write_header_slot(node: &Node, out: &mut String) {
    match node {
        Node::VarDecl(decl) => write_var_decl(decl, out),
        expression => write_expr(expression, PREC_ASSIGN, out),
    }
}

fn write_type_prefix(ty: &TypeSpec, out: &mut String) {
    if ty.qualifiers.contains(Qualifiers::STATIC) {
        out.push_str("static ");
    }
    if ty.qualifiers.contains(Qualifiers::EXTERN) {
        out.push_str("extern ");
    }
    match ty.reg {
        Register::None => {},
        Register::Auto => out.push_str("reg "),
        named => {
            if let Some(name) = named.name() {
                out.push_str("reg ");
                out.push_str(name);
                out.push(' ');
            }
        },
    }
}

fn write_base_and_stars(ty: &TypeSpec, out: &mut String) {
    if let Some(base) = ty.base_name() {
        out.push_str(base);
        out.push(' ');
    }
    for _ in 0..ty.ptr_depth {
        out.push('*');
    }
}

fn write_var_decl(decl: &VarDeclNode, out: &mut String) {
    write_type_prefix(&decl.ty, out);
    write_base_and_stars(&decl.ty, out);
    out.push_str(decl.name.text());
    for size in &decl.ty.array_sizes {
        let _ = write!(out, "[{}]", size);
    }
    if let Some(initializer) = &decl.initializer {
        out.push_str(" = ");
        write_expr(initializer, PREC_ASSIGN, out);
    }
}
