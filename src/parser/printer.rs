//! Text renderings of token streams and syntax trees
//!
//! Used by the `--dump` mode of the host binary and by the tree browser.

use super::ast::{CodeBlock, ExprKind, ExprNode, Statement};
use super::lexer::Token;
use std::fmt;

const INDENT: &str = "  ";

/// Tokens in source spelling separated by spaces. A token that ends its line
/// is followed by ` \` and a line break.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut line_open = false;
    for token in tokens {
        if line_open {
            out.push(' ');
        }
        out.push_str(&token.kind.source_text());
        if token.ends_line {
            out.push_str(" \\\n");
            line_open = false;
        } else {
            line_open = true;
        }
    }
    if line_open {
        out.push('\n');
    }
    out
}

/// What a row of the printed tree shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLineKind {
    /// The `Block (N statements)` header
    Header,
    Statement,
    /// A labelled part of a statement, such as `condition:` or `then:`
    Label,
    Operator,
    /// Any other expression node
    Leaf,
}

/// One row of the printed tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub kind: TreeLineKind,
    pub depth: usize,
    pub text: String,
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str(INDENT)?;
        }
        f.write_str(&self.text)
    }
}

/// Rows of the printed tree, one statement, label or node per row
pub fn tree_lines(block: &CodeBlock) -> Vec<TreeLine> {
    let mut printer = TreePrinter::default();
    printer.line(
        TreeLineKind::Header,
        0,
        format!("Block ({} statements)", block.len()),
    );
    printer.block(block, 1);
    printer.lines
}

/// Indented tree, one statement or node per line
pub fn format_tree(block: &CodeBlock) -> String {
    let mut out = String::new();
    for line in tree_lines(block) {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

/// One-line label of an expression node
pub fn node_label(node: &ExprNode) -> String {
    match &node.kind {
        ExprKind::Operator { op, .. } => format!("Operator({})", op),
        ExprKind::Number(value) => format!("Number({})", value),
        ExprKind::Str(text) => format!("String({:?})", text),
        ExprKind::Bool(value) => format!("Bool({})", value),
        ExprKind::Variable(name) => format!("Variable({})", name),
        ExprKind::FunctionCall { name, args } => format!("Call({}, {} args)", name, args.len()),
        ExprKind::Object => "Object".to_string(),
        ExprKind::Closure => "Closure".to_string(),
    }
}

#[derive(Default)]
struct TreePrinter {
    lines: Vec<TreeLine>,
}

impl TreePrinter {
    fn line(&mut self, kind: TreeLineKind, depth: usize, text: String) {
        self.lines.push(TreeLine { kind, depth, text });
    }

    fn block(&mut self, block: &CodeBlock, depth: usize) {
        for statement in &block.statements {
            self.statement(statement, depth);
        }
    }

    fn labelled_block(&mut self, label: &str, block: &CodeBlock, depth: usize) {
        let text = format!("{}: ({} statements)", label, block.len());
        self.line(TreeLineKind::Label, depth, text);
        self.block(block, depth + 1);
    }

    fn labelled_expr(&mut self, label: &str, expr: &ExprNode, depth: usize) {
        self.line(TreeLineKind::Label, depth, format!("{}:", label));
        self.expr(expr, depth + 1);
    }

    fn statement(&mut self, statement: &Statement, depth: usize) {
        let location = statement.location();
        let text = format!("{} @{}:{}", statement.kind_name(), location.line, location.column);
        self.line(TreeLineKind::Statement, depth, text);
        let depth = depth + 1;

        match statement {
            Statement::Expression { expr, .. } => self.expr(expr, depth),
            Statement::If {
                condition,
                on_true,
                on_false,
                ..
            } => {
                self.labelled_expr("condition", condition, depth);
                self.labelled_block("then", on_true, depth);
                if let Some(on_false) = on_false {
                    self.labelled_block("else", on_false, depth);
                }
            }
            Statement::For {
                init,
                condition,
                step,
                body,
                ..
            } => {
                self.labelled_expr("init", init, depth);
                self.labelled_expr("condition", condition, depth);
                self.labelled_expr("step", step, depth);
                self.labelled_block("body", body, depth);
            }
            Statement::While {
                condition, body, ..
            } => {
                self.labelled_expr("condition", condition, depth);
                self.labelled_block("body", body, depth);
            }
            Statement::DoWhile {
                body, condition, ..
            } => {
                self.labelled_block("body", body, depth);
                self.labelled_expr("condition", condition, depth);
            }
            Statement::Return { value, .. } => {
                if let Some(value) = value {
                    self.expr(value, depth);
                }
            }
            Statement::Scope { body, .. } => self.block(body, depth),
        }
    }

    fn expr(&mut self, node: &ExprNode, depth: usize) {
        let kind = match node.kind {
            ExprKind::Operator { .. } => TreeLineKind::Operator,
            _ => TreeLineKind::Leaf,
        };
        self.line(kind, depth, node_label(node));
        for child in node.children() {
            self.expr(child, depth + 1);
        }
    }
}
