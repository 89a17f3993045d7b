//! Expression parsing implementation
//!
//! Expressions are parsed with the shunting-yard algorithm: operands go
//! straight to a postfix queue, operators wait on a stack until an operator of
//! lower or equal precedence arrives, and the queue is folded into a tree at
//! the end. Bracket groups and call arguments recurse into a fresh expression
//! that is not bounded by line ends.
//!
//! # Supported Expressions
//!
//! - Literals: numbers, strings, `true`, `false`
//! - Variables and function calls `name(arg, ...)`
//! - Prefix operators: `-` (negation), `!`
//! - Binary operators from the operator table, left-associative
//! - Indexing `a[i]`
//! - Grouping with `( )`, `[ ]` or `{ }`
//!
//! # Termination
//!
//! An expression ends at end of input, when two operands would follow each
//! other (the second one starts the next statement), at any token that cannot
//! continue it (`then`, `do`, `,`, a closing bracket), and, when bounded by
//! line ends, right after a token flagged `ends_line`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::tables::{Keyword, Operator, Separator};

/// Entry of the postfix queue
enum Postfix {
    Operand(ExprNode),
    Operator(PendingOperator),
}

#[derive(Clone, Copy)]
struct PendingOperator {
    op: Operator,
    location: SourceLocation,
}

/// What the next token means for the expression being built
enum Step {
    Prefix(Operator),
    Operand,
    Binary(Operator),
    Index,
    Stop,
}

impl Parser {
    /// Parse one expression.
    ///
    /// With `stop_at_line_end` the expression ends after the first consumed
    /// token that ends its line; otherwise line ends are ignored.
    pub(crate) fn parse_expression(
        &mut self,
        stop_at_line_end: bool,
    ) -> Result<ExprNode, ParseError> {
        let start = self.position;
        let mut output: Vec<Postfix> = Vec::new();
        let mut operators: Vec<PendingOperator> = Vec::new();
        let mut expect_operand = true;

        loop {
            if stop_at_line_end && self.position > start && self.previous_ends_line() {
                break;
            }

            let location = self.current_location();
            match self.next_step(expect_operand) {
                Step::Prefix(op) => {
                    self.advance();
                    // Prefix operators bind to what follows, so nothing is popped
                    operators.push(PendingOperator { op, location });
                }
                Step::Operand => {
                    let operand = self.parse_operand()?;
                    output.push(Postfix::Operand(operand));
                    expect_operand = false;
                }
                Step::Binary(op) => {
                    self.advance();
                    push_operator(&mut operators, &mut output, PendingOperator { op, location });
                    expect_operand = true;
                }
                Step::Index => {
                    let op = PendingOperator {
                        op: Operator::ArrayAccess,
                        location,
                    };
                    push_operator(&mut operators, &mut output, op);
                    let index = self.nested(|p| p.parse_group(Separator::LBracket))?;
                    output.push(Postfix::Operand(index));
                }
                Step::Stop => break,
            }
        }

        if expect_operand {
            return Err(self.missing_operand(start));
        }

        while let Some(pending) = operators.pop() {
            output.push(Postfix::Operator(pending));
        }
        self.fold_postfix(output)
    }

    fn next_step(&self, expect_operand: bool) -> Step {
        let Some(token) = self.peek() else {
            return Step::Stop;
        };
        match (&token.kind, expect_operand) {
            (TokenKind::Operator(Operator::Not), true) => Step::Prefix(Operator::Not),
            (TokenKind::Operator(Operator::Sub), true) => Step::Prefix(Operator::Negative),
            (_, true) => Step::Operand,
            (TokenKind::Operator(op), false) if !op.is_unary() => Step::Binary(*op),
            (TokenKind::Separator(Separator::LBracket), false) => Step::Index,
            (_, false) => Step::Stop,
        }
    }

    fn missing_operand(&self, start: usize) -> ParseError {
        match self.previous() {
            Some(last) if self.position > start => ParseError {
                message: format!("Expected operand after {}", last),
                location: last.location,
            },
            _ => self.error_here("Expected expression"),
        }
    }

    /// Parse a single operand: literal, variable, call or bracket group
    fn parse_operand(&mut self) -> Result<ExprNode, ParseError> {
        let location = self.current_location();
        let Some(token) = self.peek() else {
            return Err(self.error_here("Expected expression"));
        };

        let kind = match &token.kind {
            TokenKind::Number(text) => {
                let value = text.parse::<f64>().map_err(|_| ParseError {
                    message: format!("Invalid number literal '{}'", text),
                    location,
                })?;
                ExprKind::Number(value)
            }
            TokenKind::Str(text) => ExprKind::Str(text.clone()),
            TokenKind::Keyword(Keyword::True) => ExprKind::Bool(true),
            TokenKind::Keyword(Keyword::False) => ExprKind::Bool(false),
            TokenKind::Ident(name) => {
                let name = name.clone();
                let ends_line = token.ends_line;
                self.advance();
                // A call must open its argument list on the same line
                if !ends_line && self.check_separator(Separator::LParen) {
                    return self.nested(|p| p.parse_call(name, location));
                }
                let id = self.next_node_id();
                return Ok(ExprNode::new(id, ExprKind::Variable(name), location));
            }
            TokenKind::Separator(sep) if sep.closer().is_some() => {
                let open = *sep;
                return self.nested(|p| p.parse_group(open));
            }
            _ => return Err(self.error_here("Expected expression")),
        };

        self.advance();
        let id = self.next_node_id();
        Ok(ExprNode::new(id, kind, location))
    }

    /// Parse `open expr close` and return the inner expression
    fn parse_group(&mut self, open: Separator) -> Result<ExprNode, ParseError> {
        let Some(close) = open.closer() else {
            return Err(self.error_here("Expected an opening bracket"));
        };
        self.advance();
        let inner = self.parse_expression(false)?;
        self.expect_separator(close, &format!("Expected '{}' to close '{}'", close, open))?;
        Ok(inner)
    }

    /// Parse the argument list of a call; the cursor is on `(`
    fn parse_call(
        &mut self,
        name: String,
        location: SourceLocation,
    ) -> Result<ExprNode, ParseError> {
        self.advance();
        let mut args = Vec::new();

        if self.check_separator(Separator::RParen) {
            self.advance();
        } else {
            loop {
                args.push(self.parse_expression(false)?);
                if self.check_separator(Separator::Comma) {
                    self.advance();
                } else if self.check_separator(Separator::RParen) {
                    self.advance();
                    break;
                } else {
                    return Err(self.error_here(&format!(
                        "Expected ',' or ')' in arguments of '{}'",
                        name
                    )));
                }
            }
        }

        let id = self.next_node_id();
        for arg in &mut args {
            arg.parent = Some(id);
        }
        Ok(ExprNode::new(
            id,
            ExprKind::FunctionCall { name, args },
            location,
        ))
    }

    /// Build the tree from a postfix queue
    fn fold_postfix(&mut self, output: Vec<Postfix>) -> Result<ExprNode, ParseError> {
        let mut operands: Vec<ExprNode> = Vec::new();

        for item in output {
            let pending = match item {
                Postfix::Operand(node) => {
                    operands.push(node);
                    continue;
                }
                Postfix::Operator(pending) => pending,
            };

            let id = self.next_node_id();
            let mut right = operands
                .pop()
                .ok_or_else(|| missing_operand_for(pending))?;
            right.parent = Some(id);

            let left = if pending.op.is_unary() {
                None
            } else {
                let mut left = operands
                    .pop()
                    .ok_or_else(|| missing_operand_for(pending))?;
                left.parent = Some(id);
                Some(Box::new(left))
            };

            operands.push(ExprNode::new(
                id,
                ExprKind::Operator {
                    op: pending.op,
                    left,
                    right: Box::new(right),
                },
                pending.location,
            ));
        }

        let root = operands.pop().ok_or_else(|| self.error_here("Expected expression"))?;
        if let Some(extra) = operands.last() {
            return Err(ParseError {
                message: "Expression has operands without an operator between them".to_string(),
                location: extra.location,
            });
        }
        Ok(root)
    }
}

/// Pop every waiting operator that binds at least as tightly as `incoming`,
/// then push `incoming`. Equal precedence pops, so binary operators associate
/// to the left.
fn push_operator(
    operators: &mut Vec<PendingOperator>,
    output: &mut Vec<Postfix>,
    incoming: PendingOperator,
) {
    while let Some(top) = operators.last() {
        if top.op.precedence() < incoming.op.precedence() {
            break;
        }
        if let Some(top) = operators.pop() {
            output.push(Postfix::Operator(top));
        }
    }
    operators.push(incoming);
}

fn missing_operand_for(pending: PendingOperator) -> ParseError {
    ParseError {
        message: format!("Missing operand for operator '{}'", pending.op),
        location: pending.location,
    }
}
