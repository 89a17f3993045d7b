//! Statement parsing implementation
//!
//! A statement is chosen by its first token: a control keyword selects the
//! matching rule, anything else is an expression statement bounded by the end
//! of its line. Bodies are parsed recursively as [`CodeBlock`]s which stop at
//! `end`, `else` or end of input and report which one they saw.
//!
//! # Grammar
//!
//! ```text
//! block     ::= statement*
//! statement ::= if_stmt | while_stmt | for_stmt | do_stmt
//!             | return_stmt | expr_stmt
//! if_stmt   ::= 'if' expr 'then' block ('else' block)? 'end'
//! while_stmt::= 'while' expr 'do' block 'end'
//! for_stmt  ::= 'for' expr ',' expr ',' expr 'do' block 'end'
//! do_stmt   ::= 'do' block 'end' ('while' expr)?
//! return_stmt ::= 'return' expr?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::tables::{Keyword, Separator};

/// The token that ended a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnd {
    End,
    Else,
    Eof,
}

impl Parser {
    /// Parse statements until `end`, `else` or end of input. The terminator
    /// itself is left for the caller.
    pub(crate) fn parse_block(&mut self) -> Result<(CodeBlock, BlockEnd), ParseError> {
        let mut block = CodeBlock::new();
        while let Some(statement) = self.parse_statement()? {
            block.statements.push(statement);
        }

        let end = match self.peek_keyword() {
            _ if self.is_at_end() => BlockEnd::Eof,
            Some(Keyword::Else) => BlockEnd::Else,
            _ => BlockEnd::End,
        };
        Ok((block, end))
    }

    /// Parse one statement, or `None` when the cursor is on a block terminator
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Statement>, ParseError> {
        if self.is_at_end() {
            return Ok(None);
        }

        let statement = match self.peek_keyword() {
            Some(Keyword::End) | Some(Keyword::Else) => return Ok(None),
            Some(Keyword::If) => self.nested(Self::parse_if_statement)?,
            Some(Keyword::While) => self.nested(Self::parse_while_statement)?,
            Some(Keyword::For) => self.nested(Self::parse_for_statement)?,
            Some(Keyword::Do) => self.nested(Self::parse_do_statement)?,
            Some(Keyword::Return) => self.parse_return_statement()?,
            Some(Keyword::Function) => {
                return Err(self.error_here("Function definitions are not supported yet"))
            }
            _ => {
                let location = self.current_location();
                let expr = self.parse_expression(true)?;
                Statement::Expression { expr, location }
            }
        };
        Ok(Some(statement))
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.current_location();
        self.advance(); // consume 'if'

        let condition = self.parse_expression(false)?;
        self.expect_keyword(Keyword::Then, "Expected 'then' after if condition")?;

        let (on_true, end) = self.parse_block()?;
        let on_false = match end {
            BlockEnd::End => None,
            BlockEnd::Else => {
                self.advance(); // consume 'else'
                let (block, end) = self.parse_block()?;
                self.finish_block(end, "else", location)?;
                return Ok(Statement::If {
                    condition,
                    on_true,
                    on_false: Some(block),
                    location,
                });
            }
            BlockEnd::Eof => return Err(unclosed("if", location)),
        };
        self.advance(); // consume 'end'

        Ok(Statement::If {
            condition,
            on_true,
            on_false,
            location,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.current_location();
        self.advance(); // consume 'while'

        let condition = self.parse_expression(false)?;
        self.expect_keyword(Keyword::Do, "Expected 'do' after while condition")?;

        let (body, end) = self.parse_block()?;
        self.finish_block(end, "while", location)?;

        Ok(Statement::While {
            condition,
            body,
            location,
        })
    }

    /// Parse for statement: `for init, condition, step do ... end`
    fn parse_for_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.current_location();
        self.advance(); // consume 'for'

        let init = self.parse_expression(false)?;
        self.expect_separator(Separator::Comma, "Expected ',' after for initializer")?;
        let condition = self.parse_expression(false)?;
        self.expect_separator(Separator::Comma, "Expected ',' after for condition")?;
        let step = self.parse_expression(false)?;
        self.expect_keyword(Keyword::Do, "Expected 'do' after for step")?;

        let (body, end) = self.parse_block()?;
        self.finish_block(end, "for", location)?;

        Ok(Statement::For {
            init,
            condition,
            step,
            body,
            location,
        })
    }

    /// Parse `do ... end`, optionally followed by `while condition` on the
    /// same line as the `end`
    fn parse_do_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.current_location();
        self.advance(); // consume 'do'

        let (body, end) = self.parse_block()?;
        self.finish_block(end, "do", location)?;

        if !self.previous_ends_line() && self.check_keyword(Keyword::While) {
            self.advance(); // consume 'while'
            let condition = self.parse_expression(true)?;
            return Ok(Statement::DoWhile {
                body,
                condition,
                location,
            });
        }

        Ok(Statement::Scope { body, location })
    }

    /// Parse return statement; the value is optional
    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        let location = self.current_location();
        self.advance(); // consume 'return'

        let bare = self.previous_ends_line()
            || self.is_at_end()
            || matches!(self.peek_keyword(), Some(Keyword::End | Keyword::Else));
        let value = if bare {
            None
        } else {
            Some(self.parse_expression(true)?)
        };

        Ok(Statement::Return { value, location })
    }

    /// Consume the `end` closing a block opened by `opener`
    fn finish_block(
        &mut self,
        end: BlockEnd,
        opener: &str,
        opened_at: SourceLocation,
    ) -> Result<(), ParseError> {
        match end {
            BlockEnd::End => {
                self.advance(); // consume 'end'
                Ok(())
            }
            BlockEnd::Else => Err(self.error_here(&format!(
                "Expected 'end' to close '{}' block",
                opener
            ))),
            BlockEnd::Eof => Err(unclosed(opener, opened_at)),
        }
    }
}

fn unclosed(opener: &str, opened_at: SourceLocation) -> ParseError {
    ParseError {
        message: format!("'{}' block has no matching 'end'", opener),
        location: opened_at,
    }
}
