//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, error types, token cursor helpers
//! - `statements`: keyword-led statement dispatch and recursive blocks
//! - `expressions`: operator-precedence (shunting-yard) expression parsing
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Failure handling relies on ownership: a rule that fails returns `Err`
//! through `?`, and every node it had built so far is dropped on the way out.

use crate::parser::ast::*;
use crate::parser::constants::MAX_NESTING_DEPTH;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use crate::parser::statements::BlockEnd;
use crate::parser::tables::{Keyword, Separator};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// One reported problem, reduced to what a host needs to show it
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub location: SourceLocation,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.location.line, self.message)
    }
}

/// Why a source could not be turned into a tree
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The lexer reported at least one error; the tokens were not parsed
    Lexical(Vec<LexError>),
    /// The first syntax error found; parsing stops there
    Syntax(ParseError),
}

impl SourceError {
    /// One diagnostic per detected error, in source order
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            SourceError::Lexical(errors) => errors
                .iter()
                .map(|e| Diagnostic {
                    location: e.location,
                    message: e.kind.to_string(),
                })
                .collect(),
            SourceError::Syntax(e) => vec![Diagnostic {
                location: e.location,
                message: e.message.clone(),
            }],
        }
    }

    pub fn error_count(&self) -> usize {
        match self {
            SourceError::Lexical(errors) => errors.len(),
            SourceError::Syntax(_) => 1,
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Lexical(errors) => {
                write!(f, "{} lexical error(s)", errors.len())?;
                for e in errors {
                    write!(f, "\n{}", e)?;
                }
                Ok(())
            }
            SourceError::Syntax(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<ParseError> for SourceError {
    fn from(err: ParseError) -> Self {
        SourceError::Syntax(err)
    }
}

/// Recursive descent parser for Linen
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    next_id: NodeId,
    depth: usize,
}

impl Parser {
    /// Tokenize `source` with the default length limit and prepare to parse it.
    pub fn new(source: &str) -> Result<Self, SourceError> {
        let tokenized = Lexer::new(source).tokenize();
        if !tokenized.is_ok() {
            return Err(SourceError::Lexical(tokenized.errors));
        }
        Ok(Self::from_tokens(tokenized.tokens))
    }

    /// Parse an already tokenized stream.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            next_id: 0,
            depth: 0,
        }
    }

    /// Give back the token stream, e.g. for display after parsing.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Parse the entire program: one block that must run to the end of input
    pub fn parse_program(&mut self) -> Result<CodeBlock, ParseError> {
        let (block, end) = self.parse_block()?;
        if end == BlockEnd::Eof {
            return Ok(block);
        }
        Err(self.error_here("Unexpected token at top level"))
    }

    // ===== Helper methods =====

    pub(crate) fn next_node_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Run `rule` one nesting level deeper. The cursor must be on the
    /// opening token, which is where a too-deep error is reported.
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError {
                message: format!("Nesting too deep (more than {} levels)", MAX_NESTING_DEPTH),
                location: self.current_location(),
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_keyword(&self) -> Option<Keyword> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Keyword(kw)) => Some(*kw),
            _ => None,
        }
    }

    pub(crate) fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Most recently consumed token
    pub(crate) fn previous(&self) -> Option<&Token> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    pub(crate) fn previous_ends_line(&self) -> bool {
        self.previous().is_some_and(|t| t.ends_line)
    }

    /// Location of the next token, or of the last token at end of input
    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.location)
            .unwrap_or_else(|| SourceLocation::new(1, 1))
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    pub(crate) fn check_separator(&self, separator: Separator) -> bool {
        self.peek().is_some_and(|t| t.is_separator(separator))
    }

    /// Error at the next token, naming what was found there
    pub(crate) fn error_here(&self, message: &str) -> ParseError {
        let found = match self.peek() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        };
        ParseError {
            message: format!("{}, found {}", message, found),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_keyword(
        &mut self,
        keyword: Keyword,
        message: &str,
    ) -> Result<(), ParseError> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(message))
        }
    }

    pub(crate) fn expect_separator(
        &mut self,
        separator: Separator,
        message: &str,
    ) -> Result<(), ParseError> {
        if self.check_separator(separator) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(message))
        }
    }
}
