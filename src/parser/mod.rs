//! Linen source code parser
//!
//! This module transforms Linen source text into an Abstract Syntax Tree (AST):
//! - [`charclass`]: byte classification driving the lexer
//! - [`tables`]: keyword, operator and separator tables
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`printer`]: text dumps of tokens and trees
//!
//! # Language
//!
//! - Statements end at the end of their line; `;` ends one early and a line
//!   starting with `\` continues the previous one
//! - Blocks: `if … then … [else …] end`, `while … do … end`,
//!   `for init, cond, step do … end`, `do … end [while cond]`
//! - `return [expr]`
//! - Expressions: numbers, strings, booleans, variables, calls, indexing and
//!   the operators of [`tables::Operator`]
//!
//! # Parser Implementation
//!
//! Hand-written lexer, shunting-yard expression parser and recursive descent
//! for statements. No external parser generator dependencies.

pub mod ast;
pub mod charclass;
pub mod constants;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod printer;
mod statements;
pub mod tables;

pub use parse::{Diagnostic, ParseError, Parser, SourceError};
pub use statements::BlockEnd;

use ast::CodeBlock;
use lexer::{Lexer, Token, Tokenized};

/// Everything the front end produced for one source: the tokens, kept even
/// when lexing failed, and the tree or the reason there is none.
#[derive(Debug)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub program: Result<CodeBlock, SourceError>,
}

impl Analysis {
    pub fn is_ok(&self) -> bool {
        self.program.is_ok()
    }

    /// Diagnostics in source order; empty on success
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match &self.program {
            Ok(_) => Vec::new(),
            Err(err) => err.diagnostics(),
        }
    }
}

/// Lex `source` and, if lexing was clean, parse the tokens.
pub fn analyze_source(source: &str, max_length: usize) -> Analysis {
    let Tokenized { tokens, errors } = Lexer::with_max_length(source, max_length).tokenize();
    if !errors.is_empty() {
        return Analysis {
            tokens,
            program: Err(SourceError::Lexical(errors)),
        };
    }

    let mut parser = Parser::from_tokens(tokens);
    let program = parser.parse_program().map_err(SourceError::from);
    Analysis {
        tokens: parser.into_tokens(),
        program,
    }
}

/// Lex and parse `source` with the default length limit.
pub fn parse_source_code(source: &str) -> Result<CodeBlock, SourceError> {
    parse_source_code_with_limit(source, constants::MAX_SOURCE_LENGTH)
}

/// Lex and parse `source`, refusing input longer than `max_length` bytes.
///
/// If the lexer reports any error the tokens are not parsed and all lexical
/// errors are returned together.
pub fn parse_source_code_with_limit(
    source: &str,
    max_length: usize,
) -> Result<CodeBlock, SourceError> {
    analyze_source(source, max_length).program
}
