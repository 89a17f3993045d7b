//! # Introduction
//!
//! Linen is the front end of a small line-oriented scripting language. It
//! turns source text into a token stream and then into a syntax tree, and
//! ships a terminal browser, built with [ratatui](https://docs.rs/ratatui),
//! for looking at both side by side.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → CodeBlock → TUI / dump
//! ```
//!
//! 1. [`parser`] — classifies bytes, tokenises the source and builds the tree
//!    with a shunting-yard expression parser and recursive block parsing.
//! 2. [`ui`] — ratatui-based browser; not part of the stable library API.
//!
//! ## Quick start
//!
//! ```
//! use linen::parser::{parse_source_code, ast::Statement};
//!
//! let program = parse_source_code("if a == 0 then\n  b = 1\nend").unwrap();
//! assert!(matches!(program.statements[0], Statement::If { .. }));
//! ```

pub mod parser;
pub mod ui;
