//! Lexer (tokenizer) for Linen source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The byte under the cursor is classified with [`classify`] and the class
//! selects one reader. Each reader munches as much input as its class allows
//! and reports either the offset to continue from or a [`LexError`] that
//! carries its own resume offset. Errors are collected and scanning carries
//! on, so one pass surfaces as many problems as possible. The one exception is
//! a source longer than the configured maximum, which stops the scan.

use super::ast::SourceLocation;
use super::charclass::{classify, is_alpha, is_operator_char, CharClass};
use super::constants::{LINE_CONTINUATION, MAX_SOURCE_LENGTH};
use super::tables::{Keyword, Operator, Separator};
use std::fmt;

/// Token payloads produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Operator(Operator),
    Separator(Separator),
    /// Literal text, converted to a number by the parser
    Number(String),
    /// String contents without the quotes
    Str(String),
    Ident(String),
}

impl TokenKind {
    /// Text as it would appear in source
    pub fn source_text(&self) -> String {
        match self {
            TokenKind::Keyword(kw) => kw.spelling().to_string(),
            TokenKind::Operator(op) => op.to_string(),
            TokenKind::Separator(sep) => sep.to_string(),
            TokenKind::Number(text) | TokenKind::Ident(text) => text.clone(),
            TokenKind::Str(text) => format!("\"{}\"", text),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(kw) => write!(f, "'{}'", kw),
            TokenKind::Operator(op) => write!(f, "operator '{}'", op),
            TokenKind::Separator(sep) => write!(f, "'{}'", sep),
            TokenKind::Number(text) => write!(f, "number {}", text),
            TokenKind::Str(text) => write!(f, "string literal \"{}\"", text),
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
        }
    }
}

/// One lexical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
    /// Last token before a newline (that is not continued with `\`) or a `;`
    pub ends_line: bool,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Token {
            kind,
            location,
            ends_line: false,
        }
    }

    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn is_separator(&self, separator: Separator) -> bool {
        self.kind == TokenKind::Separator(separator)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// What went wrong while scanning
#[derive(Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    /// Byte outside 7-bit ASCII or with no meaning in the language
    InvalidCharacter(u8),
    UnterminatedString,
    MalformedNumber(&'static str),
    /// Run of operator characters that is not in the operator table
    InvalidOperator(String),
    InvalidSeparator(u8),
    /// Source is longer than the lexer's limit; scanning stopped
    SourceTooLong { limit: usize },
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::InvalidCharacter(c) if c.is_ascii_graphic() => {
                write!(f, "Invalid character '{}'", *c as char)
            }
            LexErrorKind::InvalidCharacter(c) => {
                write!(f, "Invalid character '\\x{:02x}', only ASCII is supported", c)
            }
            LexErrorKind::UnterminatedString => {
                write!(f, "String doesn't have a closing quote mark")
            }
            LexErrorKind::MalformedNumber(reason) => write!(f, "Malformed number: {}", reason),
            LexErrorKind::InvalidOperator(text) => write!(f, "Invalid operator '{}'", text),
            LexErrorKind::InvalidSeparator(c) => {
                write!(f, "Invalid separator '{}'", *c as char)
            }
            LexErrorKind::SourceTooLong { limit } => {
                write!(f, "Source code exceeds max length of {} characters", limit)
            }
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
    /// Byte offset at which scanning resumes
    pub resume: usize,
}

impl LexError {
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, LexErrorKind::SourceTooLong { .. })
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.kind
        )
    }
}

impl std::error::Error for LexError {}

/// Output of one scan: every token that could be read plus every error found
#[derive(Debug, Clone, Default)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl Tokenized {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tokenize `source` with the default length limit
pub fn tokenize(source: &str) -> Tokenized {
    Lexer::new(source).tokenize()
}

/// Result of one reader: the offset to continue from, or an error that
/// knows where to resume
type Scan = Result<usize, LexError>;

/// Lexer for Linen source code
pub struct Lexer<'a> {
    input: &'a [u8],
    max_length: usize,
    position: usize,
    line: usize,
    line_start: usize,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer with the default maximum source length.
    pub fn new(source: &'a str) -> Self {
        Self::with_max_length(source, MAX_SOURCE_LENGTH)
    }

    /// Create a lexer that stops with a fatal error after `max_length` bytes.
    pub fn with_max_length(source: &'a str, max_length: usize) -> Self {
        let bytes = source.as_bytes();
        // A NUL byte terminates the source
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Self {
            input: &bytes[..end],
            max_length,
            position: 0,
            line: 1,
            line_start: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Tokenized {
        while self.position < self.input.len() {
            if self.position >= self.max_length {
                let location = self.location_at(self.position);
                self.errors.push(LexError {
                    kind: LexErrorKind::SourceTooLong {
                        limit: self.max_length,
                    },
                    location,
                    resume: self.position,
                });
                break;
            }

            let start = self.position;
            let c = self.input[start];
            let scan = if !c.is_ascii() {
                Err(self.error(LexErrorKind::InvalidCharacter(c), start, start + 1))
            } else {
                match classify(c) {
                    CharClass::Alpha => self.read_alpha(start),
                    CharClass::Number => self.read_number(start),
                    // A lone decimal point is skipped without complaint
                    CharClass::Point | CharClass::Spacer => Ok(start + 1),
                    CharClass::OperatorChar => self.read_operator(start),
                    CharClass::SeparatorChar => self.read_separator(start),
                    CharClass::Quote => self.read_string(start),
                    CharClass::CommentStart => Ok(self.skip_comment(start)),
                    CharClass::EndLine => Ok(self.end_line(start)),
                    CharClass::Invalid => {
                        Err(self.error(LexErrorKind::InvalidCharacter(c), start, start + 1))
                    }
                }
            };

            match scan {
                Ok(next) => self.position = next,
                Err(err) => {
                    self.position = err.resume;
                    self.errors.push(err);
                }
            }
        }

        Tokenized {
            tokens: std::mem::take(&mut self.tokens),
            errors: std::mem::take(&mut self.errors),
        }
    }

    /// Identifier or keyword
    fn read_alpha(&mut self, start: usize) -> Scan {
        let mut end = start + 1;
        while let Some(c) = self.byte_at(end) {
            if !is_alpha(c) && !c.is_ascii_digit() {
                break;
            }
            end += 1;
        }

        let text = self.text(start, end);
        let kind = match Keyword::from_spelling(&text) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Ident(text),
        };
        self.push(kind, start);
        Ok(end)
    }

    /// Digits with at most one decimal point, kept verbatim
    fn read_number(&mut self, start: usize) -> Scan {
        let mut point_found = false;
        let mut end = start + 1;
        while let Some(c) = self.byte_at(end) {
            if c == b'.' {
                if point_found {
                    return Err(self.error(
                        LexErrorKind::MalformedNumber("two decimal points in one number"),
                        end,
                        end + 1,
                    ));
                }
                point_found = true;
            } else if is_alpha(c) {
                // Skip the rest of the word so it does not turn into an identifier
                let mut resume = end + 1;
                while let Some(c) = self.byte_at(resume) {
                    if !is_alpha(c) && !c.is_ascii_digit() {
                        break;
                    }
                    resume += 1;
                }
                return Err(self.error(
                    LexErrorKind::MalformedNumber("letter directly after number"),
                    end,
                    resume,
                ));
            } else if !c.is_ascii_digit() {
                break;
            }
            end += 1;
        }

        let text = self.text(start, end);
        self.push(TokenKind::Number(text), start);
        Ok(end)
    }

    /// Longest run of operator characters; the whole run must be one operator
    fn read_operator(&mut self, start: usize) -> Scan {
        let mut end = start + 1;
        while let Some(c) = self.byte_at(end) {
            if !is_operator_char(c) {
                break;
            }
            end += 1;
        }

        let text = self.text(start, end);
        match Operator::from_spelling(&text) {
            Some(op) => {
                self.push(TokenKind::Operator(op), start);
                Ok(end)
            }
            None => Err(self.error(LexErrorKind::InvalidOperator(text), start, end)),
        }
    }

    /// Single separator character. `;` ends the statement like a newline
    /// but produces no token.
    fn read_separator(&mut self, start: usize) -> Scan {
        let c = self.input[start];
        if c == b';' {
            self.mark_line_end();
            return Ok(start + 1);
        }
        match Separator::from_char(c) {
            Some(sep) => {
                self.push(TokenKind::Separator(sep), start);
                Ok(start + 1)
            }
            None => Err(self.error(LexErrorKind::InvalidSeparator(c), start, start + 1)),
        }
    }

    /// Quoted string; must close with the same quote before the line ends
    fn read_string(&mut self, start: usize) -> Scan {
        let quote = self.input[start];
        let mut end = start + 1;
        loop {
            match self.byte_at(end) {
                // Resume on the newline itself so the line is still counted
                None | Some(b'\n') => {
                    return Err(self.error(LexErrorKind::UnterminatedString, start, end));
                }
                Some(c) if c == quote => break,
                Some(c) if !c.is_ascii() => {
                    // Reported here, but the literal still runs to its quote
                    let err = self.error(LexErrorKind::InvalidCharacter(c), end, end + 1);
                    self.errors.push(err);
                    end += 1;
                }
                Some(_) => end += 1,
            }
        }

        let text = self.text(start + 1, end);
        self.push(TokenKind::Str(text), start);
        Ok(end + 1)
    }

    /// Skip to the newline, leaving it for the end-of-line handling
    fn skip_comment(&mut self, start: usize) -> usize {
        let mut end = start + 1;
        while let Some(c) = self.byte_at(end) {
            if c == b'\n' {
                break;
            }
            if !c.is_ascii() {
                let err = self.error(LexErrorKind::InvalidCharacter(c), end, end + 1);
                self.errors.push(err);
            }
            end += 1;
        }
        end
    }

    fn end_line(&mut self, start: usize) -> usize {
        self.line += 1;
        self.line_start = start + 1;
        if self.byte_at(start + 1) == Some(LINE_CONTINUATION) {
            // The statement carries on; step over the marker
            return start + 2;
        }
        self.mark_line_end();
        start + 1
    }

    fn mark_line_end(&mut self) {
        if let Some(last) = self.tokens.last_mut() {
            last.ends_line = true;
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let location = self.location_at(start);
        self.tokens.push(Token::new(kind, location));
    }

    fn error(&self, kind: LexErrorKind, at: usize, resume: usize) -> LexError {
        LexError {
            kind,
            location: self.location_at(at),
            resume,
        }
    }

    /// Byte at `index`, or `None` past the end of input or the length limit
    fn byte_at(&self, index: usize) -> Option<u8> {
        if index < self.input.len() && index < self.max_length {
            Some(self.input[index])
        } else {
            None
        }
    }

    /// Copy of a byte range; non-ASCII bytes have already been reported and are dropped
    fn text(&self, start: usize, end: usize) -> String {
        self.input[start..end]
            .iter()
            .filter(|b| b.is_ascii())
            .map(|&b| b as char)
            .collect()
    }

    fn location_at(&self, offset: usize) -> SourceLocation {
        SourceLocation::new(self.line, offset.saturating_sub(self.line_start) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let out = tokenize("if then else for do while function return false true end");
        assert!(out.is_ok());
        let expected: Vec<TokenKind> = Keyword::ALL
            .iter()
            .map(|k| TokenKind::Keyword(*k))
            .collect();
        let found: Vec<TokenKind> = out.tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(found, expected);

        assert_eq!(
            kinds("iffy _end2 End"),
            vec![
                TokenKind::Ident("iffy".to_string()),
                TokenKind::Ident("_end2".to_string()),
                TokenKind::Ident("End".to_string()),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("12 3.25 7."),
            vec![
                TokenKind::Number("12".to_string()),
                TokenKind::Number("3.25".to_string()),
                TokenKind::Number("7.".to_string()),
            ]
        );
        assert_eq!(
            kinds("1+2"),
            vec![
                TokenKind::Number("1".to_string()),
                TokenKind::Operator(Operator::Add),
                TokenKind::Number("2".to_string()),
            ]
        );
    }

    #[test]
    fn test_letter_after_number() {
        let out = tokenize("12abc x");
        assert_eq!(out.error_count(), 1);
        assert!(matches!(out.errors[0].kind, LexErrorKind::MalformedNumber(_)));
        assert_eq!(out.errors[0].location, SourceLocation::new(1, 3));
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].kind, TokenKind::Ident("x".to_string()));
    }

    #[test]
    fn test_two_decimal_points() {
        let out = tokenize("1.2.3");
        assert_eq!(out.error_count(), 1);
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].kind, TokenKind::Number("3".to_string()));
    }

    #[test]
    fn test_operators_munch() {
        assert_eq!(
            kinds("a += b <= c != d"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Operator(Operator::AssignAdd),
                TokenKind::Ident("b".to_string()),
                TokenKind::Operator(Operator::LessEqual),
                TokenKind::Ident("c".to_string()),
                TokenKind::Operator(Operator::Inequality),
                TokenKind::Ident("d".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_operator_run() {
        let out = tokenize("a =- b");
        assert_eq!(out.error_count(), 1);
        assert_eq!(
            out.errors[0].kind,
            LexErrorKind::InvalidOperator("=-".to_string())
        );
        assert!(out
            .tokens
            .iter()
            .all(|t| !matches!(t.kind, TokenKind::Operator(_))));
    }

    #[test]
    fn test_separators_and_semicolon() {
        let out = tokenize("f(a, b); g");
        assert!(out.is_ok());
        assert_eq!(out.tokens.len(), 7);
        assert!(out.tokens[1].is_separator(Separator::LParen));
        assert!(out.tokens[3].is_separator(Separator::Comma));
        assert!(out.tokens[5].is_separator(Separator::RParen));
        assert!(out.tokens[5].ends_line);
        assert_eq!(out.tokens[6].location.line, 1);
        assert!(!out.tokens[6].ends_line);
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            kinds("\"hello world\" 'it\"s'"),
            vec![
                TokenKind::Str("hello world".to_string()),
                TokenKind::Str("it\"s".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let out = tokenize("x = \"abc");
        assert_eq!(out.error_count(), 1);
        assert_eq!(out.errors[0].kind, LexErrorKind::UnterminatedString);
        assert!(out
            .tokens
            .iter()
            .all(|t| !matches!(t.kind, TokenKind::Str(_))));

        let out = tokenize("\"abc\ny");
        assert_eq!(out.error_count(), 1);
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].location.line, 2);
    }

    #[test]
    fn test_non_ascii_inside_string() {
        let out = tokenize("s = \"caf\u{e9}\" + t");
        assert_eq!(out.error_count(), 2);
        for err in &out.errors {
            assert!(matches!(err.kind, LexErrorKind::InvalidCharacter(_)));
            assert_eq!(err.location.line, 1);
        }
        assert_eq!(out.errors[0].location.column, 9);
        assert_eq!(out.errors[1].location.column, 10);
        assert_eq!(
            kinds("s = \"caf\u{e9}\" + t"),
            vec![
                TokenKind::Ident("s".to_string()),
                TokenKind::Operator(Operator::Assign),
                TokenKind::Str("caf".to_string()),
                TokenKind::Operator(Operator::Add),
                TokenKind::Ident("t".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments() {
        let out = tokenize("a # comment = 3\nb");
        assert!(out.is_ok());
        assert_eq!(out.tokens.len(), 2);
        assert!(out.tokens[0].ends_line);
        assert_eq!(out.tokens[1].location.line, 2);
    }

    #[test]
    fn test_line_ends_and_continuation() {
        let out = tokenize("a = 1\nb = 2 +\n\\ 3\n");
        assert!(out.is_ok());
        let flags: Vec<bool> = out.tokens.iter().map(|t| t.ends_line).collect();
        assert_eq!(flags, vec![false, false, true, false, false, false, true]);
        let lines: Vec<usize> = out.tokens.iter().map(|t| t.location.line).collect();
        assert_eq!(lines, vec![1, 1, 1, 2, 2, 2, 3]);
    }

    #[test]
    fn test_point_is_skipped() {
        let out = tokenize("a . b .5");
        assert!(out.is_ok());
        assert_eq!(
            out.tokens.into_iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Ident("b".to_string()),
                TokenKind::Number("5".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_characters() {
        let out = tokenize("a @ b\r\nc é");
        assert_eq!(out.error_count(), 4);
        assert_eq!(out.errors[0].kind, LexErrorKind::InvalidCharacter(b'@'));
        assert_eq!(out.errors[1].kind, LexErrorKind::InvalidCharacter(b'\r'));
        assert_eq!(out.errors[2].location.line, 2);
        assert_eq!(out.tokens.len(), 3);
    }

    #[test]
    fn test_nul_terminates() {
        let out = tokenize("a\0b");
        assert!(out.is_ok());
        assert_eq!(out.tokens.len(), 1);
    }

    #[test]
    fn test_max_length_is_fatal() {
        let source = "a ".repeat(150);
        let out = tokenize(&source);
        assert_eq!(out.error_count(), 1);
        assert!(out.errors[0].is_fatal());
        assert_eq!(out.tokens.len(), 100);

        let out = Lexer::with_max_length(&source, 1000).tokenize();
        assert!(out.is_ok());
        assert_eq!(out.tokens.len(), 150);
    }

    #[test]
    fn test_columns() {
        let out = tokenize("ab  cd\n  e");
        assert_eq!(out.tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(out.tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(out.tokens[2].location, SourceLocation::new(2, 3));
    }
}
