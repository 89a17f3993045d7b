//! Character classification for the lexer
//!
//! Every byte maps to exactly one [`CharClass`]; the lexer uses the class of
//! the byte under the cursor to pick a token reader.

/// Class of a single source byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Letter or underscore
    Alpha,
    Number,
    /// Decimal point outside a number
    Point,
    OperatorChar,
    SeparatorChar,
    /// Space or tab
    Spacer,
    EndLine,
    /// `"` or `'`
    Quote,
    /// `#` starts a comment running to the end of the line
    CommentStart,
    Invalid,
}

const OPERATOR_CHARS: &[u8] = b"+-/*=<>!&|^";
const SEPARATOR_CHARS: &[u8] = b"()[]{},;";

pub fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

pub fn is_operator_char(c: u8) -> bool {
    OPERATOR_CHARS.contains(&c)
}

pub fn is_quote(c: u8) -> bool {
    c == b'"' || c == b'\''
}

/// Classify one byte. Order matters only for readability; the classes never
/// overlap in value.
pub fn classify(c: u8) -> CharClass {
    if is_alpha(c) {
        CharClass::Alpha
    } else if c.is_ascii_digit() {
        CharClass::Number
    } else if c == b'.' {
        CharClass::Point
    } else if is_operator_char(c) {
        CharClass::OperatorChar
    } else if SEPARATOR_CHARS.contains(&c) {
        CharClass::SeparatorChar
    } else if c == b' ' || c == b'\t' {
        CharClass::Spacer
    } else if c == b'\n' {
        CharClass::EndLine
    } else if is_quote(c) {
        CharClass::Quote
    } else if c == b'#' {
        CharClass::CommentStart
    } else {
        CharClass::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_underscore() {
        assert_eq!(classify(b'a'), CharClass::Alpha);
        assert_eq!(classify(b'Z'), CharClass::Alpha);
        assert_eq!(classify(b'_'), CharClass::Alpha);
    }

    #[test]
    fn test_symbols() {
        for c in b"+-/*=<>!&|^" {
            assert_eq!(classify(*c), CharClass::OperatorChar);
        }
        for c in b"()[]{},;" {
            assert_eq!(classify(*c), CharClass::SeparatorChar);
        }
        assert_eq!(classify(b'.'), CharClass::Point);
        assert_eq!(classify(b'"'), CharClass::Quote);
        assert_eq!(classify(b'\''), CharClass::Quote);
        assert_eq!(classify(b'#'), CharClass::CommentStart);
    }

    #[test]
    fn test_whitespace_and_invalid() {
        assert_eq!(classify(b' '), CharClass::Spacer);
        assert_eq!(classify(b'\t'), CharClass::Spacer);
        assert_eq!(classify(b'\n'), CharClass::EndLine);
        assert_eq!(classify(b'\r'), CharClass::Invalid);
        assert_eq!(classify(b'\\'), CharClass::Invalid);
        assert_eq!(classify(b'@'), CharClass::Invalid);
        assert_eq!(classify(0), CharClass::Invalid);
        assert_eq!(classify(0xC3), CharClass::Invalid);
    }
}
