//! Keyword, operator and separator tables
//!
//! The tables are plain `Copy` enums with `match`-based lookups, so they are
//! immutable, need no initialisation, and can be shared by any number of
//! lexers and parsers.

use std::fmt;

/// Reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    If,
    Then,
    Else,
    For,
    Do,
    While,
    Function,
    Return,
    False,
    True,
    End,
}

impl Keyword {
    pub const ALL: [Keyword; 11] = [
        Keyword::If,
        Keyword::Then,
        Keyword::Else,
        Keyword::For,
        Keyword::Do,
        Keyword::While,
        Keyword::Function,
        Keyword::Return,
        Keyword::False,
        Keyword::True,
        Keyword::End,
    ];

    pub fn spelling(self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::Then => "then",
            Keyword::Else => "else",
            Keyword::For => "for",
            Keyword::Do => "do",
            Keyword::While => "while",
            Keyword::Function => "function",
            Keyword::Return => "return",
            Keyword::False => "false",
            Keyword::True => "true",
            Keyword::End => "end",
        }
    }

    /// Look up a keyword by its exact spelling.
    pub fn from_spelling(text: &str) -> Option<Keyword> {
        let keyword = match text {
            "if" => Keyword::If,
            "then" => Keyword::Then,
            "else" => Keyword::Else,
            "for" => Keyword::For,
            "do" => Keyword::Do,
            "while" => Keyword::While,
            "function" => Keyword::Function,
            "return" => Keyword::Return,
            "false" => Keyword::False,
            "true" => Keyword::True,
            "end" => Keyword::End,
            _ => return None,
        };
        Some(keyword)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Operators, grouped by category.
///
/// `Negative` and `ArrayAccess` have no spelling of their own: the parser
/// produces them from `-` in operand position and from `[` after an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Assignment
    Assign,
    AssignAdd,
    AssignSub,
    AssignMul,
    AssignDiv,

    // Logical
    Not,
    And,
    Or,
    Xor,
    Negative,

    // Relational
    Equality,
    Inequality,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Access
    MemberAccess,
    ArrayAccess,
}

impl Operator {
    pub const ALL: [Operator; 22] = [
        Operator::Assign,
        Operator::AssignAdd,
        Operator::AssignSub,
        Operator::AssignMul,
        Operator::AssignDiv,
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Xor,
        Operator::Negative,
        Operator::Equality,
        Operator::Inequality,
        Operator::Less,
        Operator::Greater,
        Operator::LessEqual,
        Operator::GreaterEqual,
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::MemberAccess,
        Operator::ArrayAccess,
    ];

    /// Source spelling, or `None` for operators that are recognised structurally.
    pub fn spelling(self) -> Option<&'static str> {
        let s = match self {
            Operator::Assign => "=",
            Operator::AssignAdd => "+=",
            Operator::AssignSub => "-=",
            Operator::AssignMul => "*=",
            Operator::AssignDiv => "/=",
            Operator::Not => "!",
            Operator::And => "&",
            Operator::Or => "|",
            Operator::Xor => "^",
            Operator::Negative => return None,
            Operator::Equality => "==",
            Operator::Inequality => "!=",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessEqual => "<=",
            Operator::GreaterEqual => ">=",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::MemberAccess => ".",
            Operator::ArrayAccess => return None,
        };
        Some(s)
    }

    /// Look up an operator by its exact spelling. Never returns the
    /// structural operators.
    pub fn from_spelling(text: &str) -> Option<Operator> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.spelling() == Some(text))
    }

    /// Binding strength, 1 (loosest) to 11 (tightest).
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Assign
            | Operator::AssignAdd
            | Operator::AssignSub
            | Operator::AssignMul
            | Operator::AssignDiv => 1,
            Operator::Equality | Operator::Inequality => 2,
            Operator::Less | Operator::Greater | Operator::LessEqual | Operator::GreaterEqual => 3,
            Operator::And | Operator::Or | Operator::Xor => 4,
            Operator::Add | Operator::Sub => 5,
            Operator::Mul | Operator::Div => 6,
            Operator::Negative => 8,
            Operator::Not => 9,
            Operator::ArrayAccess => 10,
            Operator::MemberAccess => 11,
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(self, Operator::Not | Operator::Negative)
    }

    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            Operator::Assign
                | Operator::AssignAdd
                | Operator::AssignSub
                | Operator::AssignMul
                | Operator::AssignDiv
        )
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Operator::Equality
                | Operator::Inequality
                | Operator::Less
                | Operator::Greater
                | Operator::LessEqual
                | Operator::GreaterEqual
        )
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Negative => f.write_str("-"),
            Operator::ArrayAccess => f.write_str("[]"),
            op => f.write_str(op.spelling().unwrap_or_default()),
        }
    }
}

/// Single-character punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
}

impl Separator {
    pub const ALL: [Separator; 7] = [
        Separator::LParen,
        Separator::RParen,
        Separator::LBracket,
        Separator::RBracket,
        Separator::LBrace,
        Separator::RBrace,
        Separator::Comma,
    ];

    pub fn as_char(self) -> char {
        match self {
            Separator::LParen => '(',
            Separator::RParen => ')',
            Separator::LBracket => '[',
            Separator::RBracket => ']',
            Separator::LBrace => '{',
            Separator::RBrace => '}',
            Separator::Comma => ',',
        }
    }

    pub fn from_char(c: u8) -> Option<Separator> {
        let sep = match c {
            b'(' => Separator::LParen,
            b')' => Separator::RParen,
            b'[' => Separator::LBracket,
            b']' => Separator::RBracket,
            b'{' => Separator::LBrace,
            b'}' => Separator::RBrace,
            b',' => Separator::Comma,
            _ => return None,
        };
        Some(sep)
    }

    /// The closing separator for an opening bracket.
    pub fn closer(self) -> Option<Separator> {
        match self {
            Separator::LParen => Some(Separator::RParen),
            Separator::LBracket => Some(Separator::RBracket),
            Separator::LBrace => Some(Separator::RBrace),
            _ => None,
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
