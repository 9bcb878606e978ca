use std::fmt::Display;

/// The closed set of token classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Type,
    Bool,
    IntLiteral,
    StringLiteral,
    Assignment,
    Operator,
    Compare,
    Unary,
    IncDec,
    For,
    While,
    With,
    Endfor,
    Endwhile,
    If,
    Else,
    Endif,
    Function,
    Return,
    Call,
    Identifier,
    EndLine,
    Error,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Type => "TYPE",
            TokenKind::Bool => "BOOL",
            TokenKind::IntLiteral => "INT_LITERAL",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::Assignment => "ASSIGNMENT",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Compare => "COMPARE",
            TokenKind::Unary => "UNARY",
            TokenKind::IncDec => "INC_DEC",
            TokenKind::For => "FOR",
            TokenKind::While => "WHILE",
            TokenKind::With => "WITH",
            TokenKind::Endfor => "ENDFOR",
            TokenKind::Endwhile => "ENDWHILE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Endif => "ENDIF",
            TokenKind::Function => "FUNCTION",
            TokenKind::Return => "RETURN",
            TokenKind::Call => "CALL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::EndLine => "END_LINE",
            TokenKind::Error => "ERROR",
        }
    }

    /// Identifiers and literals are the only tokens allowed as expression
    /// operands and call arguments.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Bool | TokenKind::IntLiteral | TokenKind::StringLiteral
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexical atom: a class, the verbatim surface text (quotes and sign
/// included), and the 1-based source line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }
}
