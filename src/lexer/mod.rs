//! Whitespace-sensitive tokenization of the filtered source lines. Quoted
//! string literals are kept as single words, every word is classified on its
//! own, and an end-of-line marker is injected after each non-empty line.

mod keywords;
mod token;

pub use keywords::*;
pub use token::*;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ErrorKind, WordyError, WordyResult};

static HEX_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{1,16}$").unwrap());
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-zA-Z0-9_]*$").unwrap());

/// Tokenizes the `(line, line number)` pairs produced by the reader.
pub struct Lexer {
    lines: Vec<(String, usize)>,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(lines: Vec<(String, usize)>) -> Self {
        Self {
            lines,
            tokens: vec![],
        }
    }

    /// Lex all lines. Any word that cannot be classified still produces a
    /// token, but the whole run fails with a `SYNTAX_ERROR` listing every
    /// offending symbol.
    pub fn lex(mut self) -> WordyResult<Vec<Token>> {
        let lines = std::mem::take(&mut self.lines);
        for (line, number) in &lines {
            self.lex_line(line, *number);
        }
        debug!("lexed {count} tokens", count = self.tokens.len());

        let faults = self
            .tokens
            .iter()
            .filter(|token| token.kind == TokenKind::Error)
            .map(|token| {
                format!(
                    "On line {line} the symbol: {symbol} couldn't be defined",
                    line = token.line,
                    symbol = token.lexeme
                )
            })
            .collect::<Vec<_>>();

        if !faults.is_empty() {
            return Err(WordyError::new(ErrorKind::Syntax, faults.join("\n")));
        }

        Ok(self.tokens)
    }

    fn lex_line(&mut self, line: &str, number: usize) {
        let words = split_line(line);
        if words.is_empty() {
            return;
        }

        for word in &words {
            self.tokens.push(classify(word, number));
        }
        self.tokens.push(Token::new(TokenKind::EndLine, "\n", number));
    }
}

/// Split a line on ASCII whitespace, keeping a word that starts with a double
/// quote intact (interior whitespace preserved) until the word that closes it.
fn split_line(line: &str) -> Vec<String> {
    let mut words = vec![];
    let mut word = String::new();
    let mut in_string = false;

    for c in line.chars() {
        if c.is_whitespace() {
            if in_string {
                if word.ends_with('"') {
                    words.push(std::mem::take(&mut word));
                    in_string = false;
                    continue;
                }
            } else if !word.starts_with('"') {
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
                continue;
            } else {
                in_string = true;
            }
        }
        word.push(c);
    }

    let word = word.trim();
    if !word.is_empty() {
        words.push(word.to_owned());
    }

    words
}

/// Turn one word into a token: keyword, literal, identifier, or an error
/// marker for everything else.
fn classify(word: &str, line: usize) -> Token {
    if let Some(kind) = keyword_kind(word) {
        return Token::new(kind, word, line);
    }
    if word.starts_with('"') && word.ends_with('"') {
        return Token::new(TokenKind::StringLiteral, word, line);
    }
    if is_int_literal(word) {
        return Token::new(TokenKind::IntLiteral, word, line);
    }
    if IDENTIFIER.is_match(word) {
        return Token::new(TokenKind::Identifier, word, line);
    }

    Token::new(TokenKind::Error, word, line)
}

/// A base-10 signed integer, or `0x` followed by 1 to 16 hex digits.
fn is_int_literal(word: &str) -> bool {
    HEX_LITERAL.is_match(word) || word.parse::<i64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_single(source: &str) -> Vec<Token> {
        Lexer::new(vec![(source.to_owned(), 1)])
            .lex()
            .expect("should lex")
    }

    #[test]
    fn test_every_keyword_round_trips() {
        for (word, kind) in keywords() {
            let tokens = lex_single(word);

            assert_eq!(
                vec![
                    Token::new(kind, word, 1),
                    Token::new(TokenKind::EndLine, "\n", 1)
                ],
                tokens,
                "keyword '{word}' did not lex to {kind}"
            );
        }
    }

    #[test]
    fn test_keywords_match_case_insensitively_but_keep_their_lexeme() {
        let tokens = lex_single("Int PLUS");

        assert_eq!(
            vec![
                Token::new(TokenKind::Type, "Int", 1),
                Token::new(TokenKind::Operator, "PLUS", 1),
                Token::new(TokenKind::EndLine, "\n", 1),
            ],
            tokens
        );
    }

    #[test]
    fn test_string_literal_keeps_interior_whitespace() {
        let tokens = lex_single("x is \"hello   spaced world\"");

        assert_eq!(
            vec![
                Token::new(TokenKind::Identifier, "x", 1),
                Token::new(TokenKind::Assignment, "is", 1),
                Token::new(TokenKind::StringLiteral, "\"hello   spaced world\"", 1),
                Token::new(TokenKind::EndLine, "\n", 1),
            ],
            tokens
        );
    }

    #[test]
    fn test_two_string_literals_on_one_line() {
        let words = split_line("var1 is \"hello world\" plus \" from Wordy\"");

        assert_eq!(
            vec!["var1", "is", "\"hello world\"", "plus", "\" from Wordy\""],
            words
        );
    }

    #[test]
    fn test_repeated_whitespace_produces_no_empty_words() {
        assert_eq!(vec!["int", "var1", "is", "6"], split_line("int   var1  is\t6"));
    }

    #[test]
    fn test_identifier_rules() {
        assert_eq!(TokenKind::Identifier, classify("var_Int", 1).kind);
        assert_eq!(TokenKind::Identifier, classify("x2", 1).kind);
        assert_eq!(TokenKind::Error, classify("Var_int", 1).kind);
        assert_eq!(TokenKind::Error, classify("1var_int", 1).kind);
        assert_eq!(TokenKind::Error, classify("var-for-test", 1).kind);
    }

    #[test]
    fn test_integer_rules() {
        assert_eq!(TokenKind::IntLiteral, classify("123", 1).kind);
        assert_eq!(TokenKind::IntLiteral, classify("-556", 1).kind);
        assert_eq!(TokenKind::IntLiteral, classify("0xffFF", 1).kind);
        assert_eq!(TokenKind::IntLiteral, classify("0xdeadbeefcafebabe", 1).kind);

        assert_eq!(TokenKind::Error, classify("0x", 1).kind);
        assert_eq!(TokenKind::Error, classify("0x3g1", 1).kind);
        assert_eq!(TokenKind::Error, classify("0x0123456789abcdeff", 1).kind);
        assert_eq!(TokenKind::Error, classify("-1a23", 1).kind);
    }

    #[test]
    fn test_endline_is_injected_per_line() {
        let tokens = Lexer::new(vec![("int x is 1".to_owned(), 1), ("x plusplus".to_owned(), 3)])
            .lex()
            .expect("should lex");

        let endlines = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::EndLine)
            .map(|token| token.line)
            .collect::<Vec<_>>();

        assert_eq!(vec![1, 3], endlines);
    }

    #[test]
    fn test_unclassifiable_words_fail_the_run() {
        let error = Lexer::new(vec![
            ("int Var1 is 6".to_owned(), 2),
            ("x @y".to_owned(), 4),
        ])
        .lex()
        .expect_err("should fail");

        assert_eq!(ErrorKind::Syntax, error.kind);
        assert_eq!(
            "On line 2 the symbol: Var1 couldn't be defined\n\
             On line 4 the symbol: @y couldn't be defined",
            error.message
        );
    }
}
