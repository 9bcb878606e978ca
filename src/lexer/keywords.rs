use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::TokenKind;

macro_rules! keyword {
    ($map:ident, $word:expr, $kind:ident) => {
        $map.insert($word, TokenKind::$kind);
    };
}

/// Every reserved word of the language, mapped to the kind it lexes to.
static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();

    keyword!(m, "int", Type);
    keyword!(m, "bool", Type);
    keyword!(m, "string", Type);

    keyword!(m, "true", Bool);
    keyword!(m, "false", Bool);

    keyword!(m, "is", Assignment);

    keyword!(m, "plus", Operator);
    keyword!(m, "min", Operator);
    keyword!(m, "mul", Operator);
    keyword!(m, "div", Operator);
    keyword!(m, "mod", Operator);
    keyword!(m, "and", Operator);
    keyword!(m, "or", Operator);
    keyword!(m, "xor", Operator);
    keyword!(m, "bic", Operator);
    keyword!(m, "lshift", Operator);
    keyword!(m, "rshift", Operator);

    keyword!(m, "equals", Compare);
    keyword!(m, "notequals", Compare);
    keyword!(m, "lessthan", Compare);
    keyword!(m, "greaterthan", Compare);
    keyword!(m, "lessthanequals", Compare);
    keyword!(m, "greaterthanequals", Compare);

    keyword!(m, "plusis", Unary);
    keyword!(m, "minis", Unary);
    keyword!(m, "mulis", Unary);
    keyword!(m, "divis", Unary);
    keyword!(m, "modis", Unary);
    keyword!(m, "andis", Unary);
    keyword!(m, "oris", Unary);
    keyword!(m, "notis", Unary);
    keyword!(m, "xoris", Unary);
    keyword!(m, "bicis", Unary);
    keyword!(m, "lshiftis", Unary);
    keyword!(m, "rshiftis", Unary);

    keyword!(m, "plusplus", IncDec);
    keyword!(m, "minmin", IncDec);

    keyword!(m, "for", For);
    keyword!(m, "while", While);
    keyword!(m, "with", With);
    keyword!(m, "endfor", Endfor);
    keyword!(m, "endwhile", Endwhile);
    keyword!(m, "if", If);
    keyword!(m, "else", Else);
    keyword!(m, "endif", Endif);
    keyword!(m, "function", Function);
    keyword!(m, "return", Return);
    keyword!(m, "call", Call);

    m
});

/// Case-insensitive keyword lookup.
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    KEYWORDS.get(word.to_ascii_lowercase().as_str()).copied()
}

/// The full keyword table, mainly for exhaustive tests.
pub fn keywords() -> impl Iterator<Item = (&'static str, TokenKind)> {
    KEYWORDS.iter().map(|(word, kind)| (*word, *kind))
}
