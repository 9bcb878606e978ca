//! A recursive-descent parser over the lexed token stream. Statements are
//! delimited by end-of-line markers, so most forms are parsed from a strict
//! three-token window; block statements locate their matching end token by
//! counting openers and closers of the same kind.

pub mod ast;

use log::debug;

use crate::{
    error::{ErrorKind, WordyError, WordyResult},
    lexer::{Token, TokenKind},
};

use self::ast::{
    Assignment, Builtin, Call, Compare, Forloop, Function, FunctionDef, Functions, If, IncDec,
    Node, Operator, Parameter, TypeAssignment, Unary, Value, While,
};

/// A parsed statement plus the tokens following it.
type Parsed<'t> = (Node, &'t [Token]);

/// Split off every token before the first occurrence of `until`. The marker
/// itself is dropped from both halves.
fn find_until(tokens: &[Token], until: TokenKind) -> (&[Token], &[Token]) {
    match tokens.iter().position(|token| token.kind == until) {
        Some(position) => (&tokens[..position], &tokens[position + 1..]),
        None => (tokens, &[]),
    }
}

/// Find the body of a block statement by scanning for the closing token,
/// skipping over nested blocks of the same kind. The closing token is dropped
/// from both halves.
fn find_end(tokens: &[Token], start: TokenKind, end: TokenKind) -> (&[Token], &[Token]) {
    let mut depth = 0usize;
    for (position, token) in tokens.iter().enumerate() {
        if token.kind == start {
            depth += 1;
        } else if token.kind == end {
            if depth == 0 {
                return (&tokens[..position], &tokens[position + 1..]);
            }
            depth -= 1;
        }
    }

    (tokens, &[])
}

/// Split an if body at the first `else` on the outermost nesting level. The
/// `else` and the end-of-line after it are dropped.
fn find_if_else_bodies(tokens: &[Token]) -> (&[Token], &[Token]) {
    let mut depth = 0usize;
    for (position, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::If => depth += 1,
            TokenKind::Endif => depth = depth.saturating_sub(1),
            TokenKind::Else if depth == 0 => {
                let mut else_body = &tokens[position + 1..];
                if else_body.first().map(|token| token.kind) == Some(TokenKind::EndLine) {
                    else_body = &else_body[1..];
                }
                return (&tokens[..position], else_body);
            }
            _ => {}
        }
    }

    (tokens, &[])
}

/// Every call argument must be an identifier or a literal.
fn check_parameters(tokens: &[Token]) -> WordyResult<()> {
    for token in tokens {
        if !token.is_leaf() {
            return Err(WordyError::new(
                ErrorKind::Syntax,
                format!(
                    "Invalid parameter: {lexeme} at line {line}",
                    lexeme = token.lexeme,
                    line = token.line
                ),
            ));
        }
    }

    Ok(())
}

/// Parse the tokens of a single expression: a leaf, a call, an inc/dec, or a
/// three-token operation/comparison/compound assignment.
pub fn expression(tokens: &[Token]) -> WordyResult<Node> {
    match tokens {
        [] => Err(WordyError::new(
            ErrorKind::Statement,
            "No expression found. Can't find line number",
        )),
        [token] => {
            if token.is_leaf() {
                Ok(Value {
                    token: token.clone(),
                }
                .into())
            } else {
                Err(WordyError::new(
                    ErrorKind::Statement,
                    format!(
                        "\"{lexeme}\" at line {line} is no identifier or literal as expected",
                        lexeme = token.lexeme,
                        line = token.line
                    ),
                ))
            }
        }
        [call, name, parameters @ ..] if call.kind == TokenKind::Call => {
            if name.kind != TokenKind::Identifier {
                return Err(WordyError::new(
                    ErrorKind::Syntax,
                    format!(
                        "Expected function name at line {line} but got {lexeme}",
                        line = name.line,
                        lexeme = name.lexeme
                    ),
                ));
            }
            check_parameters(parameters)?;

            Ok(Call {
                function: name.clone(),
                parameters: parameters.to_vec(),
            }
            .into())
        }
        [left, operator] => {
            if left.kind != TokenKind::Identifier {
                return Err(WordyError::new(
                    ErrorKind::Syntax,
                    format!(
                        "Expected identifier at line {line} but got {lexeme}",
                        line = left.line,
                        lexeme = left.lexeme
                    ),
                ));
            }
            if operator.kind != TokenKind::IncDec {
                return Err(WordyError::new(
                    ErrorKind::Syntax,
                    format!(
                        "Invalid operator. Expected increment or decrement but got {lexeme} at line {line}",
                        lexeme = operator.lexeme,
                        line = operator.line
                    ),
                ));
            }

            Ok(IncDec {
                left: left.clone(),
                operator: operator.clone(),
            }
            .into())
        }
        [left, operator, right] => {
            if !left.is_leaf() {
                return Err(invalid_token(left));
            }
            if !matches!(
                operator.kind,
                TokenKind::Operator | TokenKind::Unary | TokenKind::Compare
            ) {
                return Err(WordyError::new(
                    ErrorKind::Syntax,
                    format!(
                        "Invalid operator: {lexeme} at line {line}",
                        lexeme = operator.lexeme,
                        line = operator.line
                    ),
                ));
            }
            if !right.is_leaf() {
                return Err(invalid_token(right));
            }

            match operator.kind {
                TokenKind::Compare => Ok(Compare {
                    left: left.clone(),
                    operator: operator.clone(),
                    right: right.clone(),
                }
                .into()),
                TokenKind::Unary => {
                    if left.kind != TokenKind::Identifier {
                        return Err(WordyError::new(
                            ErrorKind::Syntax,
                            format!(
                                "Expected identifier for the left hand of a unary, but got {lexeme} at line {line}",
                                lexeme = left.lexeme,
                                line = left.line
                            ),
                        ));
                    }
                    Ok(Unary {
                        left: left.clone(),
                        operator: operator.clone(),
                        right: Box::new(
                            Value {
                                token: right.clone(),
                            }
                            .into(),
                        ),
                    }
                    .into())
                }
                _ => Ok(Operator {
                    left: left.clone(),
                    operator: operator.clone(),
                    right: right.clone(),
                }
                .into()),
            }
        }
        _ => Err(WordyError::new(
            ErrorKind::Syntax,
            format!("Invalid expression at line {line}", line = tokens[0].line),
        )),
    }
}

fn invalid_token(token: &Token) -> WordyError {
    WordyError::new(
        ErrorKind::Syntax,
        format!(
            "Invalid token: {lexeme} at line {line}",
            lexeme = token.lexeme,
            line = token.line
        ),
    )
}

/// Parse `TYPE id is <expression>`.
fn type_assignment(tokens: &[Token]) -> WordyResult<TypeAssignment> {
    let [type_token, id, assign, expression_tokens @ ..] = tokens else {
        let line = tokens.first().map(|token| token.line).unwrap_or_default();
        return Err(WordyError::new(
            ErrorKind::Statement,
            format!("Incomplete assignment at line {line}"),
        ));
    };

    if type_token.kind != TokenKind::Type {
        return Err(WordyError::new(
            ErrorKind::Statement,
            format!(
                "Expected type at line {line} instead of {lexeme}",
                line = type_token.line,
                lexeme = type_token.lexeme
            ),
        ));
    }
    if id.kind != TokenKind::Identifier {
        return Err(WordyError::new(
            ErrorKind::Statement,
            format!(
                "Expected identifier at line {line} instead of {lexeme}",
                line = id.line,
                lexeme = id.lexeme
            ),
        ));
    }
    if assign.kind != TokenKind::Assignment {
        return Err(WordyError::new(
            ErrorKind::Statement,
            format!(
                "Expected 'is' instead of {lexeme} at line {line}",
                lexeme = assign.lexeme,
                line = assign.line
            ),
        ));
    }

    let expression = expression(expression_tokens)?;

    Ok(TypeAssignment {
        type_token: type_token.clone(),
        id: id.clone(),
        expression: Box::new(expression),
    })
}

/// Parse a three-token comparison.
fn compare(tokens: &[Token]) -> WordyResult<Compare> {
    let [left, operator, right] = tokens else {
        let line = tokens.first().map(|token| token.line).unwrap_or_default();
        return Err(WordyError::new(
            ErrorKind::Statement,
            format!("Couldn't form a compare at line {line}"),
        ));
    };

    if operator.kind != TokenKind::Compare {
        return Err(WordyError::new(
            ErrorKind::Statement,
            format!(
                "{lexeme} is not a valid compare operator",
                lexeme = operator.lexeme
            ),
        ));
    }
    if !left.is_leaf() {
        return Err(WordyError::new(
            ErrorKind::Statement,
            format!(
                "Compare left hand side is not a variable or literal at line {line}",
                line = left.line
            ),
        ));
    }
    if !right.is_leaf() {
        return Err(WordyError::new(
            ErrorKind::Statement,
            format!(
                "Compare right hand side is not a variable or literal at line {line}",
                line = right.line
            ),
        ));
    }

    Ok(Compare {
        left: left.clone(),
        operator: operator.clone(),
        right: right.clone(),
    })
}

fn parse_for(tokens: &[Token]) -> WordyResult<Parsed<'_>> {
    let line = tokens[0].line;
    let (start_tokens, rest) = find_until(&tokens[1..], TokenKind::While);
    let (dowhile_tokens, rest) = find_until(rest, TokenKind::With);
    let (inc_tokens, rest) = find_until(rest, TokenKind::EndLine);
    let (body_tokens, left_over) = find_end(rest, TokenKind::For, TokenKind::Endfor);

    let start = type_assignment(start_tokens).map_err(|_| {
        WordyError::new(
            ErrorKind::Statement,
            format!("For loop doesn't start with an assignment (type identifier is expression) at line {line}"),
        )
    })?;
    let dowhile = compare(dowhile_tokens).map_err(|_| {
        WordyError::new(
            ErrorKind::Statement,
            format!("For loop doesn't have a valid compare (x compare y) at line {line}"),
        )
    })?;
    let inc = expression(inc_tokens).map_err(|_| {
        WordyError::new(
            ErrorKind::Statement,
            format!("For loop doesn't have a valid iteration expression at line {line}"),
        )
    })?;
    let body = statements(body_tokens)?;

    Ok((
        Forloop {
            start,
            dowhile,
            inc: Box::new(inc),
            body,
        }
        .into(),
        left_over,
    ))
}

fn parse_while(tokens: &[Token]) -> WordyResult<Parsed<'_>> {
    let (expression_tokens, rest) = find_until(&tokens[1..], TokenKind::EndLine);
    let (body_tokens, left_over) = find_end(rest, TokenKind::While, TokenKind::Endwhile);

    let dowhile = expression(expression_tokens)?;
    let body = statements(body_tokens)?;

    Ok((
        While {
            dowhile: Box::new(dowhile),
            body,
        }
        .into(),
        left_over,
    ))
}

fn parse_if(tokens: &[Token]) -> WordyResult<Parsed<'_>> {
    let line = tokens[0].line;
    let (cmp_tokens, rest) = find_until(&tokens[1..], TokenKind::EndLine);
    let (body_tokens, left_over) = find_end(rest, TokenKind::If, TokenKind::Endif);
    let (if_tokens, else_tokens) = find_if_else_bodies(body_tokens);

    if if_tokens.is_empty() {
        return Err(WordyError::new(
            ErrorKind::Syntax,
            format!("No if-body found for if-statement at line {line}"),
        ));
    }

    let cmp = compare(cmp_tokens)?;
    let body = statements(if_tokens)?;
    let else_body = statements(else_tokens)?;

    Ok((
        If {
            cmp,
            body,
            else_body,
        }
        .into(),
        left_over,
    ))
}

fn parse_call(tokens: &[Token]) -> WordyResult<Parsed<'_>> {
    let Some(name) = tokens.get(1) else {
        return Err(WordyError::new(
            ErrorKind::Syntax,
            format!("Expected function name at line {line}", line = tokens[0].line),
        ));
    };
    if name.kind != TokenKind::Identifier {
        return Err(WordyError::new(
            ErrorKind::Syntax,
            format!(
                "Expected function name at line {line} but got {lexeme}",
                line = name.line,
                lexeme = name.lexeme
            ),
        ));
    }

    let (parameter_tokens, left_over) = find_until(&tokens[2..], TokenKind::EndLine);
    check_parameters(parameter_tokens)?;

    Ok((
        Call {
            function: name.clone(),
            parameters: parameter_tokens.to_vec(),
        }
        .into(),
        left_over,
    ))
}

fn parse_type_assignment(tokens: &[Token]) -> WordyResult<Parsed<'_>> {
    let (statement_tokens, left_over) = find_until(tokens, TokenKind::EndLine);
    let node = type_assignment(statement_tokens)?;

    Ok((node.into(), left_over))
}

/// A statement starting with an identifier: a reassignment, a compound
/// assignment, or an increment/decrement. The compound assignment takes a
/// full expression on its right-hand side here, unlike its three-token
/// expression form.
fn parse_identifier(tokens: &[Token]) -> WordyResult<Parsed<'_>> {
    let id = &tokens[0];
    let invalid_statement = || {
        WordyError::new(
            ErrorKind::Statement,
            format!("Invalid statement at line {line}", line = id.line),
        )
    };
    let Some(next) = tokens.get(1) else {
        return Err(invalid_statement());
    };

    match next.kind {
        TokenKind::Assignment => {
            let (expression_tokens, left_over) = find_until(&tokens[2..], TokenKind::EndLine);
            let expression = expression(expression_tokens)?;

            Ok((
                Assignment {
                    id: id.clone(),
                    expression: Box::new(expression),
                }
                .into(),
                left_over,
            ))
        }
        TokenKind::Unary => {
            let (expression_tokens, left_over) = find_until(&tokens[2..], TokenKind::EndLine);
            let expression = expression(expression_tokens)?;

            Ok((
                Unary {
                    left: id.clone(),
                    operator: next.clone(),
                    right: Box::new(expression),
                }
                .into(),
                left_over,
            ))
        }
        TokenKind::IncDec => {
            if tokens.get(2).map(|token| token.kind) != Some(TokenKind::EndLine) {
                return Err(invalid_statement());
            }

            Ok((
                IncDec {
                    left: id.clone(),
                    operator: next.clone(),
                }
                .into(),
                &tokens[3..],
            ))
        }
        _ => Err(invalid_statement()),
    }
}

/// Parse a flat run of statements (a function or block body).
fn statements(tokens: &[Token]) -> WordyResult<Vec<Node>> {
    let mut nodes = vec![];
    let mut rest = tokens;

    while let Some(first) = rest.first() {
        let (node, mut left_over) = match first.kind {
            TokenKind::For => parse_for(rest)?,
            TokenKind::While => parse_while(rest)?,
            TokenKind::If => parse_if(rest)?,
            TokenKind::Call => parse_call(rest)?,
            TokenKind::Type => parse_type_assignment(rest)?,
            TokenKind::Identifier => parse_identifier(rest)?,
            _ => {
                return Err(WordyError::new(
                    ErrorKind::Statement,
                    format!(
                        "No valid statement could be formed at line {line}",
                        line = first.line
                    ),
                ))
            }
        };

        if left_over.first().map(|token| token.kind) == Some(TokenKind::EndLine) {
            left_over = &left_over[1..];
        }

        nodes.push(node);
        rest = left_over;
    }

    Ok(nodes)
}

/// Parse the `TYPE name` pairs of a function header, up to the end of line.
fn parameter_list(tokens: &[Token]) -> WordyResult<(Vec<Parameter>, &[Token])> {
    let mut parameters = vec![];
    let mut rest = tokens;

    loop {
        match rest {
            [first, ..] if first.kind == TokenKind::EndLine => {
                return Ok((parameters, &rest[1..]));
            }
            [type_token, name, ..] if type_token.kind == TokenKind::Type => {
                if name.kind != TokenKind::Identifier {
                    return Err(WordyError::new(
                        ErrorKind::UnknownType,
                        format!(
                            "Name '{lexeme}' at line {line} is not a valid name",
                            lexeme = name.lexeme,
                            line = name.line
                        ),
                    ));
                }
                parameters.push(Parameter {
                    type_token: type_token.clone(),
                    name: name.lexeme.clone(),
                });
                rest = &rest[2..];
            }
            [first, ..] => {
                return Err(WordyError::new(
                    ErrorKind::UnknownType,
                    format!(
                        "Type '{lexeme}' at line {line} is not valid",
                        lexeme = first.lexeme,
                        line = first.line
                    ),
                ));
            }
            [] => {
                return Err(WordyError::new(
                    ErrorKind::Syntax,
                    "Unterminated parameter list",
                ));
            }
        }
    }
}

/// Parse one `TYPE function name { TYPE id }* <body> return <expression>`
/// definition, returning it together with the tokens after it.
fn function_definition(tokens: &[Token]) -> WordyResult<(FunctionDef, &[Token])> {
    let type_token = &tokens[0];
    if type_token.kind != TokenKind::Type {
        return Err(WordyError::new(
            ErrorKind::UnknownType,
            format!(
                "Type '{lexeme}' at line {line} is not valid",
                lexeme = type_token.lexeme,
                line = type_token.line
            ),
        ));
    }

    let Some(name) = tokens.get(2) else {
        return Err(WordyError::new(
            ErrorKind::InvalidName,
            format!("Function name missing at line {line}", line = tokens[1].line),
        ));
    };
    if name.kind != TokenKind::Identifier {
        return Err(WordyError::new(
            ErrorKind::InvalidName,
            format!(
                "Name '{lexeme}' at line {line} is not a valid name",
                lexeme = name.lexeme,
                line = name.line
            ),
        ));
    }

    let (parameters, rest) = parameter_list(&tokens[3..])?;

    let (body_tokens, rest) = find_until(rest, TokenKind::Return);
    if rest.is_empty() {
        return Err(WordyError::new(
            ErrorKind::NoReturnFound,
            format!("No return found in function {name}", name = name.lexeme),
        ));
    }
    let body = statements(body_tokens)?;

    let (return_tokens, left_over) = find_until(rest, TokenKind::EndLine);
    let return_statement = expression(return_tokens)?;
    let return_line = return_tokens[0].line;

    debug!("parsed function '{name}'", name = name.lexeme);

    Ok((
        FunctionDef {
            name: name.lexeme.clone(),
            parameters,
            return_type: type_token.clone(),
            body,
            return_statement,
            return_line,
        },
        left_over,
    ))
}

/// Parse the whole token stream into the function table. The builtins are
/// registered after the user functions.
pub fn parse(tokens: &[Token]) -> WordyResult<Functions> {
    let mut functions = Functions::new();
    let mut rest = tokens;

    while rest.len() > 1 {
        if rest[1].kind != TokenKind::Function {
            return Err(WordyError::new(
                ErrorKind::Syntax,
                format!(
                    "No valid function definition at line {line}",
                    line = rest[1].line
                ),
            ));
        }

        let (definition, left_over) = function_definition(rest)?;
        functions.insert(definition.name.clone(), Function::User(definition));
        rest = left_over;
    }

    for builtin in [Builtin::Print, Builtin::Size, Builtin::Input] {
        functions.insert(builtin.name().to_owned(), Function::Builtin(builtin));
    }

    Ok(functions)
}

#[cfg(test)]
mod tests {
    use crate::{lexer::Lexer, reader::filter_lines};

    use super::*;

    fn tokens_of(source: &str) -> Vec<Token> {
        Lexer::new(filter_lines(source)).lex().expect("should lex")
    }

    fn parse_source(source: &str) -> WordyResult<Functions> {
        parse(&tokens_of(source))
    }

    fn token(kind: TokenKind, lexeme: &str, line: usize) -> Token {
        Token::new(kind, lexeme, line)
    }

    #[test]
    fn test_is_odd_parses_to_the_expected_shape() {
        let source = "bool function is_odd int n\n\
                      bool result is false\n\
                      if n notequals 0\n\
                      n minmin\n\
                      result is call is_even n\n\
                      endif\n\
                      return result\n";

        let functions = parse_source(source).expect("should parse");

        let expected = FunctionDef {
            name: "is_odd".into(),
            parameters: vec![Parameter {
                type_token: token(TokenKind::Type, "int", 1),
                name: "n".into(),
            }],
            return_type: token(TokenKind::Type, "bool", 1),
            body: vec![
                TypeAssignment {
                    type_token: token(TokenKind::Type, "bool", 2),
                    id: token(TokenKind::Identifier, "result", 2),
                    expression: Box::new(
                        Value {
                            token: token(TokenKind::Bool, "false", 2),
                        }
                        .into(),
                    ),
                }
                .into(),
                If {
                    cmp: Compare {
                        left: token(TokenKind::Identifier, "n", 3),
                        operator: token(TokenKind::Compare, "notequals", 3),
                        right: token(TokenKind::IntLiteral, "0", 3),
                    },
                    body: vec![
                        IncDec {
                            left: token(TokenKind::Identifier, "n", 4),
                            operator: token(TokenKind::IncDec, "minmin", 4),
                        }
                        .into(),
                        Assignment {
                            id: token(TokenKind::Identifier, "result", 5),
                            expression: Box::new(
                                Call {
                                    function: token(TokenKind::Identifier, "is_even", 5),
                                    parameters: vec![token(TokenKind::Identifier, "n", 5)],
                                }
                                .into(),
                            ),
                        }
                        .into(),
                    ],
                    else_body: vec![],
                }
                .into(),
            ],
            return_statement: Value {
                token: token(TokenKind::Identifier, "result", 7),
            }
            .into(),
            return_line: 7,
        };

        assert_eq!(Some(&Function::User(expected)), functions.get("is_odd"));
    }

    #[test]
    fn test_builtins_are_registered_after_user_functions() {
        let functions = parse_source("int function id int n\nreturn n\n").expect("should parse");

        assert_eq!(Some(&Function::Builtin(Builtin::Print)), functions.get("print"));
        assert_eq!(Some(&Function::Builtin(Builtin::Size)), functions.get("size"));
        assert_eq!(Some(&Function::Builtin(Builtin::Input)), functions.get("input"));
        assert_eq!(4, functions.len());

        assert_eq!("int", Builtin::Print.return_type());
        assert_eq!("int", Builtin::Size.return_type());
        assert_eq!("string", Builtin::Input.return_type());
    }

    #[test]
    fn test_a_while_inside_a_for_does_not_affect_endfor_matching() {
        let source = "int function nested int n\n\
                      for int i is 0 while i lessthan n with i plusplus\n\
                      while n greaterthan 0\n\
                      n minmin\n\
                      endwhile\n\
                      endfor\n\
                      return n\n";

        let functions = parse_source(source).expect("should parse");

        let Some(Function::User(definition)) = functions.get("nested") else {
            panic!("expected a user function");
        };
        let [Node::Forloop(forloop)] = definition.body.as_slice() else {
            panic!("expected a single for loop, got {:?}", definition.body);
        };
        let [Node::While(whileloop)] = forloop.body.as_slice() else {
            panic!("expected a single while loop inside the for loop");
        };
        assert!(matches!(whileloop.body.as_slice(), [Node::IncDec(_)]));
    }

    #[test]
    fn test_else_belongs_to_the_nearest_unmatched_if() {
        let source = "int function pick int n\n\
                      if n lessthan 0\n\
                      if n lessthan -10\n\
                      call print \"very negative\"\n\
                      else\n\
                      call print \"slightly negative\"\n\
                      endif\n\
                      endif\n\
                      return 0\n";

        let functions = parse_source(source).expect("should parse");

        let Some(Function::User(definition)) = functions.get("pick") else {
            panic!("expected a user function");
        };
        let [Node::If(outer)] = definition.body.as_slice() else {
            panic!("expected a single if statement");
        };
        assert!(outer.else_body.is_empty());

        let [Node::If(inner)] = outer.body.as_slice() else {
            panic!("expected a nested if statement");
        };
        assert_eq!(1, inner.body.len());
        assert_eq!(1, inner.else_body.len());
    }

    #[test]
    fn test_if_without_else_has_an_empty_else_body() {
        let source = "int function check int n\n\
                      if n equals 0\n\
                      n plusplus\n\
                      endif\n\
                      return n\n";

        let functions = parse_source(source).expect("should parse");

        let Some(Function::User(definition)) = functions.get("check") else {
            panic!("expected a user function");
        };
        let [Node::If(if_statement)] = definition.body.as_slice() else {
            panic!("expected a single if statement");
        };
        assert!(if_statement.else_body.is_empty());
    }

    #[test]
    fn test_missing_return_is_reported() {
        let error = parse_source("int function id int n\n").expect_err("should fail");

        assert_eq!(ErrorKind::NoReturnFound, error.kind);
        assert_eq!("No return found in function id", error.message);
    }

    #[test]
    fn test_top_level_must_be_a_function_definition() {
        let error = parse_source("int x is 5\n").expect_err("should fail");

        assert_eq!(ErrorKind::Syntax, error.kind);
        assert_eq!("No valid function definition at line 1", error.message);
    }

    #[test]
    fn test_invalid_parameter_type_in_header() {
        let error = parse_source("int function id int n string\nreturn n\n")
            .expect_err("should fail");

        assert_eq!(ErrorKind::UnknownType, error.kind);
    }

    #[test]
    fn test_statement_unary_takes_a_full_expression() {
        let source = "int function grow int n\n\
                      n plusis call id n\n\
                      return n\n\
                      int function id int n\n\
                      return n\n";

        let functions = parse_source(source).expect("should parse");

        let Some(Function::User(definition)) = functions.get("grow") else {
            panic!("expected a user function");
        };
        let [Node::Unary(unary)] = definition.body.as_slice() else {
            panic!("expected a single unary statement");
        };
        assert!(matches!(*unary.right, Node::Call(_)));
    }

    #[test]
    fn test_expression_unary_requires_a_leaf() {
        let node = expression(&[
            token(TokenKind::Identifier, "x", 1),
            token(TokenKind::Unary, "plusis", 1),
            token(TokenKind::IntLiteral, "1", 1),
        ])
        .expect("should parse");

        let Node::Unary(unary) = node else {
            panic!("expected a unary node");
        };
        assert!(matches!(*unary.right, Node::Value(_)));
    }

    #[test]
    fn test_call_arguments_must_be_leaves() {
        let error = parse_source("int function main\ncall print plus\nreturn 0\n")
            .expect_err("should fail");

        assert_eq!(ErrorKind::Syntax, error.kind);
        assert_eq!("Invalid parameter: plus at line 2", error.message);
    }

    #[test]
    fn test_four_tokens_are_not_an_expression() {
        let error = expression(&[
            token(TokenKind::IntLiteral, "1", 1),
            token(TokenKind::Operator, "plus", 1),
            token(TokenKind::IntLiteral, "2", 1),
            token(TokenKind::IntLiteral, "3", 1),
        ])
        .expect_err("should fail");

        assert_eq!(ErrorKind::Syntax, error.kind);
        assert_eq!("Invalid expression at line 1", error.message);
    }
}
