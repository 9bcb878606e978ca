//! A tree-walking evaluator over the parsed function table. Every call gets
//! a fresh flat scope, types are enforced at runtime, and builtins dispatch
//! through the same table as user functions.

mod scope;
mod value;

pub use scope::*;
pub use value::*;

use std::io::{self, BufRead, Write};

use log::trace;

use crate::{
    error::{ErrorKind, WordyError, WordyResult},
    lexer::{Token, TokenKind},
    parser::ast::{
        Assignment, Builtin, Call, Compare, Forloop, Function, FunctionDef, Functions, If, IncDec,
        Node, Operator, TypeAssignment, Unary, While,
    },
};

/// The interpreter proper. Owns the immutable function table; all per-call
/// state lives in a [`Scope`] passed explicitly through execution.
pub struct Interpreter {
    functions: Functions,
}

impl Interpreter {
    pub fn new(functions: Functions) -> Self {
        Self { functions }
    }

    /// Call a function by name with already-converted argument values.
    pub fn call(&self, name: &str, arguments: Vec<Value>, call_line: usize) -> WordyResult<Value> {
        let Some(function) = self.functions.get(name) else {
            return Err(WordyError::new(
                ErrorKind::Runtime,
                format!("Unknown function call to {name} at line {call_line}"),
            ));
        };
        trace!("calling '{name}' with {count} arguments", count = arguments.len());

        match function {
            Function::Builtin(builtin) => self.call_builtin(*builtin, arguments),
            Function::User(definition) => self.call_user(definition, arguments, call_line),
        }
    }

    fn call_user(
        &self,
        function: &FunctionDef,
        arguments: Vec<Value>,
        call_line: usize,
    ) -> WordyResult<Value> {
        if arguments.len() != function.parameters.len() {
            return Err(WordyError::new(
                ErrorKind::Parameter,
                format!("Function call with mismatched parameter amount at line {call_line}"),
            ));
        }

        let mut scope = Scope::new();
        for (parameter, argument) in function.parameters.iter().zip(arguments) {
            let declared = parameter.type_token.lexeme.to_ascii_lowercase();
            if declared != argument.type_name() {
                return Err(WordyError::new(
                    ErrorKind::Parameter,
                    format!(
                        "Parameter type mismatch in function call to {name} at line {call_line}. Expected {expected} but got {got}",
                        name = function.name,
                        expected = parameter.type_token.lexeme,
                        got = argument.type_name()
                    ),
                ));
            }
            scope.set(&parameter.name, argument);
        }

        self.run_nodes(&mut scope, &function.body)
            .map_err(|error| error.in_call(&function.name, call_line))?;

        let value = self.eval(&scope, &function.return_statement)?;
        let declared = function.return_type.lexeme.to_ascii_lowercase();
        if value.type_name() != declared {
            return Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Function {name} called at line {call_line} did not return the defined type. Expected {expected} but got {got}",
                    name = function.name,
                    expected = function.return_type.lexeme,
                    got = value.type_name()
                ),
            ));
        }

        Ok(value)
    }

    fn call_builtin(&self, builtin: Builtin, arguments: Vec<Value>) -> WordyResult<Value> {
        match builtin {
            Builtin::Print => {
                let [argument] = arguments.as_slice() else {
                    return Err(WordyError::new(
                        ErrorKind::Parameter,
                        format!("Print function only takes 1 parameter, not {}", arguments.len()),
                    ));
                };
                match argument {
                    Value::Str(lexeme) => {
                        // Interpret \n, then drop the surrounding quotes.
                        let unescaped = lexeme.replace("\\n", "\n");
                        let payload = unescaped
                            .get(1..unescaped.len().saturating_sub(1))
                            .unwrap_or_default();
                        println!("{payload}");
                    }
                    other => println!("{other}"),
                }
                Ok(Value::Int(0))
            }
            Builtin::Size => {
                let [argument] = arguments.as_slice() else {
                    return Err(WordyError::new(
                        ErrorKind::Parameter,
                        format!("Size function only takes 1 parameter, not {}", arguments.len()),
                    ));
                };
                let Value::Str(lexeme) = argument else {
                    return Err(WordyError::new(
                        ErrorKind::Parameter,
                        format!(
                            "Size function only takes a string as parameter, not {got}",
                            got = argument.type_name()
                        ),
                    ));
                };

                Ok(Value::Int(unquote(lexeme).chars().count() as i64))
            }
            Builtin::Input => {
                let [argument] = arguments.as_slice() else {
                    return Err(WordyError::new(
                        ErrorKind::Parameter,
                        format!("Input function only takes 1 parameter, not {}", arguments.len()),
                    ));
                };
                let Value::Str(prompt) = argument else {
                    return Err(WordyError::new(
                        ErrorKind::Parameter,
                        format!(
                            "Input function only takes a string as parameter, not {got}",
                            got = argument.type_name()
                        ),
                    ));
                };

                print!("{}", unquote(prompt));
                io::stdout().flush().map_err(|error| {
                    WordyError::new(
                        ErrorKind::Runtime,
                        format!("Failed to flush standard output: {error}"),
                    )
                })?;

                let mut line = String::new();
                io::stdin().lock().read_line(&mut line).map_err(|error| {
                    WordyError::new(
                        ErrorKind::Runtime,
                        format!("Failed to read from standard input: {error}"),
                    )
                })?;
                let line = line.trim_end_matches(&['\n', '\r'][..]);

                Ok(Value::Str(format!("\"{line}\"")))
            }
        }
    }

    fn run_nodes(&self, scope: &mut Scope, nodes: &[Node]) -> WordyResult<()> {
        for node in nodes {
            self.run_node(scope, node)?;
        }
        Ok(())
    }

    fn run_node(&self, scope: &mut Scope, node: &Node) -> WordyResult<()> {
        match node {
            Node::TypeAssignment(assignment) => self.run_type_assignment(scope, assignment),
            Node::Assignment(assignment) => self.run_assignment(scope, assignment),
            Node::IncDec(incdec) => self.run_incdec(scope, incdec),
            Node::Unary(unary) => self.run_unary(scope, unary),
            Node::Call(call) => self.eval_call(scope, call).map(|_| ()),
            Node::Forloop(forloop) => self.run_forloop(scope, forloop),
            Node::While(whileloop) => self.run_whileloop(scope, whileloop),
            Node::If(if_statement) => self.run_if(scope, if_statement),
            other => Err(WordyError::new(
                ErrorKind::Runtime,
                format!("Node at line {line} is not a statement", line = other.line()),
            )),
        }
    }

    /// Declare a fresh variable. The name must be new and the expression must
    /// match the declared type.
    fn run_type_assignment(&self, scope: &mut Scope, node: &TypeAssignment) -> WordyResult<()> {
        let value = self.eval(scope, &node.expression)?;

        if scope.contains(&node.id.lexeme) {
            return Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Variable {name} already exists and cannot be redefined at line {line}",
                    name = node.id.lexeme,
                    line = node.id.line
                ),
            ));
        }
        let declared = node.type_token.lexeme.to_ascii_lowercase();
        if value.type_name() != declared {
            return Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Mismatched type assignment. Variable {name} expected type {expected} but the expression gave {got}",
                    name = node.id.lexeme,
                    expected = node.type_token.lexeme,
                    got = value.type_name()
                ),
            ));
        }

        scope.set(&node.id.lexeme, value);
        Ok(())
    }

    /// Reassign an existing variable without changing its type.
    fn run_assignment(&self, scope: &mut Scope, node: &Assignment) -> WordyResult<()> {
        let Some(current) = scope.get(&node.id.lexeme) else {
            return Err(undeclared(&node.id));
        };
        let declared = current.type_name();

        let value = self.eval(scope, &node.expression)?;
        if value.type_name() != declared {
            return Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Variable has type {declared}, but expression gave {got} at line {line}",
                    got = value.type_name(),
                    line = node.id.line
                ),
            ));
        }

        scope.set(&node.id.lexeme, value);
        Ok(())
    }

    fn run_incdec(&self, scope: &mut Scope, node: &IncDec) -> WordyResult<()> {
        let Some(current) = scope.get(&node.left.lexeme) else {
            return Err(undeclared(&node.left));
        };
        let Value::Int(current) = current else {
            return Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Variable of type {name} can not be incremented or decremented at line {line}",
                    name = current.type_name(),
                    line = node.left.line
                ),
            ));
        };

        let updated = if node.operator.lexeme.eq_ignore_ascii_case("plusplus") {
            current.wrapping_add(1)
        } else {
            current.wrapping_sub(1)
        };
        scope.set(&node.left.lexeme, Value::Int(updated));
        Ok(())
    }

    /// A compound assignment: both sides must share the variable's type, and
    /// the result replaces the variable's value.
    fn run_unary(&self, scope: &mut Scope, node: &Unary) -> WordyResult<()> {
        if node.left.kind != TokenKind::Identifier {
            return Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Unary expression needs an identifier at the left side, but got {kind} at line {line}",
                    kind = node.left.kind,
                    line = node.left.line
                ),
            ));
        }

        let right = self.eval(scope, &node.right)?;
        let Some(left) = scope.get(&node.left.lexeme) else {
            return Err(undeclared(&node.left));
        };
        if left.type_name() != right.type_name() {
            return Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Unary expression can only be done between the same type, but left is {left} and right is {right}",
                    left = left.type_name(),
                    right = right.type_name()
                ),
            ));
        }

        let operator = node.operator.lexeme.to_ascii_lowercase();
        let updated = match (left, &right) {
            (Value::Str(left), Value::Str(right)) => {
                if operator != "plusis" {
                    return Err(WordyError::new(
                        ErrorKind::Runtime,
                        format!(
                            "Invalid unary operator ({lexeme}) between two strings at line {line}",
                            lexeme = node.operator.lexeme,
                            line = node.operator.line
                        ),
                    ));
                }
                Value::Str(format!("{left}{right}"))
            }
            (Value::Int(left), Value::Int(right)) => {
                Value::Int(int_unary(*left, *right, &operator, &node.operator)?)
            }
            (Value::Bool(left), Value::Bool(right)) => match operator.as_str() {
                "andis" => Value::Bool(*left && *right),
                "oris" => Value::Bool(*left || *right),
                _ => {
                    return Err(WordyError::new(
                        ErrorKind::Runtime,
                        format!(
                            "Invalid unary operation ({lexeme}) on two bools at line {line}",
                            lexeme = node.operator.lexeme,
                            line = node.operator.line
                        ),
                    ))
                }
            },
            _ => unreachable!("type equality was checked above"),
        };

        scope.set(&node.left.lexeme, updated);
        Ok(())
    }

    fn run_forloop(&self, scope: &mut Scope, node: &Forloop) -> WordyResult<()> {
        self.run_type_assignment(scope, &node.start)?;

        loop {
            let condition = self.eval_compare(scope, &node.dowhile)?;
            if !condition.is_truthy() {
                return Ok(());
            }
            self.run_nodes(scope, &node.body)?;
            self.apply_increment(scope, &node.inc)?;
        }
    }

    /// The `with` step of a for loop: a compound assignment or an inc/dec.
    fn apply_increment(&self, scope: &mut Scope, inc: &Node) -> WordyResult<()> {
        match inc {
            Node::Unary(unary) => self.run_unary(scope, unary),
            Node::IncDec(incdec) => self.run_incdec(scope, incdec),
            other => Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Invalid with operation in for loop at line {line}, only unary operations, incrementing and decrementing are allowed",
                    line = other.line()
                ),
            )),
        }
    }

    fn run_whileloop(&self, scope: &mut Scope, node: &While) -> WordyResult<()> {
        let line = node.dowhile.line();
        loop {
            let condition = self.eval(scope, &node.dowhile)?;
            if !matches!(condition, Value::Bool(_) | Value::Int(_)) {
                return Err(WordyError::new(
                    ErrorKind::Runtime,
                    format!(
                        "While expression resulted in type \"{name}\" at line {line}. Valid types are only int and bool.",
                        name = condition.type_name()
                    ),
                ));
            }
            if !condition.is_truthy() {
                return Ok(());
            }
            self.run_nodes(scope, &node.body)?;
        }
    }

    fn run_if(&self, scope: &mut Scope, node: &If) -> WordyResult<()> {
        let condition = self.eval_compare(scope, &node.cmp)?;
        if condition.is_truthy() {
            self.run_nodes(scope, &node.body)
        } else {
            self.run_nodes(scope, &node.else_body)
        }
    }

    /// Evaluate an expression node to a runtime value.
    fn eval(&self, scope: &Scope, node: &Node) -> WordyResult<Value> {
        match node {
            Node::Value(value) => self.operand(scope, &value.token),
            Node::Operator(operator) => self.eval_operator(scope, operator),
            Node::Compare(compare) => self.eval_compare(scope, compare),
            Node::Call(call) => self.eval_call(scope, call),
            other => Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Node at line {line} cannot be evaluated as an expression",
                    line = other.line()
                ),
            )),
        }
    }

    /// Resolve a leaf token to a value: identifiers through the scope,
    /// literals through their token kind.
    fn operand(&self, scope: &Scope, token: &Token) -> WordyResult<Value> {
        match token.kind {
            TokenKind::Identifier => scope.get(&token.lexeme).cloned().ok_or_else(|| {
                WordyError::new(
                    ErrorKind::UnknownVariable,
                    format!(
                        "Variable {name} was not declared in the scope at line {line}",
                        name = token.lexeme,
                        line = token.line
                    ),
                )
            }),
            TokenKind::Bool => Ok(Value::Bool(token.lexeme.eq_ignore_ascii_case("true"))),
            TokenKind::IntLiteral => parse_int(&token.lexeme).map(Value::Int),
            TokenKind::StringLiteral => Ok(Value::Str(token.lexeme.clone())),
            _ => Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Literal couldn't be resolved. Gotten kind: {kind} with value {lexeme}",
                    kind = token.kind,
                    lexeme = token.lexeme
                ),
            )),
        }
    }

    fn eval_operator(&self, scope: &Scope, node: &Operator) -> WordyResult<Value> {
        let left = self.operand(scope, &node.left)?;
        let right = self.operand(scope, &node.right)?;
        let operator = node.operator.lexeme.to_ascii_lowercase();
        let line = node.operator.line;

        match (&left, &right) {
            (Value::Str(left), Value::Str(right)) => match operator.as_str() {
                "plus" => Ok(Value::Str(format!("{left}{right}"))),
                "equals" => Ok(Value::Bool(left == right)),
                "notequals" => Ok(Value::Bool(left != right)),
                _ => Err(WordyError::new(
                    ErrorKind::Runtime,
                    format!("Invalid string operator found: {operator} at line {line}"),
                )),
            },
            (Value::Int(left), Value::Int(right)) => int_operator(*left, *right, &operator, line),
            (Value::Bool(left), Value::Bool(right)) => match operator.as_str() {
                "equals" => Ok(Value::Bool(left == right)),
                "notequals" => Ok(Value::Bool(left != right)),
                "and" => Ok(Value::Bool(*left && *right)),
                "or" => Ok(Value::Bool(*left || *right)),
                _ => Err(WordyError::new(
                    ErrorKind::Runtime,
                    format!("Invalid bool operator found: {operator} at line {line}"),
                )),
            },
            _ => Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "At line {line} an operation between {left} and {right} is not allowed",
                    line = node.left.line,
                    left = left.type_name(),
                    right = right.type_name()
                ),
            )),
        }
    }

    fn eval_compare(&self, scope: &Scope, node: &Compare) -> WordyResult<Value> {
        let left = self.operand(scope, &node.left)?;
        let right = self.operand(scope, &node.right)?;

        if left.type_name() != right.type_name() {
            return Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Can't compare between different types (left: {left}, right: {right}) at line {line}",
                    left = left.type_name(),
                    right = right.type_name(),
                    line = node.operator.line
                ),
            ));
        }

        let operator = node.operator.lexeme.to_ascii_lowercase();
        match operator.as_str() {
            "equals" => Ok(Value::Bool(left == right)),
            "notequals" => Ok(Value::Bool(left != right)),
            "lessthan" | "greaterthan" | "lessthanequals" | "greaterthanequals" => {
                let (Value::Int(left), Value::Int(right)) = (&left, &right) else {
                    return Err(WordyError::new(
                        ErrorKind::Runtime,
                        format!(
                            "Invalid type ({name}) found for {operator} operation at line {line}",
                            name = left.type_name(),
                            line = node.left.line
                        ),
                    ));
                };
                let result = match operator.as_str() {
                    "lessthan" => left < right,
                    "greaterthan" => left > right,
                    "lessthanequals" => left <= right,
                    _ => left >= right,
                };
                Ok(Value::Bool(result))
            }
            _ => Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Invalid compare operator ({lexeme}) found at line {line}",
                    lexeme = node.operator.lexeme,
                    line = node.operator.line
                ),
            )),
        }
    }

    /// Resolve the argument tokens and dispatch through the function table.
    fn eval_call(&self, scope: &Scope, node: &Call) -> WordyResult<Value> {
        let mut arguments = Vec::with_capacity(node.parameters.len());
        for parameter in &node.parameters {
            arguments.push(self.operand(scope, parameter)?);
        }

        self.call(&node.function.lexeme, arguments, node.function.line)
    }
}

fn undeclared(token: &Token) -> WordyError {
    WordyError::new(
        ErrorKind::UnknownVariable,
        format!(
            "Variable {name} was not yet declared at line {line}",
            name = token.lexeme,
            line = token.line
        ),
    )
}

/// The eleven integer operators plus the six comparisons. Division and
/// modulo by zero fail instead of wrapping.
fn int_operator(left: i64, right: i64, operator: &str, line: usize) -> WordyResult<Value> {
    if right == 0 && (operator == "div" || operator == "mod") {
        return Err(WordyError::new(
            ErrorKind::Runtime,
            format!("Cannot divide by 0 at line {line}"),
        ));
    }

    let value = match operator {
        "plus" => Value::Int(left.wrapping_add(right)),
        "min" => Value::Int(left.wrapping_sub(right)),
        "mul" => Value::Int(left.wrapping_mul(right)),
        "div" => Value::Int(left.wrapping_div(right)),
        "mod" => Value::Int(left.wrapping_rem(right)),
        "and" => Value::Int(left & right),
        "or" => Value::Int(left | right),
        "xor" => Value::Int(left ^ right),
        "bic" => Value::Int(left & !right),
        "lshift" => Value::Int(left.wrapping_shl(right as u32)),
        "rshift" => Value::Int(left.wrapping_shr(right as u32)),
        "equals" => Value::Bool(left == right),
        "notequals" => Value::Bool(left != right),
        "lessthan" => Value::Bool(left < right),
        "greaterthan" => Value::Bool(left > right),
        "lessthanequals" => Value::Bool(left <= right),
        "greaterthanequals" => Value::Bool(left >= right),
        _ => {
            return Err(WordyError::new(
                ErrorKind::Runtime,
                format!("Invalid int operator found: {operator} at line {line}"),
            ))
        }
    };

    Ok(value)
}

/// The twelve compound-assignment operators on integers. `notis` ignores the
/// left side and writes the complement of the right.
fn int_unary(left: i64, right: i64, operator: &str, token: &Token) -> WordyResult<i64> {
    if right == 0 && (operator == "divis" || operator == "modis") {
        return Err(WordyError::new(
            ErrorKind::Runtime,
            format!("Cannot divide by 0 at line {line}", line = token.line),
        ));
    }

    let result = match operator {
        "plusis" => left.wrapping_add(right),
        "minis" => left.wrapping_sub(right),
        "mulis" => left.wrapping_mul(right),
        "divis" => left.wrapping_div(right),
        "modis" => left.wrapping_rem(right),
        "andis" => left & right,
        "oris" => left | right,
        "notis" => !right,
        "xoris" => left ^ right,
        "bicis" => left & !right,
        "lshiftis" => left.wrapping_shl(right as u32),
        "rshiftis" => left.wrapping_shr(right as u32),
        _ => {
            return Err(WordyError::new(
                ErrorKind::Runtime,
                format!(
                    "Invalid unary operator ({lexeme}) between two ints at line {line}",
                    lexeme = token.lexeme,
                    line = token.line
                ),
            ))
        }
    };

    Ok(result)
}
