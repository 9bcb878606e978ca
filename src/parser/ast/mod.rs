//! The AST produced by the parser. Expression operands are always leaf
//! tokens; composition happens through named intermediate variables, never
//! through nested expressions.

mod expression;
mod function;
mod statement;

pub use expression::*;
pub use function::*;
pub use statement::*;

/// Every statement and expression shape the language can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Value(Value),
    Operator(Operator),
    Compare(Compare),
    Unary(Unary),
    IncDec(IncDec),
    Call(Call),
    TypeAssignment(TypeAssignment),
    Assignment(Assignment),
    Forloop(Forloop),
    While(While),
    If(If),
}

impl Node {
    /// The source line this node originates from, taken from its leading
    /// token. Used for error messages.
    pub fn line(&self) -> usize {
        match self {
            Node::Value(value) => value.token.line,
            Node::Operator(operator) => operator.left.line,
            Node::Compare(compare) => compare.left.line,
            Node::Unary(unary) => unary.left.line,
            Node::IncDec(incdec) => incdec.left.line,
            Node::Call(call) => call.function.line,
            Node::TypeAssignment(assignment) => assignment.type_token.line,
            Node::Assignment(assignment) => assignment.id.line,
            Node::Forloop(forloop) => forloop.start.type_token.line,
            Node::While(whileloop) => whileloop.dowhile.line(),
            Node::If(if_statement) => if_statement.cmp.left.line,
        }
    }
}
