use thiserror::Error;

/// Grammar-level failures, attached to a source line by [`Error::Syntax`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Expecting opcode")]
    ExpectingOpcode,

    #[error("Expecting ',' separating operands")]
    ExpectingSeparator,

    #[error("Expecting closing bracket ']' before end of operand")]
    ExpectingCloseBracket,

    #[error("Expecting name after label header")]
    ExpectingLabelName,

    #[error("Expecting register after '+' addition")]
    ExpectingRegister,

    #[error("Invalid expression")]
    InvalidExpression,

    #[error("Invalid operand")]
    InvalidOperand,

    #[error("Invalid data value")]
    InvalidDataValue,

    #[error("Cannot parse `{0}` as a 16-bit value")]
    InvalidNumber(String),

    #[error("Multiple instantiations of label `{0}`")]
    RedefinedLabel(String),
}

/// Assembly failure. Every kind is fatal to the current attempt; the parser
/// state is invalid afterwards until `reset()`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("line: {line}: {kind}")]
    Syntax { line: usize, kind: SyntaxError },

    #[error(transparent)]
    Undeclared(#[from] arch::labels::UndeclaredLabel),

    #[error("{0} (source not found)")]
    SourceNotFound(String, #[source] std::io::Error),
}

impl Error {
    pub fn at(line: usize, kind: SyntaxError) -> Error {
        Error::Syntax { line, kind }
    }
}
