//! The error model shared by every stage of the pipeline. Each stage returns
//! a [`WordyResult`], and the first failing stage short-circuits the run.

use std::{error::Error, fmt::Display};

/// The closed set of failure classes an interpreter run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    Syntax,
    Statement,
    UnknownType,
    InvalidName,
    NoReturnFound,
    Parameter,
    UnknownVariable,
    Runtime,
}

impl ErrorKind {
    /// The wire name of this kind, as it appears on standard output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::FileNotFound => "FILE_NOT_FOUND_ERROR",
            ErrorKind::Syntax => "SYNTAX_ERROR",
            ErrorKind::Statement => "STATEMENT_ERROR",
            ErrorKind::UnknownType => "UNKNOW_TYPE_ERROR",
            ErrorKind::InvalidName => "INVALID_NAME_ERROR",
            ErrorKind::NoReturnFound => "NO_RETURN_FOUND_ERROR",
            ErrorKind::Parameter => "PARAMETER_ERROR",
            ErrorKind::UnknownVariable => "UNKNOW_VARIABLE_ERROR",
            ErrorKind::Runtime => "RUNTIME_ERROR",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error kind plus a human-readable message carrying line numbers
/// wherever they are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordyError {
    pub kind: ErrorKind,
    pub message: String,
}

pub type WordyResult<T> = Result<T, WordyError>;

impl WordyError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Prefix the message with a call-site annotation. Applied to every error
    /// escaping a function body, so nested failures keep a simple call trace.
    pub fn in_call(mut self, function: &str, line: usize) -> Self {
        self.message = format!(
            "Error while executing {function}. Function called at line: {line}\n{message}",
            message = self.message
        );
        self
    }
}

impl Display for WordyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{kind}:\n{message}", kind = self.kind, message = self.message)
    }
}

impl Error for WordyError {}
