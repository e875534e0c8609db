use std::fmt;

use crate::token::{Token, Type};

/// A fully-formatted diagnostic, ready to be written to stderr by the driver.
///
/// `Compile` covers lex/parse/resolve errors (§6 format `[line L] Error<WHERE>:
/// MESSAGE`); `Runtime` covers the single runtime error that can abort an
/// interpret cycle (§6 format `Error: MESSAGE\n[line L]\n`).
#[derive(Debug, Clone)]
pub enum Diagnostic {
    Compile { line: usize, r#where: String, message: String },
    Runtime { line: usize, message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Compile { line, r#where, message } => {
                write!(f, "[line {line}] Error{where}: {message}")
            }
            Diagnostic::Runtime { line, message } => {
                write!(f, "Error: {message}\n[line {line}]")
            }
        }
    }
}

fn token_where(token: &Token) -> String {
    if token.kind == Type::Eof {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

/// Raised by the scanner. Recoverable; scanning continues after one is produced.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl ScanError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::Compile { line: self.line, r#where: String::new(), message: self.message.clone() }
    }
}

/// Raised by the parser. Recoverable via `synchronize`.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::Compile {
            line: self.token.line,
            r#where: token_where(&self.token),
            message: self.message.clone(),
        }
    }
}

/// Raised by the resolver. Recoverable; resolution continues after one is produced.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl ResolveError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::Compile {
            line: self.token.line,
            r#where: token_where(&self.token),
            message: self.message.clone(),
        }
    }
}

/// Raised by the interpreter. Unwinds the entire interpret cycle.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::Runtime { line: self.token.line, message: self.message.clone() }
    }
}
