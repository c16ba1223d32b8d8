use std::error::Error as StdError;
use std::fmt;

use ippvm::Fault;

/// A diagnostic raised while turning the XML document into a program.
#[derive(Debug)]
pub enum LoadError {
    /// The document is not well-formed XML (code 31).
    Xml(String),
    /// The document is XML but violates the program format (code 32).
    Structure(String),
    /// A fault raised while assembling the program, e.g. a duplicate label.
    Program(Fault),
}

impl LoadError {
    /// The process exit status this error terminates with.
    pub fn code(&self) -> i32 {
        match self {
            LoadError::Xml(_) => 31,
            LoadError::Structure(_) => 32,
            LoadError::Program(fault) => fault.code(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::Xml(message) => write!(f, "Malformed XML: {}", message),
            LoadError::Structure(message) => write!(f, "Invalid program: {}", message),
            LoadError::Program(fault) => fault.fmt(f),
        }
    }
}

impl StdError for LoadError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            LoadError::Program(fault) => Some(fault),
            _ => None,
        }
    }
}

impl From<Fault> for LoadError {
    fn from(fault: Fault) -> LoadError {
        LoadError::Program(fault)
    }
}
